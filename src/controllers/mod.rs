// src/controllers/mod.rs

pub mod fuzzy;
pub mod pid;

pub use fuzzy::fuzzy_step;
pub use fuzzy::RuleBase;
pub use pid::pid_step;
pub use pid::PidState;
