// src/math/mod.rs

pub mod error;
pub mod membership;

pub use error::MathError;
pub use membership::fuzzify;
pub use membership::membership;
pub use membership::MembershipShape;
pub use membership::Universe;
