// src/models/mod.rs

pub mod vehicle;

pub use vehicle::PlantState;
pub use vehicle::VehicleParameters;
pub use vehicle::VehicleVariant;
