// src/loaders/mod.rs
pub mod artifacts;
pub mod locations;

pub use artifacts::load_artifact_data;
pub use locations::load_location_notes;
