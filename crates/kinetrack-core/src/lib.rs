//! # Kinetrack-Core
//!
//! Core types for the Kinetrack motion sampling and gesture
//! classification engine: tracked-body data model, screen-space
//! geometry, the gesture record and log, and the error taxonomy.

pub mod error;
pub mod gesture;
pub mod types;

pub use error::{Error, Result};
pub use gesture::*;
pub use types::*;
