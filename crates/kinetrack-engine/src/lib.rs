//! # Kinetrack-Engine
//!
//! The motion sampling and gesture classification engine: focus
//! selection over tracked bodies, two-phase hand-position sampling,
//! the fixed-interval gesture clock, and the swipe classifier.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod focus;
pub mod sampler;

pub use classifier::GestureClassifier;
pub use config::EngineConfig;
pub use engine::{EngineSnapshot, GestureEngine};
pub use focus::select_focus;
pub use sampler::{HandWindow, HandWindows, MotionState};
