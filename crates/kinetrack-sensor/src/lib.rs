//! # Kinetrack-Sensor
//!
//! Sensor-facing boundary for the Kinetrack engine: asynchronous
//! body-frame sources and the 3D-to-screen projection mapper.

pub mod projection;
pub mod source;

pub use projection::{joint_to_screen, CoordinateMapper, LinearMapper};
pub use source::{BodyFrameSource, ChannelSource, FrameSender, ScriptedSource, SourceConfig};
