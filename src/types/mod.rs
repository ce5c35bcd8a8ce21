//! Type definitions for activity-heatmap

mod error;
mod primitive;

pub use error::*;
pub use primitive::*;
