pub mod capture;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod visualization;

pub use error::{MeasureError, Result};
