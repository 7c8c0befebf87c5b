//! Stress level classification over free-text survey answers, with PDF
//! reporting and an HTTP surface.

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod telemetry;
