//! Business logic services.

pub mod charts;
pub mod coercion;
pub mod dashboard;
pub mod export;
pub mod report;
pub mod survey;
