pub mod calibration;
pub mod config;
pub mod geometry;
pub mod metrics;
pub mod pose;
pub mod report;
