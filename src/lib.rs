// lib.rs - fairness benchmarking for AFib predictions
pub mod common;
pub mod data;
pub mod training;
pub mod evaluation;
pub mod assessment;
pub mod api;

pub use common::{BenchCode, BenchError, BenchResult};
