//! Integration tests module
//!
//! End-to-end tests for the forumscan pipeline:
//! - listing → thread crawl → scoring → sorted report
//! - concurrency bound across both fan-out levels
//! - degradation and error scenarios

pub mod error_scenarios;
pub mod pipeline_test;
