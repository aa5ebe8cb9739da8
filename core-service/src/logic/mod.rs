//! Logic Module - Business Logic & Engines
//!
//! ## Layout
//! - `identity/` - identity (source IP) column resolution
//! - `model/` - classifier backends (linear JSON, ONNX)
//! - `pipeline/` - chunked ingestion and inference
//! - `dataset/` - staged result set storage
//! - `report/` - block list materialization
//! - `service` - classify / report operations with run admission

pub mod config;
pub mod dataset;
pub mod identity;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod service;
pub mod threat;
