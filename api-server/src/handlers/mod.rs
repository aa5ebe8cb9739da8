//! HTTP handlers

pub mod block;
pub mod health;
pub mod predict;
