//! Configuration and request/response models shared by every layer.

pub mod config;
pub mod models;
