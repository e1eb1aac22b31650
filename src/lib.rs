// src/lib.rs

//! Museo Reina Sofía exhibitions feed generator library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
