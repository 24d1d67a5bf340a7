// src/services/mod.rs

pub mod progress;
