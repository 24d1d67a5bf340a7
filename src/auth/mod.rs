// src/auth/mod.rs

pub mod permissions;
pub mod route_control;
