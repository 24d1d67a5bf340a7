// src/handlers/mod.rs

pub mod activities;
pub mod classes;
pub mod health;
pub mod permissions;
