//! HTTP request handlers

pub mod common;
pub mod coordinates;
pub mod feedback;
pub mod health;
pub mod weather;
