//! HTTP handlers for generated resources.

pub mod entity;
pub use entity::*;
