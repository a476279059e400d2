//! Confetti Core - Foundational types for the Confetti particle effect
//!
//! This crate provides the types that all other Confetti crates depend on:
//! - `Vec2`, `Size` - Surface-space types
//! - `Color` - RGBA color with CSS-style parsing
//! - Error types and Result alias

mod error;
mod types;

pub use error::{ConfettiError, Result};
pub use types::{Color, Size, Vec2};
