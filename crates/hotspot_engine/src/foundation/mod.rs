//! Foundation module - Core utilities and types
//!
//! Fundamental pieces used throughout the crate:
//! - Math types and rotation helpers
//! - Logging setup

pub mod math;
pub mod logging;
