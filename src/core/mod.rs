//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Vault path normalization and validation
//! - User-facing notices

pub mod model;
pub mod notice;
pub mod paths;
pub mod render;
