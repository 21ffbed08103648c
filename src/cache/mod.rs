//! Cache module - Persistent term → definition cache
//!
//! Provides:
//! - The in-memory definition map with explicit load/save
//! - The `cache` subcommands (list, get, clear)

pub mod commands;
pub mod store;

pub use store::DefinitionCache;
