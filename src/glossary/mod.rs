//! Glossary module - Turn marked terms into glossary notes
//!
//! Terms are marked in documents as `[[¤term]]`. Processing a document creates
//! one note per term under the glossary folder and rewrites each processed
//! marker to a plain `[[term]]` link.

pub mod api;
pub mod marker;
pub mod note;
pub mod process;
pub mod scan;
