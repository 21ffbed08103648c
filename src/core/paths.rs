//! Path normalization utilities
//!
//! Vault paths are always relative to the vault root and use '/' as separator.

use std::path::{Component, Path, PathBuf};

/// Cache file, stored in the vault root
pub const CACHE_FILE: &str = "ai-glossary-cache.json";

/// Directory holding the persisted settings
pub const SETTINGS_DIR: &str = ".ai-glossary";

/// Settings file name inside [`SETTINGS_DIR`]
pub const SETTINGS_FILE: &str = "settings.json";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Join a vault-relative path onto the vault root
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    base.join(relative.replace('/', std::path::MAIN_SEPARATOR_STR))
}

/// Check that a vault path cannot escape the vault root
pub fn is_safe_relative(path: &str) -> bool {
    let path = Path::new(path);
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Check that a term can be used as a note file name
pub fn is_valid_note_name(term: &str) -> bool {
    !term.is_empty()
        && term != "."
        && term != ".."
        && !term.contains(['/', '\\'])
        && !term.chars().any(char::is_control)
}

/// Vault-relative path of the glossary note for `term`
pub fn note_path(folder: &str, term: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        format!("{}.md", term)
    } else {
        format!("{}/{}.md", folder, term)
    }
}

/// Vault-relative path of the settings file
pub fn settings_path() -> String {
    format!("{}/{}", SETTINGS_DIR, SETTINGS_FILE)
}
