use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::LoadError;

/// SystemJS-style loader tag some codebases append to JSON module paths.
const LOADER_SUFFIX: &str = "!json";

/// Drops a trailing `!json` in any letter case, as the default matcher accepts.
fn strip_loader_suffix(module: &str) -> &str {
    let Some(split) = module.len().checked_sub(LOADER_SUFFIX.len()) else {
        return module;
    };
    match module.get(split..) {
        Some(tail) if tail.eq_ignore_ascii_case(LOADER_SUFFIX) => &module[..split],
        _ => module,
    }
}

/// Where `module` points, given the file that references it.
///
/// Without a known file location the module string is taken verbatim, which
/// makes it relative to the working directory.
pub fn resolve(module: &str, current_file: Option<&Path>) -> PathBuf {
    let module = strip_loader_suffix(module);
    match current_file {
        None => PathBuf::from(module),
        Some(file) => file
            .parent()
            .map(|dir| dir.join(module))
            .unwrap_or_else(|| PathBuf::from(module)),
    }
}

/// Reads and parses the JSON resource behind `module`.
///
/// Nothing is cached: every call hits the file system, so edits to the
/// resource show up on the next transform.
pub fn load(module: &str, current_file: Option<&Path>) -> Result<Value, LoadError> {
    let path = resolve(module, current_file);
    tracing::trace!(module, path = %path.display(), "reading JSON module");

    let content = std::fs::read_to_string(&path).map_err(|source| LoadError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse { path, source })
}
