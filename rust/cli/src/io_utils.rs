//! File helpers for command output and checkpoints.

use std::path::Path;

use serde_json::Value;

/// Create the parent directory of `path` if it does not exist yet.
///
/// ```rust,no_run
/// use std::path::Path;
/// # use ridesim_cli::io_utils::ensure_parent_dir;
///
/// let path = Path::new("output/runs/sessions.jsonl");
/// ensure_parent_dir(path).unwrap();
/// ```
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Read a JSON document, stripping a UTF-8 BOM if an editor added one.
pub fn read_json(path: &Path) -> Result<Value, String> {
    let mut text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    strip_utf8_bom(&mut text);
    serde_json::from_str(&text).map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json(path: &Path, value: &Value) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    std::fs::write(path, text + "\n")
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
