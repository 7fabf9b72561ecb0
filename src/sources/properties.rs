//! Line-oriented `key=value` properties parsing.

use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Parse `key=value` properties from a reader.
///
/// One property per line; the first `=` splits key from value and both sides
/// are trimmed. Blank lines and lines starting with `#` or `!` are skipped.
/// A line without `=` yields the whole trimmed line as a key with an empty
/// value, matching the common properties-file behavior.
///
/// # Errors
///
/// Returns an error if reading fails; content itself never fails to parse.
pub fn parse_properties(reader: impl BufRead) -> Result<HashMap<String, String>> {
    let mut properties = HashMap::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        match trimmed.split_once('=') {
            Some((key, value)) => {
                properties.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                properties.insert(trimmed.to_string(), String::new());
            }
        }
    }
    Ok(properties)
}

/// Load and parse a properties file from the filesystem.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] with path context if the file does not
/// exist, or an IO error if reading fails.
pub fn load_properties_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(ConfigError::Load(format!(
            "Properties file not found: {}",
            path.display()
        )));
    }
    let file = std::fs::File::open(path)?;
    parse_properties(std::io::BufReader::new(file))
}
