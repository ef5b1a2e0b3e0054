//! Step file loading.

use crate::config::schema::StepFile;
use crate::error::{Result, RunbookError};
use std::fs;
use std::path::Path;

/// Load and parse a step file.
///
/// # Errors
///
/// `ConfigNotFound` when the file does not exist, `ConfigParseError` when it
/// is not a valid step file.
pub fn load_step_file(path: &Path) -> Result<StepFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RunbookError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RunbookError::Io(e)
        }
    })?;

    parse_step_file(&content, path)
}

/// Parse YAML content into a [`StepFile`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_step_file(content: &str, source_path: &Path) -> Result<StepFile> {
    serde_yaml::from_str(content).map_err(|e| RunbookError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
