//! Workflow file loading.

use std::fs;
use std::path::Path;

use crate::config::schema::WorkflowFile;
use crate::error::{FlowError, Result};

/// Load and parse a workflow file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_workflow_file(path: &Path) -> Result<WorkflowFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FlowError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FlowError::Io(e)
        }
    })?;

    parse_workflow(&content, path)
}

/// Parse YAML content into a [`WorkflowFile`].
///
/// `source_path` is only used for error reporting.
pub fn parse_workflow(content: &str, source_path: &Path) -> Result<WorkflowFile> {
    serde_yaml::from_str(content).map_err(|e| FlowError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
