//! Task description files.

use framewise_error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A task description loaded from `<tasks_dir>/<file>`.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct TaskDescription {
    /// Location the task was read from
    path: PathBuf,
    /// Trimmed task text
    text: String,
}

impl TaskDescription {
    /// Read `file` relative to `tasks_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    pub async fn load(tasks_dir: &Path, file: &Path) -> Result<Self, ConfigError> {
        let path = tasks_dir.join(file);
        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ConfigError::new(format!("Task file '{}' not readable: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), chars = text.len(), "Loaded task description");
        Ok(Self {
            path,
            text: text.trim().to_string(),
        })
    }
}
