//! JSON file storage for the task list
//!
//! The file on disk is the sole owner of state: every operation performs
//! a full load -> mutate -> persist cycle, so the server holds no
//! authoritative copy between requests.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::types::{Task, TaskList};

/// File-backed storage for a single task list
///
/// An internal mutex serializes the load -> mutate -> persist cycle so
/// two concurrent mutating requests cannot lose an update.
pub struct TodoStorage {
    /// Path to the todo JSON file
    path: PathBuf,
    /// Guards every load/mutate/persist cycle
    lock: Mutex<()>,
}

impl TodoStorage {
    /// Create storage backed by the given file path
    ///
    /// The file does not need to exist yet; a missing file reads as an
    /// empty list.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get all tasks in insertion order
    pub async fn list_tasks(&self) -> Result<TaskList> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Get the task at the given 1-based position
    pub async fn get_task(&self, position: usize) -> Result<Task> {
        let _guard = self.lock.lock().await;
        let list = self.load().await?;
        Ok(list.get(position)?.clone())
    }

    /// Append a new task and persist the list
    pub async fn add_task(&self, description: &str) -> Result<Task> {
        let _guard = self.lock.lock().await;

        let mut list = self.load().await?;
        let task = list.add(description)?;
        self.save(&list).await?;

        tracing::debug!(position = task.position, "added task");
        Ok(task)
    }

    /// Mark the task at the given position complete and persist the list
    pub async fn complete_task(&self, position: usize) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut list = self.load().await?;
        list.complete(position)?;
        self.save(&list).await?;

        tracing::debug!(position, "marked task complete");
        Ok(())
    }

    /// Delete the task at the given position and persist the list
    ///
    /// Remaining tasks are renumbered so positions stay dense.
    pub async fn delete_task(&self, position: usize) -> Result<Task> {
        let _guard = self.lock.lock().await;

        let mut list = self.load().await?;
        let task = list.delete(position)?;
        self.save(&list).await?;

        tracing::debug!(position, "deleted task");
        Ok(task)
    }

    /// Load the task list from disk
    ///
    /// A missing or empty file yields an empty list so a fresh server
    /// bootstraps cleanly. Positions are re-derived after parsing.
    async fn load(&self) -> Result<TaskList> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(TaskList::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(TaskList::new());
        }

        let mut list: TaskList = serde_json::from_str(&content)?;
        list.renumber();

        Ok(list)
    }

    /// Persist the task list
    ///
    /// Writes to a temp file in the same directory and renames it over
    /// the target, so a crash mid-write cannot corrupt the file.
    async fn save(&self, list: &TaskList) -> Result<()> {
        let content = serde_json::to_string_pretty(list)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}
