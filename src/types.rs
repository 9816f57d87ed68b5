//! Task and task list model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};

/// A single to-do entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// 1-based position within the list. Re-derived from slice order on
    /// every load and mutation, never trusted from a persisted file.
    #[serde(default)]
    pub position: usize,

    /// Free-form task description
    pub task: String,

    /// Whether the task has been completed
    pub done: bool,

    /// When the task was created. Set once, immutable thereafter.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// When the task was completed, if it has been
    #[serde(rename = "completedAt", default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new incomplete task with the given description
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            position: 0,
            task: task.into(),
            done: false,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// Ordered collection of tasks
///
/// Insertion order is canonical and determines position numbering: the
/// Nth task (1-indexed) always has `position == N`. The persisted form
/// is a bare JSON array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty task list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks in the list
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list has no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in insertion order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a new incomplete task and return a copy of it
    pub fn add(&mut self, description: &str) -> Result<Task> {
        if description.trim().is_empty() {
            return Err(TodoError::EmptyTask);
        }

        let mut task = Task::new(description);
        task.position = self.tasks.len() + 1;
        self.tasks.push(task.clone());

        Ok(task)
    }

    /// Return the task at the given 1-based position
    pub fn get(&self, position: usize) -> Result<&Task> {
        self.check_range(position)?;
        Ok(&self.tasks[position - 1])
    }

    /// Mark the task at the given 1-based position as complete
    pub fn complete(&mut self, position: usize) -> Result<()> {
        self.check_range(position)?;

        let task = &mut self.tasks[position - 1];
        task.done = true;
        task.completed_at = Some(Utc::now());

        Ok(())
    }

    /// Remove the task at the given 1-based position
    ///
    /// Every task after it shifts down by one; positions stay dense.
    pub fn delete(&mut self, position: usize) -> Result<Task> {
        self.check_range(position)?;

        let task = self.tasks.remove(position - 1);
        self.renumber();

        Ok(task)
    }

    /// Re-derive dense 1-based positions from slice order
    pub fn renumber(&mut self) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.position = index + 1;
        }
    }

    fn check_range(&self, position: usize) -> Result<()> {
        if position == 0 || position > self.tasks.len() {
            return Err(TodoError::TaskNotFound { position });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> TaskList {
        let mut list = TaskList::new();
        for i in 1..=n {
            list.add(&format!("Task Number {i}.")).unwrap();
        }
        list
    }

    #[test]
    fn test_add_assigns_dense_positions() {
        let list = list_of(3);

        assert_eq!(list.len(), 3);
        for (index, task) in list.all().iter().enumerate() {
            assert_eq!(task.position, index + 1);
            assert_eq!(task.task, format!("Task Number {}.", index + 1));
            assert!(!task.done);
            assert!(task.completed_at.is_none());
        }
    }

    #[test]
    fn test_add_rejects_empty_description() {
        let mut list = TaskList::new();

        assert!(matches!(list.add(""), Err(TodoError::EmptyTask)));
        assert!(matches!(list.add("   "), Err(TodoError::EmptyTask)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_get_returns_task_at_position() {
        let list = list_of(2);

        assert_eq!(list.get(2).unwrap().task, "Task Number 2.");
        assert!(matches!(
            list.get(3),
            Err(TodoError::TaskNotFound { position: 3 })
        ));
        assert!(matches!(
            list.get(0),
            Err(TodoError::TaskNotFound { position: 0 })
        ));
    }

    #[test]
    fn test_complete_marks_only_target() {
        let mut list = list_of(3);

        list.complete(2).unwrap();

        assert!(!list.get(1).unwrap().done);
        assert!(list.get(2).unwrap().done);
        assert!(list.get(2).unwrap().completed_at.is_some());
        assert!(!list.get(3).unwrap().done);
    }

    #[test]
    fn test_complete_out_of_range() {
        let mut list = list_of(2);

        assert!(matches!(
            list.complete(500),
            Err(TodoError::TaskNotFound { position: 500 })
        ));
    }

    #[test]
    fn test_delete_renumbers_remaining_tasks() {
        let mut list = list_of(3);

        let removed = list.delete(1).unwrap();
        assert_eq!(removed.task, "Task Number 1.");

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().task, "Task Number 2.");
        assert_eq!(list.get(1).unwrap().position, 1);
        assert_eq!(list.get(2).unwrap().task, "Task Number 3.");
        assert_eq!(list.get(2).unwrap().position, 2);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut list = list_of(1);

        assert!(matches!(
            list.delete(2),
            Err(TodoError::TaskNotFound { position: 2 })
        ));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_renumber_repairs_drifted_positions() {
        let mut list = list_of(2);

        // Simulate stale positions from an old persisted file
        let json = serde_json::to_string(&list).unwrap();
        let json = json.replace("\"position\":1", "\"position\":9");
        let mut reloaded: TaskList = serde_json::from_str(&json).unwrap();

        reloaded.renumber();
        assert_eq!(reloaded.get(1).unwrap().position, 1);
        assert_eq!(reloaded.get(2).unwrap().position, 2);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let list = list_of(1);

        let value = serde_json::to_value(&list).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["task"], "Task Number 1.");
        assert_eq!(value[0]["done"], false);
        assert!(value[0]["createdAt"].is_string());
    }
}
