//! Where outstanding tasks come from.

use std::sync::Arc;

use async_trait::async_trait;
use rde_core::{Task, TaskId};
use tokio::sync::RwLock;

/// Supplies the tasks the orchestrator should consider.
///
/// Task storage lives outside the engine; implement this over whatever
/// store the application uses.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Tasks that are not yet completed.
    async fn incomplete_tasks(&self) -> Vec<Task>;
}

#[async_trait]
impl TaskSource for Vec<Task> {
    async fn incomplete_tasks(&self) -> Vec<Task> {
        self.iter().filter(|t| !t.completed).cloned().collect()
    }
}

#[async_trait]
impl<T: TaskSource + ?Sized> TaskSource for Arc<T> {
    async fn incomplete_tasks(&self) -> Vec<Task> {
        (**self).incomplete_tasks().await
    }
}

/// A mutable task list held in memory.
#[derive(Debug, Default)]
pub struct InMemoryTaskSource {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskSource {
    /// Create a source over the given tasks.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }

    /// Replace the whole list.
    pub async fn replace(&self, tasks: Vec<Task>) {
        *self.tasks.write().await = tasks;
    }

    /// Add a task.
    pub async fn push(&self, task: Task) {
        self.tasks.write().await.push(task);
    }

    /// Mark a task completed. Returns false if it is unknown.
    pub async fn mark_completed(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.write().await;
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = true;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl TaskSource for InMemoryTaskSource {
    async fn incomplete_tasks(&self) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        tasks.iter().filter(|t| !t.completed).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_vec_source_filters_completed() {
        let mut done = Task::new("Done", "misc");
        done.completed = true;
        let open = Task::new("Open", "misc");

        let tasks = vec![done, open.clone()].incomplete_tasks().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, open.id);
    }

    #[tokio::test]
    async fn test_in_memory_source() {
        let first = Task::new("First", "misc");
        let source = InMemoryTaskSource::new(vec![first.clone()]);
        source.push(Task::new("Second", "misc")).await;
        assert_eq!(source.incomplete_tasks().await.len(), 2);

        assert!(source.mark_completed(first.id).await);
        assert!(!source.mark_completed(TaskId::new()).await);
        assert_eq!(source.incomplete_tasks().await.len(), 1);

        source.replace(Vec::new()).await;
        assert!(source.incomplete_tasks().await.is_empty());
    }

    #[tokio::test]
    async fn test_arc_source_delegates() {
        let source: Arc<InMemoryTaskSource> = Arc::new(InMemoryTaskSource::new(vec![Task::new("A", "misc")]));
        assert_eq!(source.incomplete_tasks().await.len(), 1);
    }
}
