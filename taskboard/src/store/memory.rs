//! In-memory task item store for the legacy routes.
//!
//! State lives for the lifetime of the process and every operation runs under
//! one mutex. Reads never materialize `status`: the legacy contract mirrors the
//! entity as stored.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::instrument;

use super::{StoreError, TaskItemStore};
use crate::domain::{TaskItem, TaskItemId};

#[derive(Debug)]
struct MemoryState {
    items: Vec<TaskItem>,
    next_id: i64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

/// Task item store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTaskItemStore {
    state: Mutex<MemoryState>,
}

impl InMemoryTaskItemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Whether the store holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskItemStore for InMemoryTaskItemStore {
    async fn list(&self) -> Result<Vec<TaskItem>, StoreError> {
        Ok(self.state.lock().items.clone())
    }

    async fn get(&self, id: TaskItemId) -> Result<Option<TaskItem>, StoreError> {
        Ok(self
            .state
            .lock()
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned())
    }

    #[instrument(skip(self, item))]
    async fn create(&self, item: &TaskItem) -> Result<TaskItem, StoreError> {
        let mut state = self.state.lock();
        let stored = TaskItem {
            id: TaskItemId::new(state.next_id),
            ..item.detached()
        };
        state.next_id += 1;
        state.items.push(stored.clone());
        Ok(stored)
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn update(&self, item: &TaskItem) -> Result<TaskItem, StoreError> {
        let mut state = self.state.lock();
        let slot = state
            .items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or(StoreError::NotFound {
                entity: "TaskItem",
                id: item.id.get(),
            })?;
        *slot = item.detached();
        Ok(slot.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: TaskItemId) -> Result<bool, StoreError> {
        let mut state = self.state.lock();
        let before = state.items.len();
        state.items.retain(|item| item.id != id);
        Ok(state.items.len() != before)
    }
}
