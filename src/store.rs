//! Entity store collaborator and an in-memory implementation.

use crate::entity::{EntityId, RestEntity};
use crate::error::StoreError;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Lifecycle callbacks a generated resource dispatches to.
///
/// Each handler awaits at most one call per stage; errors are never retried.
#[async_trait]
pub trait EntityStore<T: RestEntity>: Send + Sync + 'static {
    /// The full collection. The listing pipeline takes ownership and may reorder it.
    async fn fetch_all(&self) -> Result<Vec<T>, StoreError>;

    async fn fetch_by_id(&self, id: &EntityId) -> Result<Option<T>, StoreError>;

    /// Persists a new entity (submitted without an id) and returns it with its id.
    async fn create(&self, entity: T) -> Result<T, StoreError>;

    async fn update(&self, entity: T) -> Result<T, StoreError>;

    async fn delete_by_id(&self, id: &EntityId) -> Result<(), StoreError>;
}

type IdAssigner<T> = dyn Fn(&mut T) + Send + Sync;

/// Vec-backed store. Keeps insertion order; `create` delegates id assignment to the caller.
pub struct InMemoryStore<T> {
    items: RwLock<Vec<T>>,
    assign_id: Box<IdAssigner<T>>,
}

impl<T: RestEntity> InMemoryStore<T> {
    pub fn new<F>(assign_id: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        Self::with_items(Vec::new(), assign_id)
    }

    pub fn with_items<F>(items: Vec<T>, assign_id: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        Self {
            items: RwLock::new(items),
            assign_id: Box::new(assign_id),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

/// Fresh v4 UUID string, for use inside an id assigner.
pub fn new_uuid_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait]
impl<T: RestEntity> EntityStore<T> for InMemoryStore<T> {
    async fn fetch_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn fetch_by_id(&self, id: &EntityId) -> Result<Option<T>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|e| e.id().as_ref() == Some(id)).cloned())
    }

    async fn create(&self, mut entity: T) -> Result<T, StoreError> {
        (self.assign_id)(&mut entity);
        let id = entity
            .id()
            .ok_or_else(|| StoreError::Conflict("id assigner left the entity without an id".into()))?;
        let mut items = self.items.write().await;
        if items.iter().any(|e| e.id().as_ref() == Some(&id)) {
            return Err(StoreError::Conflict(format!("duplicate id {}", id)));
        }
        items.push(entity.clone());
        tracing::debug!(id = %id, "created");
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, StoreError> {
        let id = entity
            .id()
            .ok_or_else(|| StoreError::NotFound("entity without id".into()))?;
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|e| e.id().as_ref() == Some(&id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = entity.clone();
        tracing::debug!(id = %id, "updated");
        Ok(entity)
    }

    async fn delete_by_id(&self, id: &EntityId) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|e| e.id().as_ref() != Some(id));
        if items.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        tracing::debug!(id = %id, "deleted");
        Ok(())
    }
}
