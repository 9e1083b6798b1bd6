//! Shared state for one generated resource: its resolved descriptors and its store.

use crate::config::ResolvedResource;
use std::sync::Arc;

pub struct ResourceState<T, S> {
    pub resource: Arc<ResolvedResource<T>>,
    pub store: Arc<S>,
}

impl<T, S> Clone for ResourceState<T, S> {
    fn clone(&self) -> Self {
        Self {
            resource: Arc::clone(&self.resource),
            store: Arc::clone(&self.store),
        }
    }
}
