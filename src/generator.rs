//! Fluent builder that turns an entity store plus descriptors into a mountable router.

use crate::config::{ApiFilter, ResolvedResource, SortableField, DEFAULT_BODY_LIMIT};
use crate::entity::RestEntity;
use crate::error::ConfigError;
use crate::routes::entity_routes;
use crate::state::ResourceState;
use crate::store::EntityStore;
use axum::Router;
use std::sync::Arc;

/// Builds the collection (`/`) and member (`/:id`) routes for one entity type.
///
/// ```rust,ignore
/// let users = AutoRestGenerator::given_store(store)
///     .entity_id_name_on_url("userId")
///     .sortable_field(SortableField::new("age", |u: &User| u.age))
///     .filter(ApiFilter::by_value("name", |v, u: &User| u.name.contains(v)))
///     .generate()?;
/// let app = Router::new().nest("/users", users);
/// ```
pub struct AutoRestGenerator<T, S> {
    store: Arc<S>,
    entity_id_name_on_url: String,
    body_limit_bytes: usize,
    sortable_fields: Vec<SortableField<T>>,
    filters: Vec<ApiFilter<T>>,
}

impl<T, S> AutoRestGenerator<T, S>
where
    T: RestEntity,
    S: EntityStore<T>,
{
    pub fn given_store(store: S) -> Self {
        Self::given_shared_store(Arc::new(store))
    }

    /// Uses a store that the host keeps a handle to.
    pub fn given_shared_store(store: Arc<S>) -> Self {
        Self {
            store,
            entity_id_name_on_url: "id".into(),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
            sortable_fields: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Name of the member path parameter (`/:name`). Defaults to `id`.
    pub fn entity_id_name_on_url(mut self, name: impl Into<String>) -> Self {
        self.entity_id_name_on_url = name.into();
        self
    }

    pub fn body_limit_bytes(mut self, limit: usize) -> Self {
        self.body_limit_bytes = limit;
        self
    }

    pub fn sortable_field(mut self, field: SortableField<T>) -> Self {
        self.sortable_fields.push(field);
        self
    }

    pub fn filter(mut self, filter: ApiFilter<T>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Validates the registered descriptors and freezes them into shared state.
    pub fn build_state(self) -> Result<ResourceState<T, S>, ConfigError> {
        let resource = ResolvedResource::resolve(
            self.entity_id_name_on_url,
            self.body_limit_bytes,
            self.sortable_fields,
            self.filters,
        )?;
        tracing::debug!(
            id_param = %resource.entity_id_name_on_url,
            sortable_fields = resource.sortable_fields().len(),
            filters = resource.filters().len(),
            "resource resolved"
        );
        Ok(ResourceState {
            resource: Arc::new(resource),
            store: self.store,
        })
    }

    pub fn generate(self) -> Result<Router, ConfigError> {
        Ok(entity_routes(self.build_state()?))
    }
}
