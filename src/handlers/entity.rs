//! Resource handlers: list, read, create, update, delete.

use crate::entity::{EntityId, RestEntity};
use crate::error::{ApiError, AppError};
use crate::extractors::ListQuery;
use crate::response::{success_created, success_many, success_one, RequestEnvelope};
use crate::service::{ListingPipeline, ListingRequest};
use crate::state::ResourceState;
use crate::store::EntityStore;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

pub async fn list<T, S>(
    State(state): State<ResourceState<T, S>>,
    ListQuery(pairs): ListQuery,
) -> Result<impl IntoResponse, AppError>
where
    T: RestEntity,
    S: EntityStore<T>,
{
    let request = ListingRequest::from_query(pairs).inspect_err(|e| tracing::debug!(error = %e, "rejected listing"))?;
    let pipeline = ListingPipeline::new(&state.resource);
    pipeline
        .check(&request)
        .inspect_err(|e| tracing::debug!(error = %e, "rejected listing"))?;
    let items = state.store.fetch_all().await?;
    let fetched = items.len();
    let listing = pipeline
        .run(items, &request)
        .inspect_err(|e| tracing::debug!(error = %e, "rejected listing"))?;
    tracing::debug!(fetched, returned = listing.data.len(), "listed");
    Ok(success_many(listing.data, listing.pagination))
}

pub async fn read<T, S>(
    State(state): State<ResourceState<T, S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    T: RestEntity,
    S: EntityStore<T>,
{
    let id = EntityId::from(id);
    let found = state.store.fetch_by_id(&id).await?.ok_or_else(ApiError::not_found)?;
    Ok(success_one(found))
}

fn read_body<T>(body: Result<Json<RequestEnvelope<T>>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(envelope)) => Ok(envelope.data),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            Err(rejection.into())
        }
    }
}

pub async fn create<T, S>(
    State(state): State<ResourceState<T, S>>,
    body: Result<Json<RequestEnvelope<T>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: RestEntity,
    S: EntityStore<T>,
{
    let entity = read_body(body)?;
    if let Some(id) = entity.id() {
        return Err(ApiError::new_entity_with_id(id.as_str()).into());
    }
    let saved = state.store.create(entity).await?;
    Ok(success_created(saved))
}

pub async fn update<T, S>(
    State(state): State<ResourceState<T, S>>,
    Path(id): Path<String>,
    body: Result<Json<RequestEnvelope<T>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: RestEntity,
    S: EntityStore<T>,
{
    let entity = read_body(body)?;
    let body_id = entity.id().ok_or_else(ApiError::edit_entity_without_id)?;
    if body_id != EntityId::from(id) {
        return Err(ApiError::id_mismatch(body_id.as_str()).into());
    }
    let saved = state.store.update(entity).await?;
    Ok(success_one(saved))
}

pub async fn delete<T, S>(
    State(state): State<ResourceState<T, S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    T: RestEntity,
    S: EntityStore<T>,
{
    let id = EntityId::from(id);
    let found = state.store.fetch_by_id(&id).await?.ok_or_else(ApiError::not_found)?;
    state.store.delete_by_id(&id).await?;
    Ok(success_one(found))
}
