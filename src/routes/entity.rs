//! Collection and member routes for one generated resource.
//! The member path parameter is named after the resource's `entity_id_name_on_url`.

use crate::entity::RestEntity;
use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::state::ResourceState;
use crate::store::EntityStore;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

pub fn entity_routes<T, S>(state: ResourceState<T, S>) -> Router
where
    T: RestEntity,
    S: EntityStore<T>,
{
    let member_path = format!("/:{}", state.resource.entity_id_name_on_url);
    let body_limit = state.resource.body_limit_bytes;
    Router::new()
        .route("/", get(list::<T, S>).post(create::<T, S>))
        .route(
            &member_path,
            get(read::<T, S>).put(update::<T, S>).delete(delete_handler::<T, S>),
        )
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
