//! Auto REST: generated collection endpoints with sorting, filtering and zero-anchored pagination.

pub mod config;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod generator;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ApiFilter, ResolvedResource, ServerConfig, SortKey, SortableField};
pub use entity::{EntityId, RestEntity};
pub use error::{ApiError, AppError, ConfigError, ErrorCode, StoreError};
pub use generator::AutoRestGenerator;
pub use response::{success_created, success_many, success_one, Pagination};
pub use routes::{common_routes, entity_routes};
pub use service::{paginate_with_split, Listing, ListingPipeline, ListingRequest, PageRequest, PageWindow, SortDir};
pub use state::ResourceState;
pub use store::{EntityStore, InMemoryStore};
