//! Demo server: an in-memory `users` resource with sorting, filters and pagination, plus health/info.
//!
//! Run: `cargo run --example server`, then e.g.
//! `curl 'localhost:3000/api/v1/users?sortBy=age&sortDir=DESC&minAge=30&page=0&pageSize=2'`

use auto_rest::{
    common_routes, store::new_uuid_id, ApiFilter, AutoRestGenerator, EntityId, InMemoryStore, RestEntity,
    ServerConfig, SortableField,
};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    age: u32,
}

impl RestEntity for User {
    fn id(&self) -> Option<EntityId> {
        self.id.as_deref().map(EntityId::from)
    }
}

fn seed() -> Vec<User> {
    [("Ada", 36), ("Linus", 54), ("Grace", 85), ("Ken", 81), ("Barbara", 30)]
        .into_iter()
        .map(|(name, age)| User {
            id: Some(new_uuid_id()),
            name: name.into(),
            age,
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let store = InMemoryStore::with_items(seed(), |u: &mut User| u.id = Some(new_uuid_id()));
    let users = AutoRestGenerator::given_store(store)
        .entity_id_name_on_url("userId")
        .body_limit_bytes(config.body_limit_bytes)
        .sortable_field(SortableField::new("age", |u: &User| u.age))
        .sortable_field(SortableField::new("name", |u: &User| u.name.to_lowercase()))
        .filter(ApiFilter::by_value("name", |v, u: &User| {
            u.name.to_lowercase().contains(&v.to_lowercase())
        }))
        .filter(ApiFilter::by_value("minAge", |v, u: &User| {
            v.trim().parse::<u32>().map(|min| u.age >= min).unwrap_or(false)
        }))
        .generate()?;

    let app = Router::new()
        .merge(common_routes(["/api/v1/users"]))
        .nest("/api/v1/users", users);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
