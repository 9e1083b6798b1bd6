//! Extract the query string as ordered `(key, value)` pairs.

use async_trait::async_trait;
use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::request::Parts,
};

/// Query pairs in the order they appear in the URL. Repeated keys are kept.
#[derive(Clone, Debug, Default)]
pub struct ListQuery(pub Vec<(String, String)>);

#[async_trait]
impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)?;
        Ok(ListQuery(pairs))
    }
}
