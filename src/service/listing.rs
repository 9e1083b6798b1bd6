//! Listing pipeline: validate, sort, filter, resolve the zero anchor, paginate.

use crate::config::{ApiFilter, ResolvedResource};
use crate::entity::{EntityId, RestEntity};
use crate::error::ApiError;
use crate::response::Pagination;
use crate::service::pagination::{paginate, PageRequest};
use std::cmp::Reverse;

/// Query keys consumed by the pipeline itself; every other key names a filter.
pub const RESERVED_QUERY_KEYS: &[&str] = &["sortBy", "sortDir", "page", "pageSize", "zeroId"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Only the literal `DESC` selects descending order.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("DESC") => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }
}

/// One listing call's parameters, split out of the ordered query pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingRequest {
    pub sort_by: Option<String>,
    pub sort_dir: SortDir,
    /// `(name, raw value)` in query order, reserved keys excluded.
    pub filters: Vec<(String, String)>,
    pub zero_id: Option<EntityId>,
    pub page: Option<PageRequest>,
}

impl ListingRequest {
    /// Builds the request from query pairs, validating `page`/`pageSize`.
    ///
    /// For repeated reserved keys the first occurrence wins. Empty `sortBy` and
    /// `zeroId` count as absent.
    pub fn from_query(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        let mut sort_by = None;
        let mut sort_dir = None;
        let mut page = None;
        let mut page_size = None;
        let mut zero_id = None;
        let mut filters = Vec::new();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sortBy" => &mut sort_by,
                "sortDir" => &mut sort_dir,
                "page" => &mut page,
                "pageSize" => &mut page_size,
                "zeroId" => &mut zero_id,
                _ => {
                    filters.push((key, value));
                    continue;
                }
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        let page = PageRequest::parse(page.as_deref(), page_size.as_deref())?;
        Ok(Self {
            sort_by: sort_by.filter(|s| !s.is_empty()),
            sort_dir: SortDir::parse(sort_dir.as_deref()),
            filters,
            zero_id: zero_id.filter(|s| !s.is_empty()).map(EntityId::from),
            page,
        })
    }
}

/// Output of the pipeline: the page of data and, when requested, its summary.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing<T> {
    pub data: Vec<T>,
    pub pagination: Option<Pagination>,
}

/// Runs listing requests against a resolved resource's descriptors.
pub struct ListingPipeline<'a, T> {
    resource: &'a ResolvedResource<T>,
}

impl<'a, T: RestEntity> ListingPipeline<'a, T> {
    pub fn new(resource: &'a ResolvedResource<T>) -> Self {
        Self { resource }
    }

    /// Checks that `sortBy` and every filter key are registered, before any data is fetched.
    ///
    /// Sort is checked first; unknown filters are reported together.
    pub fn check(&self, request: &ListingRequest) -> Result<(), ApiError> {
        if let Some(sort_by) = &request.sort_by {
            if self.resource.sortable_field(sort_by).is_none() {
                return Err(ApiError::unsupported_sorting_field(sort_by));
            }
        }
        self.resolve_filters(&request.filters).map(|_| ())
    }

    pub fn run(&self, mut items: Vec<T>, request: &ListingRequest) -> Result<Listing<T>, ApiError> {
        if let Some(sort_by) = &request.sort_by {
            let field = self
                .resource
                .sortable_field(sort_by)
                .ok_or_else(|| ApiError::unsupported_sorting_field(sort_by))?;
            // sort_by_cached_key is stable, so equal keys keep fetch order in both directions
            match request.sort_dir {
                SortDir::Asc => items.sort_by_cached_key(|item| field.key(item)),
                SortDir::Desc => items.sort_by_cached_key(|item| Reverse(field.key(item))),
            }
            tracing::debug!(sort_by = %sort_by, dir = ?request.sort_dir, "sorted");
        }

        for (filter, value) in self.resolve_filters(&request.filters)? {
            items = apply_filter(items, filter, value);
            tracing::debug!(filter = filter.filter_name(), remaining = items.len(), "filtered");
        }

        let anchor = match &request.zero_id {
            Some(zero_id) => items
                .iter()
                .position(|item| item.id().as_ref() == Some(zero_id))
                .ok_or_else(|| ApiError::zero_id_not_found(zero_id.as_str()))?,
            None => 0,
        };

        match request.page {
            Some(PageRequest { page, page_size }) => {
                let anchor = i64::try_from(anchor).unwrap_or(i64::MAX);
                let (data, pagination) = paginate(items, page, page_size, anchor);
                Ok(Listing {
                    data,
                    pagination: Some(pagination),
                })
            }
            None => Ok(Listing {
                data: items,
                pagination: None,
            }),
        }
    }

    fn resolve_filters<'r>(
        &self,
        requested: &'r [(String, String)],
    ) -> Result<Vec<(&'a ApiFilter<T>, &'r str)>, ApiError> {
        let mut resolved = Vec::with_capacity(requested.len());
        let mut unknown = Vec::new();
        for (name, value) in requested {
            match self.resource.filter(name) {
                Some(filter) => resolved.push((filter, value.as_str())),
                None => unknown.push(name.as_str()),
            }
        }
        if !unknown.is_empty() {
            return Err(ApiError::invalid_filters(unknown));
        }
        Ok(resolved)
    }
}

fn apply_filter<T>(items: Vec<T>, filter: &ApiFilter<T>, value: &str) -> Vec<T> {
    let keep: Vec<bool> = items
        .iter()
        .enumerate()
        .map(|(index, item)| filter.matches(value, item, index, &items))
        .collect();
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}
