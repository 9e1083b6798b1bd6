//! Config validation: descriptor uniqueness and reserved query keys.

use crate::config::{ApiFilter, SortableField};
use crate::error::ConfigError;
use crate::service::RESERVED_QUERY_KEYS;
use std::collections::HashSet;

pub fn validate<T>(
    entity_id_name_on_url: &str,
    sortable_fields: &[SortableField<T>],
    filters: &[ApiFilter<T>],
) -> Result<(), ConfigError> {
    if entity_id_name_on_url.is_empty()
        || !entity_id_name_on_url
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::InvalidIdParam(entity_id_name_on_url.to_string()));
    }

    let mut seen = HashSet::new();
    for f in sortable_fields {
        if !seen.insert(f.field_name()) {
            return Err(ConfigError::DuplicateSortableField(f.field_name().to_string()));
        }
    }

    let mut seen = HashSet::new();
    for f in filters {
        if RESERVED_QUERY_KEYS.contains(&f.filter_name()) {
            return Err(ConfigError::ReservedFilterName(f.filter_name().to_string()));
        }
        if !seen.insert(f.filter_name()) {
            return Err(ConfigError::DuplicateFilter(f.filter_name().to_string()));
        }
    }
    Ok(())
}
