//! Resolved resource: generator config validated and frozen for runtime use.

use crate::config::{validate, ApiFilter, SortableField};
use crate::error::ConfigError;
use std::collections::HashMap;

#[derive(Debug)]
pub struct ResolvedResource<T> {
    pub entity_id_name_on_url: String,
    pub body_limit_bytes: usize,
    sortable_fields: Vec<SortableField<T>>,
    filters: Vec<ApiFilter<T>>,
    sort_index: HashMap<String, usize>,
    filter_index: HashMap<String, usize>,
}

impl<T> ResolvedResource<T> {
    pub fn resolve(
        entity_id_name_on_url: String,
        body_limit_bytes: usize,
        sortable_fields: Vec<SortableField<T>>,
        filters: Vec<ApiFilter<T>>,
    ) -> Result<Self, ConfigError> {
        validate(&entity_id_name_on_url, &sortable_fields, &filters)?;
        let sort_index = sortable_fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.field_name().to_string(), i))
            .collect();
        let filter_index = filters
            .iter()
            .enumerate()
            .map(|(i, f)| (f.filter_name().to_string(), i))
            .collect();
        Ok(Self {
            entity_id_name_on_url,
            body_limit_bytes,
            sortable_fields,
            filters,
            sort_index,
            filter_index,
        })
    }

    pub fn sortable_field(&self, name: &str) -> Option<&SortableField<T>> {
        self.sort_index.get(name).map(|&i| &self.sortable_fields[i])
    }

    pub fn filter(&self, name: &str) -> Option<&ApiFilter<T>> {
        self.filter_index.get(name).map(|&i| &self.filters[i])
    }

    pub fn sortable_fields(&self) -> &[SortableField<T>] {
        &self.sortable_fields
    }

    pub fn filters(&self) -> &[ApiFilter<T>] {
        &self.filters
    }
}
