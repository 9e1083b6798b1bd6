//! Sort and filter descriptors registered on a generator.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Comparable value produced by a sortable field's key function.
///
/// Ordering across variants: `Null < Bool < numbers < Text`. Integers compare exactly,
/// floats use `f64::total_cmp` (with `-0.0 == 0.0`), and an integer against a float compares by value.
#[derive(Clone, Debug)]
pub enum SortKey {
    Null,
    Bool(bool),
    Int(i128),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Int(_) | SortKey::Number(_) => 2,
            SortKey::Text(_) => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) if *a == 0.0 && *b == 0.0 => Ordering::Equal,
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Int(a), SortKey::Number(b)) => cmp_int_float(*a, *b),
            (SortKey::Number(a), SortKey::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Compares without rounding the integer through `f64`.
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return if float.is_sign_negative() { Ordering::Greater } else { Ordering::Less };
    }
    // i128::MAX as f64 rounds up to 2^127; i128::MIN as f64 is exact.
    if float >= i128::MAX as f64 {
        return Ordering::Less;
    }
    if float < i128::MIN as f64 {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    int.cmp(&(whole as i128)).then_with(|| {
        if float > whole {
            Ordering::Less
        } else if float < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

macro_rules! sort_key_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for SortKey {
            fn from(n: $t) -> Self {
                SortKey::Int(n as i128)
            }
        })*
    };
}

sort_key_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for SortKey {
    fn from(n: f32) -> Self {
        SortKey::Number(f64::from(n))
    }
}

impl From<f64> for SortKey {
    fn from(n: f64) -> Self {
        SortKey::Number(n)
    }
}

impl From<bool> for SortKey {
    fn from(b: bool) -> Self {
        SortKey::Bool(b)
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::Text(s)
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        SortKey::Text(s.to_string())
    }
}

impl<K: Into<SortKey>> From<Option<K>> for SortKey {
    fn from(v: Option<K>) -> Self {
        v.map(Into::into).unwrap_or(SortKey::Null)
    }
}

type KeyFn<T> = dyn Fn(&T) -> SortKey + Send + Sync;
type PredicateFn<T> = dyn Fn(&str, &T, usize, &[T]) -> bool + Send + Sync;

/// A query-selectable sort field (`?sortBy=<field_name>`).
pub struct SortableField<T> {
    field_name: String,
    key_fn: Arc<KeyFn<T>>,
}

impl<T: 'static> SortableField<T> {
    pub fn new<K, F>(field_name: impl Into<String>, key_fn: F) -> Self
    where
        K: Into<SortKey>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            field_name: field_name.into(),
            key_fn: Arc::new(move |item: &T| -> SortKey { key_fn(item).into() }),
        }
    }
}

impl<T> SortableField<T> {
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn key(&self, item: &T) -> SortKey {
        (self.key_fn)(item)
    }
}

impl<T> Clone for SortableField<T> {
    fn clone(&self) -> Self {
        Self {
            field_name: self.field_name.clone(),
            key_fn: Arc::clone(&self.key_fn),
        }
    }
}

impl<T> fmt::Debug for SortableField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableField").field("field_name", &self.field_name).finish()
    }
}

/// A query-selectable filter (`?<filter_name>=<value>`).
///
/// The predicate receives the raw query value, the item, the item's index in the
/// current working collection, and that collection.
pub struct ApiFilter<T> {
    filter_name: String,
    predicate: Arc<PredicateFn<T>>,
}

impl<T: 'static> ApiFilter<T> {
    pub fn new<F>(filter_name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str, &T, usize, &[T]) -> bool + Send + Sync + 'static,
    {
        Self {
            filter_name: filter_name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Filter that only looks at the query value and the item.
    pub fn by_value<F>(filter_name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str, &T) -> bool + Send + Sync + 'static,
    {
        Self::new(filter_name, move |value: &str, item: &T, _: usize, _: &[T]| predicate(value, item))
    }
}

impl<T> ApiFilter<T> {
    pub fn filter_name(&self) -> &str {
        &self.filter_name
    }

    pub fn matches(&self, value: &str, item: &T, index: usize, items: &[T]) -> bool {
        (self.predicate)(value, item, index, items)
    }
}

impl<T> Clone for ApiFilter<T> {
    fn clone(&self) -> Self {
        Self {
            filter_name: self.filter_name.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for ApiFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiFilter").field("filter_name", &self.filter_name).finish()
    }
}
