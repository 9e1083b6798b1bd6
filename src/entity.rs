//! Entity identity: the only thing the listing core and the member handlers know about `T`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// Textual form of an entity id.
///
/// Ids are compared as strings everywhere (zero anchor lookup, path/body matching,
/// store lookups), so `EntityId::from(5_i64) == EntityId::from("5")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&String> for EntityId {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<uuid::Uuid> for EntityId {
    fn from(u: uuid::Uuid) -> Self {
        Self(u.to_string())
    }
}

macro_rules! id_from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for EntityId {
            fn from(n: $t) -> Self {
                Self(n.to_string())
            }
        })*
    };
}

id_from_integer!(i32, i64, u32, u64, usize);

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An entity served by a generated resource.
pub trait RestEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// `None` when the entity has not been persisted yet.
    fn id(&self) -> Option<EntityId>;
}
