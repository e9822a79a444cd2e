use std::{
    borrow::Borrow,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    ops::Deref,
};

use internment::ArcIntern;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An interned identifier: a field, argument, type or alias name.
///
/// Names repeat heavily across a schema and its queries, so they are
/// interned; cloning is an atomic refcount bump.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(ArcIntern<String>);

impl Name {
    /// Create a new name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Name(ArcIntern::from_ref(name.as_ref()))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

// Hashes the string, not the interned pointer, keeping `Hash` consistent
// with `Borrow<str>` so maps keyed by `Name` answer `&str` lookups.
impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Name::new(name)
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Name(ArcIntern::new(name))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Name> for str {
    fn eq(&self, other: &Name) -> bool {
        self == other.as_str()
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Name::from(String::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{hash_map::RandomState, HashMap};
    use std::hash::BuildHasher;

    use super::*;

    #[test]
    fn hashes_like_the_borrowed_str() {
        let state = RandomState::new();
        assert_eq!(
            state.hash_one(Name::new("stringField")),
            state.hash_one("stringField"),
        );
    }

    #[test]
    fn str_lookups_find_every_key() {
        let keys = [
            "id", "str", "ids", "value", "obj", "objs", "limit", "stringField", "nonMandatory",
        ];
        let map: HashMap<Name, usize> = keys
            .iter()
            .enumerate()
            .map(|(index, key)| (Name::new(key), index))
            .collect();

        for (index, key) in keys.iter().enumerate() {
            assert_eq!(map.get(*key), Some(&index), "lookup for {key}");
        }
    }
}
