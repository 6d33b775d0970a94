//! Serde helpers for the JSON tree format.

use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserializer,
    de::{Error, MapAccess, Visitor},
};

/// Deserialize an attribute object, rejecting repeated keys.
///
/// JSON permits duplicate object keys and serde would silently keep the last
/// one; attribute keys must be unique within a node.
pub fn deserialize_unique_attrs<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AttrsVisitor;

    impl<'de> Visitor<'de> for AttrsVisitor {
        type Value = IndexMap<String, String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of string attributes")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut attrs = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                if attrs.contains_key(&key) {
                    return Err(A::Error::custom(format!("duplicate attribute '{}'", key)));
                }
                attrs.insert(key, value);
            }
            Ok(attrs)
        }
    }

    deserializer.deserialize_map(AttrsVisitor)
}
