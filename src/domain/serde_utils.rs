//! Serde helpers for backend payloads.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Identifiers that the backend may send either as JSON strings or as numbers.
pub mod string_or_number {
    use super::{Deserializer, Serializer, Visitor, de, fmt};

    /// Serializes the identifier as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    /// Deserializes an identifier from a string or an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string nor an integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrIntVisitor;

        impl Visitor<'_> for StringOrIntVisitor {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer identifier")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }
        }

        deserializer.deserialize_any(StringOrIntVisitor)
    }
}

/// Treats an explicit JSON `null` the same as a missing field.
pub mod null_as_default {
    use super::Deserializer;
    use serde::Deserialize;

    /// Deserializes `T`, mapping `null` to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is present but not a valid `T`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(with = "super::string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "super::null_as_default::deserialize")]
        tags: Vec<String>,
    }

    #[test]
    fn test_numeric_id_becomes_string() {
        let w: Wrapper = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(w.id, "42");
    }

    #[test]
    fn test_string_id_kept() {
        let w: Wrapper = serde_json::from_str(r#"{"id": "65a1f0"}"#).unwrap();
        assert_eq!(w.id, "65a1f0");
    }

    #[test]
    fn test_null_list_is_empty() {
        let w: Wrapper = serde_json::from_str(r#"{"id": 1, "tags": null}"#).unwrap();
        assert!(w.tags.is_empty());
    }
}
