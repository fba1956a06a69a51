//! Record id normalization
//!
//! Catalog sources disagree on id encoding (REST stores emit `"12"`, the
//! relational export emits `12`). Everything is normalized to `i64` here, at
//! deserialization time, so the engine compares ids with plain `==`.
//!
//! Use with `#[serde(deserialize_with = "...")]`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawId {
    fn into_id<E: de::Error>(self) -> Result<i64, E> {
        match self {
            RawId::Int(v) => Ok(v),
            RawId::Float(v) if v.fract() == 0.0 && v.is_finite() => Ok(v as i64),
            RawId::Float(v) => Err(E::custom(format!("id must be an integer, got {}", v))),
            RawId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("id must be numeric, got {:?}", s))),
        }
    }
}

/// Deserialize a required id
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?.into_id()
}

/// Deserialize an optional id (`null`, `""` and missing all map to `None`)
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(raw) => raw.into_id().map(Some),
    }
}

/// Deserialize a list of ids (`null` maps to an empty list)
pub fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<RawId>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(RawId::into_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "deserialize_id")]
        id: i64,
        #[serde(default, deserialize_with = "deserialize_opt_id")]
        parent_id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_id_list")]
        refs: Vec<i64>,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"id": "7", "parent_id": 3, "refs": [1, "2", 3.0]}"#)
            .unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.parent_id, Some(3));
        assert_eq!(p.refs, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_and_empty_optionals() {
        let p: Probe = serde_json::from_str(r#"{"id": 1, "parent_id": ""}"#).unwrap();
        assert_eq!(p.parent_id, None);
        assert!(p.refs.is_empty());

        let p: Probe = serde_json::from_str(r#"{"id": 1, "parent_id": null, "refs": null}"#).unwrap();
        assert_eq!(p.parent_id, None);
        assert!(p.refs.is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"id": 1.5}"#).is_err());
    }
}
