//! Tolerant field decoders for backend payloads.
//!
//! The backend is not consistent about scalar encodings: identifiers arrive as
//! numbers or numeric strings, permission flags as booleans, `0`/`1`, or their
//! string forms. These helpers are used through `#[serde(deserialize_with)]`.

use std::fmt;

use serde::Deserializer;
use serde::de::{self, Visitor};

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer id, a numeric string, or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::custom(format!("id {v} out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        if !v.is_finite() || v.fract() != 0.0 {
            return Err(E::custom(format!("id {v} is not an integer")));
        }
        if v < -LIMIT || v >= LIMIT {
            return Err(E::custom(format!("id {v} out of range")));
        }
        Ok(Some(v as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<i64>()
            .map(Some)
            .map_err(|_| E::custom(format!("id {v:?} is not numeric")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(Self)
    }
}

/// Required numeric-coerced id.
pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    d.deserialize_any(IdVisitor)?
        .ok_or_else(|| de::Error::custom("missing id"))
}

/// Optional numeric-coerced id; `null` and `""` decode to `None`.
pub fn optional_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    d.deserialize_any(IdVisitor)
}

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 0/1, or a boolean-like string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v != 0)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v != 0)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "" | "0" | "false" | "no" => Ok(false),
            other => Err(E::custom(format!("unrecognised flag {other:?}"))),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(false)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(false)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(Self)
    }
}

/// Permission flag; `null` decodes to `false`.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    d.deserialize_any(FlagVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(deserialize_with = "super::id")]
        id: i64,
        #[serde(default, deserialize_with = "super::optional_id")]
        parent: Option<i64>,
        #[serde(default, deserialize_with = "super::flag")]
        on: bool,
    }

    fn payload(json: &str) -> Payload {
        serde_json::from_str(json).expect("payload should decode")
    }

    #[test]
    fn test_ids_accept_numbers_and_numeric_strings() {
        assert_eq!(payload(r#"{"id": 12}"#).id, 12);
        assert_eq!(payload(r#"{"id": "12"}"#).id, 12);
        assert_eq!(payload(r#"{"id": " 7 "}"#).id, 7);
        assert_eq!(payload(r#"{"id": 3.0}"#).id, 3);
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        assert!(serde_json::from_str::<Payload>(r#"{"id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"id": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"id": null}"#).is_err());
    }

    #[test]
    fn test_float_id_outside_i64_is_rejected() {
        assert!(serde_json::from_str::<Payload>(r#"{"id": 1e300}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"id": -1e19}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"id": 9223372036854775808.0}"#).is_err());
        assert_eq!(payload(r#"{"id": -4.0e3}"#).id, -4000);
    }

    #[test]
    fn test_optional_parent() {
        assert_eq!(payload(r#"{"id": 1}"#).parent, None);
        assert_eq!(payload(r#"{"id": 1, "parent": null}"#).parent, None);
        assert_eq!(payload(r#"{"id": 1, "parent": ""}"#).parent, None);
        assert_eq!(payload(r#"{"id": 1, "parent": "4"}"#).parent, Some(4));
    }

    #[test]
    fn test_flags() {
        assert!(!payload(r#"{"id": 1}"#).on);
        assert!(payload(r#"{"id": 1, "on": true}"#).on);
        assert!(payload(r#"{"id": 1, "on": 1}"#).on);
        assert!(payload(r#"{"id": 1, "on": "1"}"#).on);
        assert!(payload(r#"{"id": 1, "on": "TRUE"}"#).on);
        assert!(!payload(r#"{"id": 1, "on": 0}"#).on);
        assert!(!payload(r#"{"id": 1, "on": null}"#).on);
        assert!(serde_json::from_str::<Payload>(r#"{"id": 1, "on": "maybe"}"#).is_err());
    }
}
