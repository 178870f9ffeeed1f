//! Deserializers for the loosely typed parts of the backend's JSON.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    String(String),
}

/// Decimal fields arrive as `"500.00"` or `500`.
pub fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid decimal: {s}"))),
    }
}

pub fn opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid decimal: {s}"))),
    }
}

/// UUID primary keys are strings, category keys are integers.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Int(n) => n.to_string(),
        IdRepr::String(s) => s,
    })
}

pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(|v| match v {
        IdRepr::Int(n) => n.to_string(),
        IdRepr::String(s) => s,
    }))
}

/// `null` collapses to the type's default.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "decimal")]
        price: f64,
        #[serde(default, deserialize_with = "opt_decimal")]
        hourly: Option<f64>,
        #[serde(deserialize_with = "id")]
        id: String,
    }

    #[test]
    fn test_decimal_from_string_and_number() {
        let a: Priced = serde_json::from_str(r#"{"price":"500.00","id":3}"#).unwrap();
        assert_eq!(a.price, 500.0);
        assert_eq!(a.hourly, None);
        assert_eq!(a.id, "3");

        let b: Priced =
            serde_json::from_str(r#"{"price":12.5,"hourly":"1.25","id":"abc"}"#).unwrap();
        assert_eq!(b.price, 12.5);
        assert_eq!(b.hourly, Some(1.25));
        assert_eq!(b.id, "abc");
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        let res: Result<Priced, _> = serde_json::from_str(r#"{"price":"cheap","id":1}"#);
        assert!(res.is_err());
    }
}
