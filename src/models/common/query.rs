use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

// 查询串经过 flatten 后所有值都会变成字符串，这里统一转换
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl RawValue {
    fn into_string(self) -> String {
        match self {
            RawValue::Bool(b) => b.to_string(),
            RawValue::Int(i) => i.to_string(),
            RawValue::Str(s) => s,
        }
    }
}

/// 可选查询参数：缺省或空字符串视为 `None`
pub fn optional_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = Option::<RawValue>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let value = raw.into_string();
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<T>().map(Some).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "optional_from_str")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "optional_from_str")]
        flag: Option<bool>,
    }

    #[test]
    fn test_string_values() {
        let p: Params = serde_json::from_str(r#"{"id":"42","flag":"true"}"#).unwrap();
        assert_eq!(p.id, Some(42));
        assert_eq!(p.flag, Some(true));
    }

    #[test]
    fn test_missing_and_empty() {
        let p: Params = serde_json::from_str(r#"{"id":""}"#).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.flag, None);
    }

    #[test]
    fn test_invalid_value() {
        assert!(serde_json::from_str::<Params>(r#"{"id":"abc"}"#).is_err());
    }
}
