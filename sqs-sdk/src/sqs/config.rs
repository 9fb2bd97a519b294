use super::SignatureVersion;
use serde::Deserialize;
use std::collections::BTreeMap;

/// 构造[`Client`](super::Client)的配置
///
/// 可以从toml/json等格式反序列化，字段名和请求参数一样使用PascalCase：
///
/// ```toml
/// AWSAccessKeyId = "AKID"
/// SecretKey = "secret"
/// Endpoint = "http://queue.amazonaws.com"
/// SignatureVersion = 1
/// ```
///
/// 不认识的字段都会放到`attributes`中，数字和布尔值会转成字符串
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    #[serde(rename = "AWSAccessKeyId")]
    pub access_key_id: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
    pub signature_version: Option<SignatureVersion>,
    #[serde(flatten, deserialize_with = "deserialize_attributes")]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttributeValue {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Float(v) => write!(f, "{}", v),
        }
    }
}

fn deserialize_attributes<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, AttributeValue>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.to_string())).collect())
}
