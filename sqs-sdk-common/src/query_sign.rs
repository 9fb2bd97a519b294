use super::error::Error;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// RFC 3986 中的unreserved字符以外都需要编码：`A-Z a-z 0-9 - _ . ~`
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, QUERY_ENCODE_SET).to_string()
}

/// 按照参数名忽略大小写升序排列，拼接`name + value`
///
/// 输入的顺序不影响结果
pub fn string_to_sign_v1<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut pairs = params.into_iter().collect::<Vec<_>>();
    pairs.sort_by(|(a, _), (b, _)| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    let mut s = String::new();
    for (k, v) in pairs {
        s.push_str(k);
        s.push_str(v);
    }
    s
}

/// 构造`k=v&k=v`形式的query
///
/// `encoded_keys`中的参数的值已经编码过了，不会再次编码
pub fn build_query_string(params: &BTreeMap<String, String>, encoded_keys: &[&str]) -> String {
    params
        .iter()
        .map(|(k, v)| {
            if encoded_keys.contains(&k.as_str()) {
                format!("{}={}", percent_encode(k), v)
            } else {
                format!("{}={}", percent_encode(k), percent_encode(v))
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// 序列化请求参数为BTreeMap<String, String>
///
/// 传入的query需要是一个to_value后为Value::Object的类型
pub fn to_query_map(query: &impl Serialize) -> Result<BTreeMap<String, String>, Error> {
    let v = serde_json::to_value(query)
        .map_err(|e| Error::Common(format!("serialize query params failed: {}", e)))?;
    if !v.is_object() {
        return Err(Error::Common(
            "to_query_map: input query is not an object!".to_owned(),
        ));
    }
    Ok(flatten_root(&v))
}

fn flatten_root(v: &Value) -> BTreeMap<String, String> {
    let mut res = BTreeMap::new();

    if let Value::Object(map) = v {
        for (k, val) in map {
            flatten_with_prefix(k, val, &mut res);
        }
    }

    res
}

fn flatten_with_prefix(prefix: &str, v: &Value, out: &mut BTreeMap<String, String>) {
    match v {
        // 没有值的参数不发送
        Value::Null => {}
        Value::Bool(b) => {
            out.insert(prefix.to_owned(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix.to_owned(), n.to_string());
        }
        Value::String(s) => {
            out.insert(prefix.to_owned(), s.clone());
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                // 下标从 1 开始："Attribute.1"、"Attribute.2"…
                let new_prefix = format!("{prefix}.{}", i + 1);
                flatten_with_prefix(&new_prefix, item, out);
            }
        }
        Value::Object(map) => {
            for (k, val) in map {
                let new_prefix = format!("{prefix}.{k}");
                flatten_with_prefix(&new_prefix, val, out);
            }
        }
    }
}
