//! 请求签名
//!
//! - 版本1: 所有参数按参数名忽略大小写排序后拼接`name + value`进行签名，`SignatureVersion=1`本身也参与签名
//! - 旧版本(版本0): 只对`Action + Timestamp`进行签名
//!
//! 签名算法都是HMAC-SHA1，结果base64编码后再进行url编码

use super::Error;
use serde::{Deserialize, Deserializer};
use sqs_sdk_common::helper::sign_hmac_sha1_base64;
use sqs_sdk_common::query_sign::{percent_encode, string_to_sign_v1};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureVersion {
    /// 只签名`Action`和`Timestamp`
    Legacy,
    #[default]
    V1,
}

impl Display for SignatureVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureVersion::Legacy => write!(f, "0"),
            SignatureVersion::V1 => write!(f, "1"),
        }
    }
}

impl FromStr for SignatureVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" => Ok(SignatureVersion::V1),
            "0" | "legacy" => Ok(SignatureVersion::Legacy),
            other => Err(Error::Config(format!(
                "unsupported SignatureVersion: {}",
                other
            ))),
        }
    }
}

// 配置文件里可以写成 `SignatureVersion = 1` 或者 `SignatureVersion = "legacy"`
impl<'de> Deserialize<'de> for SignatureVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = SignatureVersion;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "signature version 1, 0 or \"legacy\"")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                v.to_string().parse().map_err(E::custom)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                v.to_string().parse().map_err(E::custom)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl SignatureVersion {
    /// 计算签名并把`Signature`（已经url编码）放入`params`
    ///
    /// 版本1会先加入`SignatureVersion=1`再计算签名；`Signature`本身不参与签名
    pub(crate) fn sign(
        &self,
        params: &mut BTreeMap<String, String>,
        secret_key: &str,
    ) -> Result<(), Error> {
        params.remove("Signature");
        let str_to_sign = match self {
            SignatureVersion::V1 => {
                params.insert("SignatureVersion".to_owned(), "1".to_owned());
                string_to_sign_v1(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            }
            SignatureVersion::Legacy => {
                let action = params.get("Action").map(String::as_str).unwrap_or_default();
                let timestamp = params
                    .get("Timestamp")
                    .map(String::as_str)
                    .unwrap_or_default();
                format!("{}{}", action, timestamp)
            }
        };

        let signature = sign_hmac_sha1_base64(secret_key, &str_to_sign)?;
        params.insert("Signature".to_owned(), percent_encode(&signature));
        Ok(())
    }
}
