//! 请求的组装、签名、发送和返回结果的解析
//!
//! client和queue都持有一个`Dispatcher`，所有api最终都通过`Dispatcher::dispatch`发送

use super::signature::SignatureVersion;
use super::{API_VERSION, Error, MAX_GET_MESSAGE_SIZE};
use crate::credentials::Credentials;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use sqs_sdk_common::helper::{iso8601_seconds, parse_xml_str};
use sqs_sdk_common::query_sign::build_query_string;
use std::collections::BTreeMap;
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub(crate) struct Dispatcher {
    pub(crate) credentials: Credentials,
    pub(crate) signature_version: SignatureVersion,
    pub(crate) http_client: reqwest::Client,
}

/// 已经签名好、可以直接发送的请求
#[derive(Debug)]
pub(crate) struct PreparedRequest {
    pub(crate) action: String,
    pub(crate) method: Method,
    pub(crate) url: String,
    /// POST时的`text/plain`请求体
    pub(crate) body: Option<String>,
}

/// 成功返回时的状态码和解析后的数据
#[derive(Debug)]
pub(crate) struct Reply<T> {
    /// 实际发送的`Action`，调用方可能通过额外参数覆盖
    pub(crate) action: String,
    pub(crate) status: StatusCode,
    pub(crate) data: T,
}

// region:    --- error document
// 兼容几种错误返回的格式：
// <Error><Message>..</Message></Error>
// <Response><Errors><Error><Message>..</Message></Error></Errors></Response>
// <ErrorResponse><Error><Message>..</Message></Error></ErrorResponse>
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct ErrorDocument {
    code: Option<String>,
    message: Option<String>,
    error: Option<ServiceError>,
    errors: Option<ErrorList>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ErrorList {
    #[serde(default)]
    error: Vec<ServiceError>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ServiceError {
    code: Option<String>,
    message: Option<String>,
}

/// 返回(code, message)，解析失败则都为None
fn extract_service_error(body: &str) -> (Option<String>, Option<String>) {
    let Ok(doc) = parse_xml_str::<ErrorDocument>(body) else {
        return (None, None);
    };
    let nested = doc
        .errors
        .and_then(|list| list.error.into_iter().next())
        .or(doc.error);
    match nested {
        Some(e) => (e.code, e.message),
        None => (doc.code, doc.message),
    }
}
// endregion: --- error document

impl Dispatcher {
    /// 组装公共参数、处理时间戳、决定GET/POST、签名并构造url
    pub(crate) fn prepare(
        &self,
        endpoint: &str,
        params: BTreeMap<String, String>,
        now: OffsetDateTime,
    ) -> Result<PreparedRequest, Error> {
        let mut all_params = BTreeMap::new();
        all_params.insert(
            "AWSAccessKeyId".to_owned(),
            self.credentials.access_key_id().to_owned(),
        );
        all_params.insert("Version".to_owned(), API_VERSION.to_owned());
        all_params.extend(params);

        match (
            all_params.contains_key("Timestamp"),
            all_params.contains_key("Expires"),
        ) {
            (false, false) => {
                all_params.insert("Timestamp".to_owned(), iso8601_seconds(&now)?);
            }
            (true, true) => {
                return Err(Error::Common(
                    "Timestamp and Expires are mutually exclusive".to_owned(),
                ));
            }
            _ => {}
        }

        // 消息体过大时不能放在url中，改为POST发送，此时MessageBody不参与签名
        let mut body = None;
        if all_params
            .get("MessageBody")
            .is_some_and(|b| b.len() > MAX_GET_MESSAGE_SIZE)
        {
            body = all_params.remove("MessageBody");
        }
        let method = if body.is_some() {
            Method::POST
        } else {
            Method::GET
        };

        self.signature_version
            .sign(&mut all_params, self.credentials.secret_key())?;

        let action = all_params.get("Action").cloned().unwrap_or_default();
        let url = format!(
            "{}/?{}",
            endpoint.trim_end_matches('/'),
            build_query_string(&all_params, &["Signature"])
        );

        Ok(PreparedRequest {
            action,
            method,
            url,
            body,
        })
    }

    pub(crate) async fn dispatch<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: BTreeMap<String, String>,
    ) -> Result<Reply<T>, Error> {
        let req = self.prepare(endpoint, params, OffsetDateTime::now_utc())?;
        tracing::debug!(action = %req.action, method = %req.method, endpoint, "sending sqs request");

        let builder = match req.body {
            Some(body) => self
                .http_client
                .post(&req.url)
                .header(CONTENT_TYPE, "text/plain")
                .body(body),
            None => self.http_client.get(&req.url),
        };
        let resp = builder.send().await?;

        let status = resp.status();
        tracing::debug!(action = %req.action, %status, "received sqs response");

        if !status.is_success() {
            // 读取错误返回失败时也要保留状态码
            let text = resp.text().await.unwrap_or_default();
            return Err(request_failed(req.action, status, &text));
        }

        let text = resp.text().await?;
        let data = parse_xml_str(&text)?;
        Ok(Reply {
            action: req.action,
            status,
            data,
        })
    }
}

/// 非2xx返回，body中没有可用的错误信息时只保留状态行
fn request_failed(action: String, status: StatusCode, body: &str) -> Error {
    let (code, message) = extract_service_error(body);
    tracing::warn!(%action, %status, ?code, ?message, "sqs request failed");
    Error::RequestFailed {
        action,
        status,
        code,
        message,
    }
}
