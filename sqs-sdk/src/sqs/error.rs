use crate::credentials::CredentialsError;
use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),
    /// 服务端返回了非2xx的状态码
    ///
    /// `message`是从返回的xml中提取的`<Error><Message>`，提取不到则为`None`
    #[error("ERROR: On calling {action}: {status}{}\n", message_suffix(.message))]
    RequestFailed {
        action: String,
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
    },
    #[error("ERROR: On calling {action}: {status} (response has no {field})\n")]
    ResponseMissingField {
        action: String,
        status: StatusCode,
        field: &'static str,
    },
    #[error("params error: {0}")]
    Common(String),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" ({})", m),
        None => String::new(),
    }
}

impl From<CredentialsError> for Error {
    fn from(e: CredentialsError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<sqs_sdk_common::Error> for Error {
    fn from(e: sqs_sdk_common::Error) -> Self {
        match e {
            sqs_sdk_common::Error::Xml(s) => Error::Xml(s),
            other => Error::Common(other.to_string()),
        }
    }
}
