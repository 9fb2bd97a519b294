//! Amazon SQS sdk（API版本 2007-05-01）
//!
//! 文档：<https://docs.aws.amazon.com/AWSSimpleQueueService/latest/APIReference/>
//!
//! 使用方式和其它api一样：从client开始构造请求，`build()`之后`send()`
//!
//! ```no_run
//! # async fn run() -> Result<(), sqs_sdk::sqs::Error> {
//! use sqs_sdk::sqs;
//!
//! let client = sqs::Client::builder()
//!     .access_key_id("AKID")
//!     .secret_key("secret")
//!     .build()?;
//! let queue = client.create_queue().queue_name("q1").build().send().await?;
//! let id = queue.send_message().message_body("hello").build().send().await?;
//! println!("{} -> {}", queue.display_name(), id);
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::Config;

mod error;
pub use error::Error;

mod queue;
pub use queue::*;

mod service;
pub use service::*;

mod signature;
pub use signature::SignatureVersion;

mod types_rs;
pub use types_rs::*;

pub(crate) mod dispatch;

use bon::bon;
use dispatch::Dispatcher;
use std::collections::BTreeMap;
use url::Url;

use crate::credentials::Credentials;

pub const DEFAULT_ENDPOINT: &str = "http://queue.amazonaws.com";
/// 每个请求都会带上的`Version`参数
pub const API_VERSION: &str = "2007-05-01";
/// `MessageBody`超过这个字节数时改用POST发送
pub const MAX_GET_MESSAGE_SIZE: usize = 4096;

pub struct Client {
    endpoint: String,
    attributes: BTreeMap<String, String>,
    dispatcher: Dispatcher,
}

#[bon]
impl Client {
    /// - `endpoint`: 默认为[`DEFAULT_ENDPOINT`]
    /// - `signature_version`: 默认为版本1
    /// - `attributes`: 其它自定义的配置项，可以通过[`Client::attribute`]读取
    #[builder(on(String, into))]
    pub fn new(
        access_key_id: String,
        secret_key: String,
        endpoint: Option<String>,
        #[builder(default)] signature_version: SignatureVersion,
        #[builder(default)] attributes: BTreeMap<String, String>,
    ) -> Result<Self, Error> {
        let credentials = Credentials::new(access_key_id, secret_key)?;
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
        validate_endpoint(&endpoint)?;

        Ok(Self {
            endpoint,
            attributes,
            dispatcher: Dispatcher {
                credentials,
                signature_version,
                http_client: reqwest::Client::new(),
            },
        })
    }

    /// 通过配置构造，缺少`AWSAccessKeyId`或`SecretKey`时返回[`Error::Config`]
    pub fn from_config(config: Config) -> Result<Self, Error> {
        let access_key_id = config
            .access_key_id
            .ok_or_else(|| Error::Config("missing AWSAccessKeyId".to_owned()))?;
        let secret_key = config
            .secret_key
            .ok_or_else(|| Error::Config("missing SecretKey".to_owned()))?;

        Client::builder()
            .access_key_id(access_key_id)
            .secret_key(secret_key)
            .maybe_endpoint(config.endpoint)
            .signature_version(config.signature_version.unwrap_or_default())
            .attributes(config.attributes)
            .build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> Result<(), Error> {
        let endpoint = endpoint.into();
        validate_endpoint(&endpoint)?;
        self.endpoint = endpoint;
        Ok(())
    }

    pub fn access_key_id(&self) -> &str {
        self.dispatcher.credentials.access_key_id()
    }

    pub fn signature_version(&self) -> SignatureVersion {
        self.dispatcher.signature_version
    }

    /// 只影响之后创建的[`Queue`]，已经创建的queue保持原来的签名版本
    pub fn set_signature_version(&mut self, version: SignatureVersion) {
        self.dispatcher.signature_version = version;
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// 返回endpoint
    pub fn display_name(&self) -> &str {
        &self.endpoint
    }

    /// 通过url直接得到queue，不会发送请求
    pub fn get_queue(&self, queue_url: impl Into<String>) -> Queue {
        Queue::new(queue_url.into(), self.dispatcher.clone())
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), Error> {
    let url = Url::parse(endpoint)
        .map_err(|e| Error::Config(format!("invalid endpoint `{}`: {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "invalid endpoint `{}`: unsupported scheme {}",
            endpoint, other
        ))),
    }
}
