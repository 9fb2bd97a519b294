//! queue及消息相关的api
//!
//! `Queue`持有client的`Dispatcher`的拷贝，请求发送到queue自己的url

use super::dispatch::Dispatcher;
use super::service::request_params;
use super::types_rs::{
    GetQueueAttributesResponse, Message, ReceiveMessageResponse, SendMessageResponse,
    StatusOnlyResponse,
};
use super::{Error, SignatureVersion};
use bon::Builder;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct Queue {
    endpoint: String,
    dispatcher: Dispatcher,
}

impl Queue {
    pub(crate) fn new(endpoint: String, dispatcher: Dispatcher) -> Self {
        Self {
            endpoint,
            dispatcher,
        }
    }

    /// queue的url
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn access_key_id(&self) -> &str {
        self.dispatcher.credentials.access_key_id()
    }

    pub fn signature_version(&self) -> SignatureVersion {
        self.dispatcher.signature_version
    }

    /// 返回queue的url
    pub fn display_name(&self) -> &str {
        &self.endpoint
    }

    pub fn send_message(&self) -> SendMessageBuilder<'_> {
        SendMessage::builder(self)
    }

    pub fn receive_message(&self) -> ReceiveMessageBuilder<'_> {
        ReceiveMessage::builder(self)
    }

    pub fn delete_message(&self) -> DeleteMessageBuilder<'_> {
        DeleteMessage::builder(self)
    }

    /// 删除queue本身
    pub fn delete(&self) -> DeleteQueueBuilder<'_> {
        DeleteQueue::builder(self)
    }

    pub fn get_attributes(&self) -> GetQueueAttributesBuilder<'_> {
        GetQueueAttributes::builder(self)
    }

    pub fn set_attribute(&self) -> SetQueueAttributesBuilder<'_> {
        SetQueueAttributes::builder(self)
    }

    async fn dispatch<T: serde::de::DeserializeOwned>(
        &self,
        action: &str,
        query: &impl Serialize,
        extra_params: &BTreeMap<String, String>,
    ) -> Result<super::dispatch::Reply<T>, Error> {
        let params = request_params(action, query, extra_params)?;
        self.dispatcher.dispatch(&self.endpoint, params).await
    }
}

// region:    --- send message
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendMessage<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    queue: &'a Queue,
    #[builder(field)]
    #[serde(skip_serializing)]
    extra_params: BTreeMap<String, String>,
    /// 超过4096字节时会使用POST发送
    message_body: &'a str,
}

impl<'a, S: send_message_builder::State> SendMessageBuilder<'a, S> {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

impl SendMessage<'_> {
    /// 返回MessageId
    pub async fn send(&self) -> Result<String, Error> {
        let reply = self
            .queue
            .dispatch::<SendMessageResponse>("SendMessage", self, &self.extra_params)
            .await?;
        reply
            .data
            .message_id
            .ok_or(Error::ResponseMissingField {
                action: reply.action,
                status: reply.status,
                field: "MessageId",
            })
    }
}
// endregion: --- send message

// region:    --- receive message
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiveMessage<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    queue: &'a Queue,
    #[builder(field)]
    #[serde(skip_serializing)]
    extra_params: BTreeMap<String, String>,
    /// 1-256，默认1
    number_of_messages: Option<u32>,
    /// 单位：秒
    visibility_timeout: Option<u32>,
}

impl<'a, S: receive_message_builder::State> ReceiveMessageBuilder<'a, S> {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

impl ReceiveMessage<'_> {
    /// queue为空时返回空列表
    pub async fn send(&self) -> Result<Vec<Message>, Error> {
        let reply = self
            .queue
            .dispatch::<ReceiveMessageResponse>("ReceiveMessage", self, &self.extra_params)
            .await?;
        Ok(reply.data.message)
    }
}
// endregion: --- receive message

// region:    --- delete message
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMessage<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    queue: &'a Queue,
    #[builder(field)]
    #[serde(skip_serializing)]
    extra_params: BTreeMap<String, String>,
    message_id: &'a str,
}

impl<'a, S: delete_message_builder::State> DeleteMessageBuilder<'a, S> {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

impl DeleteMessage<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        self.queue
            .dispatch::<StatusOnlyResponse>("DeleteMessage", self, &self.extra_params)
            .await?;
        Ok(())
    }
}
// endregion: --- delete message

// region:    --- delete queue
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteQueue<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    queue: &'a Queue,
    #[builder(field)]
    #[serde(skip_serializing)]
    extra_params: BTreeMap<String, String>,
    /// 为true时即使queue中还有消息也会删除
    force_deletion: Option<bool>,
}

impl<'a, S: delete_queue_builder::State> DeleteQueueBuilder<'a, S> {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

impl DeleteQueue<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        self.queue
            .dispatch::<StatusOnlyResponse>("DeleteQueue", self, &self.extra_params)
            .await?;
        Ok(())
    }
}
// endregion: --- delete queue

// region:    --- queue attributes
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetQueueAttributes<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    queue: &'a Queue,
    #[builder(field)]
    #[serde(skip_serializing)]
    extra_params: BTreeMap<String, String>,
    /// `All`、`VisibilityTimeout`、`ApproximateNumberOfMessages`
    #[builder(default = "All")]
    attribute: &'a str,
}

impl<'a, S: get_queue_attributes_builder::State> GetQueueAttributesBuilder<'a, S> {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

impl GetQueueAttributes<'_> {
    /// 返回 属性名 -> 值
    pub async fn send(&self) -> Result<BTreeMap<String, String>, Error> {
        let reply = self
            .queue
            .dispatch::<GetQueueAttributesResponse>("GetQueueAttributes", self, &self.extra_params)
            .await?;
        let attributes = reply
            .data
            .attributed_value
            .into_iter()
            .map(|v| (v.attribute, v.value))
            .collect();
        Ok(attributes)
    }
}

#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetQueueAttributes<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    queue: &'a Queue,
    #[builder(field)]
    #[serde(skip_serializing)]
    extra_params: BTreeMap<String, String>,
    attribute: &'a str,
    value: &'a str,
}

impl<'a, S: set_queue_attributes_builder::State> SetQueueAttributesBuilder<'a, S> {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

impl SetQueueAttributes<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        self.queue
            .dispatch::<StatusOnlyResponse>("SetQueueAttributes", self, &self.extra_params)
            .await?;
        Ok(())
    }
}
// endregion: --- queue attributes
