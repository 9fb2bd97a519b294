//! 和具体queue无关的api：创建queue、列出queue

use super::types_rs::{CreateQueueResponse, ListQueuesResponse};
use super::{Client, Error, Queue};
use bon::Builder;
use serde::Serialize;
use sqs_sdk_common::query_sign::to_query_map;
use std::collections::BTreeMap;

/// 把`Action`、请求结构体中的参数和额外参数合并，后面的覆盖前面的
pub(crate) fn request_params(
    action: &str,
    query: &impl Serialize,
    extra_params: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, Error> {
    let mut params = BTreeMap::new();
    params.insert("Action".to_owned(), action.to_owned());
    params.extend(to_query_map(query)?);
    params.extend(extra_params.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(params)
}

// region:    --- create queue
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateQueue<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    /// 其它的请求参数，如`Expires`
    // #[builder(field)]需要放在start_fn之后，其它字段之前
    #[builder(field)]
    #[serde(skip_serializing)]
    extra_params: BTreeMap<String, String>,
    queue_name: &'a str,
    /// 单位：秒
    default_visibility_timeout: Option<u32>,
}

impl<'a, S: create_queue_builder::State> CreateQueueBuilder<'a, S> {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

impl CreateQueue<'_> {
    /// 返回新创建（或已经存在）的queue
    pub async fn send(&self) -> Result<Queue, Error> {
        let client = self.client;
        let params = request_params("CreateQueue", self, &self.extra_params)?;
        let reply = client
            .dispatcher
            .dispatch::<CreateQueueResponse>(&client.endpoint, params)
            .await?;

        match reply.data.queue_url {
            Some(url) => Ok(client.get_queue(url)),
            None => Err(Error::ResponseMissingField {
                action: reply.action,
                status: reply.status,
                field: "QueueUrl",
            }),
        }
    }
}
// endregion: --- create queue

// region:    --- list queues
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListQueues<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(field)]
    #[serde(skip_serializing)]
    extra_params: BTreeMap<String, String>,
    queue_name_prefix: Option<&'a str>,
}

impl<'a, S: list_queues_builder::State> ListQueuesBuilder<'a, S> {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }
}

impl ListQueues<'_> {
    /// 按返回的顺序得到所有queue，没有queue时返回空列表
    pub async fn send(&self) -> Result<Vec<Queue>, Error> {
        let client = self.client;
        let params = request_params("ListQueues", self, &self.extra_params)?;
        let reply = client
            .dispatcher
            .dispatch::<ListQueuesResponse>(&client.endpoint, params)
            .await?;

        let queues = reply
            .data
            .queue_url
            .into_iter()
            .map(|url| client.get_queue(url))
            .collect();
        Ok(queues)
    }
}
// endregion: --- list queues

impl Client {
    pub fn create_queue(&self) -> CreateQueueBuilder<'_> {
        CreateQueue::builder(self)
    }

    pub fn list_queues(&self) -> ListQueuesBuilder<'_> {
        ListQueues::builder(self)
    }
}
