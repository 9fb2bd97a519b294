use serde::Deserialize;

// 可能重复出现的字段都使用`Vec`，这样无论xml中有0个、1个还是多个，得到的都是序列

/// 每个返回中都带有的状态
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseStatus {
    pub status_code: Option<String>,
    pub request_id: Option<String>,
}

// region:    --- service
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateQueueResponse {
    pub queue_url: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListQueuesResponse {
    #[serde(default)]
    pub queue_url: Vec<String>,
}
// endregion: --- service

// region:    --- queue
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SendMessageResponse {
    pub message_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    pub message_id: String,
    #[serde(default)]
    pub message_body: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ReceiveMessageResponse {
    #[serde(default)]
    pub message: Vec<Message>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AttributedValue {
    pub attribute: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetQueueAttributesResponse {
    #[serde(default)]
    pub attributed_value: Vec<AttributedValue>,
}

/// DeleteMessage、DeleteQueue、SetQueueAttributes 只返回状态
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StatusOnlyResponse {
    pub response_status: Option<ResponseStatus>,
}
// endregion: --- queue
