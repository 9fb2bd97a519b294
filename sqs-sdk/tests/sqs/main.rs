#![cfg(feature = "sqs")]

use httpmock::prelude::*;
use sqs_sdk::sqs::{self, Client, Error, MAX_GET_MESSAGE_SIZE, SignatureVersion};

fn mock_client(server: &MockServer) -> Client {
    Client::builder()
        .access_key_id("AKID")
        .secret_key("secret")
        .endpoint(server.base_url())
        .build()
        .unwrap()
}

#[tokio::test]
async fn create_queue_returns_queue_bound_to_url() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/")
            .query_param("Action", "CreateQueue")
            .query_param("QueueName", "q1")
            .query_param("AWSAccessKeyId", "AKID")
            .query_param("Version", "2007-05-01")
            .query_param("SignatureVersion", "1")
            .query_param_exists("Timestamp")
            .query_param_exists("Signature");
        then.status(200).body(
            "<CreateQueueResponse><QueueUrl>http://queue.amazonaws.com/123/q1</QueueUrl></CreateQueueResponse>",
        );
    });

    let client = mock_client(&server);
    let queue = client
        .create_queue()
        .queue_name("q1")
        .build()
        .send()
        .await
        .unwrap();

    m.assert();
    assert_eq!(queue.endpoint(), "http://queue.amazonaws.com/123/q1");
    assert_eq!(queue.access_key_id(), "AKID");
    assert_eq!(queue.signature_version(), SignatureVersion::V1);
}

#[tokio::test]
async fn create_queue_without_queue_url_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).query_param("Action", "CreateQueue");
        then.status(200).body(
            "<CreateQueueResponse><ResponseStatus><StatusCode>Success</StatusCode></ResponseStatus></CreateQueueResponse>",
        );
    });

    let client = mock_client(&server);
    let err = client
        .create_queue()
        .queue_name("q1")
        .build()
        .send()
        .await
        .err()
        .unwrap();

    assert!(matches!(err, Error::ResponseMissingField { field: "QueueUrl", .. }));
    assert!(err.to_string().starts_with("ERROR: On calling CreateQueue: 200 OK"));
}

#[tokio::test]
async fn missing_field_error_names_the_sent_action() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/123/q1/")
            .query_param("Action", "SendMessageV2");
        then.status(200)
            .body("<SendMessageResponse></SendMessageResponse>");
    });

    let queue = mock_client(&server).get_queue(format!("{}/123/q1", server.base_url()));
    let err = queue
        .send_message()
        .message_body("hello")
        .param("Action", "SendMessageV2")
        .build()
        .send()
        .await
        .err()
        .unwrap();

    m.assert();
    assert!(matches!(
        &err,
        Error::ResponseMissingField { action, field: "MessageId", .. } if action == "SendMessageV2"
    ));
    assert!(err.to_string().starts_with("ERROR: On calling SendMessageV2: 200 OK"));
}

#[tokio::test]
async fn list_queues_keeps_document_order() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(Method::GET).query_param("Action", "ListQueues");
        then.status(200).body(
            "<ListQueuesResponse>\
             <QueueUrl>http://queue.amazonaws.com/123/first</QueueUrl>\
             <QueueUrl>http://queue.amazonaws.com/123/second</QueueUrl>\
             <ResponseStatus><StatusCode>Success</StatusCode></ResponseStatus>\
             </ListQueuesResponse>",
        );
    });

    let client = mock_client(&server);
    let queues = client.list_queues().build().send().await.unwrap();

    m.assert();
    let urls = queues.iter().map(|q| q.endpoint()).collect::<Vec<_>>();
    assert_eq!(
        urls,
        [
            "http://queue.amazonaws.com/123/first",
            "http://queue.amazonaws.com/123/second"
        ]
    );
}

#[tokio::test]
async fn list_queues_single_and_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET)
            .query_param("Action", "ListQueues")
            .query_param("QueueNamePrefix", "one");
        then.status(200).body(
            "<ListQueuesResponse><QueueUrl>http://queue.amazonaws.com/123/one</QueueUrl></ListQueuesResponse>",
        );
    });
    server.mock(|when, then| {
        when.method(Method::GET)
            .query_param("Action", "ListQueues")
            .query_param("QueueNamePrefix", "none");
        then.status(200).body(
            "<ListQueuesResponse><ResponseStatus><StatusCode>Success</StatusCode></ResponseStatus></ListQueuesResponse>",
        );
    });

    let client = mock_client(&server);
    let one = client
        .list_queues()
        .queue_name_prefix("one")
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].endpoint(), "http://queue.amazonaws.com/123/one");

    let none = client
        .list_queues()
        .queue_name_prefix("none")
        .build()
        .send()
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn service_error_message_is_extracted() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).query_param("Action", "CreateQueue");
        then.status(403)
            .body("<Error><Message>Signature does not match</Message></Error>");
    });

    let client = mock_client(&server);
    let err = client
        .create_queue()
        .queue_name("q1")
        .build()
        .send()
        .await
        .err()
        .unwrap();

    let s = err.to_string();
    assert!(s.contains("Signature does not match"), "{}", s);
    assert_eq!(
        s,
        "ERROR: On calling CreateQueue: 403 Forbidden (Signature does not match)\n"
    );
}

#[tokio::test]
async fn unparsable_error_body_keeps_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).query_param("Action", "ListQueues");
        then.status(500).body("internal failure");
    });

    let client = mock_client(&server);
    let err = client.list_queues().build().send().await.err().unwrap();
    match &err {
        Error::RequestFailed {
            action,
            status,
            message,
            ..
        } => {
            assert_eq!(action, "ListQueues");
            assert_eq!(status.as_u16(), 500);
            assert!(message.is_none());
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "ERROR: On calling ListQueues: 500 Internal Server Error\n"
    );
}

#[tokio::test]
async fn malformed_success_body_is_an_xml_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).query_param("Action", "ListQueues");
        then.status(200).body("<ListQueuesResponse><QueueUrl>");
    });

    let client = mock_client(&server);
    let err = client.list_queues().build().send().await.err().unwrap();
    assert!(matches!(err, Error::Xml(_)), "{:?}", err);
}

#[tokio::test]
async fn small_message_is_sent_with_get() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/123/q1/")
            .query_param("Action", "SendMessage")
            .query_param("MessageBody", "hello world");
        then.status(200).body(
            "<SendMessageResponse><MessageId>msg-1</MessageId></SendMessageResponse>",
        );
    });

    let client = mock_client(&server);
    let queue = client.get_queue(format!("{}/123/q1", server.base_url()));
    let id = queue
        .send_message()
        .message_body("hello world")
        .build()
        .send()
        .await
        .unwrap();

    m.assert();
    assert_eq!(id, "msg-1");
}

#[tokio::test]
async fn large_message_is_sent_with_post() {
    let server = MockServer::start();
    let body = "z".repeat(MAX_GET_MESSAGE_SIZE + 1);
    let m = server.mock(|when, then| {
        when.method(Method::POST)
            .path("/123/q1/")
            .header("content-type", "text/plain")
            .query_param("Action", "SendMessage")
            .query_param_exists("Signature")
            .body(body.as_str());
        then.status(200).body(
            "<SendMessageResponse><MessageId>msg-2</MessageId></SendMessageResponse>",
        );
    });

    let client = mock_client(&server);
    let queue = client.get_queue(format!("{}/123/q1", server.base_url()));
    let id = queue
        .send_message()
        .message_body(&body)
        .build()
        .send()
        .await
        .unwrap();

    m.assert();
    assert_eq!(id, "msg-2");
}

#[tokio::test]
async fn receive_and_delete_messages() {
    let server = MockServer::start();
    let receive = server.mock(|when, then| {
        when.method(Method::GET)
            .query_param("Action", "ReceiveMessage")
            .query_param("NumberOfMessages", "2");
        then.status(200).body(
            "<ReceiveMessageResponse>\
             <Message><MessageId>m1</MessageId><MessageBody>first</MessageBody></Message>\
             <Message><MessageId>m2</MessageId><MessageBody>second</MessageBody></Message>\
             </ReceiveMessageResponse>",
        );
    });
    let delete = server.mock(|when, then| {
        when.method(Method::GET)
            .query_param("Action", "DeleteMessage")
            .query_param("MessageId", "m1");
        then.status(200).body(
            "<DeleteMessageResponse><ResponseStatus><StatusCode>Success</StatusCode></ResponseStatus></DeleteMessageResponse>",
        );
    });

    let client = mock_client(&server);
    let queue = client.get_queue(format!("{}/123/q1", server.base_url()));
    let messages = queue
        .receive_message()
        .number_of_messages(2)
        .build()
        .send()
        .await
        .unwrap();
    receive.assert();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message_body, "first");

    queue
        .delete_message()
        .message_id(&messages[0].message_id)
        .build()
        .send()
        .await
        .unwrap();
    delete.assert();
}

#[tokio::test]
async fn queue_attributes_and_delete() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET)
            .query_param("Action", "GetQueueAttributes")
            .query_param("Attribute", "All");
        then.status(200).body(
            "<GetQueueAttributesResponse>\
             <AttributedValue><Attribute>VisibilityTimeout</Attribute><Value>30</Value></AttributedValue>\
             </GetQueueAttributesResponse>",
        );
    });
    let set = server.mock(|when, then| {
        when.method(Method::GET)
            .query_param("Action", "SetQueueAttributes")
            .query_param("Attribute", "VisibilityTimeout")
            .query_param("Value", "60");
        then.status(200)
            .body("<SetQueueAttributesResponse></SetQueueAttributesResponse>");
    });
    let delete = server.mock(|when, then| {
        when.method(Method::GET)
            .query_param("Action", "DeleteQueue")
            .query_param("ForceDeletion", "true");
        then.status(200)
            .body("<DeleteQueueResponse></DeleteQueueResponse>");
    });

    let client = mock_client(&server);
    let queue = client.get_queue(format!("{}/123/q1", server.base_url()));

    let attrs = queue.get_attributes().build().send().await.unwrap();
    assert_eq!(attrs.get("VisibilityTimeout").map(String::as_str), Some("30"));

    queue
        .set_attribute()
        .attribute("VisibilityTimeout")
        .value("60")
        .build()
        .send()
        .await
        .unwrap();
    set.assert();

    queue.delete().force_deletion(true).build().send().await.unwrap();
    delete.assert();
}

#[tokio::test]
async fn legacy_signature_version_is_inherited() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).query_param("Action", "CreateQueue");
        then.status(200).body(
            "<CreateQueueResponse><QueueUrl>http://queue.amazonaws.com/123/q1</QueueUrl></CreateQueueResponse>",
        );
    });

    let client = Client::builder()
        .access_key_id("AKID")
        .secret_key("secret")
        .endpoint(server.base_url())
        .signature_version(SignatureVersion::Legacy)
        .build()
        .unwrap();
    let queue = client
        .create_queue()
        .queue_name("q1")
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(queue.signature_version(), SignatureVersion::Legacy);
}

#[test]
fn client_without_secret_key_fails() {
    let err = Client::from_config(sqs::Config {
        access_key_id: Some("AKID".to_owned()),
        endpoint: Some("http://127.0.0.1:1".to_owned()),
        ..Default::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, Error::Config(_)));
}

// 使用真实账号测试，配置放在 tests/sqs/config.toml
// 除了Client的配置项，还需要一个`QueueName`
fn get_live_client() -> Client {
    let file_str = std::fs::read_to_string("tests/sqs/config.toml").unwrap();
    let conf = toml::from_str::<sqs::Config>(&file_str).unwrap();
    Client::from_config(conf).unwrap()
}

#[tokio::test]
#[ignore]
async fn live_queue_round_trip() {
    let client = get_live_client();
    let queue_name = client.attribute("QueueName").unwrap().to_owned();
    let res = client
        .create_queue()
        .queue_name(&queue_name)
        .build()
        .send()
        .await;
    let queue = match res {
        Ok(q) => q,
        Err(e) => panic!("{}", e),
    };
    println!("queue: {}", queue.display_name());

    let id = queue
        .send_message()
        .message_body("hello from sqs-sdk")
        .build()
        .send()
        .await;
    println!("send: {:#?}", id);

    let messages = queue.receive_message().build().send().await;
    println!("receive: {:#?}", messages);
}
