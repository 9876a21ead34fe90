//! Per-agent FIFO delivery and send-time schema validation surfaced through
//! `ExternalClient`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use agentspace::prelude::*;
use async_trait::async_trait;
use parking_lot::Mutex;

struct Recorder {
    order: Arc<Mutex<Vec<u64>>>,
}

#[async_trait]
impl Agent for Recorder {}

fn recorder_registry() -> ActionRegistry<Recorder> {
    ActionRegistry::builder()
        .action(
            "record",
            ActionDescriptor::new("appends a sequence number", ReturnSpec::new("null", "nothing"))
                .with_arg("seq", ArgSpec::new("number", "sequence number")),
            |agent: &mut Recorder, args: ActionArgs, _ctx: &mut AgentContext<Recorder>| {
                Box::pin(async move {
                    let seq: u64 = args.get("seq")?;
                    agent.order.lock().push(seq);
                    Ok(None)
                })
            },
        )
        .expect("registering `record` should succeed")
        .build()
}

#[tokio::test]
async fn messages_from_one_sender_are_dispatched_in_send_order() {
    let space = Space::local();
    let order = Arc::new(Mutex::new(Vec::new()));
    space.add("recorder", Recorder { order: order.clone() }, recorder_registry()).await.unwrap();

    let client = space.external_client("test-client").await;
    for seq in 0u64..50 {
        client
            .send(PartialMessage::new("recorder", Action::new("record").with_arg("seq", seq)))
            .await
            .unwrap();
    }

    tokio::time::sleep(Duration::from_millis(200)).await;

    let recorded = order.lock().clone();
    let expected: Vec<u64> = (0..50).collect();
    assert_eq!(recorded, expected);

    client.close().await;
    space.shutdown().await;
}

#[tokio::test]
async fn empty_to_is_rejected_at_send_time_as_a_schema_error() {
    let space = Space::local();
    space.add("recorder", Recorder { order: Arc::new(Mutex::new(Vec::new())) }, recorder_registry()).await.unwrap();

    let client = space.external_client("test-client").await;
    let malformed = PartialMessage::new("", Action::new("record").with_arg("seq", 1));
    let result = client.send(malformed).await;

    assert!(matches!(result, Err(failure) if failure.error_type == "schema-error"));

    client.close().await;
    space.shutdown().await;
}

#[tokio::test]
async fn empty_action_name_is_rejected_at_send_time_as_a_schema_error() {
    let space = Space::local();
    space.add("recorder", Recorder { order: Arc::new(Mutex::new(Vec::new())) }, recorder_registry()).await.unwrap();

    let client = space.external_client("test-client").await;
    let malformed = PartialMessage::new("recorder", Action::new(""));
    let result = client.send(malformed).await;

    assert!(matches!(result, Err(failure) if failure.error_type == "schema-error"));

    client.close().await;
    space.shutdown().await;
}
