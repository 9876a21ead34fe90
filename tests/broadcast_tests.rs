//! Broadcast fan-out and no-such-action addressing rules.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use agentspace::prelude::*;
use async_trait::async_trait;
use parking_lot::Mutex;

struct Chatty;

#[async_trait]
impl Agent for Chatty {}

fn chatty_registry(heard: Arc<Mutex<Vec<String>>>) -> ActionRegistry<Chatty> {
    ActionRegistry::builder()
        .action(
            "say",
            ActionDescriptor::new("records what was said", ReturnSpec::new("null", "nothing"))
                .with_arg("content", ArgSpec::new("string", "the message content")),
            move |_agent: &mut Chatty, args: ActionArgs, _ctx: &mut AgentContext<Chatty>| {
                let heard = heard.clone();
                Box::pin(async move {
                    let content: String = args.get("content")?;
                    heard.lock().push(content);
                    Ok(None)
                })
            },
        )
        .expect("registering `say` should succeed")
        .build()
}

#[tokio::test]
async fn broadcast_say_reaches_every_agent_except_non_opted_in_sender() {
    let space = Space::local();

    let a_heard = Arc::new(Mutex::new(Vec::new()));
    let b_heard = Arc::new(Mutex::new(Vec::new()));
    let c_heard = Arc::new(Mutex::new(Vec::new()));

    space.add("a", Chatty, chatty_registry(a_heard.clone())).await.unwrap();
    space.add("b", Chatty, chatty_registry(b_heard.clone())).await.unwrap();
    space.add("c", Chatty, chatty_registry(c_heard.clone())).await.unwrap();

    let broadcaster = space.external_client("broadcaster").await;
    broadcaster
        .send(PartialMessage::new("*", Action::new("say").with_arg("content", "hi")))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(a_heard.lock().as_slice(), ["hi"]);
    assert_eq!(b_heard.lock().as_slice(), ["hi"]);
    assert_eq!(c_heard.lock().as_slice(), ["hi"]);

    broadcaster.close().await;
    space.shutdown().await;
}

#[tokio::test]
async fn no_such_action_errors_point_to_point_but_not_broadcast() {
    let space = Space::local();
    let heard = Arc::new(Mutex::new(Vec::new()));
    space.add("chatty", Chatty, chatty_registry(heard.clone())).await.unwrap();

    let client = space.external_client("test-client").await;

    let point_to_point = PartialMessage::new("chatty", Action::new("nope"));
    let result = client.request(point_to_point, Duration::from_millis(500)).await;
    assert!(matches!(result, Err(failure) if failure.error_type == "no-such-action"));

    let broadcast = PartialMessage::new("*", Action::new("nope"));
    client.send(broadcast).await.unwrap();
    // No `[error]` should arrive for the broadcast; confirm the agent is
    // still responsive to a real action afterwards.
    tokio::time::sleep(Duration::from_millis(100)).await;
    client
        .send(PartialMessage::new("chatty", Action::new("say").with_arg("content", "still here")))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(heard.lock().as_slice(), ["still here"]);

    client.close().await;
    space.shutdown().await;
}
