//! End-to-end request/response and timeout scenarios over `LocalTransport`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::time::Duration;

use agentspace::prelude::*;
use async_trait::async_trait;
use serde_json::json;

struct Calculator;

#[async_trait]
impl Agent for Calculator {}

fn calculator_registry() -> ActionRegistry<Calculator> {
    ActionRegistry::builder()
        .action(
            "add",
            ActionDescriptor::new("adds two numbers", ReturnSpec::new("number", "the sum"))
                .with_arg("a", ArgSpec::new("number", "left operand"))
                .with_arg("b", ArgSpec::new("number", "right operand")),
            |_agent: &mut Calculator, args: ActionArgs, _ctx: &mut AgentContext<Calculator>| {
                Box::pin(async move {
                    let a: f64 = args.get("a")?;
                    let b: f64 = args.get("b")?;
                    Ok(Some(json!(a + b)))
                })
            },
        )
        .expect("registering `add` should succeed")
        .build()
}

#[tokio::test]
async fn calculator_add_via_request_returns_sum() {
    let space = Space::local();
    space.add("calc", Calculator, calculator_registry()).await.unwrap();

    let client = space.external_client("test-client").await;
    let partial = PartialMessage::new("calc", Action::new("add").with_arg("a", 1).with_arg("b", 2));
    let value = client.request(partial, Duration::from_secs(1)).await.unwrap();
    assert_eq!(value, json!(3.0));

    client.close().await;
    space.shutdown().await;
}

struct Slow;

#[async_trait]
impl Agent for Slow {}

fn slow_registry() -> ActionRegistry<Slow> {
    ActionRegistry::builder()
        .action(
            "sleep",
            ActionDescriptor::new("sleeps for ms milliseconds", ReturnSpec::new("null", "nothing"))
                .with_arg("ms", ArgSpec::new("number", "milliseconds to sleep")),
            |_agent: &mut Slow, args: ActionArgs, ctx: &mut AgentContext<Slow>| {
                Box::pin(async move {
                    let ms: u64 = args.get("ms")?;
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    ctx.respond_with(json!(null)).await?;
                    Ok(None)
                })
            },
        )
        .expect("registering `sleep` should succeed")
        .build()
}

#[tokio::test]
async fn request_timeout_drops_late_reply_without_affecting_later_requests() {
    let space = Space::local();
    space.add("slow", Slow, slow_registry()).await.unwrap();
    let client = space.external_client("test-client").await;

    let slow_request = PartialMessage::new("slow", Action::new("sleep").with_arg("ms", 500));
    let result = client.request(slow_request, Duration::from_millis(100)).await;
    assert!(matches!(result, Err(failure) if failure.error_type == "timeout"));

    // The late reply for the timed-out request arrives after the waiter was
    // already removed; it must not disturb a subsequent, independent request.
    tokio::time::sleep(Duration::from_millis(500)).await;

    let fast_request = PartialMessage::new("slow", Action::new("sleep").with_arg("ms", 10));
    let value = client.request(fast_request, Duration::from_secs(1)).await.unwrap();
    assert_eq!(value, json!(null));

    client.close().await;
    space.shutdown().await;
}
