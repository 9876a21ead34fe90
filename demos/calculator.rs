//! A single `Calculator` agent driven from plain `main` code via
//! `ExternalClient`, the way a CLI or HTTP gateway would.

use std::time::Duration;

use agentspace::prelude::*;
use async_trait::async_trait;
use serde_json::json;

struct Calculator;

#[async_trait]
impl Agent for Calculator {}

fn registry() -> ActionRegistry<Calculator> {
    ActionRegistry::builder()
        .action(
            "add",
            ActionDescriptor::new("adds two numbers", ReturnSpec::new("number", "the sum"))
                .with_arg("a", ArgSpec::new("number", "left operand"))
                .with_arg("b", ArgSpec::new("number", "right operand")),
            |_agent: &mut Calculator, args: ActionArgs, ctx: &mut AgentContext<Calculator>| {
                Box::pin(async move {
                    let a: f64 = args.get("a")?;
                    let b: f64 = args.get("b")?;
                    ctx.respond_with(json!(a + b)).await?;
                    Ok(None)
                })
            },
        )
        .expect("registering `add` should succeed")
        .action(
            "divide",
            ActionDescriptor::new("divides a by b", ReturnSpec::new("number", "the quotient"))
                .with_arg("a", ArgSpec::new("number", "dividend"))
                .with_arg("b", ArgSpec::new("number", "divisor")),
            |_agent: &mut Calculator, args: ActionArgs, ctx: &mut AgentContext<Calculator>| {
                Box::pin(async move {
                    let a: f64 = args.get("a")?;
                    let b: f64 = args.get("b")?;
                    if b == 0.0 {
                        return Err(ActionFailure::new("bad-arguments", "division by zero"));
                    }
                    ctx.respond_with(json!(a / b)).await?;
                    Ok(None)
                })
            },
        )
        .expect("registering `divide` should succeed")
        .build()
}

#[tokio::main]
async fn main() {
    agentspace::telemetry::init();

    let space = Space::local();
    space.add("calculator", Calculator, registry()).await.expect("agent should join");
    let client = space.external_client("cli").await;

    let help = client
        .request(PartialMessage::new("calculator", Action::new("help")), Duration::from_secs(1))
        .await
        .expect("help should succeed");
    println!("available actions: {help}");

    let sum = client
        .request(
            PartialMessage::new("calculator", Action::new("add").with_arg("a", 4).with_arg("b", 9)),
            Duration::from_secs(1),
        )
        .await
        .expect("add should succeed");
    println!("4 + 9 = {sum}");

    match client
        .request(
            PartialMessage::new("calculator", Action::new("divide").with_arg("a", 1).with_arg("b", 0)),
            Duration::from_secs(1),
        )
        .await
    {
        Ok(value) => println!("1 / 0 = {value}"),
        Err(failure) => println!("1 / 0 failed: {failure}"),
    }

    client.close().await;
    space.shutdown().await;
}
