//! Three `Listener` agents joined to one space, fanned out to via an
//! `ExternalClient` broadcasting on `"*"`.

use std::sync::Arc;
use std::time::Duration;

use agentspace::prelude::*;
use async_trait::async_trait;
use parking_lot::Mutex;

struct Listener {
    name: &'static str,
}

#[async_trait]
impl Agent for Listener {}

fn registry(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> ActionRegistry<Listener> {
    ActionRegistry::builder()
        .action(
            "say",
            ActionDescriptor::new("hears a broadcast message", ReturnSpec::new("null", "nothing"))
                .with_arg("content", ArgSpec::new("string", "the message content")),
            move |_agent: &mut Listener, args: ActionArgs, _ctx: &mut AgentContext<Listener>| {
                let log = log.clone();
                Box::pin(async move {
                    let content: String = args.get("content")?;
                    log.lock().push(format!("{name} heard: {content}"));
                    Ok(None)
                })
            },
        )
        .expect("registering `say` should succeed")
        .build()
}

#[tokio::main]
async fn main() {
    agentspace::telemetry::init();

    let space = Space::local();
    let log = Arc::new(Mutex::new(Vec::new()));

    for name in ["alice", "bob", "carol"] {
        space
            .add(name, Listener { name }, registry(name, log.clone()))
            .await
            .expect("agent should join");
    }

    let broadcaster = space.external_client("announcer").await;
    broadcaster
        .send(PartialMessage::new("*", Action::new("say").with_arg("content", "meeting in 5 minutes")))
        .await
        .expect("broadcast should send");

    tokio::time::sleep(Duration::from_millis(100)).await;

    for line in log.lock().iter() {
        println!("{line}");
    }

    broadcaster.close().await;
    space.shutdown().await;
}
