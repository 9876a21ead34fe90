//! Access policy enforcement: `denied` and `requires-confirmation`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agentspace::prelude::*;
use async_trait::async_trait;

struct Host {
    invoked: Arc<AtomicBool>,
    allow_confirmation: bool,
}

#[async_trait]
impl Agent for Host {
    async fn request_permission(&mut self, _message: &Message) -> Result<bool, ActionFailure> {
        Ok(self.allow_confirmation)
    }
}

fn host_registry(invoked: Arc<AtomicBool>) -> ActionRegistry<Host> {
    ActionRegistry::builder()
        .action(
            "delete_file",
            ActionDescriptor::new("deletes a file", ReturnSpec::new("null", "nothing"))
                .with_arg("path", ArgSpec::new("string", "file path"))
                .with_access_policy(AccessPolicy::Denied),
            {
                let invoked = invoked.clone();
                move |_agent: &mut Host, _args: ActionArgs, _ctx: &mut AgentContext<Host>| {
                    invoked.store(true, Ordering::SeqCst);
                    Box::pin(async move { Ok(None) })
                }
            },
        )
        .expect("registering `delete_file` should succeed")
        .action(
            "shell_command",
            ActionDescriptor::new("runs a shell command", ReturnSpec::new("null", "nothing"))
                .with_arg("cmd", ArgSpec::new("string", "the command"))
                .with_access_policy(AccessPolicy::RequiresConfirmation),
            move |_agent: &mut Host, _args: ActionArgs, _ctx: &mut AgentContext<Host>| {
                invoked.store(true, Ordering::SeqCst);
                Box::pin(async move { Ok(None) })
            },
        )
        .expect("registering `shell_command` should succeed")
        .build()
}

#[tokio::test]
async fn denied_action_never_invokes_handler() {
    let space = Space::local();
    let invoked = Arc::new(AtomicBool::new(false));
    space
        .add("host", Host { invoked: invoked.clone(), allow_confirmation: true }, host_registry(invoked.clone()))
        .await
        .unwrap();

    let client = space.external_client("test-client").await;
    let request = PartialMessage::new("host", Action::new("delete_file").with_arg("path", "/etc/passwd"));
    let result = client.request(request, Duration::from_millis(500)).await;

    assert!(matches!(result, Err(failure) if failure.error_type == "access-denied"));
    assert!(!invoked.load(Ordering::SeqCst));

    client.close().await;
    space.shutdown().await;
}

#[tokio::test]
async fn requires_confirmation_rejected_by_callback_skips_handler() {
    let space = Space::local();
    let invoked = Arc::new(AtomicBool::new(false));
    space
        .add("host", Host { invoked: invoked.clone(), allow_confirmation: false }, host_registry(invoked.clone()))
        .await
        .unwrap();

    let client = space.external_client("test-client").await;
    let request = PartialMessage::new("host", Action::new("shell_command").with_arg("cmd", "rm -rf /"));
    let result = client.request(request, Duration::from_millis(500)).await;

    assert!(matches!(result, Err(failure) if failure.error_type == "access-denied"));
    assert!(!invoked.load(Ordering::SeqCst));

    client.close().await;
    space.shutdown().await;
}

#[tokio::test]
async fn requires_confirmation_allowed_invokes_handler() {
    let space = Space::local();
    let invoked = Arc::new(AtomicBool::new(false));
    space
        .add("host", Host { invoked: invoked.clone(), allow_confirmation: true }, host_registry(invoked.clone()))
        .await
        .unwrap();

    let client = space.external_client("test-client").await;
    client
        .send(PartialMessage::new("host", Action::new("shell_command").with_arg("cmd", "echo hi")))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(invoked.load(Ordering::SeqCst));

    client.close().await;
    space.shutdown().await;
}
