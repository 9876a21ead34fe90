//! In-process transport: no network, no serialization.

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;

// Layer 3: Internal module imports
use super::transport::{Transport, TransportError};
use crate::mailbox::MailboxSenderHandle;
use crate::message::Message;

#[derive(Clone)]
struct Member {
    sender: MailboxSenderHandle,
    receive_own_broadcasts: bool,
}

/// The default transport: agents run as concurrent `tokio` tasks within one
/// process, membership lives in a lock-free map, and broadcasts snapshot
/// membership at publish time.
#[derive(Default)]
pub struct LocalTransport {
    members: DashMap<String, Member>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self {
            members: DashMap::new(),
        }
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn join(
        &self,
        id: String,
        sender: MailboxSenderHandle,
        receive_own_broadcasts: bool,
    ) -> Result<(), TransportError> {
        if self.members.contains_key(&id) {
            return Err(TransportError::DuplicateId(id));
        }
        self.members.insert(
            id,
            Member {
                sender,
                receive_own_broadcasts,
            },
        );
        Ok(())
    }

    async fn leave(&self, id: &str) {
        self.members.remove(id);
    }

    async fn publish(&self, message: Message) -> Result<(), TransportError> {
        if message.is_broadcast() {
            let snapshot: Vec<(String, Member)> = self
                .members
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect();
            for (id, member) in snapshot {
                if id == message.from && !member.receive_own_broadcasts {
                    continue;
                }
                if let Err(err) = member.sender.send(message.clone()).await {
                    tracing::debug!(agent_id = %id, error = %err, "broadcast delivery failed");
                }
            }
        } else {
            let to = message.to.clone();
            if let Some(member) = self.members.get(&to) {
                if let Err(err) = member.sender.send(message).await {
                    tracing::debug!(%to, error = %err, "delivery failed");
                }
            }
            // An unknown `to` is silently dropped: "no-such-agent" is not
            // reported to the sender.
        }
        Ok(())
    }

    async fn shutdown(&self) {
        self.members.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mailbox::{new_mailbox, BackpressureStrategy};
    use crate::message::{stamp, Action, PartialMessage};

    #[tokio::test]
    async fn point_to_point_delivers_to_exactly_one_inbox() {
        let transport = LocalTransport::new();
        let (tx_a, mut rx_a) = new_mailbox(Some(8), BackpressureStrategy::Block);
        let (tx_b, mut rx_b) = new_mailbox(Some(8), BackpressureStrategy::Block);
        transport.join("a".into(), tx_a, false).await.unwrap();
        transport.join("b".into(), tx_b, false).await.unwrap();

        let msg = stamp(PartialMessage::new("b", Action::new("ping")), "a");
        transport.publish(msg).await.unwrap();

        assert!(rx_b.recv().await.is_some());
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_excludes_sender_unless_opted_in() {
        let transport = LocalTransport::new();
        let (tx_a, mut rx_a) = new_mailbox(Some(8), BackpressureStrategy::Block);
        let (tx_b, mut rx_b) = new_mailbox(Some(8), BackpressureStrategy::Block);
        transport.join("a".into(), tx_a, false).await.unwrap();
        transport.join("b".into(), tx_b, false).await.unwrap();

        let msg = stamp(PartialMessage::new("*", Action::new("say")), "a");
        transport.publish(msg).await.unwrap();

        assert!(rx_b.recv().await.is_some());
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn duplicate_join_is_rejected() {
        let transport = LocalTransport::new();
        let (tx, _rx) = new_mailbox(Some(8), BackpressureStrategy::Block);
        let (tx2, _rx2) = new_mailbox(Some(8), BackpressureStrategy::Block);
        transport.join("a".into(), tx, false).await.unwrap();
        let result = transport.join("a".into(), tx2, false).await;
        assert!(matches!(result, Err(TransportError::DuplicateId(_))));
    }
}
