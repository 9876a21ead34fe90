//! AMQP 0-9-1 transport: one topic exchange per space, a durable queue per
//! agent, reconnect with bounded exponential backoff.

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;
use futures::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, ExchangeDeclareOptions,
    QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};
use tokio::sync::RwLock as AsyncRwLock;

// Layer 3: Internal module imports
use super::config::AmqpConfig;
use super::transport::{Transport, TransportError};
use crate::mailbox::MailboxSenderHandle;
use crate::message::Message;
use crate::util::BROADCAST;

fn backoff_delay(attempt: u32, config: &AmqpConfig) -> Duration {
    let factor = 2u32.saturating_pow(attempt.min(16));
    let delay = config.reconnect_initial_backoff.saturating_mul(factor);
    delay.min(config.reconnect_max_backoff)
}

/// AMQP 0-9-1 transport. Each joined agent gets its own channel, a durable
/// queue named `{space_name}.agent.{id}`, bound to the space's topic
/// exchange both by its own id and by the literal broadcast key `"*"`.
pub struct AmqpTransport {
    config: AmqpConfig,
    connection: AsyncRwLock<Connection>,
    publish_channel: AsyncRwLock<Channel>,
    consumers: DashMap<String, tokio::task::JoinHandle<()>>,
}

impl AmqpTransport {
    /// Connects, declares the space's topic exchange, and returns a ready
    /// transport.
    pub async fn connect(config: AmqpConfig) -> Result<Arc<Self>, TransportError> {
        let connection = open_connection(&config).await?;
        let publish_channel = connection
            .create_channel()
            .await
            .map_err(|err| TransportError::Amqp(err.to_string()))?;
        declare_exchange(&publish_channel, &config).await?;

        Ok(Arc::new(Self {
            config,
            connection: AsyncRwLock::new(connection),
            publish_channel: AsyncRwLock::new(publish_channel),
            consumers: DashMap::new(),
        }))
    }

    fn queue_name(&self, agent_id: &str) -> String {
        format!("{}.agent.{}", self.config.space_name, agent_id)
    }

    /// Reconnects with bounded exponential backoff, re-declaring the
    /// exchange. Existing per-agent consumers are not automatically
    /// resubscribed; callers observing transport errors should re-`join`.
    async fn reconnect(&self) -> Result<(), TransportError> {
        let mut attempt = 0;
        loop {
            match open_connection(&self.config).await {
                Ok(connection) => {
                    let channel = connection
                        .create_channel()
                        .await
                        .map_err(|err| TransportError::Amqp(err.to_string()))?;
                    declare_exchange(&channel, &self.config).await?;
                    *self.connection.write().await = connection;
                    *self.publish_channel.write().await = channel;
                    tracing::info!("AMQP transport reconnected after {attempt} attempt(s)");
                    return Ok(());
                }
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "AMQP reconnect attempt failed");
                    tokio::time::sleep(backoff_delay(attempt, &self.config)).await;
                    attempt += 1;
                }
            }
        }
    }
}

async fn open_connection(config: &AmqpConfig) -> Result<Connection, TransportError> {
    let props = ConnectionProperties::default()
        .with_executor(tokio_executor_trait::Tokio::current())
        .with_reactor(tokio_reactor_trait::Tokio);
    Connection::connect(&config.amqp_uri(), props)
        .await
        .map_err(|err| TransportError::Amqp(err.to_string()))
}

async fn declare_exchange(channel: &Channel, config: &AmqpConfig) -> Result<(), TransportError> {
    channel
        .exchange_declare(
            &config.space_name,
            ExchangeKind::Topic,
            ExchangeDeclareOptions {
                durable: true,
                ..Default::default()
            },
            FieldTable::default(),
        )
        .await
        .map_err(|err| TransportError::Amqp(err.to_string()))
}

#[async_trait]
impl Transport for AmqpTransport {
    async fn join(
        &self,
        id: String,
        sender: MailboxSenderHandle,
        receive_own_broadcasts: bool,
    ) -> Result<(), TransportError> {
        if self.consumers.contains_key(&id) {
            return Err(TransportError::DuplicateId(id));
        }

        let connection = self.connection.read().await;
        let channel = connection
            .create_channel()
            .await
            .map_err(|err| TransportError::Amqp(err.to_string()))?;
        drop(connection);

        let queue_name = self.queue_name(&id);
        channel
            .queue_declare(
                &queue_name,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|err| TransportError::Amqp(err.to_string()))?;
        channel
            .queue_bind(&queue_name, &self.config.space_name, &id, QueueBindOptions::default(), FieldTable::default())
            .await
            .map_err(|err| TransportError::Amqp(err.to_string()))?;
        channel
            .queue_bind(
                &queue_name,
                &self.config.space_name,
                BROADCAST,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|err| TransportError::Amqp(err.to_string()))?;

        let mut consumer = channel
            .basic_consume(
                &queue_name,
                &format!("{queue_name}.consumer"),
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|err| TransportError::Amqp(err.to_string()))?;

        let self_id = id.clone();
        let handle = tokio::spawn(async move {
            while let Some(delivery) = consumer.next().await {
                let delivery = match delivery {
                    Ok(delivery) => delivery,
                    Err(err) => {
                        tracing::warn!(agent_id = %self_id, error = %err, "AMQP consumer error");
                        continue;
                    }
                };
                match serde_json::from_slice::<Message>(&delivery.data) {
                    Ok(message) => {
                        if message.from == self_id && !receive_own_broadcasts && message.is_broadcast() {
                            let _ = delivery.ack(BasicAckOptions::default()).await;
                            continue;
                        }
                        if let Err(err) = sender.send(message).await {
                            tracing::debug!(agent_id = %self_id, error = %err, "inbox send failed for AMQP delivery");
                        }
                    }
                    Err(err) => {
                        tracing::warn!(agent_id = %self_id, error = %err, "failed to decode AMQP message body");
                    }
                }
                let _ = delivery.ack(BasicAckOptions::default()).await;
            }
        });

        self.consumers.insert(id, handle);
        Ok(())
    }

    async fn leave(&self, id: &str) {
        if let Some((_, handle)) = self.consumers.remove(id) {
            handle.abort();
        }
    }

    async fn publish(&self, message: Message) -> Result<(), TransportError> {
        let routing_key = message.to.clone();
        let body = serde_json::to_vec(&message).map_err(|err| TransportError::Amqp(err.to_string()))?;

        let channel = self.publish_channel.read().await;
        let result = channel
            .basic_publish(
                &self.config.space_name,
                &routing_key,
                BasicPublishOptions::default(),
                &body,
                BasicProperties::default(),
            )
            .await;
        drop(channel);

        match result {
            Ok(confirm) => {
                confirm
                    .await
                    .map_err(|err| TransportError::Amqp(err.to_string()))?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "AMQP publish failed, attempting reconnect");
                self.reconnect().await?;
                Err(TransportError::Amqp(err.to_string()))
            }
        }
    }

    async fn shutdown(&self) {
        for entry in self.consumers.iter() {
            entry.value().abort();
        }
        self.consumers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AmqpConfig {
        AmqpConfig::from_env("test-space").with_reconnect_backoff(Duration::from_millis(100), Duration::from_secs(5))
    }

    #[test]
    fn backoff_doubles_until_the_configured_cap() {
        let config = config();
        assert_eq!(backoff_delay(0, &config), Duration::from_millis(100));
        assert_eq!(backoff_delay(1, &config), Duration::from_millis(200));
        assert_eq!(backoff_delay(2, &config), Duration::from_millis(400));
        assert_eq!(backoff_delay(20, &config), Duration::from_secs(5));
    }
}
