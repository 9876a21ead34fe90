//! `help` introspection fidelity: the implicit action and its arguments.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::time::Duration;

use agentspace::prelude::*;
use async_trait::async_trait;

struct Weather;

#[async_trait]
impl Agent for Weather {}

fn weather_registry() -> ActionRegistry<Weather> {
    ActionRegistry::builder()
        .action(
            "forecast",
            ActionDescriptor::new("returns the forecast for a city", ReturnSpec::new("string", "forecast text"))
                .with_arg("city", ArgSpec::new("string", "city name"))
                .with_access_policy(AccessPolicy::Permitted),
            |_agent: &mut Weather, _args: ActionArgs, _ctx: &mut AgentContext<Weather>| {
                Box::pin(async move { Ok(Some(serde_json::json!("sunny"))) })
            },
        )
        .expect("registering `forecast` should succeed")
        .action(
            "reset_station",
            ActionDescriptor::new("resets the weather station", ReturnSpec::new("null", "nothing"))
                .with_access_policy(AccessPolicy::Denied),
            |_agent: &mut Weather, _args: ActionArgs, _ctx: &mut AgentContext<Weather>| Box::pin(async move { Ok(None) }),
        )
        .expect("registering `reset_station` should succeed")
        .build()
}

#[tokio::test]
async fn help_with_no_argument_lists_every_action_including_help_itself() {
    let space = Space::local();
    space.add("weather", Weather, weather_registry()).await.unwrap();

    let client = space.external_client("test-client").await;
    let value = client
        .request(PartialMessage::new("weather", Action::new("help")), Duration::from_secs(1))
        .await
        .unwrap();

    let index = value.as_object().expect("help() returns an object");
    assert!(index.contains_key("forecast"));
    assert!(index.contains_key("reset_station"));
    assert!(index.contains_key("help"));
    assert_eq!(index.len(), 3);

    client.close().await;
    space.shutdown().await;
}

#[tokio::test]
async fn help_with_action_name_returns_its_full_declared_shape() {
    let space = Space::local();
    space.add("weather", Weather, weather_registry()).await.unwrap();

    let client = space.external_client("test-client").await;
    let value = client
        .request(
            PartialMessage::new("weather", Action::new("help").with_arg("action_name", "forecast")),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(value["description"], "returns the forecast for a city");
    assert_eq!(value["access_policy"], "permitted");
    assert_eq!(value["returns"]["type_name"], "string");
    assert_eq!(value["args"]["city"]["type_name"], "string");

    client.close().await;
    space.shutdown().await;
}

#[tokio::test]
async fn help_reports_denied_access_policy() {
    let space = Space::local();
    space.add("weather", Weather, weather_registry()).await.unwrap();

    let client = space.external_client("test-client").await;
    let value = client
        .request(
            PartialMessage::new("weather", Action::new("help").with_arg("action_name", "reset_station")),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(value["access_policy"], "denied");

    client.close().await;
    space.shutdown().await;
}

#[tokio::test]
async fn help_for_unknown_action_name_returns_empty_object() {
    let space = Space::local();
    space.add("weather", Weather, weather_registry()).await.unwrap();

    let client = space.external_client("test-client").await;
    let value = client
        .request(
            PartialMessage::new("weather", Action::new("help").with_arg("action_name", "does_not_exist")),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(value, serde_json::json!({}));

    client.close().await;
    space.shutdown().await;
}
