//! Chat example with one tool.
//!
//! Registers a `current_time` tool, sends a question, answers any tool
//! calls and sends the results back once.
//!
//! Requires RELAY_PROVIDER (default `anthropic`), RELAY_MODEL and
//! RELAY_API_KEY. Run with:
//! ```sh
//! cargo run -p relay-client --example chat -- "What time is it in UTC?"
//! ```

use anyhow::Context;
use llm::Message;
use relay_client::{Client, Options};
use std::time::{SystemTime, UNIX_EPOCH};
use tool::ToolRegistry;

#[derive(serde::Deserialize, schemars::JsonSchema)]
struct Empty {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let provider = std::env::var("RELAY_PROVIDER").unwrap_or_else(|_| "anthropic".into());
    let model = std::env::var("RELAY_MODEL").context("RELAY_MODEL must be set")?;
    let key = std::env::var("RELAY_API_KEY").unwrap_or_default();
    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "What time is it in UTC?".into());

    let client = Client::new(&provider, &key, &model, Options::default())?;
    let mut registry = ToolRegistry::new();
    registry.register_fn(
        "current_time",
        "Returns the current unix time in seconds.",
        |_: Empty| async move {
            let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
            Ok::<_, anyhow::Error>(serde_json::json!({ "unix_seconds": now.as_secs() }))
        },
    )?;
    let tools = registry.descriptors();

    let mut messages = vec![
        Message::system("You are a helpful assistant. Use tools when they help."),
        Message::user(question),
    ];
    let response = client.chat(&messages, Some(&tools)).await?;
    if let Some(calls) = &response.tool_calls {
        messages.push(response.message.clone());
        messages.extend(registry.dispatch_all(calls).await);
        let response = client.chat(&messages, Some(&tools)).await?;
        println!("{}", response.content());
    } else {
        println!("{}", response.content());
    }

    client.close();
    Ok(())
}
