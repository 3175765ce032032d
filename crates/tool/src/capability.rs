//! Capabilities: descriptor plus executable handler.

use crate::ToolError;
use compact_str::CompactString;
use futures_util::FutureExt;
use llm::Tool;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{future::Future, marker::PhantomData};

/// A boxed, sendable future returned by [`Capability::call`].
pub type BoxFuture<'a, T> = futures_util::future::BoxFuture<'a, T>;

/// Something the model can invoke.
///
/// Object safe, so a registry can hold `Arc<dyn Capability>`.
pub trait Capability: Send + Sync {
    /// The descriptor shown to the model.
    fn descriptor(&self) -> Tool;

    /// Reject parameters before [`Capability::call`] runs.
    ///
    /// Accepts everything unless overridden.
    fn validate(&self, params: &Map<String, Value>) -> anyhow::Result<()> {
        let _ = params;
        Ok(())
    }

    /// Run the capability.
    fn call(&self, params: Map<String, Value>) -> BoxFuture<'_, anyhow::Result<Value>>;
}

/// A capability built from an async closure over typed parameters.
///
/// The input schema is generated from `P`; validation is deserializing
/// the parameter map into `P`.
pub struct FnTool<P, F> {
    descriptor: Tool,
    handler: F,
    _params: PhantomData<fn(P)>,
}

impl<P, F, Fut> FnTool<P, F>
where
    P: JsonSchema + DeserializeOwned,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    /// Create a capability named `name`.
    pub fn new(
        name: impl Into<CompactString>,
        description: impl Into<String>,
        handler: F,
    ) -> Result<Self, ToolError> {
        let name = name.into();
        let descriptor = Tool::new(name.clone(), description, input_schema::<P>())
            .map_err(|source| ToolError::Invalid { name, source })?;
        Ok(Self {
            descriptor,
            handler,
            _params: PhantomData,
        })
    }
}

impl<P, F, Fut> Capability for FnTool<P, F>
where
    P: JsonSchema + DeserializeOwned,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    fn descriptor(&self) -> Tool {
        self.descriptor.clone()
    }

    fn validate(&self, params: &Map<String, Value>) -> anyhow::Result<()> {
        parse::<P>(params.clone()).map(drop)
    }

    fn call(&self, params: Map<String, Value>) -> BoxFuture<'_, anyhow::Result<Value>> {
        match parse::<P>(params) {
            Ok(params) => (self.handler)(params).boxed(),
            Err(e) => futures_util::future::ready(Err(e)).boxed(),
        }
    }
}

fn parse<P: DeserializeOwned>(params: Map<String, Value>) -> anyhow::Result<P> {
    Ok(serde_json::from_value(Value::Object(params))?)
}

/// The JSON schema of `P`, without the `$schema` meta key.
fn input_schema<P: JsonSchema>() -> Value {
    let mut schema = schemars::schema_for!(P).to_value();
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
    }
    schema
}
