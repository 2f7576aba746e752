//! Update processing pipeline
//!
//! A small middleware chain mounted in front of the update router. Each
//! stage receives the update, a per-event context, and a continuation it
//! must invoke exactly once to let the event reach later stages; skipping
//! the continuation halts the pipeline, which is reserved for storage
//! failures that must abort the event.
//!
//! The context is a string-keyed bag of shared values. The database handle
//! travels through it under a configurable key, so stages that need storage
//! can treat its absence as "nothing to do" instead of an error.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use teloxide::types::Update;

use crate::utils::errors::Result;

/// Per-event context shared along the middleware chain
#[derive(Default)]
pub struct Context {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Publish a value under a key, replacing any previous entry
    pub fn insert<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.values.insert(key.into(), Arc::new(value));
    }

    /// Look up a value by key, returning None when the key is absent or
    /// holds a different type
    pub fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.values
            .get(key)
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Terminal stage of the chain: the router invoked after every middleware
pub type Endpoint =
    Box<dyn for<'a> Fn(&'a Update, &'a mut Context) -> BoxFuture<'a, Result<()>> + Send + Sync>;

/// One stage of the update pipeline
#[async_trait]
pub trait UpdateMiddleware: Send + Sync {
    async fn handle(&self, update: &Update, ctx: &mut Context, next: Next<'_>) -> Result<()>;
}

/// Continuation handed to each stage; consuming it runs the rest of the
/// chain and finally the endpoint
pub struct Next<'a> {
    remaining: &'a [Arc<dyn UpdateMiddleware>],
    endpoint: &'a Endpoint,
}

impl<'a> Next<'a> {
    pub async fn run(mut self, update: &Update, ctx: &mut Context) -> Result<()> {
        if let Some((current, rest)) = self.remaining.split_first() {
            self.remaining = rest;
            current.handle(update, ctx, self).await
        } else {
            (self.endpoint)(update, ctx).await
        }
    }
}

/// Ordered middleware chain
#[derive(Default)]
pub struct MiddlewareStack {
    stack: Vec<Arc<dyn UpdateMiddleware>>,
}

impl MiddlewareStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Append a stage; stages run in the order they were added
    pub fn with(mut self, middleware: impl UpdateMiddleware + 'static) -> Self {
        self.stack.push(Arc::new(middleware));
        self
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Run the whole chain for one update
    pub async fn run(&self, update: &Update, ctx: &mut Context, endpoint: &Endpoint) -> Result<()> {
        let next = Next {
            remaining: &self.stack,
            endpoint,
        };
        next.run(update, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use teloxide::types::{UpdateId, UpdateKind};
    use crate::utils::errors::AstrolineError;

    fn test_update() -> Update {
        Update {
            id: UpdateId(1),
            kind: UpdateKind::Error(serde_json::Value::Null),
        }
    }

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl UpdateMiddleware for Recorder {
        async fn handle(&self, update: &Update, ctx: &mut Context, next: Next<'_>) -> Result<()> {
            self.log.lock().unwrap().push(self.name);
            next.run(update, ctx).await
        }
    }

    struct Failing;

    #[async_trait]
    impl UpdateMiddleware for Failing {
        async fn handle(&self, _update: &Update, _ctx: &mut Context, _next: Next<'_>) -> Result<()> {
            Err(AstrolineError::InvalidInput("boom".to_string()))
        }
    }

    fn recording_endpoint(log: Arc<Mutex<Vec<&'static str>>>) -> Endpoint {
        Box::new(move |_update, _ctx| {
            let log = log.clone();
            Box::pin(async move {
                log.lock().unwrap().push("endpoint");
                Ok(())
            })
        })
    }

    #[tokio::test]
    async fn test_stages_run_in_order_then_endpoint() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stack = MiddlewareStack::new()
            .with(Recorder { name: "first", log: log.clone() })
            .with(Recorder { name: "second", log: log.clone() });

        let endpoint = recording_endpoint(log.clone());
        let mut ctx = Context::new();
        stack.run(&test_update(), &mut ctx, &endpoint).await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "endpoint"]);
    }

    #[tokio::test]
    async fn test_empty_stack_reaches_endpoint() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stack = MiddlewareStack::new();
        let endpoint = recording_endpoint(log.clone());
        let mut ctx = Context::new();
        stack.run(&test_update(), &mut ctx, &endpoint).await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["endpoint"]);
    }

    #[tokio::test]
    async fn test_failing_stage_aborts_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stack = MiddlewareStack::new()
            .with(Recorder { name: "first", log: log.clone() })
            .with(Failing)
            .with(Recorder { name: "unreachable", log: log.clone() });

        let endpoint = recording_endpoint(log.clone());
        let mut ctx = Context::new();
        let result = stack.run(&test_update(), &mut ctx, &endpoint).await;

        assert!(result.is_err());
        assert_eq!(*log.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn test_context_round_trip() {
        let mut ctx = Context::new();
        ctx.insert("answer", 42_i64);

        assert_eq!(ctx.get::<i64>("answer").as_deref(), Some(&42));
        assert!(ctx.get::<String>("answer").is_none());
        assert!(ctx.get::<i64>("missing").is_none());
        assert!(ctx.contains_key("answer"));
    }

    #[test]
    fn test_context_insert_replaces() {
        let mut ctx = Context::new();
        ctx.insert("key", "old".to_string());
        ctx.insert("key", "new".to_string());

        assert_eq!(ctx.get::<String>("key").as_deref().map(String::as_str), Some("new"));
    }
}
