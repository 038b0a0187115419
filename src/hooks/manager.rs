//! Hook Manager
//!
//! Holds the before/after registries owned by a controller instance.

use serde_json::Value;
use std::sync::Arc;

use super::types::{AfterCallback, BeforeCallback, CallbackRegistry, HookPhase};

/// Before/after callbacks for one owner, keyed by action name
#[derive(Debug, Clone, Default)]
pub struct ActionHooks {
    before: CallbackRegistry<BeforeCallback>,
    after: CallbackRegistry<AfterCallback>,
}

impl ActionHooks {
    /// Create an empty set of hooks
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to run before each of `methods`.
    pub fn before_calling<I, S, F>(&mut self, methods: I, callback: F) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[Value]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.push_before(methods, Arc::new(callback))
    }

    /// Register an already shared callback, e.g. one attached to several owners.
    pub fn push_before<I, S>(&mut self, methods: I, callback: BeforeCallback) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let methods: Vec<String> = methods.into_iter().map(Into::into).collect();
        tracing::debug!(phase = HookPhase::Before.display_name(), ?methods, "Registering hook");
        self.before.push(methods, callback);
        self
    }

    /// Register `callback` to run after each of `methods`.
    ///
    /// After callbacks form a pipeline: each receives the previous callback's
    /// return value (or the action result for the first one).
    pub fn after_calling<I, S, F>(&mut self, methods: I, callback: F) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Value, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.push_after(methods, Arc::new(callback))
    }

    pub fn push_after<I, S>(&mut self, methods: I, callback: AfterCallback) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let methods: Vec<String> = methods.into_iter().map(Into::into).collect();
        tracing::debug!(phase = HookPhase::After.display_name(), ?methods, "Registering hook");
        self.after.push(methods, callback);
        self
    }

    pub fn before(&self, method: &str) -> &[BeforeCallback] {
        self.before.get(method)
    }

    pub fn after(&self, method: &str) -> &[AfterCallback] {
        self.after.get(method)
    }

    /// Number of callbacks registered for `method` in the given phase
    pub fn count(&self, phase: HookPhase, method: &str) -> usize {
        match phase {
            HookPhase::Before => self.before.get(method).len(),
            HookPhase::After => self.after.get(method).len(),
        }
    }

    pub fn before_registry(&self) -> &CallbackRegistry<BeforeCallback> {
        &self.before
    }

    pub fn after_registry(&self) -> &CallbackRegistry<AfterCallback> {
        &self.after
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Drop every registered callback
    pub fn clear(&mut self) {
        self.before.clear();
        self.after.clear();
    }
}
