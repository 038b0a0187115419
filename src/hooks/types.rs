//! Hook Types
//!
//! Callback signatures and the per-method registry that stores them.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Runs before an action with the extended parameter list. The return value is discarded.
pub type BeforeCallback = Arc<dyn Fn(&[Value]) -> anyhow::Result<()> + Send + Sync>;

/// Runs after an action. Receives the current result plus the extended parameter
/// list and returns the result handed to the next callback.
pub type AfterCallback = Arc<dyn Fn(Value, &[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// Which side of an action a callback is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    Before,
    After,
}

impl HookPhase {
    pub fn display_name(&self) -> &'static str {
        match self {
            HookPhase::Before => "before",
            HookPhase::After => "after",
        }
    }
}

/// Ordered callbacks keyed by method name.
///
/// Insertion order is execution order. Nothing is deduplicated, and a method
/// name does not have to exist on the owner when it is registered.
#[derive(Clone)]
pub struct CallbackRegistry<C> {
    entries: HashMap<String, Vec<C>>,
}

impl<C: Clone> CallbackRegistry<C> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Append `callback` to the list of every method in `methods`.
    ///
    /// An empty `methods` leaves the registry untouched.
    pub fn push<I, S>(&mut self, methods: I, callback: C)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for method in methods {
            self.entries
                .entry(method.into())
                .or_default()
                .push(callback.clone());
        }
    }

    /// Callbacks for `method` in registration order (empty if none).
    pub fn get(&self, method: &str) -> &[C] {
        self.entries.get(method).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, method: &str) -> bool {
        self.entries.contains_key(method)
    }

    /// Number of methods with at least one callback
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<C: Clone> Default for CallbackRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for CallbackRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (method, callbacks) in &self.entries {
            map.entry(method, &callbacks.len());
        }
        map.finish()
    }
}
