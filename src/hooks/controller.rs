//! Guarded action dispatch
//!
//! Owners expose their actions through [`Controller::action`] instead of
//! runtime reflection, and get hook-aware dispatch via [`Controller::call_action`].

use serde_json::Value;
use std::collections::HashMap;

use super::manager::ActionHooks;
use crate::error::{HookError, Result};

/// A callable action on `T`
pub type Action<T> = fn(&mut T, &[Value]) -> anyhow::Result<Value>;

/// Explicit name -> action table, filled in when the owner is constructed.
pub struct ActionTable<T> {
    actions: HashMap<String, Action<T>>,
}

impl<T> ActionTable<T> {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, action: Action<T>) -> Self {
        self.insert(name, action);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, action: Action<T>) {
        self.actions.insert(name.into(), action);
    }

    pub fn get(&self, name: &str) -> Option<Action<T>> {
        self.actions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

impl<T> Default for ActionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ActionTable<T> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
        }
    }
}

/// An object whose actions can be wrapped in before/after hooks
pub trait Controller: Sized {
    fn hooks(&self) -> &ActionHooks;

    fn hooks_mut(&mut self) -> &mut ActionHooks;

    /// Resolve an action by name. `None` means the owner has no such action.
    fn action(&self, name: &str) -> Option<Action<Self>>;

    /// Optional preparation step run at the start of every dispatch.
    ///
    /// Return `None` when the owner has no preparation step; that is the default.
    /// When present, the action name is appended to the parameters seen by callbacks.
    fn use_hooks(&mut self) -> Option<anyhow::Result<()>> {
        None
    }

    /// Name used in `MethodNotFound` errors
    fn owner_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Call `method` with its before and after hooks.
    ///
    /// Before callbacks get the extended parameter list. The action itself
    /// always gets the original `parameters`. Each after callback receives the
    /// previous result followed by the extended list, and its return value
    /// becomes the new result. Any error stops the dispatch and is returned as-is.
    fn call_action(&mut self, method: &str, parameters: Vec<Value>) -> Result<Value> {
        let mut params = parameters.clone();
        if let Some(prepared) = self.use_hooks() {
            params.push(Value::String(method.to_string()));
            prepared?;
        }

        let action = self
            .action(method)
            .ok_or_else(|| HookError::method_not_found(self.owner_name(), method))?;

        // Snapshot so the action can borrow `self` mutably.
        let before = self.hooks().before(method).to_vec();
        let after = self.hooks().after(method).to_vec();
        tracing::debug!(
            method,
            before = before.len(),
            after = after.len(),
            "Dispatching action"
        );

        for callback in &before {
            callback(params.as_slice())?;
        }

        let mut result = action(self, &parameters)?;

        for callback in &after {
            result = callback(result, params.as_slice())?;
        }

        Ok(result)
    }
}
