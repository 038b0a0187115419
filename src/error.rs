//! Error types shared by the dispatcher and the event binder.

use thiserror::Error;

/// Errors surfaced by [`crate::hooks::Controller::call_action`] and by event firing.
#[derive(Debug, Error)]
pub enum HookError {
    /// The requested action is not exposed by the owner.
    #[error("Method {owner}::{method} does not exist.")]
    MethodNotFound { owner: String, method: String },

    /// An error raised by a callback, the target action or the preparation hook.
    /// Passed through untouched; use `downcast_ref` to recover the original type.
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}

impl HookError {
    pub fn method_not_found(owner: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            owner: owner.into(),
            method: method.into(),
        }
    }

    pub fn is_method_not_found(&self) -> bool {
        matches!(self, HookError::MethodNotFound { .. })
    }

    /// The wrapped callback error, if any.
    pub fn as_callback(&self) -> Option<&anyhow::Error> {
        match self {
            HookError::Callback(err) => Some(err),
            HookError::MethodNotFound { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HookError>;
