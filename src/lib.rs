//! Before/after hooks around named actions, and convention-based model
//! lifecycle handlers.
//!
//! - [`hooks`]: register callbacks with [`hooks::ActionHooks`] and dispatch
//!   through [`hooks::Controller::call_action`].
//! - [`events`]: boot a model type once with [`events::boot_event_hooks`] so its
//!   lifecycle events reach `on<Event>` handlers.

pub mod config;
pub mod error;
pub mod events;
pub mod hooks;

pub use error::{HookError, Result};
