//! Hooks System
//!
//! Before/after callbacks around named controller actions. Callbacks are
//! registered per action name and run in registration order whenever the
//! action is dispatched through [`Controller::call_action`].

pub mod controller;
pub mod manager;
pub mod types;

pub use controller::{Action, ActionTable, Controller};
pub use manager::ActionHooks;
pub use types::{AfterCallback, BeforeCallback, CallbackRegistry, HookPhase};
