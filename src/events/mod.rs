//! Model Event Hooks
//!
//! Routes lifecycle events (`created`, `saving`, ...) to handler methods named
//! after the event, such as `onCreated`, resolved on the instance when the
//! event fires.

pub mod binder;
pub mod dispatcher;
pub mod types;

pub use binder::{
    boot_event_hooks, dispatch_to_handler, EventHandler, HasEventHooks,
    DEFAULT_EVENT_METHOD_PREFIX,
};
pub use dispatcher::{EventSubscriber, Listener, ModelEvents};
pub use types::{capitalize, ModelEvent, UnknownEvent};
