//! Convention-based event handlers.
//!
//! Booting a model type subscribes one listener per lifecycle event. When the
//! event fires, the listener looks up `<prefix><Event>` on the instance (for
//! example `onCreated`) and calls it if the instance has it.

use std::collections::HashSet;
use std::sync::Arc;

use super::dispatcher::EventSubscriber;
use super::types::ModelEvent;
use crate::config::EventsConfig;

pub const DEFAULT_EVENT_METHOD_PREFIX: &str = "on";

/// A lifecycle handler; the instance is its only argument
pub type EventHandler<M> = fn(&mut M) -> anyhow::Result<()>;

/// Models whose lifecycle events are routed to prefixed handler methods
pub trait HasEventHooks: Sized + 'static {
    /// Resolve a handler by its full name, e.g. `onSaved`.
    fn event_handler(&self, name: &str) -> Option<EventHandler<Self>>;

    /// Instance-level prefix, if this instance declares one
    fn event_method_prefix_override(&self) -> Option<&str> {
        None
    }

    /// Type-level prefix used when the instance declares none
    fn default_event_method_prefix() -> &'static str {
        DEFAULT_EVENT_METHOD_PREFIX
    }

    fn event_method_prefix(&self) -> &str {
        self.event_method_prefix_override()
            .unwrap_or(Self::default_event_method_prefix())
    }
}

/// Subscribe handler dispatch for every configured event the type has a trigger for.
///
/// Runs once per subscriber; later calls return 0 without subscribing again.
/// Returns the number of subscriptions installed.
pub fn boot_event_hooks<M, S>(events: &mut S, config: &EventsConfig) -> usize
where
    M: HasEventHooks,
    S: EventSubscriber<M>,
{
    if !events.mark_booted() {
        tracing::debug!("Event hooks already booted");
        return 0;
    }

    let mut seen = HashSet::new();
    let mut bound = 0;
    for &event in &config.bind {
        if !seen.insert(event) {
            continue;
        }
        if !events.has_trigger(event) {
            tracing::trace!(%event, "No trigger point, skipping");
            continue;
        }
        events.subscribe(event, Arc::new(move |model: &mut M| dispatch_to_handler(event, model)));
        bound += 1;
    }

    tracing::debug!(bound, "Booted event hooks");
    bound
}

/// Resolve the handler on `model` for `event` and call it. A missing handler is a no-op.
pub fn dispatch_to_handler<M: HasEventHooks>(
    event: ModelEvent,
    model: &mut M,
) -> anyhow::Result<()> {
    let name = event.handler_name(model.event_method_prefix());
    match model.event_handler(&name) {
        Some(handler) => {
            tracing::trace!(%event, handler = %name, "Calling event handler");
            handler(model)
        }
        None => Ok(()),
    }
}
