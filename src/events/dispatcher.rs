//! Per-type event subscription point.
//!
//! [`EventSubscriber`] is what the binder needs from the model layer.
//! [`ModelEvents`] is an in-process implementation that model types can own
//! (one per type) and fire from their persistence code.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::types::ModelEvent;
use crate::error::Result;

/// Closure invoked with the affected instance when an event fires
pub type Listener<M> = Arc<dyn Fn(&mut M) -> anyhow::Result<()> + Send + Sync>;

/// Static subscription surface of a model type
pub trait EventSubscriber<M> {
    /// Whether the type exposes a trigger point for `event`
    fn has_trigger(&self, event: ModelEvent) -> bool;

    fn subscribe(&mut self, event: ModelEvent, listener: Listener<M>);

    /// Move from unbound to bound. Returns `false` if the type was already bound.
    fn mark_booted(&mut self) -> bool;
}

/// Listeners for one model type, keyed by event
pub struct ModelEvents<M> {
    triggers: HashSet<ModelEvent>,
    listeners: HashMap<ModelEvent, Vec<Listener<M>>>,
    booted: bool,
}

impl<M> ModelEvents<M> {
    /// A type with no trigger points
    pub fn new() -> Self {
        Self {
            triggers: HashSet::new(),
            listeners: HashMap::new(),
            booted: false,
        }
    }

    pub fn with_triggers<I>(triggers: I) -> Self
    where
        I: IntoIterator<Item = ModelEvent>,
    {
        let mut events = Self::new();
        events.triggers.extend(triggers);
        events
    }

    /// A type exposing every lifecycle trigger
    pub fn with_all_triggers() -> Self {
        Self::with_triggers(ModelEvent::ALL)
    }

    pub fn add_trigger(&mut self, event: ModelEvent) {
        self.triggers.insert(event);
    }

    /// Subscribe a plain closure
    pub fn listen<F>(&mut self, event: ModelEvent, listener: F)
    where
        F: Fn(&mut M) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(event, Arc::new(listener));
    }

    /// Run every listener for `event` against `model`, in subscription order.
    ///
    /// The first failing listener stops the rest and its error is returned.
    pub fn fire(&self, event: ModelEvent, model: &mut M) -> Result<()> {
        let Some(listeners) = self.listeners.get(&event) else {
            return Ok(());
        };

        tracing::trace!(%event, listeners = listeners.len(), "Firing model event");
        for listener in listeners {
            listener(&mut *model)?;
        }
        Ok(())
    }

    pub fn listener_count(&self, event: ModelEvent) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }
}

impl<M> EventSubscriber<M> for ModelEvents<M> {
    fn has_trigger(&self, event: ModelEvent) -> bool {
        self.triggers.contains(&event)
    }

    fn subscribe(&mut self, event: ModelEvent, listener: Listener<M>) {
        self.listeners.entry(event).or_default().push(listener);
    }

    fn mark_booted(&mut self) -> bool {
        !std::mem::replace(&mut self.booted, true)
    }
}

impl<M> Default for ModelEvents<M> {
    fn default() -> Self {
        Self::new()
    }
}
