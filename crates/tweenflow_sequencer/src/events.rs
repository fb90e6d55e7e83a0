// SPDX-License-Identifier: MIT OR Apache-2.0
//! Notification channels fed by the native timeline's lifecycle callbacks.
//!
//! The controller hands the timeline one forwarding closure per event when
//! it builds. Each closure emits into the matching channel synchronously,
//! so listeners see exactly the order and count the timeline fires.
//!
//! Listeners must not call back into the owning sequencer; they run while
//! it is mid-operation.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use uuid::Uuid;

/// Lifecycle event of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequencerEvent {
    /// Went from paused to playing
    Started,
    /// Went from playing to paused
    Paused,
    /// Reached the end after all loops
    Completed,
    /// Finished one loop cycle
    StepCompleted,
    /// Went back to the start
    Rewound,
}

impl SequencerEvent {
    /// Get all events
    pub fn all() -> &'static [SequencerEvent] {
        &[
            SequencerEvent::Started,
            SequencerEvent::Paused,
            SequencerEvent::Completed,
            SequencerEvent::StepCompleted,
            SequencerEvent::Rewound,
        ]
    }

    fn index(self) -> usize {
        match self {
            Self::Started => 0,
            Self::Paused => 1,
            Self::Completed => 2,
            Self::StepCompleted => 3,
            Self::Rewound => 4,
        }
    }
}

/// Handle for removing a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub Uuid);

impl ListenerId {
    /// Create a new random listener ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

type Listener = Box<dyn FnMut()>;

/// A registered listener. The callback is taken out while it runs.
struct Entry {
    id: ListenerId,
    listener: Option<Listener>,
}

/// One listener list per [`SequencerEvent`]
#[derive(Default)]
pub struct EventChannels {
    channels: [RefCell<Vec<Entry>>; 5],
}

impl EventChannels {
    /// Create channels with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `event`
    pub fn subscribe(&self, event: SequencerEvent, listener: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId::new();
        self.channels[event.index()].borrow_mut().push(Entry {
            id,
            listener: Some(Box::new(listener)),
        });
        id
    }

    /// Remove a listener. Returns whether it was registered.
    ///
    /// Works from inside a running listener, including on itself.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.channels.iter().any(|channel| {
            let mut entries = channel.borrow_mut();
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            entries.len() != before
        })
    }

    /// Call every listener of `event` in subscription order.
    ///
    /// Listeners subscribed during the call first run on the next emit.
    /// Listeners removed during the call do not run again.
    pub fn emit(&self, event: SequencerEvent) {
        let channel = &self.channels[event.index()];
        let ids: Vec<ListenerId> = channel.borrow().iter().map(|entry| entry.id).collect();
        for id in ids {
            // The list is not borrowed during the call so listeners may edit it
            let Some(mut listener) = take_listener(channel, id) else {
                continue;
            };
            listener();
            if let Some(entry) = channel.borrow_mut().iter_mut().find(|entry| entry.id == id) {
                entry.listener = Some(listener);
            }
        }
    }

    /// Number of listeners on `event`
    pub fn listener_count(&self, event: SequencerEvent) -> usize {
        self.channels[event.index()].borrow().len()
    }

    /// Remove every listener
    pub fn clear(&self) {
        for channel in &self.channels {
            channel.borrow_mut().clear();
        }
    }
}

fn take_listener(channel: &RefCell<Vec<Entry>>, id: ListenerId) -> Option<Listener> {
    channel
        .borrow_mut()
        .iter_mut()
        .find(|entry| entry.id == id)
        .and_then(|entry| entry.listener.take())
}

impl fmt::Debug for EventChannels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for event in SequencerEvent::all() {
            map.entry(event, &self.listener_count(*event));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_only_matching_channel() {
        let channels = EventChannels::new();
        let started = Rc::new(Cell::new(0));
        let completed = Rc::new(Cell::new(0));

        let sink = started.clone();
        channels.subscribe(SequencerEvent::Started, move || sink.set(sink.get() + 1));
        let sink = completed.clone();
        channels.subscribe(SequencerEvent::Completed, move || sink.set(sink.get() + 1));

        channels.emit(SequencerEvent::Started);
        channels.emit(SequencerEvent::Started);
        assert_eq!(started.get(), 2);
        assert_eq!(completed.get(), 0);
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let channels = EventChannels::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for label in ["a", "b", "c"] {
            let sink = order.clone();
            channels.subscribe(SequencerEvent::Paused, move || sink.borrow_mut().push(label));
        }
        channels.emit(SequencerEvent::Paused);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unsubscribe() {
        let channels = EventChannels::new();
        let id = channels.subscribe(SequencerEvent::Rewound, || {});
        assert_eq!(channels.listener_count(SequencerEvent::Rewound), 1);
        assert!(channels.unsubscribe(id));
        assert!(!channels.unsubscribe(id));
        assert_eq!(channels.listener_count(SequencerEvent::Rewound), 0);
    }

    #[test]
    fn test_subscribe_during_emit() {
        let channels = Rc::new(EventChannels::new());
        let inner = channels.clone();
        channels.subscribe(SequencerEvent::StepCompleted, move || {
            inner.subscribe(SequencerEvent::StepCompleted, || {});
        });

        channels.emit(SequencerEvent::StepCompleted);
        assert_eq!(channels.listener_count(SequencerEvent::StepCompleted), 2);
    }

    #[test]
    fn test_unsubscribe_self_during_emit() {
        let channels = Rc::new(EventChannels::new());
        let hits = Rc::new(Cell::new(0));
        let removed = Rc::new(Cell::new(false));
        let own_id = Rc::new(Cell::new(None));

        let (inner, sink, flag, slot) = (channels.clone(), hits.clone(), removed.clone(), own_id.clone());
        let id = channels.subscribe(SequencerEvent::Completed, move || {
            sink.set(sink.get() + 1);
            if let Some(id) = slot.get() {
                flag.set(inner.unsubscribe(id));
            }
        });
        own_id.set(Some(id));

        channels.emit(SequencerEvent::Completed);
        channels.emit(SequencerEvent::Completed);
        assert!(removed.get());
        assert_eq!(hits.get(), 1);
        assert_eq!(channels.listener_count(SequencerEvent::Completed), 0);
    }

    #[test]
    fn test_unsubscribe_later_listener_during_emit() {
        let channels = Rc::new(EventChannels::new());
        let later_hits = Rc::new(Cell::new(0));
        let later_id = Rc::new(Cell::new(None));

        let (inner, slot) = (channels.clone(), later_id.clone());
        channels.subscribe(SequencerEvent::Paused, move || {
            if let Some(id) = slot.get() {
                inner.unsubscribe(id);
            }
        });
        let sink = later_hits.clone();
        let id = channels.subscribe(SequencerEvent::Paused, move || sink.set(sink.get() + 1));
        later_id.set(Some(id));

        channels.emit(SequencerEvent::Paused);
        assert_eq!(later_hits.get(), 0);
        assert_eq!(channels.listener_count(SequencerEvent::Paused), 1);
    }
}
