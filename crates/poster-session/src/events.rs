//! Typed change events
//!
//! Each event kind carries a fixed payload type:
//! ```text
//! titleChange          -> Option<String>
//! imageContentsChange  -> Option<String>
//! starChange           -> i64
//! ```
//! Listeners are invoked synchronously in registration order.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Shared, thread-safe listener callback
pub type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The poster title changed
    TitleChange,
    /// The poster image changed (and the starring roster was cleared)
    ImageContentsChange,
    /// The star count changed
    StarChange,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::TitleChange,
        EventKind::ImageContentsChange,
        EventKind::StarChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::TitleChange => "titleChange",
            EventKind::ImageContentsChange => "imageContentsChange",
            EventKind::StarChange => "starChange",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown event kind: {}", s))
    }
}

/// Handle returned by `add_listener`, used to remove that one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId {
    kind: EventKind,
    seq: u64,
}

impl ListenerId {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

pub struct Entry<T> {
    id: ListenerId,
    callback: Callback<T>,
}

/// Per-kind listener lists
#[derive(Default)]
pub struct Channels {
    title: Vec<Entry<Option<String>>>,
    image_contents: Vec<Entry<Option<String>>>,
    stars: Vec<Entry<i64>>,
}

/// An event kind together with the payload its listeners receive.
///
/// Implemented by the marker types [`TitleChange`], [`ImageContentsChange`]
/// and [`StarChange`].
pub trait PosterEvent: 'static {
    type Payload: Send + Sync + 'static;

    const KIND: EventKind;

    #[doc(hidden)]
    fn entries(channels: &Channels) -> &[Entry<Self::Payload>];

    #[doc(hidden)]
    fn entries_mut(channels: &mut Channels) -> &mut Vec<Entry<Self::Payload>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleChange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageContentsChange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarChange;

impl PosterEvent for TitleChange {
    type Payload = Option<String>;
    const KIND: EventKind = EventKind::TitleChange;

    fn entries(channels: &Channels) -> &[Entry<Self::Payload>] {
        &channels.title
    }

    fn entries_mut(channels: &mut Channels) -> &mut Vec<Entry<Self::Payload>> {
        &mut channels.title
    }
}

impl PosterEvent for ImageContentsChange {
    type Payload = Option<String>;
    const KIND: EventKind = EventKind::ImageContentsChange;

    fn entries(channels: &Channels) -> &[Entry<Self::Payload>] {
        &channels.image_contents
    }

    fn entries_mut(channels: &mut Channels) -> &mut Vec<Entry<Self::Payload>> {
        &mut channels.image_contents
    }
}

impl PosterEvent for StarChange {
    type Payload = i64;
    const KIND: EventKind = EventKind::StarChange;

    fn entries(channels: &Channels) -> &[Entry<Self::Payload>] {
        &channels.stars
    }

    fn entries_mut(channels: &mut Channels) -> &mut Vec<Entry<Self::Payload>> {
        &mut channels.stars
    }
}

#[derive(Default)]
struct Registry {
    next_seq: u64,
    channels: Channels,
}

impl Registry {
    fn remove(&mut self, id: ListenerId) -> bool {
        match id.kind {
            EventKind::TitleChange => remove_entry(&mut self.channels.title, id),
            EventKind::ImageContentsChange => remove_entry(&mut self.channels.image_contents, id),
            EventKind::StarChange => remove_entry(&mut self.channels.stars, id),
        }
    }

    fn count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::TitleChange => self.channels.title.len(),
            EventKind::ImageContentsChange => self.channels.image_contents.len(),
            EventKind::StarChange => self.channels.stars.len(),
        }
    }
}

fn remove_entry<T>(entries: &mut Vec<Entry<T>>, id: ListenerId) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.id != id);
    entries.len() != before
}

/// Publish/subscribe table keyed by event kind.
///
/// The table sits behind an `Arc` so [`Subscription`] guards can detach
/// without borrowing the owner. No lock is held while callbacks run, so a
/// listener may add or remove listeners; the change applies from the next
/// emission onwards.
#[derive(Default)]
pub struct Notifier {
    registry: Arc<RwLock<Registry>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for event `E`
    pub fn add_listener<E, F>(&self, callback: F) -> ListenerId
    where
        E: PosterEvent,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        let mut registry = self.registry.write();
        let id = ListenerId {
            kind: E::KIND,
            seq: registry.next_seq,
        };
        registry.next_seq += 1;
        E::entries_mut(&mut registry.channels).push(Entry {
            id,
            callback: Arc::new(callback),
        });

        tracing::trace!(event = %E::KIND, listener = id.seq, "Added listener");

        id
    }

    /// Remove one registration. Returns false if it was already gone.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = self.registry.write().remove(id);
        if removed {
            tracing::trace!(event = %id.kind, listener = id.seq, "Removed listener");
        }
        removed
    }

    /// Register a listener that is removed when the returned guard drops
    pub fn subscribe<E, F>(&self, callback: F) -> Subscription
    where
        E: PosterEvent,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        let id = self.add_listener::<E, F>(callback);
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry.read().count(kind)
    }

    /// Deliver `payload` to every listener of `E` registered right now
    pub(crate) fn emit<E: PosterEvent>(&self, payload: &E::Payload) {
        let callbacks: Vec<Callback<E::Payload>> = E::entries(&self.registry.read().channels)
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect();

        for callback in callbacks {
            callback(payload);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("Notifier")
            .field("title_listeners", &registry.count(EventKind::TitleChange))
            .field(
                "image_contents_listeners",
                &registry.count(EventKind::ImageContentsChange),
            )
            .field("star_listeners", &registry.count(EventKind::StarChange))
            .finish()
    }
}

/// Removes its listener when dropped
#[must_use = "dropping a Subscription removes the listener immediately"]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RwLock<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The notifier may already be gone along with its owner
        if let Some(registry) = self.registry.upgrade() {
            registry.write().remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
