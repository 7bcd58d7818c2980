//! Session Area Controller
//!
//! Owns the local copy of one poster record and keeps it in step with
//! snapshots from the remote session service.

use crate::error::SessionAreaError;
use crate::events::{
    EventKind, ImageContentsChange, ListenerId, Notifier, PosterEvent, StarChange, Subscription,
    TitleChange,
};
use crate::record::SessionAreaRecord;
use crate::Result;

#[derive(Debug)]
pub struct SessionAreaController {
    /// Identity captured at construction
    id: String,
    title: Option<String>,
    image_contents: Option<String>,
    stars: i64,
    /// Players who starred the current image, in insertion order
    players_who_starred: Vec<String>,
    notifier: Notifier,
}

impl SessionAreaController {
    /// Create a controller from the initial snapshot. No events are emitted.
    pub fn new(record: SessionAreaRecord) -> Result<Self> {
        record.validate()?;

        tracing::info!(
            area_id = %record.id,
            stars = record.stars,
            "Created session area controller"
        );

        Ok(Self {
            id: record.id,
            title: record.title,
            image_contents: record.image_contents,
            stars: record.stars,
            players_who_starred: Vec::new(),
            notifier: Notifier::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the title, emitting `titleChange` if it differs from the current one
    pub fn set_title(&mut self, title: Option<String>) {
        if self.title == title {
            return;
        }

        self.title = title;
        self.emit::<TitleChange>(self.title.clone());
    }

    pub fn image_contents(&self) -> Option<&str> {
        self.image_contents.as_deref()
    }

    /// Set the image. A different image empties the starring roster and
    /// emits `imageContentsChange`.
    pub fn set_image_contents(&mut self, image_contents: Option<String>) {
        if self.image_contents == image_contents {
            return;
        }

        self.image_contents = image_contents;
        self.players_who_starred.clear();
        self.emit::<ImageContentsChange>(self.image_contents.clone());
    }

    pub fn stars(&self) -> i64 {
        self.stars
    }

    /// Set the star count, emitting `starChange` if it differs.
    ///
    /// A negative count is rejected without touching any state.
    pub fn set_stars(&mut self, stars: i64) -> Result<()> {
        if stars < 0 {
            return Err(SessionAreaError::NegativeStars(stars));
        }
        if self.stars == stars {
            return Ok(());
        }

        self.stars = stars;
        self.emit::<StarChange>(stars);
        Ok(())
    }

    /// IDs of the players who starred the current image
    pub fn players_who_starred(&self) -> &[String] {
        &self.players_who_starred
    }

    /// Record that a player starred the current image.
    ///
    /// Returns false if the player was already on the roster.
    pub fn add_player_who_starred(&mut self, player_id: impl Into<String>) -> bool {
        let player_id = player_id.into();
        if self.players_who_starred.contains(&player_id) {
            return false;
        }
        self.players_who_starred.push(player_id);
        true
    }

    pub fn has_starred(&self, player_id: &str) -> bool {
        self.players_who_starred.iter().any(|id| id == player_id)
    }

    /// Export the current state for pushing upstream
    pub fn to_record(&self) -> SessionAreaRecord {
        SessionAreaRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            image_contents: self.image_contents.clone(),
            stars: self.stars,
        }
    }

    /// Apply a full snapshot: title, then image contents, then stars.
    ///
    /// The star count is checked before any field is applied, so a bad
    /// snapshot changes nothing. The snapshot id is ignored; the controller
    /// keeps the identity it was created with.
    pub fn update_from(&mut self, snapshot: SessionAreaRecord) -> Result<()> {
        if snapshot.stars < 0 {
            return Err(SessionAreaError::NegativeStars(snapshot.stars));
        }

        if snapshot.id != self.id {
            tracing::debug!(
                area_id = %self.id,
                snapshot_id = %snapshot.id,
                "Ignoring id of incoming snapshot"
            );
        }

        self.set_title(snapshot.title);
        self.set_image_contents(snapshot.image_contents);
        self.set_stars(snapshot.stars)
    }

    /// Register a listener for event `E`
    pub fn add_listener<E, F>(&self, callback: F) -> ListenerId
    where
        E: PosterEvent,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        self.notifier.add_listener::<E, F>(callback)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.notifier.remove_listener(id)
    }

    /// Register a listener that is removed when the returned guard drops
    pub fn subscribe<E, F>(&self, callback: F) -> Subscription
    where
        E: PosterEvent,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        self.notifier.subscribe::<E, F>(callback)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.notifier.listener_count(kind)
    }

    fn emit<E: PosterEvent>(&self, payload: E::Payload)
    where
        E::Payload: std::fmt::Debug,
    {
        tracing::debug!(
            area_id = %self.id,
            event = %E::KIND,
            value = ?payload,
            "Session area changed"
        );
        self.notifier.emit::<E>(&payload);
    }
}
