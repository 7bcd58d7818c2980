//! Poster Session Area
//!
//! Client-side mirror of one shared poster record:
//! - The area id is fixed for the controller's lifetime
//! - Setters notify listeners only when a value actually changes
//! - Changing the image clears the roster of players who starred it
//! - Remote snapshots are reconciled field by field

mod controller;
mod error;
mod events;
mod record;

pub use controller::SessionAreaController;
pub use error::SessionAreaError;
pub use events::{
    EventKind, ImageContentsChange, ListenerId, Notifier, PosterEvent, StarChange, Subscription,
    TitleChange,
};
pub use record::SessionAreaRecord;

pub type Result<T> = std::result::Result<T, SessionAreaError>;
