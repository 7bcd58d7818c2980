//! Poster Session Core
//!
//! Entry point for applications embedding poster session areas.
//! The transport owns delivery; this crate owns the state it delivers into.

mod config;
mod error;
pub mod sync;

pub use config::Config;
pub use error::CoreError;
pub use sync::UpstreamSink;

// Re-export the controller and binding layer
pub use poster_bindings::{use_image_contents, use_stars, use_title, Binding};
pub use poster_session::{
    EventKind, ImageContentsChange, ListenerId, Notifier, PosterEvent, SessionAreaController,
    SessionAreaError, SessionAreaRecord, StarChange, Subscription, TitleChange,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| config.env_filter())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(config.log_target)
        .init();
}
