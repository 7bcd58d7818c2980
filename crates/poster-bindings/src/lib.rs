//! Poster Session Area Bindings
//!
//! Reactive reads for a UI layer: each binding follows one event kind of a
//! controller and tells the renderer when it needs to re-read.

mod binding;
mod hooks;

pub use binding::Binding;
pub use hooks::{use_image_contents, use_stars, use_title};
