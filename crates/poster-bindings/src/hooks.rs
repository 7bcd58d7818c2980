//! Per-field hooks
//!
//! Convenience constructors seeded from the controller's current value.

use poster_session::{ImageContentsChange, SessionAreaController, StarChange, TitleChange};

use crate::binding::Binding;

/// Star count of the poster, updated on `starChange`
pub fn use_stars(controller: &SessionAreaController) -> Binding<i64> {
    Binding::new::<StarChange>(controller, controller.stars())
}

/// Image of the poster, updated on `imageContentsChange`
pub fn use_image_contents(controller: &SessionAreaController) -> Binding<Option<String>> {
    Binding::new::<ImageContentsChange>(
        controller,
        controller.image_contents().map(String::from),
    )
}

/// Title of the poster, updated on `titleChange`
pub fn use_title(controller: &SessionAreaController) -> Binding<Option<String>> {
    Binding::new::<TitleChange>(controller, controller.title().map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use poster_session::{EventKind, SessionAreaRecord};

    #[test]
    fn test_hooks_seeded_from_controller() {
        let controller = SessionAreaController::new(
            SessionAreaRecord::new("a1")
                .with_title("T")
                .with_image_contents("img1")
                .with_stars(2),
        )
        .unwrap();

        assert_eq!(use_stars(&controller).get(), 2);
        assert_eq!(use_title(&controller).get().as_deref(), Some("T"));
        assert_eq!(use_image_contents(&controller).get().as_deref(), Some("img1"));
    }

    #[test]
    fn test_hooks_track_reconciliation() {
        let mut controller = SessionAreaController::new(SessionAreaRecord::new("a1")).unwrap();
        let mut stars = use_stars(&controller);
        let mut title = use_title(&controller);
        let mut image = use_image_contents(&controller);

        assert_eq!(title.get(), None);
        assert_eq!(image.get(), None);

        controller
            .update_from(SessionAreaRecord::new("a1").with_image_contents("img2"))
            .unwrap();

        assert!(!stars.take_changed());
        assert!(!title.take_changed());
        assert!(image.take_changed());
        assert_eq!(image.get().as_deref(), Some("img2"));
    }

    #[test]
    fn test_each_hook_holds_one_listener() {
        let controller = SessionAreaController::new(SessionAreaRecord::new("a1")).unwrap();
        let _stars = use_stars(&controller);
        let _title = use_title(&controller);

        assert_eq!(controller.listener_count(EventKind::StarChange), 1);
        assert_eq!(controller.listener_count(EventKind::TitleChange), 1);
        assert_eq!(controller.listener_count(EventKind::ImageContentsChange), 0);
    }
}
