//! Snapshot sync
//!
//! Glue between a transport and a controller: JSON snapshots in, local
//! edits out. How payloads travel is the transport's business.

use poster_session::{SessionAreaController, SessionAreaRecord};

use crate::Result;

/// Destination for locally edited state that must reach the remote service
pub trait UpstreamSink {
    fn push(&mut self, record: &SessionAreaRecord) -> Result<()>;
}

/// Parse and validate a snapshot payload
pub fn decode_snapshot(payload: &str) -> Result<SessionAreaRecord> {
    let record: SessionAreaRecord = serde_json::from_str(payload)?;
    record.validate()?;
    Ok(record)
}

pub fn encode_snapshot(record: &SessionAreaRecord) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

/// Build a controller from the service's initial-state payload
pub fn controller_from_payload(payload: &str) -> Result<SessionAreaController> {
    Ok(SessionAreaController::new(decode_snapshot(payload)?)?)
}

/// Reconcile a controller with a snapshot payload
pub fn apply_payload(controller: &mut SessionAreaController, payload: &str) -> Result<()> {
    let snapshot = decode_snapshot(payload)?;
    controller.update_from(snapshot)?;
    Ok(())
}

/// Export the controller's state and hand it to `sink`
pub fn push_local_change<S>(controller: &SessionAreaController, sink: &mut S) -> Result<()>
where
    S: UpstreamSink + ?Sized,
{
    let record = controller.to_record();
    sink.push(&record)?;

    tracing::debug!(
        area_id = %record.id,
        stars = record.stars,
        "Pushed local change upstream"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use poster_session::{SessionAreaError, StarChange};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingSink {
        pushed: Vec<String>,
        fail: bool,
    }

    impl UpstreamSink for RecordingSink {
        fn push(&mut self, record: &SessionAreaRecord) -> Result<()> {
            if self.fail {
                return Err(CoreError::Upstream("connection closed".to_string()));
            }
            self.pushed.push(encode_snapshot(record)?);
            Ok(())
        }
    }

    const INITIAL: &str = r#"{"id":"a1","title":"T","imageContents":"img1","stars":2}"#;

    #[test]
    fn test_decode_snapshot() {
        let record = decode_snapshot(INITIAL).unwrap();
        assert_eq!(record.id, "a1");
        assert_eq!(record.image_contents.as_deref(), Some("img1"));
        assert_eq!(record.stars, 2);
    }

    #[test]
    fn test_decode_rejects_bad_payloads() {
        assert!(matches!(
            decode_snapshot(r#"{"id":"a1","stars":-1}"#),
            Err(CoreError::SessionArea(SessionAreaError::NegativeStars(-1)))
        ));
        assert!(matches!(
            decode_snapshot(r#"{"id":"a1"}"#),
            Err(CoreError::Serialization(_))
        ));
        assert!(matches!(
            decode_snapshot(r#"{"id":"a1","stars":1.5}"#),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_payload_round_trip() {
        let controller = controller_from_payload(INITIAL).unwrap();
        let encoded = encode_snapshot(&controller.to_record()).unwrap();
        assert_eq!(decode_snapshot(&encoded).unwrap(), decode_snapshot(INITIAL).unwrap());
    }

    #[test]
    fn test_apply_payload() {
        let mut controller = controller_from_payload(INITIAL).unwrap();
        let star_events = Arc::new(AtomicUsize::new(0));
        {
            let star_events = Arc::clone(&star_events);
            controller.add_listener::<StarChange, _>(move |_| {
                star_events.fetch_add(1, Ordering::SeqCst);
            });
        }

        apply_payload(
            &mut controller,
            r#"{"id":"zzz","title":"T","imageContents":"img1","stars":5}"#,
        )
        .unwrap();

        assert_eq!(controller.id(), "a1");
        assert_eq!(controller.stars(), 5);
        assert_eq!(star_events.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_apply_malformed_payload_changes_nothing() {
        let mut controller = controller_from_payload(INITIAL).unwrap();

        assert!(apply_payload(&mut controller, "not json").is_err());
        assert_eq!(controller.to_record(), decode_snapshot(INITIAL).unwrap());
    }

    #[test]
    fn test_push_local_change() {
        let mut controller = controller_from_payload(INITIAL).unwrap();
        let mut sink = RecordingSink::default();

        controller.set_stars(3).unwrap();
        push_local_change(&controller, &mut sink).unwrap();

        assert_eq!(sink.pushed.len(), 1);
        let pushed = decode_snapshot(&sink.pushed[0]).unwrap();
        assert_eq!(pushed.id, "a1");
        assert_eq!(pushed.stars, 3);
    }

    #[test]
    fn test_push_failure_surfaces() {
        let controller = controller_from_payload(INITIAL).unwrap();
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        let sink: &mut dyn UpstreamSink = &mut sink;
        assert!(matches!(
            push_local_change(&controller, sink),
            Err(CoreError::Upstream(_))
        ));
    }
}
