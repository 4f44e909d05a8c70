//! Tests for webhook payload classification.

use super::event::{WebhookEvent, classify};
use serde_json::json;

fn completed_payload() -> serde_json::Value {
    json!({
        "event_type": "document_completed",
        "event_time": "t",
        "event_hash": "h",
        "meta": {
            "related_document_hash": "D1",
            "related_user_id": 1,
            "related_business_id": 2,
            "related_app_id": 3
        }
    })
}

mod completed_classification {
    use super::*;

    #[test]
    fn full_completed_shape_is_recognized() {
        let payload = completed_payload();

        let event = classify(&payload);

        match event {
            WebhookEvent::DocumentCompleted {
                document_hash,
                event_time,
                event_hash,
                meta,
            } => {
                assert_eq!(document_hash, "D1");
                assert_eq!(event_time, "t");
                assert_eq!(event_hash, "h");
                assert_eq!(meta["related_user_id"], 1);
            }
            other => panic!("Expected DocumentCompleted, got {other:?}"),
        }
    }

    #[test]
    fn extra_payload_fields_are_tolerated() {
        let mut payload = completed_payload();
        payload["signer"] = json!({"name": "Alice"});
        payload["meta"]["related_template_hash"] = json!("T1");

        assert!(matches!(
            classify(&payload),
            WebhookEvent::DocumentCompleted { .. }
        ));
    }

    #[test]
    fn string_ids_in_meta_are_tolerated() {
        let mut payload = completed_payload();
        payload["meta"]["related_user_id"] = json!("1");

        assert!(matches!(
            classify(&payload),
            WebhookEvent::DocumentCompleted { .. }
        ));
    }
}

mod changed_classification {
    use super::*;

    #[test]
    fn signed_event_is_a_change() {
        let mut payload = completed_payload();
        payload["event_type"] = json!("document_signed");

        let event = classify(&payload);

        match event {
            WebhookEvent::DocumentChanged {
                document_hash,
                event_type,
                event_time,
                ..
            } => {
                assert_eq!(document_hash, "D1");
                assert_eq!(event_type, "document_signed");
                assert_eq!(event_time, "t");
            }
            other => panic!("Expected DocumentChanged, got {other:?}"),
        }
    }

    #[test]
    fn partial_meta_is_enough_for_a_change() {
        let payload = json!({
            "event_type": "document_sent",
            "event_time": "t",
            "event_hash": "h",
            "meta": {"related_document_hash": "D2"}
        });

        let event = classify(&payload);

        match event {
            WebhookEvent::DocumentChanged {
                document_hash,
                event_type,
                ..
            } => {
                assert_eq!(document_hash, "D2");
                assert_eq!(event_type, "document_sent");
            }
            other => panic!("Expected DocumentChanged, got {other:?}"),
        }
    }

    #[test]
    fn completed_type_with_partial_meta_degrades_to_change() {
        // The exact completed shape requires the full meta block; a
        // completed event missing the related ids only matches the
        // general lifecycle shape.
        let payload = json!({
            "event_type": "document_completed",
            "event_time": "t",
            "event_hash": "h",
            "meta": {"related_document_hash": "D1"}
        });

        let event = classify(&payload);

        assert!(matches!(
            event,
            WebhookEvent::DocumentChanged { ref event_type, .. } if event_type == "document_completed"
        ));
    }
}

mod unrecognized_classification {
    use super::*;

    #[test]
    fn missing_document_hash_is_unrecognized() {
        let payload = json!({
            "event_type": "document_signed",
            "event_time": "t",
            "event_hash": "h",
            "meta": {"related_user_id": 1}
        });

        assert_eq!(classify(&payload), WebhookEvent::Unrecognized);
    }

    #[test]
    fn missing_event_hash_is_unrecognized() {
        let payload = json!({
            "event_type": "document_signed",
            "event_time": "t",
            "meta": {"related_document_hash": "D1"}
        });

        assert_eq!(classify(&payload), WebhookEvent::Unrecognized);
    }

    #[test]
    fn unrelated_shape_is_unrecognized() {
        let payload = json!({"ping": true});

        assert_eq!(classify(&payload), WebhookEvent::Unrecognized);
    }

    #[test]
    fn non_object_payloads_are_unrecognized() {
        assert_eq!(classify(&json!("hello")), WebhookEvent::Unrecognized);
        assert_eq!(classify(&json!(42)), WebhookEvent::Unrecognized);
        assert_eq!(classify(&json!([])), WebhookEvent::Unrecognized);
        assert_eq!(classify(&serde_json::Value::Null), WebhookEvent::Unrecognized);
    }

    #[test]
    fn non_string_event_type_is_unrecognized() {
        let payload = json!({
            "event_type": 7,
            "event_time": "t",
            "event_hash": "h",
            "meta": {"related_document_hash": "D1"}
        });

        assert_eq!(classify(&payload), WebhookEvent::Unrecognized);
    }
}
