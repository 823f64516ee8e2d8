//! # Discovery Flows
//!
//! Header validation and decoding shared by every protocol service, and
//! the Discovery response built from the service registry.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{addresses, Harness, COLLECTION, DISCOVERY, POLL};
    use axum::http::StatusCode;
    use serde_json::json;
    use shared_types::{
        HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_SERVICES, MESSAGE_ENCODING_JSON,
        PROTOCOL_BINDING_HTTP, PROTOCOL_VERSION,
    };

    #[tokio::test]
    async fn test_missing_headers_yield_bad_message_without_reply_id() {
        let harness = Harness::new();

        for path in [DISCOVERY, COLLECTION, POLL] {
            let (status, body) = harness
                .post_with_headers(path, &[], r#"{"id":"req-1"}"#)
                .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({
                    "type": "BAD_MESSAGE",
                    "message": "TAXII Service Not Defined in HTTP Header X-TAXII-Services"
                })
            );
        }
    }

    #[tokio::test]
    async fn test_headers_are_checked_in_order() {
        let harness = Harness::new();

        let (_, body) = harness
            .post_with_headers(
                DISCOVERY,
                &[(HEADER_SERVICES, "taxii-1.0")],
                r#"{"id":"req-1"}"#,
            )
            .await;
        assert_eq!(body["message"], "Unsupported TAXII Service, taxii-1.0");

        let (_, body) = harness
            .post_with_headers(
                DISCOVERY,
                &[(HEADER_SERVICES, PROTOCOL_VERSION)],
                r#"{"id":"req-1"}"#,
            )
            .await;
        assert_eq!(
            body["message"],
            "Requested Encoding Not Defined in HTTP Header X-TAXII-Accept"
        );

        let (_, body) = harness
            .post_with_headers(
                DISCOVERY,
                &[
                    (HEADER_SERVICES, PROTOCOL_VERSION),
                    (HEADER_ACCEPT, MESSAGE_ENCODING_JSON),
                    (HEADER_CONTENT_TYPE, "xml"),
                ],
                r#"{"id":"req-1"}"#,
            )
            .await;
        assert_eq!(body["type"], "BAD_MESSAGE");
        assert_eq!(
            body["message"],
            "Supplied Message Encoding in X-TAXII-Content-Type Is Unsupported, xml"
        );
        assert!(body.get("inResponseTo").is_none());
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let harness = Harness::new();
        let (status, body) = harness.post(DISCOVERY, "{not json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"type": "BAD_MESSAGE", "message": "Can not decode Discovery Request"})
        );

        let (_, body) = harness.post(COLLECTION, "").await;
        assert_eq!(body["message"], "Can not decode Collection Request");
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let harness = Harness::new();

        let (_, body) = harness.post(DISCOVERY, r#"{"id":""}"#).await;
        assert_eq!(
            body,
            json!({
                "type": "BAD_MESSAGE",
                "message": "Discovery Request message did not include an ID"
            })
        );

        let (_, body) = harness
            .post(POLL, r#"{"collectionName":"watch-list"}"#)
            .await;
        assert_eq!(body["message"], "Poll Request message did not include an ID");
    }

    #[tokio::test]
    async fn test_empty_catalog_advertises_nothing() {
        let harness = Harness::new();
        let body = harness.discovery("req-1").await;
        assert_eq!(body, json!({"inResponseTo": "req-1", "services": []}));
    }

    #[tokio::test]
    async fn test_services_are_advertised_in_catalog_order() {
        let harness = Harness::new();
        harness.store.set_services([
            ("Discovery", true, "http://localhost:8000/services/discovery/"),
            ("Collection", true, "http://localhost:8000/services/collection/"),
            ("Poll", false, "http://localhost:8000/services/poll/"),
            ("Inbox", true, "http://localhost:8000/services/inbox/"),
        ]);

        let body = harness.discovery("disc-7").await;
        assert_eq!(body["inResponseTo"], "disc-7");
        assert_eq!(
            body["services"][0],
            json!({
                "type": "DISCOVERY",
                "available": true,
                "protocolBinding": PROTOCOL_BINDING_HTTP,
                "address": "http://localhost:8000/services/discovery/"
            })
        );
        assert_eq!(body["services"][1]["type"], "COLLECTION_MANAGEMENT");
        assert_eq!(body["services"][2]["available"], false);
        assert_eq!(body["services"][3]["type"], "INBOX");
        assert_eq!(addresses(&body).len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_service_type_is_left_out() {
        let harness = Harness::new();
        harness.store.set_services([
            ("Feed", true, "http://localhost:8000/services/feed/"),
            ("Poll", true, "http://localhost:8000/services/poll/"),
        ]);

        let body = harness.discovery("req-1").await;
        assert_eq!(addresses(&body), vec!["http://localhost:8000/services/poll/"]);
    }

    #[tokio::test]
    async fn test_only_the_first_json_value_is_read() {
        let harness = Harness::new();
        let (status, body) = harness
            .post(DISCOVERY, r#"{"id":"req-1"}{"id":"req-2"} trailing"#)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"inResponseTo": "req-1", "services": []}));
    }
}
