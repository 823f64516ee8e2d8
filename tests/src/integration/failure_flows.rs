//! # Failure Flows
//!
//! Store outages, content failures and slow requests all surface as
//! `FAILURE` status messages over HTTP 200.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{
        addresses, FailingContent, Harness, StalledContent, COLLECTION, DISCOVERY, POLL,
    };
    use shared_types::{HEADER_SERVICES, PROTOCOL_VERSION};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tx_02_taxii_gateway::ServerConfig;

    #[tokio::test]
    async fn test_store_outage_during_reload() {
        let harness = Harness::new();
        harness.store.set_services([("Poll", true, "http://a/poll/")]);
        harness.store.set_offline(true);

        let (status, body) = harness.post(DISCOVERY, r#"{"id":"d-1"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "type": "FAILURE",
                "inResponseTo": "d-1",
                "message": "Unable to load the service list"
            })
        );
        assert!(harness.registry.is_dirty());

        harness.store.set_offline(false);
        assert_eq!(addresses(&harness.discovery("d-2").await), ["http://a/poll/"]);
    }

    #[tokio::test]
    async fn test_catalog_outage() {
        let harness = Harness::new();
        harness.store.set_offline(true);

        let (_, body) = harness.post(COLLECTION, r#"{"id":"c-1"}"#).await;
        assert_eq!(body["type"], "FAILURE");
        assert_eq!(body["inResponseTo"], "c-1");

        let (_, body) = harness
            .post(POLL, r#"{"id":"p-1","collectionName":"watch-list"}"#)
            .await;
        assert_eq!(body["type"], "FAILURE");
        assert_eq!(body["inResponseTo"], "p-1");
    }

    #[tokio::test]
    async fn test_content_failure() {
        let harness = Harness::with_content(ServerConfig::default(), Arc::new(FailingContent));
        harness.store.set_collections([("watch-list", "desc")]);

        let (status, body) = harness
            .post(POLL, r#"{"id":"p-1","collectionName":"watch-list"}"#)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "type": "FAILURE",
                "inResponseTo": "p-1",
                "message": "Unable to generate content for collection \"watch-list\""
            })
        );
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let mut config = ServerConfig::default();
        config.timeouts.request = Duration::from_millis(50);
        let harness = Harness::with_content(config, Arc::new(StalledContent));
        harness.store.set_collections([("watch-list", "desc")]);

        let (status, body) = harness
            .post(POLL, r#"{"id":"p-1","collectionName":"watch-list"}"#)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "FAILURE");
        assert_eq!(body["message"], "Request exceeded 50ms timeout");
        assert!(body.get("inResponseTo").is_none());
    }

    fn small_bodies() -> Harness {
        let mut config = ServerConfig::default();
        config.limits.max_request_size = 64;
        Harness::with_config(config)
    }

    fn oversized_body() -> String {
        format!(r#"{{"id":"req-1","collectionName":"{}"}}"#, "x".repeat(200))
    }

    #[tokio::test]
    async fn test_oversized_body_without_headers_reports_the_header() {
        let harness = small_bodies();

        for path in [DISCOVERY, COLLECTION, POLL] {
            let (status, body) = harness
                .post_with_headers(path, &[], &oversized_body())
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

        let (status, body) = harness
            .post_with_headers(POLL, &[(HEADER_SERVICES, PROTOCOL_VERSION)], &oversized_body())
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "Requested Encoding Not Defined in HTTP Header X-TAXII-Accept"
        );
    }

    #[tokio::test]
    async fn test_oversized_body_with_headers() {
        let harness = small_bodies();

        let (status, body) = harness.post(POLL, &oversized_body()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "type": "BAD_MESSAGE",
                "message": "Poll Request body could not be read within 64 bytes"
            })
        );
    }
}
