//! # Catalog Flows
//!
//! Collection and Poll read the collection catalog on every request; neither
//! goes through the service registry.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{Harness, COLLECTION, POLL};
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use tx_02_taxii_gateway::ServerConfig;

    #[tokio::test]
    async fn test_collection_lists_the_catalog() {
        let harness = Harness::new();
        harness
            .store
            .set_collections([("watch-list", "Generic indicator watch list")]);

        let (status, body) = harness.post(COLLECTION, r#"{"id":"req-2"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "inResponseTo": "req-2",
                "collections": [{
                    "name": "watch-list",
                    "available": true,
                    "description": "Generic indicator watch list",
                    "volume": 1,
                    "pollServiceAddress": "http://localhost:8000/services/poll/"
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_collection_uses_configured_poll_address() {
        let mut config = ServerConfig::default();
        config.collection.poll_service_address = "https://taxii.example.org/poll/".into();
        config.collection.volume = 250;
        let harness = Harness::with_config(config);
        harness.store.set_collections([("a", "first"), ("b", "second")]);

        let (_, body) = harness.post(COLLECTION, r#"{"id":"c-1"}"#).await;
        let collections = body["collections"].as_array().unwrap();
        assert_eq!(collections.len(), 2);
        for collection in collections {
            assert_eq!(collection["volume"], 250);
            assert_eq!(
                collection["pollServiceAddress"],
                "https://taxii.example.org/poll/"
            );
        }
    }

    #[tokio::test]
    async fn test_poll_known_collection() {
        let harness = Harness::new();
        harness
            .store
            .set_collections([("ip-watch-list", "Malicious IP addresses")]);

        let (status, body) = harness
            .post(POLL, r#"{"id":"poll-1","collectionName":"ip-watch-list"}"#)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inResponseTo"], "poll-1");
        assert_eq!(body["collectionName"], "ip-watch-list");
        assert_eq!(body["resultId"], "taxii-exchange-poll-1");
        assert_eq!(body["message"], "Poll results from the TAXII exchange");

        let blocks = body["contentBlocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["encoding"], "json");

        let document: Value =
            serde_json::from_str(blocks[0]["content"].as_str().unwrap()).unwrap();
        assert_eq!(document["indicators"][0]["title"], "Malicious IP Addresses");
    }

    #[tokio::test]
    async fn test_poll_unknown_collection() {
        let harness = Harness::new();
        harness.store.set_collections([("watch-list", "desc")]);

        let (status, body) = harness
            .post(POLL, r#"{"id":"req-3","collectionName":"unknown-x"}"#)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "type": "DESTINATION_COLLECTION_ERROR",
                "inResponseTo": "req-3",
                "message": "The requested collection \"unknown-x\" does not exist"
            })
        );
    }

    #[tokio::test]
    async fn test_poll_sees_catalog_changes_without_reload() {
        let harness = Harness::new();

        let request = r#"{"id":"p-2","collectionName":"watch-list"}"#;
        let (_, body) = harness.post(POLL, request).await;
        assert_eq!(body["type"], "DESTINATION_COLLECTION_ERROR");

        harness.store.set_collections([("watch-list", "desc")]);
        let (_, body) = harness.post(POLL, request).await;
        assert_eq!(body["collectionName"], "watch-list");
        assert_eq!(harness.store.service_reads(), 0);
    }
}
