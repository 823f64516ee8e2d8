//! # Reload Flows
//!
//! The admin trigger only flags the registry; the next Discovery request
//! does the reload.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{addresses, Harness, ADMIN};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::json;
    use tx_02_taxii_gateway::ServerConfig;

    fn without_boot_load() -> Harness {
        let mut config = ServerConfig::default();
        config.startup.load_services = false;
        Harness::with_config(config)
    }

    #[tokio::test]
    async fn test_boot_load_reads_services_once() {
        let harness = Harness::new();
        harness
            .store
            .set_services([("Discovery", true, "http://a/discovery/")]);

        assert_eq!(addresses(&harness.discovery("d-1").await), ["http://a/discovery/"]);
        assert_eq!(addresses(&harness.discovery("d-2").await), ["http://a/discovery/"]);
        assert_eq!(harness.store.service_reads(), 1);
    }

    #[tokio::test]
    async fn test_reload_makes_new_services_visible() {
        let harness = Harness::new();
        harness.store.set_services([("Poll", true, "http://a/poll/")]);
        assert_eq!(addresses(&harness.discovery("d-1").await), ["http://a/poll/"]);

        harness.store.set_services([("Poll", true, "http://b/poll/")]);
        assert_eq!(addresses(&harness.discovery("d-2").await), ["http://a/poll/"]);

        let (status, ack) = harness.admin("reloadservices=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack, json!({"reloadServices": true, "dirty": true}));

        assert_eq!(addresses(&harness.discovery("d-3").await), ["http://b/poll/"]);
        assert!(!harness.registry.is_dirty());
    }

    #[tokio::test]
    async fn test_repeated_triggers_reload_once() {
        let harness = without_boot_load();
        harness
            .store
            .set_services([("Discovery", true, "http://a/discovery/")]);

        assert!(harness.discovery("d-1").await["services"]
            .as_array()
            .unwrap()
            .is_empty());

        for _ in 0..3 {
            harness.admin("reloadservices=true").await;
        }
        assert_eq!(harness.store.service_reads(), 0);

        harness.discovery("d-2").await;
        harness.discovery("d-3").await;
        assert_eq!(harness.store.service_reads(), 1);
    }

    #[tokio::test]
    async fn test_other_queries_do_not_trigger() {
        let harness = without_boot_load();

        for query in ["", "reloadservices=1", "reloadservices=TRUE", "reload=true"] {
            let (status, ack) = harness.admin(query).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(ack, json!({"reloadServices": false, "dirty": false}));
        }
        assert!(!harness.registry.is_dirty());
    }

    #[tokio::test]
    async fn test_admin_accepts_post_and_ignores_headers() {
        let harness = without_boot_load();
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("{ADMIN}?reloadservices=true"))
            .body(Body::from("ignored"))
            .unwrap();

        let (status, ack) = harness.send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["dirty"], true);
        assert!(harness.registry.is_dirty());
    }
}
