//! Tests for the provider tree walkers with mocked HTTP responses.

use mockito::{Matcher, Server};
use serde_json::json;

use cloud_mirror::models::YandexConfig;
use cloud_mirror::{MailClient, YandexClient};

fn mail_page(config: &serde_json::Value) -> String {
    format!(
        "<html><head><script>window.cloudSettings = {};</script></head></html>",
        config
    )
}

mod mail_walker {
    use super::*;

    #[tokio::test]
    async fn nested_share_yields_one_entry_per_file() {
        let mut server = Server::new_async().await;
        let host = format!("{}/dl/", server.url());

        let root_config = json!({
            "dispatcher": {"weblink_view": [{"url": host}]},
            "folders": {
                "tree": [{"list": [{"name": "share", "weblink": "Ab12"}]}],
                "folder": {"list": [
                    {"name": "a.txt", "weblink": "Ab12/a.txt", "type": "file"},
                    {"name": "sub", "weblink": "Ab12/sub", "type": "folder"}
                ]}
            },
            "state": {"id": "public/Ab12"}
        });
        let sub_config = json!({
            "dispatcher": {"weblink_view": [{"url": host}]},
            "folders": {
                "tree": [{"list": [{"name": "share", "weblink": "Ab12"}]}],
                "folder": {"list": [
                    {"name": "b.txt", "weblink": "Ab12/sub/b.txt", "type": "file"}
                ]}
            },
            "state": {"id": "public/Ab12"}
        });

        let root_mock = server
            .mock("GET", "/share")
            .with_body(mail_page(&root_config))
            .expect(1)
            .create_async()
            .await;
        let sub_mock = server
            .mock("GET", "/share/sub")
            .with_body(mail_page(&sub_config))
            .expect(1)
            .create_async()
            .await;

        let client = MailClient::new();
        let url = format!("{}/share", server.url());
        let config = client.fetch_config(&url).await.unwrap();
        let entries = client.walk(config, url).await.unwrap();

        root_mock.assert_async().await;
        sub_mock.assert_async().await;

        let targets: Vec<String> = entries.iter().map(|e| e.target()).collect();
        assert_eq!(targets, vec!["a.txt", "sub/b.txt"]);
        for entry in &entries {
            assert!(!entry.target().starts_with('/'));
        }

        let mut unique = targets.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), targets.len());

        assert_eq!(
            entries[1].link(),
            format!("{}/dl/Ab12/sub/b.txt", server.url())
        );
    }

    #[tokio::test]
    async fn share_without_ancestor_tree_uses_item_weblink_as_base() {
        let mut server = Server::new_async().await;
        let host = format!("{}/dl/", server.url());

        let config = json!({
            "dispatcher": {"weblink_view": [{"url": host}]},
            "folders": {
                "tree": [{"list": []}],
                "folder": {"list": [
                    {"name": "solo.txt", "weblink": "Cd34", "type": "file"}
                ]}
            },
            "state": {"id": "public/Cd34"}
        });

        let mock = server
            .mock("GET", "/flat")
            .with_body(mail_page(&config))
            .create_async()
            .await;

        let client = MailClient::new();
        let url = format!("{}/flat", server.url());
        let config = client.fetch_config(&url).await.unwrap();
        let entries = client.walk(config, url).await.unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dir(), "");
        assert_eq!(entries[0].target(), "solo.txt");
        assert_eq!(
            entries[0].link(),
            format!("{}/dl/Cd34/solo.txt", server.url())
        );
    }
}

mod yandex_walker {
    use super::*;

    fn config(server: &Server, cookie: &str) -> YandexConfig {
        YandexConfig {
            sk: "token".to_string(),
            cookie: cookie.to_string(),
            base_name: "Photos".to_string(),
            base_hash: "HASH".to_string(),
            host: format!("{}/files", server.url()),
        }
    }

    #[tokio::test]
    async fn one_listing_request_per_folder() {
        let mut server = Server::new_async().await;
        let client = YandexClient::with_fetch_list_url(format!("{}/fetch", server.url()));
        let config = config(&server, "session=abc");

        let root_mock = server
            .mock("POST", "/fetch")
            .match_header("cookie", "session=abc")
            .match_body(Matcher::PartialJson(json!({"hash": "HASH:/"})))
            .with_body(
                json!({"resources": [
                    {"name": "1.jpg", "type": "file"},
                    {"name": "2020", "type": "dir"}
                ]})
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let sub_mock = server
            .mock("POST", "/fetch")
            .match_body(Matcher::PartialJson(json!({"hash": "HASH:/2020/"})))
            .with_body(json!({"resources": [{"name": "x.jpg", "type": "file"}]}).to_string())
            .expect(1)
            .create_async()
            .await;

        let entries = client.walk(&config, String::new()).await.unwrap();

        root_mock.assert_async().await;
        sub_mock.assert_async().await;

        let targets: Vec<String> = entries.iter().map(|e| e.target()).collect();
        assert_eq!(targets, vec!["1.jpg", "2020/x.jpg"]);
        assert_eq!(
            entries[1].link(),
            format!("{}/files/2020/x.jpg", server.url())
        );
    }

    #[tokio::test]
    async fn failed_listing_skips_subtree_without_error() {
        let mut server = Server::new_async().await;
        let client = YandexClient::with_fetch_list_url(format!("{}/fetch", server.url()));
        let config = config(&server, "");

        let root_mock = server
            .mock("POST", "/fetch")
            .match_body(Matcher::PartialJson(json!({"hash": "HASH:/"})))
            .with_body(
                json!({"resources": [
                    {"name": "good.txt", "type": "file"},
                    {"name": "bad", "type": "dir"},
                    {"name": "after.txt", "type": "file"}
                ]})
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let bad_mock = server
            .mock("POST", "/fetch")
            .match_body(Matcher::PartialJson(json!({"hash": "HASH:/bad/"})))
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let entries = client.walk(&config, String::new()).await.unwrap();

        root_mock.assert_async().await;
        bad_mock.assert_async().await;

        let targets: Vec<String> = entries.iter().map(|e| e.target()).collect();
        assert_eq!(targets, vec!["good.txt", "after.txt"]);
    }
}
