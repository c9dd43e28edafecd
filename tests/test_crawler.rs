use recipe_nutrition::config::HttpConfig;
use recipe_nutrition::crawler::{discover_recipes, RecipeLinkPattern};
use recipe_nutrition::fetchers::RequestFetcher;
use recipe_nutrition::store::SeenStore;

fn listing_html(host: &str, links: &[(u64, &str)]) -> String {
    let anchors: String = links
        .iter()
        .map(|(id, slug)| format!(r#"<a href="http://{host}/recipe/{id}/{slug}/">{slug}</a>"#))
        .collect();
    format!("<html><body><div class=\"grid\">{anchors}</div></body></html>")
}

#[tokio::test]
async fn test_discover_recipes_across_listings() {
    let mut server = mockito::Server::new_async().await;
    let host = server.host_with_port();

    let _desserts = server
        .mock("GET", "/recipes/79/desserts/")
        .with_status(200)
        .with_body(listing_html(
            &host,
            &[(10549, "best-brownies"), (25037, "chewy-cookies")],
        ))
        .create_async()
        .await;
    let _cookies = server
        .mock("GET", "/recipes/362/desserts/cookies/")
        .with_status(200)
        .with_body(listing_html(
            &host,
            &[(25037, "chewy-cookies-renamed"), (9827, "oatmeal-cookies")],
        ))
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/recipes/1/broken/")
        .with_status(500)
        .create_async()
        .await;

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let pattern = RecipeLinkPattern::new(&host).unwrap();
    let urls = [
        format!("{}/recipes/79/desserts/", server.url()),
        format!("{}/recipes/1/broken/", server.url()),
        format!("{}/recipes/362/desserts/cookies/", server.url()),
    ];

    let found = discover_recipes(&fetcher, &pattern, &urls).await;

    let ids: Vec<u64> = found.keys().copied().collect();
    assert_eq!(ids, vec![9827, 10549, 25037]);
    assert_eq!(found[&25037], "chewy-cookies");
    assert_eq!(found[&9827], "oatmeal-cookies");
}

#[tokio::test]
async fn test_discovered_ids_persist_in_seen_store() {
    let mut server = mockito::Server::new_async().await;
    let host = server.host_with_port();
    let _listing = server
        .mock("GET", "/recipes/")
        .with_status(200)
        .with_body(listing_html(&host, &[(1, "toast"), (2, "jam")]))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seen.json");

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let pattern = RecipeLinkPattern::new(&host).unwrap();
    let found = discover_recipes(&fetcher, &pattern, [format!("{}/recipes/", server.url())]).await;

    let mut store = SeenStore::open(&path).await.unwrap();
    assert!(store.insert(2, "jam"));
    for (id, label) in &found {
        store.insert(*id, label.as_str());
    }
    store.save().await.unwrap();

    let reopened = SeenStore::open(&path).await.unwrap();
    assert_eq!(reopened.ids(), vec![1, 2]);
    assert_eq!(reopened.get(1).map(|r| r.label.as_str()), Some("toast"));
}
