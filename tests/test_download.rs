use std::time::Duration;

use recipe_nutrition::config::{HttpConfig, SiteConfig};
use recipe_nutrition::fetchers::{HtmlCache, RequestFetcher};
use recipe_nutrition::pipelines::download;
use recipe_nutrition::ImportError;

fn site_for(server: &mockito::Server) -> SiteConfig {
    SiteConfig {
        host: server.host_with_port(),
        recipe_url_template: format!("{}/recipe/{{id}}/", server.url()),
    }
}

#[tokio::test]
async fn test_download_skips_cached_pages() {
    let mut server = mockito::Server::new_async().await;
    let fetched = server
        .mock("GET", "/recipe/2/")
        .with_status(200)
        .with_body("<html>recipe two</html>")
        .expect(1)
        .create_async()
        .await;
    let cached = server
        .mock("GET", "/recipe/1/")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = HtmlCache::new(dir.path());
    cache.store(1, "<html>recipe one</html>").await.unwrap();

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let report = download::run(&fetcher, &cache, &site_for(&server), &[1, 2], Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(report.fetched, vec![2]);
    assert_eq!(report.already_cached, vec![1]);
    assert_eq!(
        cache.load(2).await.unwrap().as_deref(),
        Some("<html>recipe two</html>")
    );
    assert_eq!(cache.cached_ids().await.unwrap(), vec![1, 2]);

    fetched.assert_async().await;
    cached.assert_async().await;
}

#[tokio::test]
async fn test_download_stops_at_first_failure() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/recipe/10/")
        .with_status(200)
        .with_body("<html>ten</html>")
        .create_async()
        .await;
    let _gone = server
        .mock("GET", "/recipe/11/")
        .with_status(410)
        .create_async()
        .await;
    let never = server
        .mock("GET", "/recipe/12/")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = HtmlCache::new(dir.path().join("html"));

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let result = download::run(
        &fetcher,
        &cache,
        &site_for(&server),
        &[10, 11, 12],
        Duration::ZERO,
    )
    .await;

    assert!(matches!(
        result,
        Err(ImportError::HttpStatus { status: 410, .. })
    ));
    assert_eq!(cache.cached_ids().await.unwrap(), vec![10]);
    never.assert_async().await;
}

#[tokio::test]
async fn test_download_propagates_cache_errors() {
    let mut server = mockito::Server::new_async().await;
    let never = server
        .mock("GET", "/recipe/7/")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("html");
    std::fs::write(&not_a_dir, "plain file").unwrap();
    let cache = HtmlCache::new(&not_a_dir);

    let fetcher = RequestFetcher::new(&HttpConfig::default()).unwrap();
    let result = download::run(&fetcher, &cache, &site_for(&server), &[7], Duration::ZERO).await;

    assert!(matches!(result, Err(ImportError::Io(_))));
    never.assert_async().await;
}
