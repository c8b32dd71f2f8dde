use cuisine_nutrition::apis::tasty::TastyFetcher;
use cuisine_nutrition::infra::http_client::ReqwestRecipeClient;
use cuisine_nutrition::types::RawRecipe;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/recipes/list";

fn client(server: &MockServer) -> ReqwestRecipeClient {
    ReqwestRecipeClient::new(
        format!("{}{}", server.uri(), API_PATH),
        "test-key",
        "tasty.p.rapidapi.com",
        Duration::from_secs(5),
    )
    .unwrap()
}

async fn mount_page(server: &MockServer, from: &str, size: &str, names: &[&str]) {
    let results: Vec<_> = names.iter().map(|n| json!({ "name": n })).collect();
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("from", from))
        .and(query_param("size", size))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "tasty.p.rapidapi.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 5, "results": results })))
        .expect(1)
        .mount(server)
        .await;
}

fn names(recipes: &[RawRecipe]) -> Vec<String> {
    recipes
        .iter()
        .map(|r| match r {
            RawRecipe::Tasty(v) => v["name"].as_str().unwrap().to_string(),
            RawRecipe::RecipeDb(_) => panic!("unexpected scraped row"),
        })
        .collect()
}

#[tokio::test]
async fn test_paginates_until_exhausted() {
    let server = MockServer::start().await;
    mount_page(&server, "0", "2", &["a", "b"]).await;
    mount_page(&server, "2", "2", &["c", "d"]).await;
    mount_page(&server, "4", "2", &["e"]).await;
    mount_page(&server, "6", "2", &[]).await;

    let recipes = TastyFetcher::new(Box::new(client(&server))).fetch(100, 2).await;

    assert_eq!(names(&recipes), vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_truncates_to_max_count() {
    let server = MockServer::start().await;
    mount_page(&server, "0", "2", &["a", "b"]).await;
    mount_page(&server, "2", "2", &["c", "d"]).await;

    let recipes = TastyFetcher::new(Box::new(client(&server))).fetch(3, 2).await;

    assert_eq!(names(&recipes), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_error_status_keeps_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, "0", "2", &["a", "b"]).await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("from", "2"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let recipes = TastyFetcher::new(Box::new(client(&server))).fetch(10, 2).await;

    assert_eq!(names(&recipes), vec!["a", "b"]);
}
