#![allow(clippy::expect_used, clippy::unwrap_used, dead_code)]

#[path = "../../src/fixtures.rs"]
mod fixtures;

pub use fixtures::{ClassFixture, MethodFixture, SiteFixture};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Site root served by `server`.
pub fn base_url(server: &MockServer) -> String {
    format!("{}/api/", server.uri())
}

/// Mounts every page of `site` on `server`, expecting each to be fetched at
/// most `max_fetches` times.
pub async fn serve(server: &MockServer, site: &SiteFixture, max_fetches: u64) {
    for (url, html) in site.pages() {
        let page_path = url
            .strip_prefix(&server.uri())
            .expect("fixture pages live under the mock server")
            .to_string();
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(html)
                    .insert_header("content-type", "text/html; charset=utf-8"),
            )
            .expect(0..=max_fetches)
            .mount(server)
            .await;
    }
}
