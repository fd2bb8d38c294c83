#![allow(clippy::expect_used, clippy::unwrap_used, dead_code)]

#[path = "../../../jdex-core/src/fixtures.rs"]
mod fixtures;

pub use fixtures::{ClassFixture, MethodFixture, SiteFixture};

use assert_cmd::Command;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn home_dir() -> &'static Path {
    static HOME_DIR: OnceLock<TempDir> = OnceLock::new();
    HOME_DIR
        .get_or_init(|| tempfile::tempdir().expect("failed to create home dir for tests"))
        .path()
}

/// Create a `jdex` command isolated from the user's settings file.
pub fn jdex_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jdex"));
    cmd.timeout(CMD_TIMEOUT);
    let home = home_dir();
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join(".config"));
    cmd.env_remove("JDEX_BASE_URL");
    cmd.env_remove("JDEX_CONFIG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Site root served by `server`.
pub fn base_url(server: &MockServer) -> String {
    format!("{}/api/", server.uri())
}

/// Mounts every page of `site` on `server`.
pub async fn serve(server: &MockServer, site: &SiteFixture) {
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
            .mount(server)
            .await;
    }
}

/// A small `java.util` site with inheritance and overloads.
pub fn collections_site(base: &str) -> SiteFixture {
    SiteFixture::new(base)
        .package(
            "java.util",
            "Contains the collections framework.",
            Some("Contains the <i>collections framework</i>."),
        )
        .class(
            ClassFixture::new(
                "java.util",
                "AbstractCollection",
                "public abstract class <span class=\"typeNameLabel\">AbstractCollection&lt;E&gt;</span>\n\
                 extends java.lang.Object",
            )
            .method("boolean", "isEmpty", "")
            .with_method(MethodFixture::new("int", "size", "").modifiers("public abstract")),
        )
        .class(
            ClassFixture::new(
                "java.util",
                "ArrayList",
                "public class <span class=\"typeNameLabel\">ArrayList&lt;E&gt;</span>\n\
                 extends <a href=\"AbstractCollection.html\">AbstractCollection</a>&lt;E&gt;",
            )
            .method("boolean", "add", "E e")
            .method("void", "add", "int index, E element")
            .inherits("java.util.AbstractCollection", &["isEmpty"]),
        )
        .class(ClassFixture::new(
            "java.util",
            "List",
            "public interface <span class=\"typeNameLabel\">List&lt;E&gt;</span>",
        ))
        .class(ClassFixture::new(
            "java.awt",
            "List",
            "public class <span class=\"typeNameLabel\">List</span>\nextends java.awt.Component",
        ))
}
