#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;

pub const HOST: &str = "blog.example.com";

/// An isolated home, config file, and cache directory for one test.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("config.json")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("cache")
    }

    /// A command for the CLI binary with only this environment visible.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
        cmd.args(args);
        for var in [
            "FOLIO_GRAPHQL_URL",
            "FOLIO_PUBLICATION_HOST",
            "FOLIO_TOKEN",
            "FOLIO_PRODUCTS_URL",
            "RUST_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.dir.path());
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"));
        cmd.env("XDG_CACHE_HOME", self.dir.path().join("xdg-cache"));
        cmd.env("FOLIO_CONFIG", self.config_path());
        cmd.env("FOLIO_CACHE_DIR", self.cache_dir());
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// A command pointed at a mock GraphQL server and publication.
    pub fn command_for(&self, server_uri: &str, args: &[&str]) -> Command {
        let mut cmd = self.command(args);
        cmd.env("FOLIO_GRAPHQL_URL", format!("{}/graphql", server_uri));
        cmd.env("FOLIO_PUBLICATION_HOST", HOST);
        cmd
    }
}

/// Run a command off the async runtime so the mock server keeps serving.
pub async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute CLI"))
        .await
        .unwrap()
}

/// Run a command and expect success, returning stdout.
pub async fn run_success(cmd: Command) -> String {
    let output = run(cmd).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed\nstderr: {}", stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn node(id: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": format!("Post {}", id),
        "slug": format!("post-{}", id.to_lowercase()),
        "brief": format!("About {}", id),
        "publishedAt": "2024-05-01T08:00:00.000Z",
        "coverImage": null,
        "tags": tags.iter().map(|t| json!({ "name": t, "slug": t })).collect::<Vec<_>>()
    })
}

pub fn posts_page(nodes: Vec<Value>, has_next: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "data": {
            "publication": {
                "posts": {
                    "edges": nodes.into_iter().map(|n| json!({ "node": n })).collect::<Vec<_>>(),
                    "pageInfo": { "hasNextPage": has_next, "endCursor": end_cursor }
                }
            }
        }
    })
}

/// Ids of the JSON lines on stdout.
pub fn ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .filter_map(|v| v["id"].as_str().map(str::to_string))
        .collect()
}
