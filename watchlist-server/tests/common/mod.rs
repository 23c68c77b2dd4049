//! Shared harness: a real server on an ephemeral port over a seeded directory.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use watchlist_core::models::{GroupRecord, UserProfile};
use watchlist_core::{MemoryDirectory, MemoryKv, PresenceStatus};
use watchlist_server::{build_router, settings_channel, AppState, Settings, USER_ID_HEADER};

pub struct TestServer {
    pub base_url: String,
    pub directory: Arc<MemoryDirectory>,
    pub settings: watch::Sender<Arc<Settings>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn api(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn user(id: &str, username: &str, custom_status: Option<&str>) -> UserProfile {
    let mut props = HashMap::new();
    if let Some(raw) = custom_status {
        props.insert("customStatus".to_string(), raw.to_string());
    }
    UserProfile {
        id: id.to_string(),
        username: username.to_string(),
        first_name: username.to_uppercase(),
        props,
        ..Default::default()
    }
}

fn group(id: &str, display_name: &str) -> GroupRecord {
    GroupRecord {
        id: id.to_string(),
        name: Some(id.to_string()),
        display_name: display_name.to_string(),
        ..Default::default()
    }
}

/// alice, bob, carol and dave; groups `ops` {bob, carol} and `design` {dave}.
pub fn seeded_directory() -> MemoryDirectory {
    let directory = MemoryDirectory::new();
    directory.upsert_user(user("alice", "alice", None));
    directory.upsert_user(user("bob", "bob", Some(r#"{"text":"In a meeting","emoji":"calendar"}"#)));
    directory.upsert_user(user("carol", "carol", None));
    directory.upsert_user(user("dave", "dave", None));
    directory.upsert_group(group("ops", "Operations"), vec!["bob".into(), "carol".into()]);
    directory.upsert_group(group("design", "Design"), vec!["dave".into()]);
    directory.set_status("bob", PresenceStatus::Online);
    directory.set_status("carol", PresenceStatus::Dnd);
    directory
}

pub async fn start_test_server_with(settings: Settings) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let directory = Arc::new(seeded_directory());
    let (settings_tx, settings_rx) = settings_channel(settings);
    let state = AppState::new(
        Arc::new(MemoryKv::new()),
        directory.clone(),
        directory.clone(),
        settings_rx,
    );

    let app = build_router(state);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        directory,
        settings: settings_tx,
        handle,
    }
}

pub async fn start_test_server() -> TestServer {
    start_test_server_with(Settings::default()).await
}

/// Client builder scoped to one caller.
pub struct ClientAs {
    client: reqwest::Client,
    user_id: String,
    token: Option<String>,
}

impl ClientAs {
    pub fn new(user_id: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            user_id: user_id.to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(USER_ID_HEADER, &self.user_id);
        match &self.token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    pub fn get(&self, url: String) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::GET, url)
    }

    pub fn post(&self, url: String) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::POST, url)
    }

    pub fn put(&self, url: String) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::PUT, url)
    }

    pub fn delete(&self, url: String) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::DELETE, url)
    }
}
