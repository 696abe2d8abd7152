//! Shared helpers: spawn the full application on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use winesta_api::api;
use winesta_api::app_state::AppState;
use winesta_api::config::WinestaConfig;

/// A running server and its base URL.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

/// Starts the app with demo data and a short sommelier delay.
pub async fn spawn_app() -> TestServer {
    spawn_with(WinestaConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        reply_delay: Duration::from_millis(50),
        ..WinestaConfig::default()
    })
    .await
}

pub async fn spawn_with(config: WinestaConfig) -> TestServer {
    let state = AppState::from_config(&config);
    let app = api::build_app(state, &config);

    let Ok(listener) = tokio::net::TcpListener::bind(config.listen_addr).await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer {
        addr,
        client: reqwest::Client::new(),
    }
}
