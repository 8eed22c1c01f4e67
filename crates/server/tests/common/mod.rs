//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port. Its providers are the
//! real HTTP providers, pointed at an `httpmock::MockServer` that stands in
//! for the chat completion and image APIs.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use diary_insight_server::{
    config::{get_config, AppConfig},
    router,
    state::{build_app_state, AppState},
};
use httpmock::MockServer;
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// The service key every `TestApp` accepts.
pub const SERVICE_KEY: &str = "test-service-key";

pub const ANALYSIS_PATH: &str = "/analysis/v1/chat/completions";
pub const IMAGE_PROMPT_PATH: &str = "/image-prompt/v1/chat/completions";
pub const IMAGES_PATH: &str = "/v1/images/generations";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _config_dir: Option<TempDir>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// Writes a config file whose providers all point at `mock_server`.
pub fn write_test_config(
    dir: &TempDir,
    mock_server: &MockServer,
    response_format: &str,
) -> Result<String> {
    let config_path = dir.path().join("config.yml");
    let config_content = format!(
        r#"
port: 0
api_key: "{SERVICE_KEY}"
providers:
  analysis_default:
    provider: "openai"
    api_url: "{}"
    api_key: "mock-openai-key"
    model_name: "mock-analysis-model"
  image_prompt_default:
    provider: "openai"
    api_url: "{}"
    api_key: "mock-openai-key"
    model_name: "mock-prompt-model"
image:
  api_url: "{}"
  api_key: "mock-image-key"
  model_name: "mock-image-model"
  quality: "standard"
analysis:
  response_format: "{response_format}"
"#,
        mock_server.url(ANALYSIS_PATH),
        mock_server.url(IMAGE_PROMPT_PATH),
        mock_server.url(IMAGES_PATH),
    );
    let mut file = File::create(&config_path)?;
    file.write_all(config_content.as_bytes())?;
    Ok(config_path.to_string_lossy().into_owned())
}

/// Loads a config for `mock_server` through the regular loader.
pub fn load_test_config(
    dir: &TempDir,
    mock_server: &MockServer,
    response_format: &str,
) -> Result<AppConfig> {
    let path = write_test_config(dir, mock_server, response_format)?;
    Ok(get_config(Some(&path))?)
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_format("with_moderation").await
    }

    pub async fn spawn_with_format(response_format: &str) -> Result<Self> {
        let mock_server = MockServer::start();
        let config_dir = tempdir()?;
        let config = load_test_config(&config_dir, &mock_server, response_format)?;
        let app_state = build_app_state(config)?;

        let mut app = TestApp::spawn_with_state(app_state, mock_server).await?;
        app._config_dir = Some(config_dir);
        Ok(app)
    }

    pub async fn spawn_with_state(app_state: AppState, mock_server: MockServer) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _config_dir: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Posts a JSON body to `path` with the valid service key.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{path}", self.address))
            .header("x-ai-api-key", SERVICE_KEY)
            .json(body)
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// A chat completion body whose single choice carries `content`.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}
