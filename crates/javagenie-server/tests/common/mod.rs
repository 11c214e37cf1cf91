use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use javagenie_core::CodeGenerator;
use javagenie_core::test_helpers::StubGenerator;
use javagenie_server::build_app_with_generator;
use javagenie_server::config::GalleryConfig;

pub struct TestServer {
    pub addr: SocketAddr,
    pub generator: Arc<StubGenerator>,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server backed by a stub generator.
    pub async fn new() -> Self {
        Self::with_generator(GalleryConfig::default(), StubGenerator::new()).await
    }

    pub async fn with_generator(config: GalleryConfig, generator: StubGenerator) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let generator = Arc::new(generator);
        let shared: Arc<dyn CodeGenerator> = Arc::clone(&generator) as Arc<dyn CodeGenerator>;
        let (app, _state) = build_app_with_generator(config, shared);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            generator,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api(&self, path: &str) -> String {
        format!("http://{}/api/v1{path}", self.addr)
    }

    /// Open a session and return its id.
    pub async fn open_session(&self) -> String {
        let resp = reqwest::Client::new()
            .post(self.api("/sessions"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body: serde_json::Value = resp.json().await.unwrap();
        body["session_id"].as_str().unwrap().to_string()
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.api(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn view(&self, session: &str) -> serde_json::Value {
        reqwest::get(self.api(&format!("/sessions/{session}")))
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    /// Poll the session until the code panel stops loading (5s timeout).
    pub async fn settled_view(&self, session: &str) -> serde_json::Value {
        let deadline = Duration::from_secs(5);
        tokio::time::timeout(deadline, async {
            loop {
                let view = self.view(session).await;
                if view["code_panel"]["loading"] == false {
                    return view;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("Timed out waiting for code generation")
    }
}
