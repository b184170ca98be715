use std::net::SocketAddr;

use axum::{Router, http::StatusCode, routing::get};
use reqwest::Url;
use tokio::net::TcpListener;

/// Stub upstream serving a canned response on `/members.json`.
pub struct StubUpstream {
    addr: SocketAddr,
}

impl StubUpstream {
    pub async fn serve(status: StatusCode, body: &'static str) -> anyhow::Result<Self> {
        let router = Router::new().route(
            "/members.json",
            get(move || async move {
                (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    body,
                )
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(Self { addr })
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/members.json", self.addr)).expect("valid stub url")
    }
}

/// An address nothing is listening on.
pub async fn closed_port_url() -> anyhow::Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Url::parse(&format!("http://{addr}/members.json"))?)
}

pub const MEMBERS: &str = r#"[
  {"id": "1", "name": "Aaron Miles", "email": "aaron@mailinator.com", "role": "member"},
  {"id": "2", "name": "Aishwarya Naik", "email": "aishwarya@mailinator.com", "role": "member"},
  {"id": "3", "name": "Arvind Kumar", "email": "arvind@mailinator.com", "role": "admin"}
]"#;

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
pub struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + use<> {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
