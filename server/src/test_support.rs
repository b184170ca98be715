use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, routing::get};
use directory::{Employee, EmployeeId, Loader};
use reqwest::Url;
use tokio::net::TcpListener;

pub fn employees(n: usize) -> Vec<Employee> {
    (1..=n)
        .map(|i| Employee {
            id: EmployeeId::new(i.to_string()),
            name: format!("Employee {i}"),
            email: format!("employee{i}@example.test"),
            role: "member".into(),
        })
        .collect()
}

/// Local upstream serving `n` employees and counting every GET it answers.
pub struct CountingUpstream {
    url: Url,
    hits: Arc<AtomicUsize>,
}

impl CountingUpstream {
    pub async fn serve(n: usize) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let records = Arc::new(employees(n));
        let router = Router::new().route(
            "/members.json",
            get(move || {
                let counter = counter.clone();
                let records = records.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(records.as_ref().clone())
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Self {
            url: Url::parse(&format!("http://{addr}/members.json")).unwrap(),
            hits,
        }
    }

    pub fn loader(&self) -> Loader {
        Loader::from_url(self.url.clone()).unwrap()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
