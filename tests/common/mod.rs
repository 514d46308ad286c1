#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

#[derive(Clone, Debug)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl Request {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

type Handler = dyn Fn(&Request) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct NodeState {
    handler: Arc<Handler>,
    log: Arc<Mutex<Vec<Request>>>,
}

/// Canned search node: an axum app on a port-0 listener, served from its own
/// runtime so the binary under test can talk to it from a plain `#[test]`.
pub struct MockEs {
    pub url: String,
    requests: Arc<Mutex<Vec<Request>>>,
    _runtime: tokio::runtime::Runtime,
}

impl MockEs {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Request) -> (u16, String) + Send + Sync + 'static,
    {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = NodeState {
            handler: Arc::new(handler),
            log: requests.clone(),
        };
        let app = Router::new().fallback(answer).with_state(state);
        runtime.spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url,
            requests,
            _runtime: runtime,
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Bodies of every `_search` call, in order.
    pub fn searches(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST" && r.path.ends_with("/_search"))
            .map(|r| r.json())
            .collect()
    }
}

async fn answer(State(node): State<NodeState>, method: Method, uri: Uri, body: Bytes) -> Response {
    let req = Request {
        method: method.to_string(),
        path: uri.path().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    node.log.lock().unwrap().push(req.clone());

    let (status, payload) = (node.handler)(&req);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let payload = if method == Method::HEAD {
        String::new()
    } else {
        payload
    };
    (status, [(header::CONTENT_TYPE, "application/json")], payload).into_response()
}

pub fn cluster_info() -> String {
    json!({
        "name": "node-1",
        "cluster_name": "e2e",
        "version": { "number": "7.17.9" }
    })
    .to_string()
}

pub fn hits(sources: &[Value]) -> String {
    let hits: Vec<Value> = sources
        .iter()
        .enumerate()
        .map(|(i, s)| json!({ "_index": "idx", "_id": i.to_string(), "_source": s }))
        .collect();
    json!({
        "took": 3,
        "timed_out": false,
        "hits": {
            "total": { "value": sources.len(), "relation": "eq" },
            "hits": hits
        }
    })
    .to_string()
}

pub fn run_buckets(runs: &[u64]) -> String {
    let buckets: Vec<Value> = runs
        .iter()
        .map(|r| json!({ "key": r, "doc_count": 10 }))
        .collect();
    json!({
        "took": 1,
        "hits": { "total": { "value": 100, "relation": "eq" }, "hits": [] },
        "aggregations": { "run": { "buckets": buckets } }
    })
    .to_string()
}

pub fn test_result(name: &str, result: &str, env: &str, run: u64, serial: bool) -> Value {
    json!({
        "name": name,
        "description": "",
        "maintainer": "qa",
        "durationInMinutes": 1.5,
        "durationInSeconds": 90,
        "result": result,
        "environment": env,
        "run": run,
        "startTime": "2023-05-02T08:00:00Z",
        "serial": serial
    })
}

pub fn report(kind: &str, name: &str, sub_type: &str, run: u64) -> Value {
    json!({
        "type": kind,
        "name": name,
        "subType": sub_type,
        "durationInMinutes": 12.25,
        "environment": "vcs",
        "run": run,
        "createdTime": "2023-05-02T08:00:00Z"
    })
}

pub fn usage_report(name: &str, run: u64) -> Value {
    json!({
        "name": name,
        "memory": 1024,
        "memoryLimit": 4096,
        "cpu": 25,
        "cpuLimit": 100,
        "environment": "ucs",
        "run": run,
        "createdTime": "2023-05-02T08:00:00Z"
    })
}

/// Node with all three indices that answers searches through `search`.
pub fn node<F>(search: F) -> MockEs
where
    F: Fn(&Request) -> String + Send + Sync + 'static,
{
    node_with_indices(&["cs_e2e", "cs_e2e_entries", "cs_e2e_usage_entries"], search)
}

pub fn node_with_indices<F>(indices: &[&str], search: F) -> MockEs
where
    F: Fn(&Request) -> String + Send + Sync + 'static,
{
    let indices: Vec<String> = indices.iter().map(|i| format!("/{i}")).collect();
    MockEs::start(move |req| match (req.method.as_str(), req.path.as_str()) {
        ("GET", "/") => (200, cluster_info()),
        ("HEAD", path) if indices.iter().any(|i| i == path) => (200, String::new()),
        ("HEAD", _) => (404, String::new()),
        ("POST", path) if path.ends_with("/_search") => (200, search(req)),
        _ => (404, "{}".to_string()),
    })
}

/// Rows of a rendered table, without borders or the header.
pub fn data_rows(stdout: &str) -> Vec<Vec<String>> {
    stdout
        .lines()
        .filter(|l| l.starts_with("| "))
        .skip(1)
        .map(|l| {
            l.trim_matches('|')
                .split('|')
                .map(|c| c.trim().to_string())
                .collect()
        })
        .collect()
}
