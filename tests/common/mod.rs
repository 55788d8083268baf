//! Mock API servers on random local ports.
//!
//! The axum app runs on a current-thread tokio runtime in a background
//! thread so the blocking client under test can drive it from the test
//! thread. Raw TCP servers cover the cases axum cannot produce.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

#[derive(Default)]
struct Users {
    next_id: u64,
    rows: BTreeMap<u64, Value>,
}

type Db = Arc<Mutex<Users>>;

/// Start the mock API and return its address
pub fn spawn_api() -> SocketAddr {
    spawn(app())
}

pub fn spawn(app: Router) -> SocketAddr {
    let std_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    addr
}

fn app() -> Router {
    let db: Db = Arc::new(Mutex::new(Users::default()));
    Router::new()
        .route("/json", get(stats))
        .route("/html", get(html))
        .route("/missing", get(missing))
        .route("/broken", get(broken))
        .route("/echo", get(echo).post(echo).put(echo).delete(echo))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(db)
}

async fn stats() -> impl IntoResponse {
    ([("x-mock", "stats")], Json(json!({"stations": 42, "tags": ["jazz", "news"]})))
}

async fn html() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body>hello</body></html>",
    )
}

async fn missing() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [("x-mock", "missing")],
        Json(json!({"error": "no such thing"})),
    )
}

async fn broken() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

/// Reflect what the server received
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}

async fn list_users(State(db): State<Db>) -> Json<Value> {
    let users = db.lock().unwrap();
    Json(Value::Array(users.rows.values().cloned().collect()))
}

async fn create_user(State(db): State<Db>, Json(mut input): Json<Value>) -> impl IntoResponse {
    let mut users = db.lock().unwrap();
    users.next_id += 1;
    let id = users.next_id;
    input["id"] = json!(id);
    users.rows.insert(id, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    let users = db.lock().unwrap();
    users.rows.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(mut input): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut users = db.lock().unwrap();
    if !users.rows.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    input["id"] = json!(id);
    users.rows.insert(id, input.clone());
    Ok(Json(input))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut users = db.lock().unwrap();
    match users.rows.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

/// Address with nothing listening on it
pub fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Answers once with a body shorter than its Content-Length, then hangs up
pub fn spawn_truncating() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            read_request_head(&mut stream);
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"a\":",
            );
            let _ = stream.flush();
        }
    });
    addr
}

/// Accepts once and never answers
pub fn spawn_silent() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(Duration::from_secs(5));
            drop(stream);
        }
    });
    addr
}

fn read_request_head(stream: &mut impl Read) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}
