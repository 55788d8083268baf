//! HTTP client wrapper - executes requests and normalizes every outcome into a [`Reply`]

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use base64::Engine;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::HeaderMap;

use crate::constants::DEFAULT_TIMEOUT;
use crate::error::NetError;
use crate::models::{AuthType, Endpoint, Request, Reply};

/// Blocking request normalizer bound to one endpoint.
///
/// Never returns an error: transport failures, truncated bodies, error
/// statuses and malformed JSON all come back as a [`Reply`] with `log` set.
#[derive(Debug, Clone)]
pub struct Net {
    client: Client,
    endpoint: Endpoint,
    timeout: Duration,
}

impl Net {
    pub fn new(endpoint: Endpoint) -> Self {
        Net {
            client: create_client(),
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Default timeout for requests that do not carry their own
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// `GET url`
    pub fn get(&self, url: &str) -> Reply {
        self.execute(Request::get(url))
    }

    /// Send `request` and map whatever happens into a fresh [`Reply`]
    pub fn execute(&self, mut request: Request) -> Reply {
        authorize(&mut request, self.endpoint.auth());
        let timeout = request.timeout.unwrap_or(self.timeout);

        tracing::debug!(method = request.method.as_str(), url = %request.url, ?timeout, "Executing request");
        let start = Instant::now();

        let response = match build_request(&self.client, &request, timeout).send() {
            Ok(response) => response,
            Err(e) => {
                let error = NetError::from_send(&e);
                tracing::warn!(url = %request.url, kind = error.kind(), "{}", error);
                return Reply::failed(error);
            }
        };

        let status = response.status();
        let headers = collect_headers(response.headers());

        if status.is_client_error() || status.is_server_error() {
            let reason = status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string();
            tracing::warn!(url = %request.url, status = status.as_u16(), "{}", reason);
            return Reply::rejected(status.as_u16(), headers, reason);
        }

        let reply = match response.bytes() {
            Ok(body) => Reply::received(status.as_u16(), headers, &body),
            Err(e) => {
                tracing::warn!(url = %request.url, "Error reading body: {}", e);
                Reply::failed(NetError::Truncated(format!("Error reading body: {}", e)))
            }
        };

        tracing::info!(
            method = request.method.as_str(),
            url = %request.url,
            status = reply.status,
            time_ms = start.elapsed().as_millis() as u64,
            log = reply.log.as_ref().map(|e| e.kind()),
            "Request finished"
        );
        reply
    }
}

/// Merge the endpoint's credentials into the request headers
fn authorize(request: &mut Request, auth: &AuthType) {
    match auth {
        AuthType::Bearer(token) if !token.is_empty() => {
            request.set_header("Authorization", format!("Bearer: {}", token));
        }
        AuthType::Basic { username, password } => {
            let credentials = format!("{}:{}", username, password);
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
            request.set_header("Authorization", format!("Basic {}", encoded));
        }
        AuthType::Bearer(_) | AuthType::None => {}
    }
}

/// Build a reqwest request from the plain-data description
fn build_request(client: &Client, request: &Request, timeout: Duration) -> RequestBuilder {
    let mut req_builder = client
        .request(request.method.into(), &request.url)
        .timeout(timeout);

    for header in &request.headers {
        req_builder = req_builder.header(&header.key, &header.value);
    }

    // GET, DELETE and HEAD go out without a body
    if let Some(body) = request.body.as_ref().filter(|_| request.method.has_body()) {
        req_builder = req_builder.body(body.clone());
    }

    req_builder
}

/// Flatten response headers; repeated names are joined with `", "`
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}

/// Create an HTTP client with default configuration
fn create_client() -> Client {
    Client::builder()
        .user_agent(format!("{}/{}", crate::constants::APP_NAME, crate::constants::APP_VERSION))
        .build()
        .unwrap_or_else(|_| Client::new())
}
