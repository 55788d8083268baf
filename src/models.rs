use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::NetError;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    HEAD,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::HEAD => "HEAD",
        }
    }

    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::HEAD => reqwest::Method::HEAD,
        }
    }
}

/// Authentication type
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AuthType {
    #[default]
    None,
    Bearer(String),
    Basic {
        username: String,
        password: String,
    },
}

impl AuthType {
    /// Bearer when a token is present, nothing otherwise
    pub fn bearer(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.is_empty() => AuthType::Bearer(token),
            _ => AuthType::None,
        }
    }
}

/// HTTP Header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single HTTP request, described as plain data until [`Net`](crate::Net) sends it
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Option<String>,
    /// Falls back to the client's timeout when unset
    pub timeout: Option<Duration>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Request {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Request::new(HttpMethod::GET, url)
    }

    /// Add a header, replacing any existing one with the same name
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(key, value);
        self
    }

    /// Merge a header in place. Names compare case-insensitively.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let header = Header::new(key, value);
        match self
            .headers
            .iter_mut()
            .find(|h| h.key.eq_ignore_ascii_case(&header.key))
        {
            Some(existing) => *existing = header,
            None => self.headers.push(header),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Encode `value` as the JSON body and mark the content type
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, NetError> {
        let body = serde_json::to_string(value).map_err(|e| NetError::Encode(e.to_string()))?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }
}

/// Where requests go and how they authenticate. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Endpoint {
    base_url: String,
    auth: AuthType,
}

impl Endpoint {
    pub fn new(base_url: &str, auth: AuthType) -> Self {
        Endpoint {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &AuthType {
        &self.auth
    }

    /// Join a resource path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Uniform outcome of every request.
///
/// `body` is only meaningful when `log` is empty and `status` is a success.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reply {
    /// 0 when no response was obtained
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    #[serde(serialize_with = "serialize_log")]
    pub log: Option<NetError>,
}

impl Default for Reply {
    fn default() -> Self {
        Reply {
            status: 0,
            headers: BTreeMap::new(),
            body: Value::Object(Map::new()),
            log: None,
        }
    }
}

impl Reply {
    /// No response at all: status 0, empty headers and body
    pub fn failed(error: NetError) -> Self {
        Reply {
            log: Some(error),
            ..Reply::default()
        }
    }

    /// A response arrived but carries an error status
    pub fn rejected(status: u16, headers: BTreeMap<String, String>, reason: String) -> Self {
        Reply {
            status,
            headers,
            log: Some(NetError::HttpStatus { status, reason }),
            ..Reply::default()
        }
    }

    /// A response arrived with a success status; `body` is the raw payload
    pub fn received(status: u16, headers: BTreeMap<String, String>, body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(body) => Reply {
                status,
                headers,
                body,
                log: None,
            },
            Err(e) => Reply {
                status,
                headers,
                log: Some(NetError::BodyParse(e.to_string())),
                ..Reply::default()
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.log.is_none() && (200..400).contains(&self.status)
    }

    /// The log as display text, if any
    pub fn log_message(&self) -> Option<String> {
        self.log.as_ref().map(|e| e.to_string())
    }
}

fn serialize_log<S: Serializer>(log: &Option<NetError>, serializer: S) -> Result<S::Ok, S::Error> {
    match log {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}
