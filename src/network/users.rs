//! `/users` resource facade - one request per call, no caching or retries

use std::fmt::Display;

use serde::Serialize;

use crate::models::{AuthType, Endpoint, HttpMethod, Request, Reply};
use crate::network::client::Net;

/// CRUD operations on `{base}/users`
#[derive(Debug, Clone)]
pub struct UserApi {
    net: Net,
}

impl UserApi {
    pub fn new(base_url: &str, auth: AuthType) -> Self {
        UserApi {
            net: Net::new(Endpoint::new(base_url, auth)),
        }
    }

    pub fn get_user(&self, user_id: impl Display) -> Reply {
        self.net.get(&self.user_url(user_id))
    }

    pub fn list_users(&self) -> Reply {
        self.net.get(&self.users_url())
    }

    pub fn create_user<T: Serialize + ?Sized>(&self, user_data: &T) -> Reply {
        self.send_json(HttpMethod::POST, self.users_url(), user_data)
    }

    pub fn update_user<T: Serialize + ?Sized>(&self, user_id: impl Display, user_data: &T) -> Reply {
        self.send_json(HttpMethod::PUT, self.user_url(user_id), user_data)
    }

    pub fn delete_user(&self, user_id: impl Display) -> Reply {
        self.net
            .execute(Request::new(HttpMethod::DELETE, self.user_url(user_id)))
    }

    fn send_json<T: Serialize + ?Sized>(&self, method: HttpMethod, url: String, data: &T) -> Reply {
        match Request::new(method, url).json(data) {
            Ok(request) => self.net.execute(request),
            Err(e) => Reply::failed(e),
        }
    }

    fn users_url(&self) -> String {
        self.net.endpoint().url("users")
    }

    fn user_url(&self, user_id: impl Display) -> String {
        self.net.endpoint().url(&format!("users/{}", user_id))
    }
}
