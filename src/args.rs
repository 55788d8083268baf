//! Command-line flags

use std::env;
use std::path::PathBuf;

use clap::Parser;

use crate::constants::DEFAULT_PROBE_URL;
use crate::models::AuthType;

/// A simple way to start talking API.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "apy", version)]
pub struct Args {
    /// User to login.
    #[arg(short, long, default_value_t = current_user())]
    pub user: String,

    /// Password or secret to login. Give the flag without a value to be prompted.
    #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
    pub password: Option<String>,

    /// Token to bear.
    #[arg(short, long)]
    pub token: Option<String>,

    /// URL to request; relative paths are joined onto the profile's base_url
    #[arg(long, default_value = DEFAULT_PROBE_URL)]
    pub url: String,

    /// Profile file (default: ~/.apy/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (default: profile, then 15)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Args {
    /// `-p` was given without a value
    pub fn wants_password_prompt(&self) -> bool {
        matches!(self.password.as_deref(), Some(""))
    }

    /// Bearer token wins over a password; neither means no auth
    pub fn auth(&self, fallback_token: Option<&str>) -> AuthType {
        let token = self.token.as_deref().or(fallback_token);
        match (AuthType::bearer(token.map(str::to_string)), self.password.as_deref()) {
            (AuthType::None, Some(password)) if !password.is_empty() => AuthType::Basic {
                username: self.user.clone(),
                password: password.to_string(),
            },
            (auth, _) => auth,
        }
    }
}

/// Name of the account running the process
pub fn current_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|key| env::var(key).ok().filter(|name| !name.is_empty()))
        .or_else(|| {
            dirs::home_dir()
                .and_then(|home| home.file_name().map(|name| name.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "unknown".to_string())
}
