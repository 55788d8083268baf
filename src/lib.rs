//! # apy
//!
//! A small helper for talking to HTTP/JSON APIs from the terminal.
//!
//! ## Features
//! - Blocking requests normalized into one [`Reply`] shape
//! - Bearer (`Authorization: Bearer: <token>`) and Basic auth
//! - Colored console messages, JSON dumps, visible and hidden prompts
//! - Pass/fail verification with a running tally
//! - `/users` CRUD facade
//!
//! ## Architecture
//! Single-threaded and synchronous:
//! - Network Layer - [`Net`] executes requests, [`UserApi`] composes it
//! - Console Layer - [`Console`] prints, prompts and verifies
//! - Storage - profile and JSON file loading

pub mod args;
pub mod console;
pub mod constants;
pub mod error;
pub mod models;
pub mod network;
pub mod storage;
pub mod verify;

// Re-export commonly used types
pub use args::Args;
pub use console::{Console, Input, ReaderInput, TerminalInput};
pub use error::{Fatal, NetError};
pub use models::{AuthType, Endpoint, Header, HttpMethod, Reply, Request};
pub use network::{Net, UserApi};
pub use storage::{load_json, Profile};
pub use verify::Tally;
