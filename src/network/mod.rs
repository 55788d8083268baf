//! Network layer - blocking HTTP execution and the users resource facade

pub mod client;
pub mod users;

pub use client::Net;
pub use users::UserApi;
