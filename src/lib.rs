//! Client-side coordination for group swipe sessions: a stateless client for
//! the session service and the state machine that drives it.

pub mod api;
pub mod config;
pub mod models;
pub mod store;

pub use api::{HttpSessionApi, RequestFailure, SessionApi};
pub use config::Config;
pub use store::{SessionStore, SessionView, Transition};
