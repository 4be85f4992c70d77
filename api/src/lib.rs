// Asset inventory API library

pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::{AppContext, AppState};
pub use routes::create_router;
