// Business logic service implementations

pub mod asset_service;
pub mod audit;
pub mod auth_service;
pub mod dashboard_service;
pub mod export_service;
pub mod health;
pub mod reference_service;
pub mod user_service;
