//! Entity module for database models

pub mod asset_history;
pub mod asset_traceability;
pub mod assets;
pub mod brands;
pub mod categories;
pub mod prelude;
pub mod sea_orm_active_enums;
pub mod user_sessions;
pub mod users;
pub mod zones;
