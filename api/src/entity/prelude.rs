//! Prelude module for convenient imports

pub use super::asset_history::Entity as AssetHistory;
pub use super::asset_traceability::Entity as AssetTraceability;
pub use super::assets::Entity as Assets;
pub use super::brands::Entity as Brands;
pub use super::categories::Entity as Categories;
pub use super::user_sessions::Entity as UserSessions;
pub use super::users::Entity as Users;
pub use super::zones::Entity as Zones;
