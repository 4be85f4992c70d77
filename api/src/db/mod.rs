// Database Module
// Connection pool, error type and repositories for the inventory tables

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DbError;
pub use pool::DbPool;
pub use repositories::Repositories;
