// Database repository management

mod asset_repository;
mod brand_repository;
mod category_repository;
mod history_repository;
mod session_repository;
mod traceability_repository;
mod user_repository;
mod zone_repository;

pub use asset_repository::AssetRepository;
pub use brand_repository::BrandRepository;
pub use category_repository::CategoryRepository;
pub use history_repository::HistoryRepository;
pub use session_repository::SessionRepository;
pub use traceability_repository::TraceabilityRepository;
pub use user_repository::UserRepository;
pub use zone_repository::ZoneRepository;

use sea_orm::DatabaseConnection;

/// Container for all database repositories
#[derive(Clone)]
pub struct Repositories {
    pub asset: AssetRepository,
    pub history: HistoryRepository,
    pub traceability: TraceabilityRepository,
    pub zone: ZoneRepository,
    pub category: CategoryRepository,
    pub brand: BrandRepository,
    pub user: UserRepository,
    pub session: SessionRepository,
}

impl Repositories {
    /// Creates a new repositories container with database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Repositories {
            asset: AssetRepository::new(conn.clone()),
            history: HistoryRepository::new(conn.clone()),
            traceability: TraceabilityRepository::new(conn.clone()),
            zone: ZoneRepository::new(conn.clone()),
            category: CategoryRepository::new(conn.clone()),
            brand: BrandRepository::new(conn.clone()),
            user: UserRepository::new(conn.clone()),
            session: SessionRepository::new(conn),
        }
    }
}
