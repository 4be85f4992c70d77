// Database management command implementations

pub mod create;
pub mod migrate;
