//! Schema migrations for the asset inventory database

pub mod migration;
