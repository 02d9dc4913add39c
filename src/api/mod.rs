// API module organization
pub mod config;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
