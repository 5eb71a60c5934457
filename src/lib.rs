//! # Board Service
//!
//! Bulletin board post service: create, read (single or paged), update and
//! delete posts through a transactional service layer over SeaORM.
//!
//! ## Architecture
//!
//! - **domain**: `Post` entity, builder, sort properties and the store port
//! - **application**: post use-cases, each in its own transaction
//! - **infrastructure**: SeaORM store, migrations, in-memory store
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: error types, pagination, graceful shutdown
//! - **config** / **server**: TOML configuration and runtime lifecycle

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError, CONFIG_ENV};

pub use application::PostService;
pub use infrastructure::{init_database, DatabaseConfig, InMemoryPostStore, SeaOrmPostStore};
pub use interfaces::http::create_api_router;
pub use shared::{AppError, AppResult, DomainError, InfraError, Page, PageRequest};
