//! HTTP feature modules

pub mod health;
pub mod metrics;
pub mod posts;
pub mod request_id;
