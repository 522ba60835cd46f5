pub mod convert;
pub mod db;
pub mod entities;
pub mod error;
pub mod services;

pub use db::{ConfigError, DatabaseConfig, create_connection};
pub use error::ServiceError;
