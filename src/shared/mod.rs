pub mod config;
pub mod domain;
pub mod errors;
pub mod utils;

pub use config::AppConfig;
pub use errors::{AppError, AppResult};
