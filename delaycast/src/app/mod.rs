mod app_config;
mod app_error;
mod delaycast_app;
pub mod output_ops;

pub use app_config::AppConfig;
pub use app_error::AppError;
pub use delaycast_app::{DelaycastApp, DelaycastOperation};
