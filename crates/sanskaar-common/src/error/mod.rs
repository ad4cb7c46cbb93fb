//! Error types

mod app_error;

pub use app_error::{generic_code, AppError, AppResult};
