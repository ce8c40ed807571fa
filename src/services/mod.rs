pub mod history_service;
pub mod settings_service;
pub mod time_service;

pub use history_service::*;
pub use settings_service::*;
pub use time_service::*;
