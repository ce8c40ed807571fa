pub mod package;
pub mod settings;

pub use package::{PackageRecord, PackageUpdate};
pub use settings::{SettingKey, Settings};
