mod model;
mod repository;

pub use model::NotificationSettingsDB;
pub use repository::NotificationSettingsRepository;
