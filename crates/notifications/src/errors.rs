use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("{0} is not configured")]
    NotConfigured(String),

    #[error("Telegram delivery failed: {0}")]
    Telegram(String),

    #[error("SMTP delivery failed: {0}")]
    Smtp(String),

    #[error("Invalid email address: {0}")]
    Address(String),
}

impl From<lettre::address::AddressError> for NotificationError {
    fn from(err: lettre::address::AddressError) -> Self {
        NotificationError::Address(err.to_string())
    }
}

impl From<lettre::error::Error> for NotificationError {
    fn from(err: lettre::error::Error) -> Self {
        NotificationError::Smtp(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for NotificationError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        NotificationError::Smtp(err.to_string())
    }
}

impl From<NotificationError> for symbolsync_core::Error {
    fn from(err: NotificationError) -> Self {
        symbolsync_core::Error::Notification(err.to_string())
    }
}
