mod health_check;
mod notifications;

pub use health_check::check_health;
pub use notifications::{method_not_allowed, send_notification};
