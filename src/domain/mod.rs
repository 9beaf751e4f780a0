mod language;
mod sender_email;
mod subscriber;
mod subscriber_email;

pub use language::Language;
pub use sender_email::SenderEmail;
pub use subscriber::Subscriber;
pub use subscriber_email::SubscriberEmail;
