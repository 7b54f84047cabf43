mod email_address;
mod interests;
mod required_text;

pub use email_address::EmailAddress;
pub use interests::Interests;
pub use required_text::{as_text, trimmed, RequiredText};
