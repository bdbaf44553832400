mod secret;
mod timestamp;

pub use secret::Secret;
pub use timestamp::Timestamp;
