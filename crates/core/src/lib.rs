#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod time;

pub use session::{SessionController, SessionError, SubscriptionId, UnknownTaskPolicy};
pub use time::Clock;
