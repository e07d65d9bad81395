mod logger;
pub use logger::*;

#[cfg(feature = "subscriber")]
mod subscriber;

#[cfg(feature = "subscriber")]
pub use subscriber::TaskEventLogger;
