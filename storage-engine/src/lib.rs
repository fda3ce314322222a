pub mod clock;
pub mod ttl_cache;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use ttl_cache::TtlCache;
