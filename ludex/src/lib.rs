pub mod domain;
pub mod planes;
pub mod ports;
pub mod upstream;

pub use domain::{AppId, CacheStats, DetailMap, DetailRecord, OwnedGame};
pub use planes::control::CacheAdminService;
pub use planes::data::{DetailAggregator, LibraryOutcome, LibraryReport, LibraryService};

#[cfg(test)]
pub(crate) mod testing;
