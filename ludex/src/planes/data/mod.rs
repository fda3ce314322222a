pub mod detail_aggregator;
pub mod library;
pub mod operation;

pub use detail_aggregator::DetailAggregator;
pub use library::{LibraryOutcome, LibraryReport, LibraryService};
pub use operation::DetailOperations;
