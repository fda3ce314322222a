pub mod cache_admin;
pub mod operation;

pub use cache_admin::CacheAdminService;
pub use operation::CacheAdminOperations;
