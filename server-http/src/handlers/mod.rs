pub mod cache_admin;
pub mod health;
pub mod library;
pub mod user;

pub use cache_admin::{cache_stats, clear_cache};
pub use health::{health_check, not_found};
pub use library::{owned_games, recently_played_games};
pub use user::player_summary;
