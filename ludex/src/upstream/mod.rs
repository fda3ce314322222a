pub mod steam_client;

pub use steam_client::SteamClient;
