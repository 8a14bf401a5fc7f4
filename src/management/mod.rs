mod auth;
mod search;

pub use auth::TokenManager;
pub use search::SearchCache;
