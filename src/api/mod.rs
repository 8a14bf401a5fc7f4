//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the OAuth
//! redirect during login.
//!
//! - [`callback`] - checks `state`, exchanges the authorization code for a
//!   token using the stored PKCE verifier and hands the token back to the
//!   waiting login flow through shared state.
//! - [`health`] - returns status and version, handy to check the redirect
//!   address is reachable.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
