//! Blocking HTTP client for the remote Pokedex catalog.
//!
//! Wraps the upstream REST API behind [`PokeApiClient`], which implements
//! [`pokedex_core::CatalogSource`] for the list endpoint and exposes
//! [`PokeApiClient::fetch_detail`] for the on-demand detail view. Wire
//! shapes are private to [`client`]; everything crossing the crate boundary
//! is a `pokedex-core` type.

pub mod client;

pub use client::{artwork_url, PokeApiClient};

/// Resolve the catalog base URL, without a trailing slash.
///
/// `POKEDEX_API_URL` overrides the default upstream, which lets tests and
/// local mirrors stand in for the real service.
pub fn api_base_url() -> String {
    if let Ok(url) = std::env::var("POKEDEX_API_URL") {
        return url.trim_end_matches('/').to_string();
    }
    "https://pokeapi.co/api/v2".to_string()
}
