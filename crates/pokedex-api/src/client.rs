//! HTTP client and wire decoding for the upstream catalog.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use pokedex_core::{CatalogError, CatalogSource, DisplayRecord, FullRecord, StatLine, TypeSlot};

/// Official artwork URL for a catalog entry.
///
/// Artwork is hosted separately from the API; the id is the only thing
/// needed to address it.
pub fn artwork_url(id: u32) -> String {
    format!(
        "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/{id}.png"
    )
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

/// List entries carry a name and a resource URL; the id is the trailing
/// path segment of that URL.
#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<TypeEntry>,
    stats: Vec<StatEntry>,
}

#[derive(Debug, Deserialize)]
struct TypeEntry {
    slot: u32,
    #[serde(rename = "type")]
    type_ref: NamedRef,
}

#[derive(Debug, Deserialize)]
struct StatEntry {
    base_stat: u32,
    stat: NamedRef,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

/// Extract the numeric id from a resource URL like
/// `https://pokeapi.co/api/v2/pokemon/25/`.
fn parse_trailing_id(url: &str) -> Result<u32, CatalogError> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| CatalogError::Decode(format!("no numeric id in resource url {url:?}")))
}

fn display_record(resource: NamedResource) -> Result<DisplayRecord, CatalogError> {
    let id = parse_trailing_id(&resource.url)?;
    Ok(DisplayRecord {
        id,
        name: resource.name,
        image_url: artwork_url(id),
    })
}

fn full_record(detail: DetailResponse) -> FullRecord {
    FullRecord {
        id: detail.id,
        name: detail.name,
        height: detail.height,
        weight: detail.weight,
        types: detail
            .types
            .into_iter()
            .map(|t| TypeSlot {
                slot: t.slot,
                type_name: t.type_ref.name,
            })
            .collect(),
        stats: detail
            .stats
            .into_iter()
            .map(|s| StatLine {
                base_stat: s.base_stat,
                stat_name: s.stat.name,
            })
            .collect(),
    }
}

/// Client over the upstream REST API.
///
/// One `reqwest` client is built up front and reused for every request; all
/// calls block. Errors map onto [`CatalogError`]: transport problems and
/// non-404 statuses become `Network`, undecodable bodies become `Decode`,
/// and a 404 on the detail endpoint becomes `NotFound`.
#[derive(Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base_url(crate::api_base_url())
    }

    pub fn with_base_url(base_url: String) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent("pokedex-cli")
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Fetch the full entry for a numeric id or lower-case name.
    pub fn fetch_detail(&self, key: &str) -> Result<FullRecord, CatalogError> {
        let url = format!("{}/pokemon/{}", self.base_url, key);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(key.to_string()));
        }
        if !response.status().is_success() {
            return Err(CatalogError::Network(format!(
                "detail request failed: {}",
                response.status()
            )));
        }

        let detail: DetailResponse = response
            .json()
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(full_record(detail))
    }
}

impl CatalogSource for PokeApiClient {
    fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<DisplayRecord>, CatalogError> {
        let url = format!(
            "{}/pokemon?limit={}&offset={}",
            self.base_url, limit, offset
        );
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Network(format!(
                "list request failed: {}",
                response.status()
            )));
        }

        let list: ListResponse = response
            .json()
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        list.results.into_iter().map(display_record).collect()
    }
}
