//! Main RUIAN client API
//!
//! This module provides the high-level API for the RUIAN address
//! registry. It combines the HTTP transport with the cache layer and the
//! typed decoders, and layers a few client-side conveniences (municipality
//! autocomplete, hierarchy assembly) on top of the raw endpoint calls.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::cache::{cache_key, CacheStore, MemoryCache, CACHE_NAMESPACE};
use crate::client::{decode_response, ClientConfig, Params, RuianHttp};
use crate::error::{Result, RuianError};
use crate::types::{
    AddressHierarchy, Municipality, Place, Region, Street, ValidateResult, ValidateWithPlaces,
};

/// Fixed cache key for the aggregated all-municipalities listing
const ALL_MUNICIPALITIES_CACHE_KEY: &str = "ruian:municipalities:all";

/// TTL multiplier for the all-municipalities listing; the full list
/// changes rarely, so it outlives ordinary entries.
const ALL_MUNICIPALITIES_TTL_FACTOR: u32 = 7;

/// Shortest usable autocomplete query, in characters
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Result cap for [`RuianClient::search_municipalities`]
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Address components accepted by the `validate` endpoint
///
/// All fields are optional; set the ones you know. An address-point id
/// (`ruian_id`) on its own is enough for an exact lookup.
///
/// # Example
/// ```
/// use ruian_core::ValidateParams;
///
/// let params = ValidateParams::new()
///     .municipality_name("Praha")
///     .street("Dlouhá")
///     .cp("14");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidateParams {
    municipality_name: Option<String>,
    municipality_id: Option<i64>,
    municipality_part_name: Option<String>,
    municipality_part_id: Option<i64>,
    zip: Option<String>,
    street: Option<String>,
    cp: Option<String>,
    co: Option<String>,
    ce: Option<String>,
    ruian_id: Option<i64>,
}

impl ValidateParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn municipality_name(mut self, name: impl Into<String>) -> Self {
        self.municipality_name = Some(name.into());
        self
    }

    pub fn municipality_id(mut self, id: i64) -> Self {
        self.municipality_id = Some(id);
        self
    }

    pub fn municipality_part_name(mut self, name: impl Into<String>) -> Self {
        self.municipality_part_name = Some(name.into());
        self
    }

    pub fn municipality_part_id(mut self, id: i64) -> Self {
        self.municipality_part_id = Some(id);
        self
    }

    pub fn zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Descriptive number (číslo popisné).
    pub fn cp(mut self, cp: impl Into<String>) -> Self {
        self.cp = Some(cp.into());
        self
    }

    /// Orientation number (číslo orientační).
    pub fn co(mut self, co: impl Into<String>) -> Self {
        self.co = Some(co.into());
        self
    }

    /// Evidence number (číslo evidenční).
    pub fn ce(mut self, ce: impl Into<String>) -> Self {
        self.ce = Some(ce.into());
        self
    }

    /// RUIAN address-point identifier.
    pub fn ruian_id(mut self, id: i64) -> Self {
        self.ruian_id = Some(id);
        self
    }

    /// Collect the set fields into query parameters; absent fields are
    /// not serialized at all.
    pub(crate) fn into_query(self) -> Params {
        let mut params = Params::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                params.push((key.to_string(), value));
            }
        };
        push("municipalityName", self.municipality_name);
        push("municipalityId", self.municipality_id.map(|id| id.to_string()));
        push("municipalityPartName", self.municipality_part_name);
        push(
            "municipalityPartId",
            self.municipality_part_id.map(|id| id.to_string()),
        );
        push("zip", self.zip);
        push("street", self.street);
        push("cp", self.cp);
        push("co", self.co);
        push("ce", self.ce);
        push("ruianId", self.ruian_id.map(|id| id.to_string()));
        params
    }
}

/// Envelope of the `build/*` endpoints; the payload sits under `data`
/// and an absent array decodes as empty.
#[derive(Deserialize)]
struct BuildResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

fn decode<T: DeserializeOwned>(raw: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(raw)).map_err(|e| RuianError::Decode(e.to_string()))
}

/// High-level client for the RUIAN address registry API
///
/// Every operation issues a small, bounded, sequential number of HTTP
/// requests. Successful responses are cached in the injected store;
/// errors propagate unchanged and are never cached.
///
/// # Example
/// ```no_run
/// use ruian_core::RuianClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RuianClient::new("my-api-key")?;
///     let regions = client.get_regions().await?;
///     println!("{} regions", regions.len());
///     Ok(())
/// }
/// ```
pub struct RuianClient {
    http: RuianHttp,
    cache: Option<Arc<dyn CacheStore>>,
    cache_ttl: Duration,
}

impl RuianClient {
    /// Create a client with default configuration and the bundled
    /// in-memory cache.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Create a client with custom configuration and the bundled
    /// in-memory cache.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_cache_store(config, Arc::new(MemoryCache::new()))
    }

    /// Create a client backed by an external cache store.
    ///
    /// The store is only consulted when `config.cache_enabled` is set.
    pub fn with_cache_store(config: ClientConfig, store: Arc<dyn CacheStore>) -> Result<Self> {
        let http = RuianHttp::new(&config)?;
        let cache = config.cache_enabled.then_some(store);
        Ok(Self {
            http,
            cache,
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        })
    }

    /// Fetch an endpoint through the cache: serve a stored body when
    /// present, otherwise GET, classify the status, and store the body
    /// of a successful response.
    async fn fetch_json(&self, endpoint: &str, params: &[(String, String)]) -> Result<Map<String, Value>> {
        let key = cache_key(endpoint, params);
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.load(&key).await {
                tracing::debug!(endpoint, "cache hit");
                return decode_response(200, &body);
            }
            tracing::debug!(endpoint, "cache miss");
        }

        let (status, body) = self.http.get(endpoint, params).await?;
        let value = decode_response(status, &body)?;

        if let Some(cache) = &self.cache {
            cache.save(&key, body, self.cache_ttl).await;
        }
        Ok(value)
    }

    /// Validate an address against the registry.
    ///
    /// # Arguments
    /// * `params` - Any combination of address components
    ///
    /// # Returns
    /// * `Ok(ValidateResult)` - status, optional message, optional place
    /// * `Err(RuianError)` - transport, auth, quota or API failure
    pub async fn validate(&self, params: ValidateParams) -> Result<ValidateResult> {
        let raw = self.fetch_json("validate", &params.into_query()).await?;
        decode(raw)
    }

    /// Validate a single address point by its RUIAN identifier.
    pub async fn validate_by_ruian_id(&self, ruian_id: i64) -> Result<ValidateResult> {
        self.validate(ValidateParams::new().ruian_id(ruian_id)).await
    }

    /// List all regions.
    pub async fn get_regions(&self) -> Result<Vec<Region>> {
        let raw = self.fetch_json("build/regions", &[]).await?;
        let response: BuildResponse<Region> = decode(raw)?;
        Ok(response.data)
    }

    /// List the municipalities of one region.
    pub async fn get_municipalities(&self, region_id: &str) -> Result<Vec<Municipality>> {
        let params = vec![("regionId".to_string(), region_id.to_string())];
        let raw = self.fetch_json("build/municipalities", &params).await?;
        let response: BuildResponse<Municipality> = decode(raw)?;
        Ok(response.data)
    }

    /// List the streets of one municipality.
    pub async fn get_streets(&self, municipality_id: i64) -> Result<Vec<Street>> {
        let params = vec![("municipalityId".to_string(), municipality_id.to_string())];
        let raw = self.fetch_json("build/streets", &params).await?;
        let response: BuildResponse<Street> = decode(raw)?;
        Ok(response.data)
    }

    /// List the address points of one street.
    pub async fn get_places(&self, municipality_id: i64, street_name: &str) -> Result<Vec<Place>> {
        let params = vec![
            ("municipalityId".to_string(), municipality_id.to_string()),
            ("street".to_string(), street_name.to_string()),
        ];
        let raw = self.fetch_json("build/places", &params).await?;
        let response: BuildResponse<Place> = decode(raw)?;
        Ok(response.data)
    }

    /// List every municipality in the country, sorted by name.
    ///
    /// Issues one request per region plus one for the region list, all
    /// sequentially, and caches the aggregate under a fixed key with an
    /// extended TTL. Sorting compares names byte-wise, so the order is
    /// deterministic and locale-independent.
    ///
    /// For the Czech Republic this returns several thousand entries.
    pub async fn get_all_municipalities(&self) -> Result<Vec<Municipality>> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.load(ALL_MUNICIPALITIES_CACHE_KEY).await {
                if let Ok(all) = serde_json::from_str::<Vec<Municipality>>(&body) {
                    tracing::debug!("cache hit for all-municipalities aggregate");
                    return Ok(all);
                }
            }
        }

        let mut all = Vec::new();
        for region in self.get_regions().await? {
            all.extend(self.get_municipalities(&region.id).await?);
        }
        all.sort_by(|a, b| a.name.cmp(&b.name));

        if let Some(cache) = &self.cache {
            if let Ok(body) = serde_json::to_string(&all) {
                cache
                    .save(
                        ALL_MUNICIPALITIES_CACHE_KEY,
                        body,
                        self.cache_ttl * ALL_MUNICIPALITIES_TTL_FACTOR,
                    )
                    .await;
            }
        }
        Ok(all)
    }

    /// Autocomplete municipalities by name, capped at
    /// [`DEFAULT_SEARCH_LIMIT`] results.
    ///
    /// See [`search_municipalities_with_limit`](Self::search_municipalities_with_limit).
    pub async fn search_municipalities(&self, query: &str) -> Result<Vec<Municipality>> {
        self.search_municipalities_with_limit(query, DEFAULT_SEARCH_LIMIT)
            .await
    }

    /// Autocomplete municipalities by name.
    ///
    /// Matching is case-insensitive (Unicode-aware lowercasing on both
    /// sides) over the full municipality list. Names starting with the
    /// query always rank before names merely containing it, regardless
    /// of discovery order. A trimmed query shorter than
    /// [`MIN_SEARCH_QUERY_LEN`] characters returns an empty list without
    /// touching the network.
    pub async fn search_municipalities_with_limit(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Municipality>> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_SEARCH_QUERY_LEN {
            return Ok(Vec::new());
        }
        let all = self.get_all_municipalities().await?;
        Ok(rank_by_match(all, trimmed, limit))
    }

    /// Validate an address given by its human-readable components.
    ///
    /// Only the supplied components are sent; `None` fields are omitted
    /// from the query entirely.
    pub async fn find_address(
        &self,
        municipality: &str,
        street: Option<&str>,
        cp: Option<&str>,
        co: Option<&str>,
        zip: Option<&str>,
    ) -> Result<ValidateResult> {
        let mut params = ValidateParams::new().municipality_name(municipality);
        if let Some(street) = street {
            params = params.street(street);
        }
        if let Some(cp) = cp {
            params = params.cp(cp);
        }
        if let Some(co) = co {
            params = params.co(co);
        }
        if let Some(zip) = zip {
            params = params.zip(zip);
        }
        self.validate(params).await
    }

    /// Assemble the address hierarchy around one municipality.
    ///
    /// Validates by municipality id and rebuilds the region and
    /// municipality from the matched place's embedded fields; the region
    /// is only present when the place carries both its id and name. The
    /// street list is fetched regardless of the validation outcome.
    pub async fn get_address_hierarchy(&self, municipality_id: i64) -> Result<AddressHierarchy> {
        let result = self
            .validate(ValidateParams::new().municipality_id(municipality_id))
            .await?;

        let (region, municipality) = match &result.place {
            Some(place) => {
                let region = match (&place.region_id, &place.region_name) {
                    (Some(id), Some(name)) => Some(Region {
                        id: id.clone(),
                        name: name.clone(),
                    }),
                    _ => None,
                };
                let municipality = Some(Municipality {
                    id: place.municipality_id,
                    name: place.municipality_name.clone(),
                });
                (region, municipality)
            }
            None => (None, None),
        };

        let streets = self.get_streets(municipality_id).await?;
        Ok(AddressHierarchy {
            region,
            municipality,
            streets,
        })
    }

    /// Validate an address and list the matched street's address points.
    ///
    /// The place list is empty when no place matched or the matched
    /// place has no street name.
    pub async fn validate_with_places(&self, params: ValidateParams) -> Result<ValidateWithPlaces> {
        let result = self.validate(params).await?;
        let places = match &result.place {
            Some(place) => match place.street_name.as_deref() {
                Some(street) => self.get_places(place.municipality_id, street).await?,
                None => Vec::new(),
            },
            None => Vec::new(),
        };
        Ok(ValidateWithPlaces { result, places })
    }

    /// Purge everything this client has cached.
    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear(CACHE_NAMESPACE).await;
        }
    }
}

/// Two-tier ranking over the municipality list.
///
/// Single pass: prefix matches collect first (stopping the pass once the
/// bucket is full), substring matches second; the result is prefix ++
/// contains, truncated to `limit`.
fn rank_by_match(municipalities: Vec<Municipality>, query: &str, limit: usize) -> Vec<Municipality> {
    let needle = query.to_lowercase();
    let mut prefix = Vec::new();
    let mut contains = Vec::new();

    for municipality in municipalities {
        let name = municipality.name.to_lowercase();
        if name.starts_with(&needle) {
            prefix.push(municipality);
            if prefix.len() >= limit {
                break;
            }
        } else if name.contains(&needle) {
            contains.push(municipality);
        }
    }

    prefix.extend(contains);
    prefix.truncate(limit);
    prefix
}
