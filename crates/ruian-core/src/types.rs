//! Data types for the RUIAN client
//!
//! Immutable value objects decoded from the API's JSON payloads. Each is
//! constructed once from a response and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Region (kraj), the top administrative level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Region code (e.g., "19" for Praha)
    pub id: String,
    /// Display name
    pub name: String,
}

/// Municipality (obec)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Municipality {
    /// RUIAN municipality identifier
    pub id: i64,
    /// Display name
    pub name: String,
}

/// Street within a municipality
///
/// Municipalities without named streets address through a municipality
/// part instead; such entries carry `less_part_name` and no `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Street {
    /// Street name, if the municipality names its streets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Municipality-part fallback name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_part_name: Option<String>,
}

impl Street {
    /// Resolve the display name to whichever field is present.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.less_part_name.as_deref())
            .unwrap_or("")
    }
}

/// Address point (building) on a street
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Descriptive number (číslo popisné)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<String>,
    /// Orientation number (číslo orientační)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co: Option<String>,
    /// Evidence number (číslo evidenční)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ce: Option<String>,
    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// RUIAN address-point identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruian_id: Option<i64>,
}

/// Outcome status of an address validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidateStatus {
    /// Exactly one address point matched
    Match,
    /// The input is plausible but did not pin down a single point
    Possible,
    /// Nothing in the registry matches the input
    NotFound,
    /// The API could not process the input
    Error,
}

/// Address point resolved by the `validate` endpoint
///
/// Municipality id and name are always present on a validated place;
/// everything above and below them in the hierarchy is optional.
/// `Error`/`NotFound` results carry no place at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedPlace {
    /// Match confidence in [0, 1]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality_part_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality_part_name: Option<String>,
    pub municipality_id: i64,
    pub municipality_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruian_id: Option<i64>,
}

impl ValidatedPlace {
    /// Format the house number the way it is written in Czech addresses.
    ///
    /// Descriptive and orientation numbers join with a slash ("14/2b");
    /// an evidence number alone renders as "ev.100"; no numbers at all
    /// render as an empty string.
    pub fn formatted_number(&self) -> String {
        match (self.cp.as_deref(), self.co.as_deref()) {
            (Some(cp), Some(co)) => format!("{}/{}", cp, co),
            (Some(cp), None) => cp.to_string(),
            (None, Some(co)) => co.to_string(),
            (None, None) => match self.ce.as_deref() {
                Some(ce) => format!("ev.{}", ce),
                None => String::new(),
            },
        }
    }

    /// Format a single-line postal address for this place.
    ///
    /// The first segment is the street (or the municipality-part
    /// fallback) with the house number; the second is zip and
    /// municipality. Absent pieces are omitted.
    pub fn formatted_address(&self) -> String {
        let number = self.formatted_number();
        let lead = self
            .street_name
            .as_deref()
            .or(self.municipality_part_name.as_deref());

        let mut segments: Vec<String> = Vec::new();
        match lead {
            Some(lead) if !number.is_empty() => segments.push(format!("{} {}", lead, number)),
            Some(lead) => segments.push(lead.to_string()),
            None if !number.is_empty() => segments.push(number),
            None => {}
        }

        let tail = match self.zip.as_deref() {
            Some(zip) => format!("{} {}", zip, self.municipality_name),
            None => self.municipality_name.clone(),
        };
        segments.push(tail);

        segments.join(", ")
    }
}

/// Result of the `validate` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResult {
    pub status: ValidateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<ValidatedPlace>,
}

/// Region, municipality and street list assembled around one municipality
///
/// Region and municipality are `None` when no address point matched the
/// municipality id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressHierarchy {
    pub region: Option<Region>,
    pub municipality: Option<Municipality>,
    pub streets: Vec<Street>,
}

/// Validation result together with the matched street's address points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateWithPlaces {
    pub result: ValidateResult,
    /// Empty when the validated place has no street name
    pub places: Vec<Place>,
}
