//! Filter specification types
//!
//! A [`FilterSpec`] is the structured form of a natural-language query: a set
//! of recognized catalog filters and their values. It always holds at least
//! one field; the constructors only allow building it from a first field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Filters understood by the catalog's `artworksConnection`.
///
/// Declaration order is the order arguments appear in compiled queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterField {
    #[serde(rename = "keyword")]
    Keyword,
    #[serde(rename = "artistIDs")]
    ArtistIds,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "color")]
    Color,
    #[serde(rename = "partnerIDs")]
    PartnerIds,
    #[serde(rename = "forSale")]
    ForSale,
    #[serde(rename = "attributionClass")]
    AttributionClass,
    #[serde(rename = "priceRange")]
    PriceRange,
}

/// JSON shape a field's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    List,
    Flag,
}

impl FilterField {
    pub const ALL: [FilterField; 8] = [
        FilterField::Keyword,
        FilterField::ArtistIds,
        FilterField::Medium,
        FilterField::Color,
        FilterField::PartnerIds,
        FilterField::ForSale,
        FilterField::AttributionClass,
        FilterField::PriceRange,
    ];

    /// Wire name, shared by the tool schema and the catalog arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Keyword => "keyword",
            FilterField::ArtistIds => "artistIDs",
            FilterField::Medium => "medium",
            FilterField::Color => "color",
            FilterField::PartnerIds => "partnerIDs",
            FilterField::ForSale => "forSale",
            FilterField::AttributionClass => "attributionClass",
            FilterField::PriceRange => "priceRange",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == name)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FilterField::Keyword
            | FilterField::Medium
            | FilterField::Color
            | FilterField::PriceRange => FieldKind::Text,
            FilterField::ArtistIds | FilterField::PartnerIds | FilterField::AttributionClass => {
                FieldKind::List
            }
            FilterField::ForSale => FieldKind::Flag,
        }
    }

    /// Primary fields discriminate a search on their own. A spec with only
    /// secondary fields (`forSale`, `partnerIDs`, `attributionClass`,
    /// `priceRange`) gets the raw query injected as its keyword.
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            FilterField::Keyword | FilterField::ArtistIds | FilterField::Medium | FilterField::Color
        )
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

impl FilterValue {
    /// Convert an extracted JSON value for `field`.
    ///
    /// Returns `None` when the value does not have the field's shape (an
    /// object, a list with non-string elements, a string where a flag is
    /// expected, and so on). Values that do fit are taken unchanged.
    pub fn from_json(field: FilterField, value: Value) -> Option<Self> {
        match (field.kind(), value) {
            (FieldKind::Text, Value::String(text)) => Some(FilterValue::Text(text)),
            (FieldKind::Flag, Value::Bool(flag)) => Some(FilterValue::Flag(flag)),
            (FieldKind::List, Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(FilterValue::List),
            _ => None,
        }
    }

    /// Falsy in the loose sense: blank text, `false`, or an empty list.
    pub fn is_falsy(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.trim().is_empty(),
            FilterValue::Flag(flag) => !flag,
            FilterValue::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(text: &str) -> Self {
        FilterValue::Text(text.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(text: String) -> Self {
        FilterValue::Text(text)
    }
}

impl From<bool> for FilterValue {
    fn from(flag: bool) -> Self {
        FilterValue::Flag(flag)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        FilterValue::List(items)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(items: Vec<&str>) -> Self {
        FilterValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Non-empty mapping from filter fields to values.
///
/// Serializes as a JSON object keyed by wire names, e.g.
/// `{"artistIDs": ["pablo-picasso"], "medium": "painting"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSpec {
    fields: BTreeMap<FilterField, FilterValue>,
}

impl FilterSpec {
    /// Spec holding a single field.
    pub fn new(field: FilterField, value: impl Into<FilterValue>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field, value.into());
        Self { fields }
    }

    /// Keyword-only spec: the fallback for unusable extractions.
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(FilterField::Keyword, FilterValue::Text(text.into()))
    }

    /// Add or replace a field.
    pub fn with(mut self, field: FilterField, value: impl Into<FilterValue>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    /// Build from a field map, refusing an empty one.
    pub(crate) fn from_fields(fields: BTreeMap<FilterField, FilterValue>) -> Option<Self> {
        if fields.is_empty() {
            None
        } else {
            Some(Self { fields })
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&FilterValue> {
        self.fields.get(&field)
    }

    pub fn contains(&self, field: FilterField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Fields in compile order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &FilterValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn has_primary(&self) -> bool {
        self.fields.keys().any(FilterField::is_primary)
    }

    /// True when the spec is exactly `{ keyword: text }`.
    pub fn is_keyword_only(&self, text: &str) -> bool {
        self.fields.len() == 1
            && self.get(FilterField::Keyword) == Some(&FilterValue::Text(text.to_string()))
    }
}
