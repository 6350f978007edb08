//! Turns an extraction into a usable filter specification.
//!
//! Rules, applied in order:
//!
//! 1. A failed extraction becomes `{ keyword: <raw query> }`.
//! 2. Unrecognized names, nulls, empty lists, blank strings and values of the
//!    wrong shape are dropped. Everything else is kept as given.
//! 3. If nothing survived, or every survivor is falsy, fall back to
//!    `{ keyword: <raw query> }`.
//! 4. If only secondary fields survived, the raw query is added as keyword.

use crate::extract::{ExtractedArgs, Extraction};
use crate::filter::{FilterField, FilterSpec, FilterValue};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Produce a non-empty [`FilterSpec`] anchored by a primary field.
pub fn sanitize(extraction: Extraction, raw_query: &str) -> FilterSpec {
    let args = match extraction {
        Extraction::Args(args) => args,
        Extraction::Failed(reason) => {
            debug!(%reason, "Falling back to keyword search");
            return FilterSpec::keyword(raw_query);
        }
    };

    let surviving = retain_meaningful(args);
    if surviving.values().all(FilterValue::is_falsy) {
        debug!("No meaningful filters extracted, falling back to keyword search");
        return FilterSpec::keyword(raw_query);
    }

    let Some(spec) = FilterSpec::from_fields(surviving) else {
        return FilterSpec::keyword(raw_query);
    };

    if spec.has_primary() {
        spec
    } else {
        debug!(fields = spec.len(), "Only secondary filters extracted, adding keyword");
        spec.with(FilterField::Keyword, raw_query)
    }
}

fn retain_meaningful(args: ExtractedArgs) -> BTreeMap<FilterField, FilterValue> {
    let mut fields = BTreeMap::new();

    for (name, value) in args {
        let Some(field) = FilterField::from_name(&name) else {
            debug!(field = %name, "Dropping unrecognized field");
            continue;
        };

        if is_empty(&value) {
            continue;
        }

        match FilterValue::from_json(field, value) {
            Some(value) => {
                fields.insert(field, value);
            }
            None => debug!(%field, "Dropping value with unexpected shape"),
        }
    }

    fields
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
