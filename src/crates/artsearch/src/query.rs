//! GraphQL compilation of filter specifications
//!
//! The page size and cursor travel as variables. Filter values are written
//! into the argument list as literals, escaped through the JSON string
//! encoder: every JSON string escape is also a valid GraphQL escape, so no
//! value can terminate a literal early.

use crate::filter::{FilterSpec, FilterValue};
use serde::Serialize;
use serde_json::{Map, Value};

/// Operation name sent with every compiled query.
pub const OPERATION_NAME: &str = "SearchArtworks";

/// Fields requested for every artwork on a page.
const NODE_SELECTION: &str = "internalID
        title
        slug
        date
        medium
        artistNames
        artists {
          name
          slug
        }
        image {
          url(version: \"large\")
          aspectRatio
        }";

/// Requested page: a fixed size plus the catalog's cursor, if continuing.
///
/// The cursor is opaque and forwarded as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub size: u32,
    pub cursor: Option<String>,
}

impl PageRequest {
    /// First page.
    pub fn first(size: u32) -> Self {
        Self { size, cursor: None }
    }

    /// Page following `cursor`.
    pub fn after(size: u32, cursor: impl Into<String>) -> Self {
        Self {
            size,
            cursor: Some(cursor.into()),
        }
    }
}

/// A compiled query: text plus variable bindings.
///
/// Serializes to the standard GraphQL-over-HTTP request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDocument {
    pub query: String,
    pub variables: Map<String, Value>,
    pub operation_name: String,
}

impl QueryDocument {
    pub fn cursor(&self) -> Option<&str> {
        self.variables.get("after").and_then(Value::as_str)
    }
}

/// Compiles specs into `artworksConnection` queries.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn compile(spec: &FilterSpec, page: &PageRequest) -> QueryDocument {
        let mut variables = Map::new();
        variables.insert("size".to_string(), Value::from(page.size));

        let mut params = vec!["$size: Int!"];
        let mut args = vec!["first: $size".to_string()];

        if let Some(cursor) = &page.cursor {
            variables.insert("after".to_string(), Value::String(cursor.clone()));
            params.push("$after: String");
            args.push("after: $after".to_string());
        }

        args.extend(
            spec.iter()
                .map(|(field, value)| format!("{}: {}", field.as_str(), literal(value))),
        );

        let query = format!(
            "query {op}({params}) {{
  artworksConnection({args}) {{
    edges {{
      node {{
        {nodes}
      }}
    }}
    pageInfo {{
      hasNextPage
      endCursor
    }}
  }}
}}",
            op = OPERATION_NAME,
            params = params.join(", "),
            args = args.join(", "),
            nodes = NODE_SELECTION,
        );

        QueryDocument {
            query,
            variables,
            operation_name: OPERATION_NAME.to_string(),
        }
    }
}

/// GraphQL literal for a filter value.
fn literal(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(text) => string_literal(text),
        FilterValue::Flag(flag) => flag.to_string(),
        FilterValue::List(items) => format!(
            "[{}]",
            items
                .iter()
                .map(|item| string_literal(item))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn string_literal(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterField;

    fn args_line(doc: &QueryDocument) -> &str {
        doc.query
            .lines()
            .find(|line| line.contains("artworksConnection("))
            .unwrap()
    }

    #[test]
    fn test_first_page_has_no_cursor() {
        let doc = QueryBuilder::compile(&FilterSpec::keyword("landscape"), &PageRequest::first(20));

        assert!(doc.query.starts_with("query SearchArtworks($size: Int!) {"));
        assert!(!doc.query.contains("$after"));
        assert_eq!(doc.variables.len(), 1);
        assert_eq!(doc.variables["size"], 20);
        assert_eq!(doc.cursor(), None);
    }

    #[test]
    fn test_cursor_declared_and_bound_when_supplied() {
        let doc = QueryBuilder::compile(
            &FilterSpec::keyword("landscape"),
            &PageRequest::after(20, "abc123"),
        );

        assert!(doc
            .query
            .starts_with("query SearchArtworks($size: Int!, $after: String) {"));
        assert!(args_line(&doc).contains("first: $size, after: $after"));
        assert_eq!(doc.variables["after"], "abc123");
        assert_eq!(doc.cursor(), Some("abc123"));
    }

    #[test]
    fn test_page_info_always_requested() {
        for page in [PageRequest::first(5), PageRequest::after(5, "c")] {
            let doc = QueryBuilder::compile(&FilterSpec::keyword("x"), &page);
            assert!(doc.query.contains("pageInfo {"));
            assert!(doc.query.contains("hasNextPage"));
            assert!(doc.query.contains("endCursor"));
            assert!(doc.query.contains("internalID"));
        }
    }

    #[test]
    fn test_filters_rendered_in_field_order() {
        let spec = FilterSpec::new(FilterField::Color, "red")
            .with(FilterField::Medium, "painting")
            .with(FilterField::ArtistIds, vec!["pablo-picasso"]);

        let doc = QueryBuilder::compile(&spec, &PageRequest::first(20));

        assert_eq!(
            args_line(&doc).trim(),
            r#"artworksConnection(first: $size, artistIDs: ["pablo-picasso"], medium: "painting", color: "red") {"#
        );
    }

    #[test]
    fn test_flags_and_lists() {
        let spec = FilterSpec::keyword("prints")
            .with(FilterField::ForSale, true)
            .with(FilterField::AttributionClass, vec!["unique", "limited edition"]);

        let line = args_line(&QueryBuilder::compile(&spec, &PageRequest::first(1))).to_string();
        assert!(line.contains("forSale: true"));
        assert!(line.contains(r#"attributionClass: ["unique", "limited edition"]"#));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let spec = FilterSpec::keyword(r#"the "scream" \ munch"#)
            .with(FilterField::ArtistIds, vec![r#"o"keeffe"#]);

        let doc = QueryBuilder::compile(&spec, &PageRequest::first(20));
        let line = args_line(&doc);

        assert!(line.contains(r#"keyword: "the \"scream\" \\ munch""#));
        assert!(line.contains(r#"artistIDs: ["o\"keeffe"]"#));
        assert_eq!(line.matches('"').count() - line.matches("\\\"").count(), 4);
    }

    #[test]
    fn test_control_characters_escaped() {
        let doc = QueryBuilder::compile(&FilterSpec::keyword("line\nbreak"), &PageRequest::first(20));
        assert!(args_line(&doc).contains(r#"keyword: "line\nbreak""#));
    }

    #[test]
    fn test_document_wire_shape() {
        let doc = QueryBuilder::compile(&FilterSpec::keyword("x"), &PageRequest::after(3, "c1"));
        let body = serde_json::to_value(&doc).unwrap();

        assert_eq!(body["operationName"], OPERATION_NAME);
        assert_eq!(body["variables"], serde_json::json!({"size": 3, "after": "c1"}));
        assert!(body["query"].is_string());
    }
}
