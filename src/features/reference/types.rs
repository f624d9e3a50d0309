//! Wire types for the reference data endpoints. Products, brokers, and
//! insurers share one shape and one set of routes.

use serde::{Deserialize, Serialize};

/// The three reference lists the backend maintains. Each gets the same
/// list, create, and CSV import routes under its own path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    Products,
    Brokers,
    Insurers,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [
        ReferenceKind::Products,
        ReferenceKind::Brokers,
        ReferenceKind::Insurers,
    ];

    /// Path segment under `/reference/`.
    pub fn segment(self) -> &'static str {
        match self {
            ReferenceKind::Products => "products",
            ReferenceKind::Brokers => "brokers",
            ReferenceKind::Insurers => "insurers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReferenceKind::Products => "Products",
            ReferenceKind::Brokers => "Brokers",
            ReferenceKind::Insurers => "Insurers",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ReferenceKind::Products => "Product",
            ReferenceKind::Brokers => "Broker",
            ReferenceKind::Insurers => "Insurer",
        }
    }

    pub fn template_file_name(self) -> String {
        format!("{}_template.csv", self.segment())
    }
}

/// Starter CSV offered for download next to the import control. The import
/// endpoint only requires a `name` column.
pub const CSV_TEMPLATE: &str = "name\nSample Name\n";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ReferenceOut {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReferenceCreate {
    pub name: String,
}

/// Result of a CSV import: how many new rows were added after the backend
/// skipped blanks and duplicates.
#[derive(Clone, Debug, Deserialize)]
pub struct ImportResult {
    pub added: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_segments_match_backend_routes() {
        assert_eq!(ReferenceKind::Products.segment(), "products");
        assert_eq!(ReferenceKind::Brokers.segment(), "brokers");
        assert_eq!(ReferenceKind::Insurers.segment(), "insurers");
        assert_eq!(ReferenceKind::ALL.len(), 3);
    }

    #[test]
    fn template_names_follow_the_segment() {
        assert_eq!(
            ReferenceKind::Insurers.template_file_name(),
            "insurers_template.csv"
        );
        assert!(CSV_TEMPLATE.starts_with("name\n"));
    }

    #[test]
    fn reference_item_parses_backend_json() {
        let item: ReferenceOut = serde_json::from_str(
            r#"{"id":"0d4cd1a8-9a52-4f6e-9f3a-1f4f2b8a7c10","name":"Motor","created_at":"2026-03-01T09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(item.name, "Motor");
    }

    #[test]
    fn import_result_parses() {
        let result: ImportResult = serde_json::from_str(r#"{"added":4}"#).unwrap();
        assert_eq!(result.added, 4);
    }
}
