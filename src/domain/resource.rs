//! Superset resource kinds
//!
//! Superset exposes each asset type under its own REST collection
//! (`/api/v1/dashboard/`, `/api/v1/chart/`, ...) while the working tree
//! keeps them in plural directories (`dashboards/`, `charts/`, ...).
//! `ResourceKind` is the single source of truth for that mapping, plus
//! the dependency order imports must follow (a chart references its
//! dataset, a dashboard its charts).

use crate::domain::errors::SupersyncError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Superset asset type handled by supersync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Database connections
    Database,
    /// Datasets (physical or virtual tables)
    Dataset,
    /// Charts (slices)
    Chart,
    /// Dashboards
    Dashboard,
}

impl ResourceKind {
    /// All kinds in import dependency order: databases first, dashboards last
    pub const IMPORT_ORDER: [ResourceKind; 4] = [
        ResourceKind::Database,
        ResourceKind::Dataset,
        ResourceKind::Chart,
        ResourceKind::Dashboard,
    ];

    /// Singular name used by the REST API (`/api/v1/{api_name}/...`)
    pub fn api_name(&self) -> &'static str {
        match self {
            ResourceKind::Database => "database",
            ResourceKind::Dataset => "dataset",
            ResourceKind::Chart => "chart",
            ResourceKind::Dashboard => "dashboard",
        }
    }

    /// Plural directory name used in the working tree
    pub fn dir_name(&self) -> &'static str {
        match self {
            ResourceKind::Database => "databases",
            ResourceKind::Dataset => "datasets",
            ResourceKind::Chart => "charts",
            ResourceKind::Dashboard => "dashboards",
        }
    }

    /// Directory name for one exported object, e.g. `dashboard_9`
    pub fn object_dir_name(&self, id: u64) -> String {
        format!("{}_{}", self.api_name(), id)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for ResourceKind {
    type Err = SupersyncError;

    /// Accepts both the API singular and the directory plural spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "database" | "databases" => Ok(ResourceKind::Database),
            "dataset" | "datasets" => Ok(ResourceKind::Dataset),
            "chart" | "charts" => Ok(ResourceKind::Chart),
            "dashboard" | "dashboards" => Ok(ResourceKind::Dashboard),
            other => Err(SupersyncError::Validation(format!(
                "Unknown resource kind '{other}'. \
                 Must be one of: databases, datasets, charts, dashboards"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("dashboard", ResourceKind::Dashboard; "singular dashboard")]
    #[test_case("dashboards", ResourceKind::Dashboard; "plural dashboards")]
    #[test_case("Chart", ResourceKind::Chart; "mixed case chart")]
    #[test_case("datasets", ResourceKind::Dataset; "plural datasets")]
    #[test_case("database", ResourceKind::Database; "singular database")]
    fn test_from_str(input: &str, expected: ResourceKind) {
        assert_eq!(ResourceKind::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = ResourceKind::from_str("widgets").unwrap_err();
        assert!(err.to_string().contains("Unknown resource kind"));
    }

    #[test]
    fn test_api_and_dir_names() {
        assert_eq!(ResourceKind::Chart.api_name(), "chart");
        assert_eq!(ResourceKind::Chart.dir_name(), "charts");
        assert_eq!(ResourceKind::Dashboard.object_dir_name(9), "dashboard_9");
    }

    #[test]
    fn test_import_order_is_dependency_order() {
        let order = ResourceKind::IMPORT_ORDER;
        assert_eq!(order[0], ResourceKind::Database);
        assert_eq!(order[3], ResourceKind::Dashboard);
    }

    #[test]
    fn test_display_matches_api_name() {
        assert_eq!(ResourceKind::Dataset.to_string(), "dataset");
    }
}
