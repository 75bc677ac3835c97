//! Subject-prefix routing table
//!
//! Maps the code in front of a case subject's first `:` (e.g. `"OES"` in
//! `"OES: volume offline"`) to a canonical product name. The table is an
//! ordered list rather than a map: [`RoutingTable::resolve`] scans every
//! entry and the last match wins.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One prefix → product pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub prefix: String,
    pub product: String,
}

impl RouteEntry {
    pub fn new(prefix: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            product: product.into(),
        }
    }
}

/// Production queues, in routing order
const BUILTIN_ROUTES: &[(&str, &str)] = &[
    ("OES", "Open Enterprise Server"),
    ("Condrey", "Condrey"),
    ("eDir", "eDirectory"),
    ("eDirectory", "eDirectory"),
    ("IDM", "IDM Advanced Edition"),
    ("Client", "Client"),
    ("Filr", "Filr Standard Edition"),
    ("GW", "GroupWise"),
    ("GroupWise", "GroupWise"),
    ("ZEN", "ZENWorks"),
    ("ZENWorks", "ZENWorks"),
    ("SBM", "SBM"),
    ("SLM", "SLM"),
    ("Rumba", "RUMBA"),
    ("PAM", "Privileged Account Manager"),
    ("NAM", "Access Manager"),
    ("RefDesk", "Reflection Desktop"),
    ("AccuRev", "AccuRev Enterprise Edition"),
    ("Silk", "SilkTest"),
    ("Databridge", "Databridge Enterprise"),
    ("Enterprise Dev", "Enterprise Developers for zEnterprise"),
    ("AAF", "Advanced Authentication"),
    ("ChangeMan", "ChangeMan ZMF"),
    ("Orbix", "MF-Orbix Mainframe Runtime"),
    ("EA", "Enterprise Analyzer - Analyst Client"),
    ("Enterprise Analyzer", "Enterprise Analyzer - Analyst Client"),
    ("TGAudit", "TGAudit"),
    ("StarTeam", "StarTeam Enterprise"),
    ("MFA", "Mainframe Access Suite"),
    ("Enterprise Server", "Enterprise Server"),
    ("ES", "Enterprise Server"),
];

/// Immutable, ordered routing table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    entries: Vec<RouteEntry>,
}

impl RoutingTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// The table the support desk routes with in production
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ROUTES
                .iter()
                .map(|(prefix, product)| RouteEntry::new(*prefix, *product))
                .collect(),
        )
    }

    /// Parse a YAML list of `{prefix, product}` maps.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let table: RoutingTable = serde_yaml::from_str(yaml)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.prefix.is_empty() {
                return Err(ConfigError::RoutingTable(format!(
                    "entry {index} has an empty prefix"
                )));
            }
            if entry.product.is_empty() {
                return Err(ConfigError::RoutingTable(format!(
                    "entry {index} ('{}') has an empty product",
                    entry.prefix
                )));
            }
        }
        Ok(())
    }

    /// Canonical product for a subject prefix.
    ///
    /// Comparison is exact and case-sensitive. The scan does not stop at the
    /// first hit, so when several entries share a prefix the later one wins.
    pub fn resolve(&self, subject_prefix: &str) -> Option<&str> {
        let mut routed = None;
        for entry in &self.entries {
            if entry.prefix == subject_prefix {
                routed = Some(entry.product.as_str());
            }
        }
        routed
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
