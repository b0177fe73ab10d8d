//! Availability registry
//!
//! Process-wide record of which operator schema document is canonical for
//! which library version. Writes are once per (operator, version); the
//! registry is the only shared mutable state in the subsystem, so it sits
//! behind an `RwLock`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use semver::Version;
use tracing::info;

use crate::error::{Result, SchemaError};
use crate::operator::document::OperatorDocument;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Version-keyed registry of published operator documents.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, Vec<(Version, OperatorDocument)>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by module-initialization code.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Publish `doc` as the canonical schema for its operator under
    /// `version`. Re-publishing the same (operator, version) pair is an
    /// error; published documents are immutable.
    pub fn publish(&self, version: Version, doc: OperatorDocument) -> Result<()> {
        let mut entries = self.entries.write();
        let versions = entries.entry(doc.name().to_string()).or_default();
        if versions.iter().any(|(v, _)| *v == version) {
            return Err(SchemaError::AlreadyPublished {
                operator: doc.name().to_string(),
                version,
            });
        }
        info!(operator = doc.name(), %version, "published operator schema");
        versions.push((version, doc));
        versions.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(())
    }

    /// The document published for exactly `version`, if any.
    pub fn get(&self, operator: &str, version: &Version) -> Option<OperatorDocument> {
        let entries = self.entries.read();
        entries
            .get(operator)?
            .iter()
            .find(|(v, _)| v == version)
            .map(|(_, doc)| doc.clone())
    }

    /// The highest-version document published for `operator`.
    pub fn latest(&self, operator: &str) -> Option<(Version, OperatorDocument)> {
        let entries = self.entries.read();
        entries.get(operator)?.last().cloned()
    }

    /// Versions under which `operator` has been published, ascending.
    pub fn available_versions(&self, operator: &str) -> Vec<Version> {
        let entries = self.entries.read();
        entries
            .get(operator)
            .map(|versions| versions.iter().map(|(v, _)| v.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> OperatorDocument {
        OperatorDocument::new(name)
    }

    #[test]
    fn test_publish_and_latest() {
        let registry = Registry::new();
        registry.publish(Version::new(0, 22, 0), doc("Op")).unwrap();
        registry.publish(Version::new(1, 0, 0), doc("Op")).unwrap();

        let (version, _) = registry.latest("Op").expect("latest should exist");
        assert_eq!(version, Version::new(1, 0, 0));
        assert_eq!(
            registry.available_versions("Op"),
            vec![Version::new(0, 22, 0), Version::new(1, 0, 0)]
        );
    }

    #[test]
    fn test_write_once_per_version() {
        let registry = Registry::new();
        registry.publish(Version::new(1, 0, 0), doc("Op")).unwrap();
        let err = registry.publish(Version::new(1, 0, 0), doc("Op"));
        assert!(
            matches!(err, Err(SchemaError::AlreadyPublished { .. })),
            "second publish for the same version must fail"
        );
    }

    #[test]
    fn test_get_exact_version() {
        let registry = Registry::new();
        registry.publish(Version::new(0, 24, 0), doc("Op")).unwrap();
        assert!(registry.get("Op", &Version::new(0, 24, 0)).is_some());
        assert!(registry.get("Op", &Version::new(0, 22, 0)).is_none());
        assert!(registry.get("Other", &Version::new(0, 24, 0)).is_none());
    }
}
