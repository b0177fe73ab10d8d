//! Version-gated customization layers
//!
//! A [`CustomizationChain`] is an explicit ordered list of
//! (version gate, edit set) layers folded left-to-right over a base
//! document. Each satisfied layer customizes the output of all earlier
//! satisfied layers, never the base directly, so schema evolution is
//! cumulative and monotonic as the target library version increases.

use semver::Version;
use tracing::debug;

use crate::customize::Customization;
use crate::error::{Result, SchemaError};
use crate::operator::{OperatorDocument, Registry};

/// Precondition "library version >= threshold".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    min_version: Version,
}

impl VersionGate {
    pub fn at_least(min_version: Version) -> Self {
        Self { min_version }
    }

    pub fn min_version(&self) -> &Version {
        &self.min_version
    }

    pub fn satisfied_by(&self, current: &Version) -> bool {
        *current >= self.min_version
    }
}

/// Ordered, strictly version-increasing customization layers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomizationChain {
    layers: Vec<(VersionGate, Customization)>,
}

impl CustomizationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer gated on `min_version`. Thresholds must strictly
    /// increase along the chain; an out-of-order layer is rejected rather
    /// than silently reordered, since layer order is the semantics.
    pub fn layer(mut self, min_version: Version, edits: Customization) -> Result<Self> {
        if let Some((gate, _)) = self.layers.last() {
            if min_version <= *gate.min_version() {
                return Err(SchemaError::UnorderedLayer {
                    previous: gate.min_version().clone(),
                    candidate: min_version,
                });
            }
        }
        self.layers.push((VersionGate::at_least(min_version), edits));
        Ok(self)
    }

    /// The (gate, edit set) layers in application order, for auditing.
    pub fn layers(&self) -> &[(VersionGate, Customization)] {
        &self.layers
    }

    /// Fold every layer whose gate `current` satisfies onto `base`, in
    /// order. Layers whose gate is unsatisfied are skipped; no layer ever
    /// reverts an earlier one except by re-editing the same property.
    pub fn apply(&self, base: &OperatorDocument, current: &Version) -> Result<OperatorDocument> {
        let mut doc = base.clone();
        for (gate, edits) in &self.layers {
            if !gate.satisfied_by(current) {
                continue;
            }
            debug!(
                operator = base.name(),
                threshold = %gate.min_version(),
                "applying customization layer"
            );
            doc = doc.customize(edits)?;
        }
        Ok(doc)
    }

    /// Like [`CustomizationChain::apply`], but each satisfied layer whose
    /// edit set carries the availability flag publishes its result to
    /// `registry` under the layer's version threshold.
    pub fn apply_and_publish(
        &self,
        base: &OperatorDocument,
        current: &Version,
        registry: &Registry,
    ) -> Result<OperatorDocument> {
        let mut doc = base.clone();
        for (gate, edits) in &self.layers {
            if !gate.satisfied_by(current) {
                continue;
            }
            doc = doc.customize(edits)?;
            if edits.publishes() {
                registry.publish(gate.min_version().clone(), doc.clone())?;
            }
        }
        Ok(doc)
    }
}
