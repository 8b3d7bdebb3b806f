//! Feature linking
//!
//! Every component the generator creates is recorded once, in creation
//! order, and that single list becomes the feature's references.

use std::collections::HashSet;

use crate::error::{GenError, Result};
use crate::model::{ComponentRef, Feature, Wix};

/// ID of the single installable feature
pub const DEFAULT_FEATURE: &str = "DefaultFeature";

/// Bind the given components into the default feature, preserving order
pub fn link_feature<S: AsRef<str>>(component_ids: &[S]) -> Feature {
    Feature {
        id: DEFAULT_FEATURE.to_string(),
        level: 1,
        component_refs: component_ids
            .iter()
            .map(|id| ComponentRef {
                id: id.as_ref().to_string(),
            })
            .collect(),
    }
}

/// Check that components and feature references match one to one.
///
/// Component IDs must be unique across the whole tree, every component
/// must be referenced exactly once, and no reference may point nowhere.
pub fn verify_references(wix: &Wix) -> Result<()> {
    let mut components = HashSet::new();
    for id in wix.component_ids() {
        if !components.insert(id) {
            return Err(GenError::DuplicateComponent(id.to_string()));
        }
    }

    let mut referenced = HashSet::new();
    for reference in &wix.product.feature.component_refs {
        let id = reference.id.as_str();
        if !components.contains(id) {
            return Err(GenError::DanglingReference(id.to_string()));
        }
        if !referenced.insert(id) {
            return Err(GenError::DuplicateComponent(id.to_string()));
        }
    }

    // Report in document order so the first orphan is stable
    if let Some(orphan) = wix
        .component_ids()
        .into_iter()
        .find(|id| !referenced.contains(id))
    {
        return Err(GenError::UnreferencedComponent(orphan.to_string()));
    }

    Ok(())
}
