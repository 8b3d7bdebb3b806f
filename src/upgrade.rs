//! Upgrade table and the launch condition guarding it
//!
//! Two version ranges are always emitted for a product version `V`:
//!
//! | Property                  | Range          | Action                 |
//! |---------------------------|----------------|------------------------|
//! | `NEWERVERSIONDETECTED`    | `[V, ∞)`       | detect only, block     |
//! | `OLDVERSIONBEINGUPGRADED` | `[0.0.0, V)`   | remove during upgrade  |
//!
//! `V` itself falls only in the first range, so reinstalling the same
//! version is detected and refused rather than silently layered on top.

use crate::guid::stable_id;
use crate::model::{Condition, Upgrade, UpgradeVersion};

/// Property set when an equal or newer version is installed
pub const NEWER_VERSION_PROPERTY: &str = "NEWERVERSIONDETECTED";
/// Property set when an older version will be replaced
pub const OLDER_VERSION_PROPERTY: &str = "OLDVERSIONBEINGUPGRADED";

/// Build the `<Upgrade>` block for a product.
///
/// The ID equals the product's upgrade code; both come from the product name.
pub fn build_upgrade(product_name: &str, version: &str) -> Upgrade {
    Upgrade {
        id: stable_id(product_name.as_bytes()),
        versions: upgrade_versions(version),
    }
}

fn upgrade_versions(version: &str) -> Vec<UpgradeVersion> {
    vec![
        UpgradeVersion {
            minimum: version.to_string(),
            only_detect: Some(true),
            property: NEWER_VERSION_PROPERTY.to_string(),
            ..Default::default()
        },
        UpgradeVersion {
            minimum: "0.0.0".to_string(),
            maximum: Some(version.to_string()),
            include_minimum: Some(true),
            include_maximum: Some(false),
            property: OLDER_VERSION_PROPERTY.to_string(),
            ..Default::default()
        },
    ]
}

/// Launch condition failing the install when a newer version is present
pub fn newer_version_condition() -> Condition {
    Condition {
        message: "Product is already installed".to_string(),
        expression: format!("NOT {}", NEWER_VERSION_PROPERTY),
    }
}
