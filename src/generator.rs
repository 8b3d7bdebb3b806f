//! Package generation
//!
//! Runs the whole pipeline for one validated configuration: map the input
//! directory, add the start menu shortcut, link every component into the
//! default feature and wrap the result in a product. The returned tree has
//! passed the reference check and is ready to serialize.

use log::info;
use serde::Serialize;
use std::path::{self, Path, PathBuf};

use crate::config::PackageConfig;
use crate::error::{GenError, Result};
use crate::feature::{link_feature, verify_references};
use crate::mapper::{map_directory, IdCounters};
use crate::model::{Directory, Icon, Product, Wix};
use crate::shortcut::{start_menu, SHORTCUT_COMPONENT};

/// ID of the packaged product icon
pub const PRODUCT_ICON: &str = "ProductIcon";

/// Statistics about a generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub components: usize,
    pub directories: usize,
    pub feature_refs: usize,
}

/// A finished package tree
#[derive(Debug, Clone)]
pub struct Generation {
    pub wix: Wix,
    /// Component IDs in creation order, shortcut component last
    pub component_ids: Vec<String>,
    /// Directory nodes created from the input directory
    pub mapped_directories: usize,
}

impl Generation {
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            components: self.component_ids.len(),
            directories: self.mapped_directories,
            feature_refs: self.wix.product.feature.component_refs.len(),
        }
    }
}

/// Build the package tree for `config`
pub fn generate(config: &PackageConfig) -> Result<Generation> {
    let input = resolve(&config.input_dir)?;

    let mut install = Directory::install(&config.name);
    let mut counters = IdCounters::new();
    let mapped = map_directory(&mut install, &input, &mut counters)?;

    let icon = match &config.icon {
        Some(icon_path) => Some(Icon {
            id: PRODUCT_ICON.to_string(),
            source_file: resolve(icon_path)?,
        }),
        None => None,
    };

    let menu = start_menu(
        &config.name,
        &config.exec,
        icon.as_ref().map(|i| i.id.as_str()),
    );

    let mut component_ids = mapped.component_ids;
    component_ids.push(SHORTCUT_COMPONENT.to_string());
    let feature = link_feature(&component_ids);

    let mut product = Product::new(
        &config.name,
        &config.version,
        &config.manufacturer,
        &config.comments,
        Directory::root(install, [menu]),
        feature,
    );
    if let Some(icon) = icon {
        product = product.with_icon(icon);
    }

    let wix = Wix::new(product);
    verify_references(&wix)?;

    let generation = Generation {
        wix,
        component_ids,
        mapped_directories: mapped.directory_count,
    };
    let stats = generation.stats();
    info!(
        "generated {} components in {} directories for {} {}",
        stats.components, stats.directories, config.name, config.version
    );

    Ok(generation)
}

fn resolve(target: &Path) -> Result<PathBuf> {
    path::absolute(target).map_err(|source| GenError::Resolve {
        path: target.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenConfig;
    use crate::guid::stable_id;
    use crate::output::OutputTarget;
    use std::collections::HashSet;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn config_for(dir: &std::path::Path) -> PackageConfig {
        PackageConfig {
            name: "Foo".to_string(),
            version: "1.0.0".to_string(),
            manufacturer: "Bar".to_string(),
            comments: "Foo installer".to_string(),
            input_dir: dir.to_path_buf(),
            exec: "app.exe".to_string(),
            icon: None,
            output: OutputTarget::Stdout,
        }
    }

    #[test]
    fn test_single_executable() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.exe")).unwrap();

        let generation = generate(&config_for(dir.path())).unwrap();

        assert_eq!(generation.component_ids, vec!["File0", SHORTCUT_COMPONENT]);
        assert_eq!(
            generation.stats(),
            GenerationStats {
                components: 2,
                directories: 0,
                feature_refs: 2,
            }
        );
    }

    #[test]
    fn test_feature_matches_components() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data/nested")).unwrap();
        File::create(dir.path().join("app.exe")).unwrap();
        File::create(dir.path().join("data/a.txt")).unwrap();
        File::create(dir.path().join("data/nested/b.txt")).unwrap();

        let generation = generate(&config_for(dir.path())).unwrap();

        let components: HashSet<_> = generation.wix.component_ids().into_iter().collect();
        let refs: HashSet<_> = generation
            .wix
            .product
            .feature
            .component_refs
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(components, refs);
        assert_eq!(generation.wix.product.feature.component_refs.len(), 4);
    }

    #[test]
    fn test_shortcut_reference_is_last() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.exe")).unwrap();
        File::create(dir.path().join("z.txt")).unwrap();

        let generation = generate(&config_for(dir.path())).unwrap();

        let refs = &generation.wix.product.feature.component_refs;
        assert_eq!(refs.last().map(|r| r.id.as_str()), Some(SHORTCUT_COMPONENT));
    }

    #[test]
    fn test_sources_are_absolute() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.exe")).unwrap();

        let generation = generate(&config_for(dir.path())).unwrap();

        let install = generation.wix.install_dir().unwrap();
        let source = &install.components[0].file.as_ref().unwrap().source;
        assert!(source.is_absolute());
        assert!(source.ends_with("app.exe"));
    }

    #[test]
    fn test_upgrade_code_consistent() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.exe")).unwrap();

        let generation = generate(&config_for(dir.path())).unwrap();

        let product = &generation.wix.product;
        assert_eq!(product.upgrade_code, stable_id(b"Foo"));
        assert_eq!(product.upgrade.as_ref().unwrap().id, product.upgrade_code);
    }

    #[test]
    fn test_icon_packaged() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.exe")).unwrap();
        let icon = dir.path().join("app.ico");
        File::create(&icon).unwrap();

        let config = PackageConfig {
            icon: Some(icon),
            ..config_for(dir.path())
        };
        let generation = generate(&config).unwrap();

        let product = &generation.wix.product;
        assert_eq!(product.icon.as_ref().map(|i| i.id.as_str()), Some(PRODUCT_ICON));
        let wxs = generation.wix.to_wxs();
        assert!(wxs.contains("Icon=\"ProductIcon\""));
    }

    #[test]
    fn test_defaults_from_validated_config() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("app.exe")).unwrap();

        let config = GenConfig {
            name: Some("Foo".to_string()),
            manufacturer: Some("Bar".to_string()),
            input_dir: Some(dir.path().to_path_buf()),
            exec: Some("app.exe".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let generation = generate(&config).unwrap();
        assert_eq!(generation.wix.product.version, "1.0.0");
        assert_eq!(generation.wix.product.package.comments, "Foo installer");
    }

    #[test]
    fn test_unresolvable_input_is_filesystem_error() {
        let config = PackageConfig {
            input_dir: PathBuf::new(),
            ..config_for(Path::new("unused"))
        };

        let err = generate(&config).unwrap_err();
        assert!(matches!(err, GenError::Resolve { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
