//! Package tree model
//!
//! In-memory form of a WiX v3 source document. The tree is assembled
//! bottom-up: every node is complete before it is attached to its parent,
//! and nothing is mutated once the feature has been linked.

use serde::Serialize;
use std::path::PathBuf;

use crate::guid::{stable_id, AUTO_GUID};
use crate::upgrade;

/// WiX v3 source namespace
pub const WIX_NAMESPACE: &str = "http://schemas.microsoft.com/wix/2006/wi";

/// Virtual source root directory ID
pub const TARGET_DIR: &str = "TARGETDIR";
/// Program Files directory ID
pub const PROGRAM_FILES_DIR: &str = "ProgramFilesFolder";
/// Install directory ID (named after the product)
pub const INSTALL_DIR: &str = "INSTALLDIR";

/// Root `<Wix>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wix {
    pub xmlns: String,
    pub product: Product,
}

impl Wix {
    pub fn new(product: Product) -> Self {
        Self {
            xmlns: WIX_NAMESPACE.to_string(),
            product,
        }
    }

    /// IDs of every component in the tree, in document order
    pub fn component_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.product.directory.collect_component_ids(&mut ids);
        ids
    }

    /// Number of directory nodes below the source root
    pub fn directory_count(&self) -> usize {
        self.product.directory.descendant_count()
    }

    /// The `INSTALLDIR` node
    pub fn install_dir(&self) -> Option<&Directory> {
        self.product.directory.find(INSTALL_DIR)
    }
}

/// `<Product>` element with its package-level metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub upgrade_code: String,
    pub name: String,
    pub version: String,
    pub manufacturer: String,
    pub language: String,
    pub package: Package,
    pub media: Media,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    pub directory: Directory,
    pub feature: Feature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<Upgrade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Product {
    /// Build a product around a finished directory tree and feature.
    ///
    /// The upgrade code is derived from the product name only, so every
    /// version of the same product shares it.
    pub fn new(
        name: &str,
        version: &str,
        manufacturer: &str,
        comments: &str,
        directory: Directory,
        feature: Feature,
    ) -> Self {
        Self {
            id: AUTO_GUID.to_string(),
            upgrade_code: stable_id(name.as_bytes()),
            name: name.to_string(),
            version: version.to_string(),
            manufacturer: manufacturer.to_string(),
            language: "1033".to_string(),
            package: Package::new(comments),
            media: Media::default(),
            icon: None,
            properties: Vec::new(),
            directory,
            feature,
            upgrade: Some(upgrade::build_upgrade(name, version)),
            condition: Some(upgrade::newer_version_condition()),
        }
    }

    /// Attach a product icon and show it in Add/Remove Programs
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.properties.push(Property {
            id: "ARPPRODUCTICON".to_string(),
            value: icon.id.clone(),
        });
        self.icon = Some(icon);
        self
    }
}

/// `<Package>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub installer_version: u32,
    pub compressed: bool,
    pub comments: String,
}

impl Package {
    pub fn new(comments: &str) -> Self {
        Self {
            installer_version: 200,
            compressed: true,
            comments: comments.to_string(),
        }
    }
}

/// `<Media>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Media {
    pub id: u32,
    pub cabinet: String,
    pub embed_cab: bool,
}

impl Default for Media {
    fn default() -> Self {
        Self {
            id: 1,
            cabinet: "product.cab".to_string(),
            embed_cab: true,
        }
    }
}

/// `<Icon>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icon {
    pub id: String,
    pub source_file: PathBuf,
}

/// `<Property>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: String,
    pub value: String,
}

/// `<Directory>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directory {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub directories: Vec<Directory>,
    pub components: Vec<Component>,
}

impl Directory {
    /// Anonymous directory (standard folders such as `ProgramFilesFolder`)
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            directories: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(id)
        }
    }

    pub fn with_child(mut self, child: Directory) -> Self {
        self.directories.push(child);
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Empty install directory named after the product
    pub fn install(product_name: &str) -> Self {
        Self::named(INSTALL_DIR, product_name)
    }

    /// Fixed skeleton: `TARGETDIR` > `ProgramFilesFolder` > install dir,
    /// followed by any extra top-level folders (e.g. the start menu).
    pub fn root(install: Directory, extra: impl IntoIterator<Item = Directory>) -> Self {
        let program_files = Directory::new(PROGRAM_FILES_DIR).with_child(install);
        let mut root = Directory::named(TARGET_DIR, "SourceDir").with_child(program_files);
        root.directories.extend(extra);
        root
    }

    /// Direct child with the given display name
    pub fn child_named_mut(&mut self, name: &str) -> Option<&mut Directory> {
        self.directories
            .iter_mut()
            .find(|d| d.name.as_deref() == Some(name))
    }

    /// Depth-first search by ID, including `self`
    pub fn find(&self, id: &str) -> Option<&Directory> {
        if self.id == id {
            return Some(self);
        }
        self.directories.iter().find_map(|d| d.find(id))
    }

    fn collect_component_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        ids.extend(self.components.iter().map(|c| c.id.as_str()));
        for dir in &self.directories {
            dir.collect_component_ids(ids);
        }
    }

    fn descendant_count(&self) -> usize {
        self.directories
            .iter()
            .map(|d| 1 + d.descendant_count())
            .sum()
    }
}

/// `<Component>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub id: String,
    pub guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<Shortcut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_folder: Option<RemoveFolder>,
}

impl Component {
    /// Component with an auto-assigned GUID and nothing inside
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            guid: AUTO_GUID.to_string(),
            file: None,
            shortcut: None,
            remove_folder: None,
        }
    }

    /// Component wrapping exactly one file
    pub fn for_file(id: impl Into<String>, file: File) -> Self {
        Self {
            file: Some(file),
            ..Self::new(id)
        }
    }
}

/// `<File>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    pub id: String,
    pub source: PathBuf,
}

/// `<Shortcut>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortcut {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target: String,
    pub working_directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// When a `<RemoveFolder>` fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallEvent {
    Install,
    Uninstall,
    Both,
}

impl InstallEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallEvent::Install => "install",
            InstallEvent::Uninstall => "uninstall",
            InstallEvent::Both => "both",
        }
    }
}

/// `<RemoveFolder>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoveFolder {
    pub id: String,
    pub on: InstallEvent,
}

/// `<Feature>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub id: String,
    pub level: u32,
    pub component_refs: Vec<ComponentRef>,
}

/// `<ComponentRef>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRef {
    pub id: String,
}

/// `<Upgrade>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Upgrade {
    pub id: String,
    pub versions: Vec<UpgradeVersion>,
}

/// `<UpgradeVersion>` element
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UpgradeVersion {
    pub minimum: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_detect: Option<bool>,
    pub property: String,
}

/// `<Condition>` launch condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub message: String,
    pub expression: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_feature() -> Feature {
        Feature {
            id: "DefaultFeature".to_string(),
            level: 1,
            component_refs: Vec::new(),
        }
    }

    #[test]
    fn test_root_skeleton() {
        let root = Directory::root(Directory::install("Foo"), []);

        assert_eq!(root.id, TARGET_DIR);
        assert_eq!(root.name.as_deref(), Some("SourceDir"));
        assert_eq!(root.directories.len(), 1);

        let program_files = &root.directories[0];
        assert_eq!(program_files.id, PROGRAM_FILES_DIR);
        assert!(program_files.name.is_none());

        let install = &program_files.directories[0];
        assert_eq!(install.id, INSTALL_DIR);
        assert_eq!(install.name.as_deref(), Some("Foo"));
    }

    #[test]
    fn test_root_extra_folders_follow_program_files() {
        let root = Directory::root(
            Directory::install("Foo"),
            [Directory::new("ProgramMenuFolder")],
        );

        let ids: Vec<_> = root.directories.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![PROGRAM_FILES_DIR, "ProgramMenuFolder"]);
    }

    #[test]
    fn test_upgrade_code_depends_on_name_only() {
        let dir = || Directory::root(Directory::install("Foo"), []);
        let a = Product::new("Foo", "1.0.0", "Bar", "c", dir(), sample_feature());
        let b = Product::new("Foo", "2.5.1", "Other", "d", dir(), sample_feature());
        let c = Product::new("Baz", "1.0.0", "Bar", "c", dir(), sample_feature());

        assert_eq!(a.upgrade_code, b.upgrade_code);
        assert_ne!(a.upgrade_code, c.upgrade_code);
        assert_eq!(a.id, "*");
        assert_eq!(a.language, "1033");
    }

    #[test]
    fn test_product_defaults() {
        let product = Product::new(
            "Foo",
            "1.0.0",
            "Bar",
            "Foo installer",
            Directory::root(Directory::install("Foo"), []),
            sample_feature(),
        );

        assert_eq!(product.package.installer_version, 200);
        assert!(product.package.compressed);
        assert_eq!(product.package.comments, "Foo installer");
        assert_eq!(product.media, Media::default());
        assert!(product.upgrade.is_some());
        assert!(product.condition.is_some());
        assert!(product.icon.is_none());
        assert!(product.properties.is_empty());
    }

    #[test]
    fn test_with_icon_sets_arp_property() {
        let product = Product::new(
            "Foo",
            "1.0.0",
            "Bar",
            "c",
            Directory::root(Directory::install("Foo"), []),
            sample_feature(),
        )
        .with_icon(Icon {
            id: "ProductIcon".to_string(),
            source_file: PathBuf::from("/tmp/app.ico"),
        });

        assert_eq!(product.properties.len(), 1);
        assert_eq!(product.properties[0].id, "ARPPRODUCTICON");
        assert_eq!(product.properties[0].value, "ProductIcon");
    }

    #[test]
    fn test_component_ids_walks_whole_tree() {
        let install = Directory::install("Foo")
            .with_component(Component::new("File0"))
            .with_child(Directory::named("Dir0", "data").with_component(Component::new("File1")));
        let menu = Directory::new("ProgramMenuFolder")
            .with_child(Directory::named("Sub", "Foo").with_component(Component::new("Shortcuts")));
        let wix = Wix::new(Product::new(
            "Foo",
            "1.0.0",
            "Bar",
            "c",
            Directory::root(install, [menu]),
            sample_feature(),
        ));

        assert_eq!(wix.component_ids(), vec!["File0", "File1", "Shortcuts"]);
        // ProgramFilesFolder, INSTALLDIR, Dir0, ProgramMenuFolder, Sub
        assert_eq!(wix.directory_count(), 5);
        assert_eq!(wix.install_dir().map(|d| d.components.len()), Some(1));
    }

    #[test]
    fn test_child_named_mut() {
        let mut install = Directory::install("Foo").with_child(Directory::named("Dir0", "data"));

        assert!(install.child_named_mut("data").is_some());
        assert!(install.child_named_mut("missing").is_none());
    }

    #[test]
    fn test_component_for_file_uses_auto_guid() {
        let component = Component::for_file(
            "File0",
            File {
                id: "app.exe".to_string(),
                source: PathBuf::from("/dist/app.exe"),
            },
        );

        assert_eq!(component.guid, AUTO_GUID);
        assert!(component.shortcut.is_none());
        assert!(component.remove_folder.is_none());
    }
}
