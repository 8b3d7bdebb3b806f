//! WXS rendering of the package tree

use crate::model::{Component, Directory, Feature, Product, Upgrade, UpgradeVersion, Wix};
use crate::writer::{IndentStyle, XmlWriter};

impl Wix {
    /// Render as a tab-indented WiX source document
    pub fn to_wxs(&self) -> String {
        self.to_wxs_with(IndentStyle::Tab)
    }

    pub fn to_wxs_with(&self, style: IndentStyle) -> String {
        let mut w = XmlWriter::new(style);
        w.write_declaration();
        w.open("Wix", &[("xmlns", self.xmlns.as_str())]);
        write_product(&mut w, &self.product);
        w.close("Wix");
        w.finish()
    }

    /// Render the same tree as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn write_product(w: &mut XmlWriter, product: &Product) {
    w.open(
        "Product",
        &[
            ("Id", product.id.as_str()),
            ("UpgradeCode", product.upgrade_code.as_str()),
            ("Name", product.name.as_str()),
            ("Version", product.version.as_str()),
            ("Manufacturer", product.manufacturer.as_str()),
            ("Language", product.language.as_str()),
        ],
    );

    let installer_version = product.package.installer_version.to_string();
    w.empty(
        "Package",
        &[
            ("InstallerVersion", installer_version.as_str()),
            ("Compressed", yes_no(product.package.compressed)),
            ("Comments", product.package.comments.as_str()),
        ],
    );

    let media_id = product.media.id.to_string();
    w.empty(
        "Media",
        &[
            ("Id", media_id.as_str()),
            ("Cabinet", product.media.cabinet.as_str()),
            ("EmbedCab", yes_no(product.media.embed_cab)),
        ],
    );

    if let Some(icon) = &product.icon {
        let source = icon.source_file.display().to_string();
        w.empty("Icon", &[("Id", icon.id.as_str()), ("SourceFile", source.as_str())]);
    }
    for property in &product.properties {
        w.empty("Property", &[("Id", property.id.as_str()), ("Value", property.value.as_str())]);
    }

    write_directory(w, &product.directory);
    write_feature(w, &product.feature);

    if let Some(upgrade) = &product.upgrade {
        write_upgrade(w, upgrade);
    }
    if let Some(condition) = &product.condition {
        w.text_element(
            "Condition",
            &[("Message", condition.message.as_str())],
            &condition.expression,
        );
    }

    w.close("Product");
}

fn write_directory(w: &mut XmlWriter, dir: &Directory) {
    let mut attrs = vec![("Id", dir.id.as_str())];
    if let Some(name) = &dir.name {
        attrs.push(("Name", name.as_str()));
    }

    if dir.directories.is_empty() && dir.components.is_empty() {
        w.empty("Directory", &attrs);
        return;
    }

    w.open("Directory", &attrs);
    for child in &dir.directories {
        write_directory(w, child);
    }
    for component in &dir.components {
        write_component(w, component);
    }
    w.close("Directory");
}

fn write_component(w: &mut XmlWriter, component: &Component) {
    let attrs = [("Id", component.id.as_str()), ("Guid", component.guid.as_str())];
    if component.file.is_none() && component.shortcut.is_none() && component.remove_folder.is_none()
    {
        w.empty("Component", &attrs);
        return;
    }

    w.open("Component", &attrs);
    if let Some(file) = &component.file {
        let source = file.source.display().to_string();
        w.empty("File", &[("Id", file.id.as_str()), ("Source", source.as_str())]);
    }
    if let Some(shortcut) = &component.shortcut {
        let mut attrs = vec![
            ("Id", shortcut.id.as_str()),
            ("Name", shortcut.name.as_str()),
            ("Description", shortcut.description.as_str()),
            ("Target", shortcut.target.as_str()),
            ("WorkingDirectory", shortcut.working_directory.as_str()),
        ];
        if let Some(icon) = &shortcut.icon {
            attrs.push(("Icon", icon.as_str()));
        }
        w.empty("Shortcut", &attrs);
    }
    if let Some(remove) = &component.remove_folder {
        w.empty("RemoveFolder", &[("Id", remove.id.as_str()), ("On", remove.on.as_str())]);
    }
    w.close("Component");
}

fn write_feature(w: &mut XmlWriter, feature: &Feature) {
    let level = feature.level.to_string();
    let attrs = [("Id", feature.id.as_str()), ("Level", level.as_str())];
    if feature.component_refs.is_empty() {
        w.empty("Feature", &attrs);
        return;
    }

    w.open("Feature", &attrs);
    for reference in &feature.component_refs {
        w.empty("ComponentRef", &[("Id", reference.id.as_str())]);
    }
    w.close("Feature");
}

fn write_upgrade(w: &mut XmlWriter, upgrade: &Upgrade) {
    w.open("Upgrade", &[("Id", upgrade.id.as_str())]);
    for version in &upgrade.versions {
        write_upgrade_version(w, version);
    }
    w.close("Upgrade");
}

fn write_upgrade_version(w: &mut XmlWriter, version: &UpgradeVersion) {
    let mut attrs = vec![("Minimum", version.minimum.as_str())];
    if let Some(maximum) = &version.maximum {
        attrs.push(("Maximum", maximum.as_str()));
    }
    if let Some(include) = version.include_minimum {
        attrs.push(("IncludeMinimum", yes_no(include)));
    }
    if let Some(include) = version.include_maximum {
        attrs.push(("IncludeMaximum", yes_no(include)));
    }
    if let Some(detect) = version.only_detect {
        attrs.push(("OnlyDetect", yes_no(detect)));
    }
    attrs.push(("Property", version.property.as_str()));
    w.empty("UpgradeVersion", &attrs);
}
