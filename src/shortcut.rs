//! Start menu shortcut
//!
//! Every package gets a `ProgramMenuFolder` > product subfolder holding one
//! component with the application shortcut. Its GUID is derived from the
//! executable name so the shortcut keeps its identity across versions.

use std::path::Path;

use crate::guid::stable_id;
use crate::mapper::install_location;
use crate::model::{Component, Directory, InstallEvent, RemoveFolder, Shortcut, INSTALL_DIR};

/// Start menu root directory ID
pub const PROGRAM_MENU_DIR: &str = "ProgramMenuFolder";
/// Product subfolder inside the start menu
pub const PROGRAM_MENU_SUBFOLDER: &str = "ProgramMenuSubfolder";
/// ID of the synthetic shortcut component
pub const SHORTCUT_COMPONENT: &str = "ApplicationShortcuts";

/// Build the start menu directory tree for a product.
///
/// `exec` is the executable path relative to the install directory;
/// `icon_id` references a product `<Icon>` when one is packaged.
pub fn start_menu(product_name: &str, exec: &str, icon_id: Option<&str>) -> Directory {
    let component = shortcut_component(product_name, exec, icon_id);
    Directory::new(PROGRAM_MENU_DIR).with_child(
        Directory::named(PROGRAM_MENU_SUBFOLDER, product_name).with_component(component),
    )
}

fn shortcut_component(product_name: &str, exec: &str, icon_id: Option<&str>) -> Component {
    Component {
        guid: stable_id(exec.as_bytes()),
        shortcut: Some(Shortcut {
            id: "ApplicationShortcut".to_string(),
            name: product_name.to_string(),
            description: product_name.to_string(),
            target: shortcut_target(exec),
            working_directory: INSTALL_DIR.to_string(),
            icon: icon_id.map(str::to_string),
        }),
        remove_folder: Some(RemoveFolder {
            id: PROGRAM_MENU_SUBFOLDER.to_string(),
            on: InstallEvent::Uninstall,
        }),
        ..Component::new(SHORTCUT_COMPONENT)
    }
}

/// `[INSTALLDIR]` target of the installed executable, Windows separators.
///
/// Follows the mapper's flattening, so `bin/x64/app.exe` targets
/// `bin\app.exe`.
fn shortcut_target(exec: &str) -> String {
    let exec = exec.replace('\\', "/");
    let location = install_location(Path::new(&exec));
    format!("[{}]{}", INSTALL_DIR, location.join("\\"))
}
