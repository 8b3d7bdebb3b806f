//! Filesystem-to-tree mapping
//!
//! Mirrors an input directory onto the install directory using the
//! two-level WiX layout this tool produces:
//!
//! - files directly under the input root become components of `INSTALLDIR`
//! - each first-level folder becomes a `<Directory>` below `INSTALLDIR`
//! - anything deeper is flattened onto its first-level ancestor
//!
//! Entries are visited in file-name order, folders before their contents.

use log::debug;
use std::path::{Component as PathComponent, Path};
use walkdir::WalkDir;

use crate::error::Result;
use crate::model::{Component, Directory, File};

/// Per-run ID counters for `Dir<N>` and `File<N>`.
///
/// Counters start at zero for every generation and are only advanced
/// through this type, so IDs are unique within a run.
#[derive(Debug, Default)]
pub struct IdCounters {
    directories: usize,
    files: usize,
}

impl IdCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next directory ID (`Dir0`, `Dir1`, ...)
    pub fn next_directory(&mut self) -> String {
        let id = format!("Dir{}", self.directories);
        self.directories += 1;
        id
    }

    /// Next file component ID (`File0`, `File1`, ...)
    pub fn next_file(&mut self) -> String {
        let id = format!("File{}", self.files);
        self.files += 1;
        id
    }

    pub fn directories_issued(&self) -> usize {
        self.directories
    }

    pub fn files_issued(&self) -> usize {
        self.files
    }
}

/// What a walk added to the install directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapOutcome {
    /// Component IDs in creation order
    pub component_ids: Vec<String>,
    /// Directory nodes created
    pub directory_count: usize,
}

impl MapOutcome {
    pub fn component_count(&self) -> usize {
        self.component_ids.len()
    }
}

/// Walk `input` and attach its contents to `install`.
///
/// Any walk error (entry removed mid-walk, permission denied) aborts the
/// mapping; the caller must discard the partially filled directory.
pub fn map_directory(
    install: &mut Directory,
    input: &Path,
    counters: &mut IdCounters,
) -> Result<MapOutcome> {
    let mut outcome = MapOutcome::default();
    let dirs_before = counters.directories_issued();

    for entry in WalkDir::new(input).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(input).unwrap_or(entry.path());
        let top = first_segment(relative);

        if entry.file_type().is_dir() {
            if entry.depth() == 1 {
                let dir = first_level_dir(install, &top, counters);
                debug!("directory {} -> {}", relative.display(), dir.id);
            } else {
                debug!("flattening {} onto {}", relative.display(), top);
            }
            continue;
        }

        let component_id = counters.next_file();
        let file = File {
            id: entry.file_name().to_string_lossy().into_owned(),
            source: entry.path().to_path_buf(),
        };
        let component = Component::for_file(component_id.clone(), file);

        let parent = if entry.depth() == 1 {
            &mut *install
        } else {
            first_level_dir(install, &top, counters)
        };
        debug!("file {} -> {} in {}", relative.display(), component_id, parent.id);
        parent.components.push(component);

        outcome.component_ids.push(component_id);
    }

    outcome.directory_count = counters.directories_issued() - dirs_before;
    Ok(outcome)
}

/// First-level directory named `name`, created on demand
fn first_level_dir<'d>(
    install: &'d mut Directory,
    name: &str,
    counters: &mut IdCounters,
) -> &'d mut Directory {
    let index = match install
        .directories
        .iter()
        .position(|d| d.name.as_deref() == Some(name))
    {
        Some(index) => index,
        None => {
            install
                .directories
                .push(Directory::named(counters.next_directory(), name));
            install.directories.len() - 1
        }
    };
    &mut install.directories[index]
}

/// Install-directory-relative location of an input file.
///
/// Returns the path segments the file ends up under after flattening:
/// `[name]` for root files, `[top, name]` for anything below a first-level
/// folder however deep it sits.
pub fn install_location(relative: &Path) -> Vec<String> {
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            PathComponent::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if segments.len() > 2 {
        let name = segments.pop().unwrap_or_default();
        segments.truncate(1);
        segments.push(name);
    }
    segments
}

fn first_segment(relative: &Path) -> String {
    relative
        .components()
        .find_map(|c| match c {
            PathComponent::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .unwrap_or_default()
}
