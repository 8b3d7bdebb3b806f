//! Output sink for generated documents

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::Result;

/// Where the finished document goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Write the whole document; any failure is returned, never swallowed
    pub fn write(&self, document: &str) -> Result<()> {
        match self {
            OutputTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.flush()?;
            }
            OutputTarget::File(path) => fs::write(path, document)?,
        }
        Ok(())
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "stdout"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}
