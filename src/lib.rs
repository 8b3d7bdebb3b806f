//! wixgen - WiX source generator
//!
//! Turns a directory of build artifacts into a WiX v3 source document with
//! one component per file, a start menu shortcut, a default feature and an
//! upgrade table. Identifiers that tie versions together (the upgrade code,
//! the shortcut component GUID) are derived from content, so regenerating
//! for a new version upgrades the old install instead of sitting beside it.
//!
//! # Example
//!
//! ```no_run
//! use wixgen::{generate, GenConfig};
//!
//! let config = GenConfig {
//!     name: Some("MyApp".into()),
//!     manufacturer: Some("My Company".into()),
//!     input_dir: Some("./dist".into()),
//!     exec: Some("myapp.exe".into()),
//!     ..Default::default()
//! }
//! .validate()
//! .unwrap();
//!
//! let generation = generate(&config).unwrap();
//! println!("{}", generation.wix.to_wxs());
//! ```

pub mod config;
pub mod error;
pub mod feature;
pub mod generator;
pub mod guid;
pub mod mapper;
pub mod model;
pub mod output;
pub mod shortcut;
pub mod upgrade;
pub mod writer;
mod wxs;

pub use config::{GenConfig, PackageConfig};
pub use error::{GenError, Result};
pub use generator::{generate, Generation, GenerationStats};
pub use guid::stable_id;
pub use model::Wix;
pub use output::OutputTarget;
