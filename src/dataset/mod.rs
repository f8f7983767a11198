//! File formats around the registry: the skill dataset, the unit roster and
//! the authoring catalogue.

pub mod catalogue;
pub mod csv;
pub mod roster;
pub mod skills;

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{CatalogError, Result};

pub use catalogue::{Catalogue, read_catalogue};
pub use roster::{Roster, read_roster};
pub use skills::{read_skills, write_skills};

/// Read a UTF-8 file, naming the path in any error.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| with_path(err, path))
}

/// Write a file, creating parent directories as needed.
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| with_path(err, parent))?;
    }
    fs::write(path, contents).map_err(|err| with_path(err, path))
}

fn with_path(err: io::Error, path: &Path) -> CatalogError {
    CatalogError::Io(io::Error::new(err.kind(), format!("{}: {err}", path.display())))
}
