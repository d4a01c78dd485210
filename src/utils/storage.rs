use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::info;
use tempfile::NamedTempFile;
use crate::error::Result;
use crate::utils::gradebook::Gradebook;

// Reads and strictly decodes a course file.
pub fn load(path: &Path) -> Result<Gradebook> {
    let contents = fs::read_to_string(path)?;
    let gradebook = Gradebook::deserialize(&contents)?;
    info!("Loaded {} categories from {}", gradebook.len(), path.display());
    Ok(gradebook)
}

// Writes the course file through a temporary sibling that is renamed into place.
pub fn save(gradebook: &Gradebook, path: &Path) -> Result<()> {
    let text = gradebook.serialize()?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = NamedTempFile::new_in(&parent)?;
    tmp.write_all(text.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    info!("Saved {} categories to {}", gradebook.len(), path.display());
    Ok(())
}

impl Gradebook {
    // Replaces this gradebook with the contents of `path`. On failure the current
    // contents are left as they were.
    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        *self = load(path)?;
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        save(self, path)
    }
}
