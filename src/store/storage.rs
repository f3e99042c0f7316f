//! World-local document storage.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Named text documents scoped to one world.
///
/// Implementations must be shareable with the background writer thread.
pub trait WorldStorage: Send + Sync {
    fn exists(&self, name: &str) -> bool;
    fn read(&self, name: &str) -> io::Result<String>;
    fn write(&self, name: &str, contents: &str) -> io::Result<()>;
}

#[derive(Clone, Debug)]
/// Storage rooted at a world directory on disk.
pub struct FsWorldStorage {
    root: PathBuf,
}

impl FsWorldStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a document name inside the world directory.
    ///
    /// Names containing path separators or parent references are rejected so
    /// a document can never land outside the world. Surrounding whitespace is
    /// rejected too; it would otherwise name a different file than intended.
    fn path_for(&self, name: &str) -> io::Result<PathBuf> {
        if name.is_empty()
            || name.trim() != name
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid world document name '{name}'"),
            ));
        }
        Ok(self.root.join(name))
    }
}

impl WorldStorage for FsWorldStorage {
    fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.path_for(name)?)
    }

    /// Write via a sibling temp file and rename, so readers never observe a
    /// partially written document.
    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.root)?;
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|err| err.error)?;
        Ok(())
    }
}
