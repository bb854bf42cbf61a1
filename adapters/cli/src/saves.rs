use std::{
    fs, io,
    path::{Path, PathBuf},
};

use frostbite_core::GameState;
use frostbite_system_persistence::{
    decode_save, encode_save, validate_save_name, PersistenceError, SaveRepository,
};
use tracing::{debug, warn};

const SAVE_EXTENSION: &str = "save";

/// Repository storing one save string per file inside a directory.
#[derive(Clone, Debug)]
pub(crate) struct DirectorySaveRepository {
    root: PathBuf,
}

impl DirectorySaveRepository {
    /// Creates a repository rooted at `root`. The directory is created lazily.
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{SAVE_EXTENSION}"))
    }
}

impl SaveRepository for DirectorySaveRepository {
    fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                warn!(dir = %self.root.display(), %error, "could not list saves");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => save_name(&entry.path()),
                Err(error) => {
                    warn!(dir = %self.root.display(), %error, "skipping unreadable entry");
                    None
                }
            })
            .collect();
        names.sort_unstable();
        names
    }

    fn load(&self, name: &str) -> Option<GameState> {
        validate_save_name(name).ok()?;
        let path = self.path_for(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return None,
            Err(error) => {
                warn!(path = %path.display(), %error, "could not read save");
                return None;
            }
        };
        match decode_save(&contents) {
            Ok(state) => Some(state),
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring corrupt save");
                None
            }
        }
    }

    fn store(&mut self, name: &str, state: &GameState) -> Result<(), PersistenceError> {
        validate_save_name(name)?;
        let encoded = encode_save(state).map_err(|source| PersistenceError::Encode {
            name: name.to_owned(),
            source,
        })?;
        let io_error = |source: io::Error| PersistenceError::Io {
            name: name.to_owned(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(io_error)?;
        let path = self.path_for(name);
        fs::write(&path, format!("{encoded}\n")).map_err(io_error)?;
        debug!(path = %path.display(), "save written");
        Ok(())
    }
}

fn save_name(path: &Path) -> Option<String> {
    if path.extension()? != SAVE_EXTENSION {
        return None;
    }
    let name = path.file_stem()?.to_str()?;
    validate_save_name(name).ok()?;
    Some(name.to_owned())
}
