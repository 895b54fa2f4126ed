use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::backend::interface::{KeyValueStore, Result};

/// Key-value store on the local filesystem: one `<key>.json` file per key,
/// all under a single directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl AsRef<Path>) -> JsonStore {
        JsonStore { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into())
        }
    }

    /// Writes to a sibling temporary file first and renames it into place,
    /// so the stored value is always either the old or the new blob.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{}.json.tmp", key));
        let written = fs::File::create(&staging)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&staging, &target));

        if let Err(err) = written {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }

        debug!("wrote {} bytes to {}", value.len(), target.display());
        Ok(())
    }
}
