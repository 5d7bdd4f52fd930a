use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::KeyValueStore;

/// Stores each key as `<dir>/<key>.json`. The directory is created on the first write.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> FileStore {
        FileStore { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs_err::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        fs_err::create_dir_all(&self.dir)?;
        fs_err::write(self.path(key), value)
            .with_context(|| format!("saving {} in {}", key, self.dir.display()))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        match fs_err::remove_file(self.path(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path().join("cache"));
        assert_eq!(store.get_item("henge_streets_Austin").unwrap(), None);

        store.set_item("henge_streets_Austin", "{}").unwrap();
        assert_eq!(
            store.get_item("henge_streets_Austin").unwrap(),
            Some("{}".to_string())
        );
        assert!(tmp.path().join("cache/henge_streets_Austin.json").exists());

        store.remove_item("henge_streets_Austin").unwrap();
        store.remove_item("henge_streets_Austin").unwrap();
        assert_eq!(store.get_item("henge_streets_Austin").unwrap(), None);
    }
}
