//! Directory-backed key-value storage.
//!
//! Layout:
//! ```text
//! <path>/MANIFEST        magic + version
//! <path>/LOCK            exclusive advisory lock while open
//! <path>/<key>.kv        one framed value per key
//! ```
//!
//! Value frame: magic (4) | version (1) | len u64 LE | utf-8 bytes | crc32 LE.

use super::KeyValueStore;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Magic bytes for the store manifest.
const STORE_MAGIC: &[u8; 4] = b"LSM\0";

/// Magic bytes for value files.
const VALUE_MAGIC: &[u8; 4] = b"LKV\0";

/// Current on-disk format version.
const FORMAT_VERSION: u8 = 1;

/// Key-value backend storing each key in its own file.
pub struct FileBackend {
    path: PathBuf,

    /// Lock file for exclusive access.
    _lock_file: File,

    /// Serializes writers inside this process.
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open an existing directory or create a new one.
    pub fn open_or_create(config: &StoreConfig) -> Result<Self> {
        if config.path.exists() {
            Self::open(&config.path)
        } else if config.create_if_missing {
            Self::create(&config.path)
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    /// Create a fresh store directory.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;
        Self::write_manifest(&path)?;
        let lock_file = Self::acquire_lock(&path)?;

        tracing::debug!(path = %path.display(), "created file backend");

        Ok(Self {
            path,
            _lock_file: lock_file,
            write_lock: Mutex::new(()),
        })
    }

    /// Open an existing store directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        Self::verify_manifest(&path)?;
        let lock_file = Self::acquire_lock(&path)?;

        Ok(Self {
            path,
            _lock_file: lock_file,
            write_lock: Mutex::new(()),
        })
    }

    /// Directory this backend lives in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidOperation(format!(
                "invalid key name: {key:?}"
            )));
        }
        Ok(self.path.join(format!("{key}.kv")))
    }

    fn write_manifest(path: &Path) -> Result<()> {
        let mut file = File::create(path.join("MANIFEST"))?;
        file.write_all(STORE_MAGIC)?;
        file.write_all(&[FORMAT_VERSION])?;
        file.sync_all()?;
        Ok(())
    }

    fn verify_manifest(path: &Path) -> Result<()> {
        let mut file = File::open(path.join("MANIFEST")).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotInitialized,
            _ => StoreError::Io(e),
        })?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != STORE_MAGIC {
            return Err(StoreError::InvalidFormat("Invalid store magic".into()));
        }

        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != FORMAT_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "Unsupported store version: {}",
                version[0]
            )));
        }

        Ok(())
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_file = File::create(path.join("LOCK"))?;
        lock_file.try_lock_exclusive().map_err(|_| {
            tracing::warn!(path = %path.display(), "store directory already locked");
            StoreError::Locked
        })?;
        Ok(lock_file)
    }

    fn encode(value: &str) -> Vec<u8> {
        let bytes = value.as_bytes();
        let mut frame = Vec::with_capacity(bytes.len() + 17);
        frame.extend_from_slice(VALUE_MAGIC);
        frame.push(FORMAT_VERSION);
        frame.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
        frame.extend_from_slice(bytes);
        frame.extend_from_slice(&crc32fast::hash(bytes).to_le_bytes());
        frame
    }

    fn decode(key: &str, frame: &[u8]) -> Result<String> {
        if frame.len() < 17 {
            return Err(StoreError::Corruption(format!("truncated value for '{key}'")));
        }
        if &frame[0..4] != VALUE_MAGIC {
            return Err(StoreError::InvalidFormat(format!(
                "Invalid value magic for '{key}'"
            )));
        }
        if frame[4] != FORMAT_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "Unsupported value version: {}",
                frame[4]
            )));
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&frame[5..13]);
        let len = u64::from_le_bytes(len_bytes);
        let body = frame.len() - 17;
        if len != body as u64 {
            return Err(StoreError::Corruption(format!(
                "length mismatch for '{key}'"
            )));
        }
        let len = body;

        let payload = &frame[13..13 + len];
        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&frame[13 + len..]);
        let expected = u32::from_le_bytes(crc_bytes);
        let got = crc32fast::hash(payload);
        if expected != got {
            return Err(StoreError::ChecksumMismatch { expected, got });
        }

        String::from_utf8(payload.to_vec())
            .map_err(|e| StoreError::Corruption(format!("non-utf8 value for '{key}': {e}")))
    }
}

impl KeyValueStore for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        let frame = match fs::read(&path) {
            Ok(frame) => frame,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::decode(key, &frame).map(Some)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        let tmp = path.with_extension("kv.tmp");
        let _lock = self.write_lock.lock();

        let mut file = File::create(&tmp)?;
        file.write_all(&Self::encode(value))?;
        file.sync_all()?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        let _lock = self.write_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
