use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use zerocopy::{FromZeros, IntoBytes};

use crate::{Blob, Plain, Result, StoreOptions};

/// Directory of raw byte dumps, one file per name.
///
/// Each call is a single open, transfer, close sequence. The store keeps no state
/// besides its root and options, so clones are cheap and independent.
///
/// The store does not coordinate concurrent access to a name. Either serialize access
/// externally or set [`StoreOptions::lock`], which guards each name with a sidecar
/// `<name>.lock` file.
#[derive(Debug, Clone)]
pub struct FlatStore {
    root: PathBuf,
    options: StoreOptions,
}

impl FlatStore {
    /// Opens or creates a store rooted at `root` with default options.
    pub fn open(root: &Path) -> Result<Self> {
        Self::open_with_options(root, StoreOptions::default())
    }

    /// Opens or creates a store rooted at `root`.
    pub fn open_with_options(root: &Path, options: impl Into<StoreOptions>) -> Result<Self> {
        fs::create_dir_all(root)?;
        let options = options.into();
        debug!("Store opened at {} ({:?}).", root.display(), options);
        Ok(Self {
            root: root.to_owned(),
            options,
        })
    }

    /// Writes the bytes of `value` to `name`, replacing any previous content.
    pub fn serialize<T>(&self, name: impl AsRef<Path>, value: &T) -> Result<()>
    where
        T: Plain + ?Sized,
    {
        self.serialize_bytes(name, value.as_bytes())
    }

    pub fn serialize_bytes(&self, name: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
        let path = self.path(name);
        Blob::new(&path, &self.options).write(bytes)
    }

    /// Overwrites `value` with the bytes stored under `name`.
    ///
    /// The stored payload must be exactly `size_of_val(value)` bytes. On error `value`
    /// may have been partially overwritten.
    pub fn deserialize<T>(&self, name: impl AsRef<Path>, value: &mut T) -> Result<()>
    where
        T: Plain + ?Sized,
    {
        self.deserialize_bytes(name, value.as_mut_bytes())
    }

    pub fn deserialize_bytes(&self, name: impl AsRef<Path>, dst: &mut [u8]) -> Result<()> {
        let path = self.path(name);
        Blob::new(&path, &self.options).read_into(dst)
    }

    /// Reads `name` into a fresh value.
    pub fn load<T>(&self, name: impl AsRef<Path>) -> Result<T>
    where
        T: Plain,
    {
        let mut value = T::new_zeroed();
        self.deserialize(name, &mut value)?;
        Ok(value)
    }

    /// Reads the payload of `name` without knowing its size in advance.
    pub fn load_bytes(&self, name: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = self.path(name);
        Blob::new(&path, &self.options).read_to_vec()
    }

    /// Returns the payload length of `name`.
    pub fn stored_len(&self, name: impl AsRef<Path>) -> Result<usize> {
        let path = self.path(name);
        Blob::new(&path, &self.options).payload_len()
    }

    #[inline]
    pub fn exists(&self, name: impl AsRef<Path>) -> bool {
        self.path(name).is_file()
    }

    /// Removes `name`, returning [`crate::Error::Delete`] on failure.
    pub fn remove(&self, name: impl AsRef<Path>) -> Result<()> {
        let path = self.path(name);
        Blob::new(&path, &self.options).remove()
    }

    /// Removes `name`. A failure is logged and reported as `false`, never raised.
    pub fn file_delete(&self, name: impl AsRef<Path>) -> bool {
        let path = self.path(name);
        Blob::new(&path, &self.options).delete()
    }

    /// Resolves `name` against the root. Absolute names are returned as given.
    #[inline]
    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.join(name)
    }

    /// Path of the lock file taken around transfers of `name` when [`StoreOptions::lock`]
    /// is set. Other processes can lock it to coordinate with the store.
    #[inline]
    pub fn lock_path(&self, name: impl AsRef<Path>) -> PathBuf {
        crate::blob::lock_path(&self.path(name))
    }

    #[inline(always)]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline(always)]
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }
}
