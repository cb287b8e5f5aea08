#![doc = include_str!("../README.md")]

use std::path::Path;

use zerocopy::IntoBytes;

mod blob;
pub mod error;
mod framing;
mod options;
mod plain;
mod store;

use blob::*;
pub use error::*;
pub use framing::*;
pub use options::*;
pub use plain::*;
pub use store::*;

const SIZE_OF_U64: usize = std::mem::size_of::<u64>();

/// Writes the bytes of `value` to `path` using [`StoreOptions::default`].
pub fn serialize<T>(path: impl AsRef<Path>, value: &T) -> Result<()>
where
    T: Plain + ?Sized,
{
    Blob::new(path.as_ref(), &StoreOptions::default()).write(value.as_bytes())
}

/// Overwrites `value` with the bytes stored at `path` using [`StoreOptions::default`].
pub fn deserialize<T>(path: impl AsRef<Path>, value: &mut T) -> Result<()>
where
    T: Plain + ?Sized,
{
    Blob::new(path.as_ref(), &StoreOptions::default()).read_into(value.as_mut_bytes())
}

/// Removes the file at `path`, logging a warning instead of failing.
///
/// Returns `true` if the file was removed.
pub fn file_delete(path: impl AsRef<Path>) -> bool {
    Blob::new(path.as_ref(), &StoreOptions::default()).delete()
}
