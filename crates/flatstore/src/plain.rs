use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Marker trait for values whose bytes can be written to disk and read back as-is.
///
/// A `Plain` type owns no pointers, handles or other resources tied to the process
/// that wrote it, has no padding, and accepts every bit pattern. Integers, floats,
/// arrays and slices of those, and `#[repr(C)]` structs deriving zerocopy's
/// `FromBytes`, `IntoBytes`, `Immutable` and `KnownLayout` all qualify.
///
/// This trait is automatically implemented for any type that satisfies the
/// required bounds. No manual implementation is needed.
///
/// Types that only hold a handle to their data are rejected at compile time. Store
/// the contents instead, e.g. `vec.as_slice()`:
///
/// ```compile_fail
/// # fn main() -> flatstore::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let store = flatstore::FlatStore::open(dir.path())?;
/// let numbers = vec![-5, -7, 0, 1, 3];
/// store.serialize("data", &numbers)?;
/// # Ok(())
/// # }
/// ```
///
/// ```
/// # fn main() -> flatstore::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let store = flatstore::FlatStore::open(dir.path())?;
/// let numbers = vec![-5, -7, 0, 1, 3];
/// store.serialize("data", numbers.as_slice())?;
///
/// let mut copy = vec![0i32; numbers.len()];
/// store.deserialize("data", copy.as_mut_slice())?;
/// assert_eq!(copy, numbers);
/// # Ok(())
/// # }
/// ```
pub trait Plain
where
    Self: FromBytes + IntoBytes + Immutable + KnownLayout,
{
}

impl<T> Plain for T where T: FromBytes + IntoBytes + Immutable + KnownLayout + ?Sized {}
