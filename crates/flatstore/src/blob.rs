use std::{
    fs::{self, File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{Error, Framing, LockMode, Result, SIZE_OF_U64, StoreOptions};

/// One persisted blob: a file path plus the options used to transfer it.
///
/// Every operation opens its own handle and drops it before returning, on success and
/// on error alike. Nothing is cached between calls.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Blob<'a> {
    path: &'a Path,
    options: &'a StoreOptions,
}

impl<'a> Blob<'a> {
    #[inline]
    pub fn new(path: &'a Path, options: &'a StoreOptions) -> Self {
        Self { path, options }
    }

    /// Replaces the blob's content with `bytes`, framed per the options.
    pub fn write(&self, bytes: &[u8]) -> Result<()> {
        if self.options.create_dirs
            && let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.open_error(source))?;
        }

        // Taken before the data file is created so readers never see it empty.
        let _guard = self.lock(true)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path)
            .map_err(|source| self.open_error(source))?;
        debug!("{} opened for writing.", self.path.display());

        if let Some(header) = self.options.framing.encode_header(bytes.len()) {
            file.write_all(&header)?;
        }
        file.write_all(bytes)?;

        if self.options.sync {
            file.sync_all()?;
        }

        debug!(
            "{} written: {} bytes ({}).",
            self.path.display(),
            self.options.framing.blob_len(bytes.len()),
            self.options.framing
        );
        Ok(())
    }

    /// Overwrites `dst` with the stored payload, which must be exactly `dst.len()` bytes.
    ///
    /// On error `dst` may have been partially overwritten.
    pub fn read_into(&self, dst: &mut [u8]) -> Result<()> {
        let (_guard, mut file) = self.open_read()?;

        if self.options.framing == Framing::LengthPrefixed {
            let stored = Self::read_header(&mut file)?;
            if stored != dst.len() as u64 {
                return Err(Error::LengthMismatch {
                    stored,
                    capacity: dst.len(),
                });
            }
        }

        Self::read_payload(&mut file, dst)?;
        Self::ensure_eof(&mut file, dst.len())?;

        debug!("{} read: {} bytes.", self.path.display(), dst.len());
        Ok(())
    }

    /// Reads the whole payload without knowing its size beforehand.
    pub fn read_to_vec(&self) -> Result<Vec<u8>> {
        let (_guard, mut file) = self.open_read()?;

        let bytes = match self.options.framing {
            Framing::None => {
                let mut bytes = vec![];
                file.read_to_end(&mut bytes)?;
                bytes
            }
            Framing::LengthPrefixed => {
                let stored = Self::read_header(&mut file)?;
                let available = file.metadata()?.len().saturating_sub(SIZE_OF_U64 as u64);
                // Checked before allocating, a corrupt prefix could ask for anything.
                if stored > available {
                    return Err(Error::Truncated {
                        expected: usize::try_from(stored).unwrap_or(usize::MAX),
                        actual: usize::try_from(available).unwrap_or(usize::MAX),
                    });
                }
                let mut bytes = vec![0u8; stored as usize];
                Self::read_payload(&mut file, &mut bytes)?;
                Self::ensure_eof(&mut file, bytes.len())?;
                bytes
            }
        };

        debug!("{} read: {} bytes.", self.path.display(), bytes.len());
        Ok(bytes)
    }

    /// Payload length: the stored prefix, or the file size when unframed.
    pub fn payload_len(&self) -> Result<usize> {
        let (_guard, mut file) = self.open_read()?;
        match self.options.framing {
            Framing::None => Ok(usize::try_from(file.metadata()?.len()).unwrap_or(usize::MAX)),
            Framing::LengthPrefixed => {
                let stored = Self::read_header(&mut file)?;
                Ok(usize::try_from(stored).unwrap_or(usize::MAX))
            }
        }
    }

    pub fn remove(&self) -> Result<()> {
        let _guard = self.lock(true)?;
        fs::remove_file(self.path).map_err(|source| Error::Delete {
            path: self.path.to_owned(),
            source,
        })?;
        debug!("{} deleted.", self.path.display());
        Ok(())
    }

    /// Like [`Self::remove`] but only logs a failure.
    pub fn delete(&self) -> bool {
        match self.remove() {
            Ok(()) => true,
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    /// Returns the lock guard alongside the data file, the guard must outlive the reads.
    fn open_read(&self) -> Result<(Option<File>, File)> {
        let guard = self.lock(false)?;
        let file = File::open(self.path).map_err(|source| self.open_error(source))?;
        debug!("{} opened for reading.", self.path.display());
        Ok((guard, file))
    }

    /// Locks the sidecar lock file of this blob, returning the handle that holds the lock.
    ///
    /// Locking a separate file rather than the data file covers its creation and removal.
    /// The lock file is left in place afterwards.
    fn lock(&self, exclusive: bool) -> Result<Option<File>> {
        let blocking = match self.options.lock {
            LockMode::None => return Ok(None),
            LockMode::Wait => true,
            LockMode::Try => false,
        };

        let lock_path = lock_path(self.path);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| Error::Open {
                path: lock_path.clone(),
                source,
            })?;

        let try_lock_error = |e| Error::from_try_lock(self.path.to_owned(), e);
        match (blocking, exclusive) {
            (true, true) => file.lock()?,
            (true, false) => file.lock_shared()?,
            (false, true) => file.try_lock().map_err(try_lock_error)?,
            (false, false) => file.try_lock_shared().map_err(try_lock_error)?,
        }
        debug!("{} locked.", lock_path.display());
        Ok(Some(file))
    }

    #[inline]
    fn open_error(&self, source: io::Error) -> Error {
        Error::Open {
            path: self.path.to_owned(),
            source,
        }
    }

    fn read_header(file: &mut File) -> Result<u64> {
        let mut header = [0; SIZE_OF_U64];
        let read = read_full(file, &mut header)?;
        Framing::decode_header(&header[..read])
    }

    fn read_payload(file: &mut File, dst: &mut [u8]) -> Result<()> {
        let read = read_full(file, dst)?;
        if read < dst.len() {
            return Err(Error::Truncated {
                expected: dst.len(),
                actual: read,
            });
        }
        Ok(())
    }

    fn ensure_eof(file: &mut File, expected: usize) -> Result<()> {
        let mut probe = [0; 1];
        if read_full(file, &mut probe)? != 0 {
            return Err(Error::TrailingBytes { expected });
        }
        Ok(())
    }
}

/// Path of the lock file guarding `path`: the same name with `.lock` appended.
pub(crate) fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Fills as much of `buf` as the reader can provide and returns the count.
///
/// Unlike `read_exact`, a short read isn't an error, so callers can report how many
/// bytes were actually there.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
