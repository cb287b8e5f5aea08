use crate::Framing;

/// Advisory OS locking applied to a blob for the duration of one transfer.
///
/// The lock is held on a sidecar `<name>.lock` file, taken before the blob is created,
/// opened or removed. Writers and removals take an exclusive lock, readers a shared one.
/// The lock is released when the transfer ends. Lock files are left in place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// No locking. Concurrent access to one name needs external coordination.
    #[default]
    None,
    /// Block until the lock is acquired.
    Wait,
    /// Fail with [`crate::Error::Locked`] if the lock is held elsewhere.
    Try,
}

/// Configuration for a [`crate::FlatStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub framing: Framing,
    /// `sync_all` each blob before its handle is released.
    pub sync: bool,
    pub lock: LockMode,
    /// Create missing parent directories on write.
    pub create_dirs: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            framing: Framing::default(),
            sync: false,
            lock: LockMode::default(),
            create_dirs: true,
        }
    }
}

impl StoreOptions {
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_lock(mut self, lock: LockMode) -> Self {
        self.lock = lock;
        self
    }

    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }
}

impl From<Framing> for StoreOptions {
    fn from(framing: Framing) -> Self {
        Self::default().with_framing(framing)
    }
}

impl From<(Framing, LockMode)> for StoreOptions {
    fn from((framing, lock): (Framing, LockMode)) -> Self {
        Self::default().with_framing(framing).with_lock(lock)
    }
}
