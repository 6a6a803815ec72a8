//! Process-wide pool access for legacy call sites
//!
//! The primary way to use [`PoolManager`] is to pass it to dependents
//! explicitly (constructor or factory injection). Code that cannot take an
//! injected manager — engine callbacks, deeply embedded subsystems — can go
//! through a [`GlobalPool`] the application declares as its own `static`:
//!
//! ```rust,ignore
//! static POOL: GlobalPool<StageHost> = GlobalPool::new();
//!
//! fn startup() {
//!     POOL.install(PoolManager::new()).expect("pool installed twice");
//! }
//!
//! fn legacy_call_site(host: &mut StageHost, template: &StageTemplate) {
//!     let projectile = POOL.with(|pool| pool.spawn(host, template, None));
//! }
//! ```
//!
//! This is a transitional shim; prefer injection for new code.

use std::sync::{Mutex, OnceLock, PoisonError};

use thiserror::Error;

use crate::host::SpawnHost;
use crate::manager::PoolManager;

/// Errors from installing the process-wide pool manager.
#[derive(Debug, Error)]
pub enum GlobalPoolError {
    /// `install` was called a second time.
    #[error("a pool manager is already installed")]
    AlreadyInstalled,
}

/// Once-installed holder for the process-wide [`PoolManager`].
///
/// `const`-constructible so applications can declare it as a `static`.
/// Installation happens once at startup; the manager then lives until the
/// process exits (it is torn down with the host lifecycle, not
/// independently resettable).
pub struct GlobalPool<H: SpawnHost> {
    cell: OnceLock<Mutex<PoolManager<H>>>,
}

impl<H: SpawnHost> GlobalPool<H> {
    /// Create an empty, uninstalled cell.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Install the process-wide manager.
    ///
    /// # Errors
    ///
    /// Returns [`GlobalPoolError::AlreadyInstalled`] if a manager was
    /// installed earlier; the original manager is kept and `manager` is
    /// dropped.
    pub fn install(&self, manager: PoolManager<H>) -> Result<(), GlobalPoolError> {
        self.cell
            .set(Mutex::new(manager))
            .map_err(|_| GlobalPoolError::AlreadyInstalled)
    }

    /// Whether a manager has been installed.
    pub fn is_installed(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Run `f` with exclusive access to the installed manager.
    ///
    /// # Panics
    ///
    /// Panics if no manager has been installed; reaching a pooled spawn
    /// before startup wiring ran is a programmer error.
    pub fn with<R>(&self, f: impl FnOnce(&mut PoolManager<H>) -> R) -> R {
        let cell = match self.cell.get() {
            Some(cell) => cell,
            None => panic!("GlobalPool::with called before install"),
        };

        // Uncontended in the single-threaded host model; the lock exists
        // so the cell can live in a `static`.
        let mut manager = cell.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut manager)
    }
}

impl<H: SpawnHost> Default for GlobalPool<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::stub::{StubHost, StubTemplate};
    use crate::template::PoolTemplate;

    static POOL: GlobalPool<StubHost> = GlobalPool::new();

    #[test]
    fn test_install_once_then_access() {
        POOL.install(PoolManager::new()).expect("first install");
        assert!(POOL.is_installed());

        // Only the first install wins.
        assert!(matches!(
            POOL.install(PoolManager::new()),
            Err(GlobalPoolError::AlreadyInstalled)
        ));

        let mut host = StubHost::default();
        let drone = StubTemplate::new("drone");
        let instance = POOL.with(|pool| pool.spawn(&mut host, &drone, None));
        assert_eq!(instance.tag, Some(drone.key()));
        let _ = POOL.with(|pool| pool.despawn(&mut host, instance));
    }

    #[test]
    #[should_panic(expected = "called before install")]
    fn test_access_before_install_panics() {
        static EMPTY: GlobalPool<StubHost> = GlobalPool::new();
        EMPTY.with(|_pool| ());
    }
}
