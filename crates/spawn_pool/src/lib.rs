//! # Spawn Pool
//!
//! Template-keyed runtime pooling for spawnable entities. Instead of
//! creating and destroying an entity instance on every use, a
//! [`PoolManager`] recycles instances in per-template groups: a spawn
//! request is served from the owning group's idle list when possible, and
//! a despawned instance is parked for the next request instead of dying.
//!
//! ## Features
//!
//! - **Template-keyed caching**: one recycling group per template, created
//!   lazily on first spawn
//! - **Isolated allocation contexts**: the same template pools separately
//!   per context, for hosts with scoped instantiation
//! - **Routing tags**: instances remember their group, so despawning
//!   needs no caller-side bookkeeping
//! - **Bulk reclamation**: one call clears every non-persistent group on
//!   a scene transition; persistent groups ride through warm
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spawn_pool::prelude::*;
//!
//! let mut host = StageHost::new(); // your SpawnHost implementation
//! let mut pool = PoolManager::new();
//!
//! let drone = pool.spawn(&mut host, &drone_template, None);
//! match pool.despawn(&mut host, drone) {
//!     Despawn::Pooled => {}                    // parked for reuse
//!     Despawn::Destroyed => {}                 // group was reclaimed earlier
//!     Despawn::Unroutable(stray) => drop(stray), // never ours; caller keeps it
//! }
//!
//! pool.release_transient_groups(&mut host);    // scene transition
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod global;
pub mod group;
pub mod host;
pub mod manager;
pub mod template;

pub use config::{Config, ConfigError, PoolConfig};
pub use global::{GlobalPool, GlobalPoolError};
pub use group::SpawnGroup;
pub use host::SpawnHost;
pub use manager::{Despawn, PoolManager, PoolStats};
pub use template::{PoolTemplate, TemplateKey};

/// Common imports for pool users
pub mod prelude {
    pub use crate::{
        config::{Config, PoolConfig},
        foundation::math::{Placement, Quat, Vec3},
        global::GlobalPool,
        group::SpawnGroup,
        host::SpawnHost,
        manager::{Despawn, PoolManager, PoolStats},
        template::{PoolTemplate, TemplateKey},
    };
}
