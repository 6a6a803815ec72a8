//! Pool manager
//!
//! Coordinates the per-template recycling groups behind a single cache and
//! routes every spawn and despawn to the right one:
//!
//! ```text
//! spawn(template)            despawn(instance)
//!        │                          │
//!   TemplateKey               routing tag? ──none──► warn, hand back
//!        │                          │
//!   GroupKey (+ scope)         GroupKey (+ scope)
//!        │                          │
//!   cache hit? ──no──► create   cache hit? ──no──► destroy (dangling tag)
//!        │                          │
//!   SpawnGroup::spawn          SpawnGroup::despawn
//! ```
//!
//! Groups are created lazily on first use and cached per template key, or
//! per (template key, allocation context) pair for hosts with isolated
//! instantiation scopes. A scene transition calls
//! [`PoolManager::release_transient_groups`] to clear every group that is
//! not marked persistent.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::config::PoolConfig;
use crate::foundation::math::Placement;
use crate::group::SpawnGroup;
use crate::host::SpawnHost;
use crate::template::{PoolTemplate, TemplateKey};

/// Allocation scope of a group: the host's default context or a custom one.
#[derive(Clone, PartialEq, Eq, Hash)]
enum Scope<C> {
    Default,
    Scoped(C),
}

/// Cache key: template identity plus allocation scope.
///
/// The default and custom-context namespaces are disjoint by construction;
/// a group reachable under `Scoped(c)` can never be reached under
/// `Default` and vice versa.
#[derive(Clone, PartialEq, Eq, Hash)]
struct GroupKey<C> {
    template: TemplateKey,
    scope: Scope<C>,
}

fn scope_of<C: Clone>(context: Option<&C>) -> Scope<C> {
    match context {
        Some(context) => Scope::Scoped(context.clone()),
        None => Scope::Default,
    }
}

/// Outcome of a despawn request.
///
/// The variants mirror the three routing results: accepted by the owning
/// group, destroyed because the group is gone, or handed back because the
/// instance was never this pool's to manage.
#[derive(Debug)]
#[must_use = "an unroutable despawn hands the instance back to the caller"]
pub enum Despawn<I> {
    /// The owning group took the instance back (parked it for reuse, or
    /// retired it at the group's retention cap).
    Pooled,

    /// The instance's tag pointed at a group that has since been
    /// reclaimed; the instance was destroyed so it cannot leak.
    Destroyed,

    /// The instance carries no routing tag. It is returned untouched; its
    /// lifecycle stays with the caller.
    Unroutable(I),
}

/// Monotonic counters describing pool activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolStats {
    /// Groups created over the manager's lifetime.
    pub groups_created: u64,
    /// Groups disposed by bulk reclamation.
    pub groups_reclaimed: u64,
    /// Instances handed out, fresh and recycled.
    pub spawned: u64,
    /// Spawns served from a group's idle list.
    pub recycled: u64,
    /// Instances parked back into an idle list.
    pub parked: u64,
    /// Instances destroyed because their group was already reclaimed.
    pub destroyed_on_despawn: u64,
    /// Despawn requests skipped for missing routing tags.
    pub unroutable_despawns: u64,
}

/// Template-keyed cache of recycling groups with spawn/despawn routing.
///
/// The manager holds no host resources itself; the host is passed into
/// every operation, the same way the engine context travels through the
/// rendering layers. All operations are synchronous and expect the host's
/// single update thread.
pub struct PoolManager<H: SpawnHost> {
    groups: HashMap<GroupKey<H::Context>, SpawnGroup<H>>,
    pools_anchor: Option<H::Anchor>,
    config: PoolConfig,
    stats: PoolStats,
}

impl<H: SpawnHost> PoolManager<H> {
    /// Create a manager with default configuration.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create a manager with an explicit configuration.
    pub fn with_config(config: PoolConfig) -> Self {
        log::info!(
            "creating pool manager (max idle per group: {})",
            config.max_idle_per_group
        );
        Self {
            groups: HashMap::new(),
            pools_anchor: None,
            config,
            stats: PoolStats::default(),
        }
    }

    /// Set the organizational node new group anchors are parented under.
    ///
    /// Purely diagnostic; groups work the same without one.
    pub fn set_pools_anchor(&mut self, anchor: H::Anchor) {
        self.pools_anchor = Some(anchor);
    }

    /// Resolve the group owning `template` in the given scope, creating it
    /// on first use.
    ///
    /// Repeated calls with the same template and context return the same
    /// group and never create duplicates. A cache hit has no side effects.
    pub fn resolve_group(
        &mut self,
        host: &mut H,
        template: &H::Template,
        context: Option<&H::Context>,
    ) -> &mut SpawnGroup<H> {
        let key = GroupKey {
            template: template.key(),
            scope: scope_of(context),
        };

        match self.groups.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.stats.groups_created += 1;
                entry.insert(SpawnGroup::new(
                    host,
                    template,
                    context.cloned(),
                    self.pools_anchor.as_ref(),
                    &self.config,
                ))
            }
        }
    }

    /// Spawn an instance of `template` in the default context.
    pub fn spawn(
        &mut self,
        host: &mut H,
        template: &H::Template,
        parent: Option<&H::Anchor>,
    ) -> H::Instance {
        self.spawn_with(host, template, None, None, parent)
    }

    /// Spawn an instance of `template` at `placement` in the default
    /// context.
    pub fn spawn_at(
        &mut self,
        host: &mut H,
        template: &H::Template,
        placement: &Placement,
        parent: Option<&H::Anchor>,
    ) -> H::Instance {
        self.spawn_with(host, template, Some(placement), None, parent)
    }

    /// Spawn an instance of `template` at `placement` inside `context`.
    ///
    /// The instance comes from (and returns to, via
    /// [`despawn_scoped`](Self::despawn_scoped)) a group isolated to that
    /// context; the default-context group for the same template is never
    /// touched.
    pub fn spawn_scoped(
        &mut self,
        host: &mut H,
        template: &H::Template,
        placement: &Placement,
        context: &H::Context,
        parent: Option<&H::Anchor>,
    ) -> H::Instance {
        self.spawn_with(host, template, Some(placement), Some(context), parent)
    }

    fn spawn_with(
        &mut self,
        host: &mut H,
        template: &H::Template,
        placement: Option<&Placement>,
        context: Option<&H::Context>,
        parent: Option<&H::Anchor>,
    ) -> H::Instance {
        let group = self.resolve_group(host, template, context);
        let recycled = group.idle_count() > 0;

        let instance = match placement {
            Some(placement) => group.spawn_at(host, template, placement, parent),
            None => group.spawn(host, template, parent),
        };

        self.stats.spawned += 1;
        if recycled {
            self.stats.recycled += 1;
        }
        instance
    }

    /// Route `instance` back to its owning group in the default context.
    ///
    /// See [`Despawn`] for the fallback outcomes when the instance carries
    /// no tag or its group is gone.
    pub fn despawn(&mut self, host: &mut H, instance: H::Instance) -> Despawn<H::Instance> {
        self.despawn_in(host, instance, None)
    }

    /// Route `instance` back to its owning group inside `context`.
    pub fn despawn_scoped(
        &mut self,
        host: &mut H,
        instance: H::Instance,
        context: &H::Context,
    ) -> Despawn<H::Instance> {
        self.despawn_in(host, instance, Some(context))
    }

    fn despawn_in(
        &mut self,
        host: &mut H,
        instance: H::Instance,
        context: Option<&H::Context>,
    ) -> Despawn<H::Instance> {
        let template = match host.tag_of(&instance) {
            Some(template) => template,
            None => {
                log::warn!("despawn: instance carries no routing tag, skipping");
                self.stats.unroutable_despawns += 1;
                return Despawn::Unroutable(instance);
            }
        };

        let key = GroupKey {
            template,
            scope: scope_of(context),
        };

        match self.groups.get_mut(&key) {
            Some(group) => {
                let parked = group.idle_count() < self.config.max_idle_per_group;
                group.despawn(host, instance);
                if parked {
                    self.stats.parked += 1;
                }
                Despawn::Pooled
            }
            None => {
                log::debug!(
                    "despawn: no group for template {}, destroying instance",
                    template
                );
                host.destroy(instance);
                self.stats.destroyed_on_despawn += 1;
                Despawn::Destroyed
            }
        }
    }

    /// Dispose every non-persistent group and drop it from the cache.
    ///
    /// Persistent groups keep their cache entries and parked instances, so
    /// they ride through scene transitions warm. Disposal and removal run
    /// as two passes; the cache is never mutated while it is iterated.
    pub fn release_transient_groups(&mut self, host: &mut H) {
        let mut reclaimed: Vec<GroupKey<H::Context>> = Vec::new();

        for (key, group) in &mut self.groups {
            if group.persistent() {
                continue;
            }
            group.dispose(host);
            reclaimed.push(key.clone());
        }

        for key in &reclaimed {
            self.groups.remove(key);
        }

        self.stats.groups_reclaimed += reclaimed.len() as u64;
        log::info!(
            "released {} transient group(s), {} group(s) retained",
            reclaimed.len(),
            self.groups.len()
        );
    }

    /// Number of groups currently cached, across all scopes.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Look up the cached group for `template` in the given scope, if one
    /// exists.
    pub fn group(
        &self,
        template: &H::Template,
        context: Option<&H::Context>,
    ) -> Option<&SpawnGroup<H>> {
        let key = GroupKey {
            template: template.key(),
            scope: scope_of(context),
        };
        self.groups.get(&key)
    }

    /// Activity counters.
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Configuration in effect.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }
}

impl<H: SpawnHost> Default for PoolManager<H> {
    fn default() -> Self {
        Self::new()
    }
}
