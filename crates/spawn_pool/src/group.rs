//! Per-template recycling group
//!
//! A [`SpawnGroup`] is the recycling unit for one template within one
//! allocation context. It parks despawned instances on an idle list and
//! serves later spawn requests from that list before asking the host for a
//! fresh instance:
//!
//! ```text
//! spawn ──► idle list non-empty? ──► re-place + re-activate  (reuse)
//!                 │
//!                 └─ empty ────────► host.instantiate + tag  (miss)
//!
//! despawn ──► idle list below cap? ──► park under group anchor
//!                 │
//!                 └─ at cap ─────────► host.destroy          (retire)
//! ```
//!
//! Groups are created lazily by the pool manager and live in its cache;
//! they are disposed individually through bulk reclamation, or never, when
//! marked persistent.

use crate::config::PoolConfig;
use crate::foundation::math::Placement;
use crate::host::SpawnHost;
use crate::template::{PoolTemplate, TemplateKey};

/// Recycling unit for one template within one allocation context.
///
/// Owns the idle instances parked for reuse and a live count of the ones
/// currently out in the world. Live instances are not tracked by identity;
/// they find their way back via the routing tag stamped on them at
/// creation time.
pub struct SpawnGroup<H: SpawnHost> {
    key: TemplateKey,
    name: String,
    persistent: bool,
    max_idle: usize,
    context: Option<H::Context>,
    anchor: H::Anchor,
    idle: Vec<H::Instance>,
    live: usize,
}

impl<H: SpawnHost> SpawnGroup<H> {
    /// Create a group for `template`, with its anchor node parented under
    /// the manager's pools container.
    pub(crate) fn new(
        host: &mut H,
        template: &H::Template,
        context: Option<H::Context>,
        pools_anchor: Option<&H::Anchor>,
        config: &PoolConfig,
    ) -> Self {
        let key = template.key();
        let name = format!("{}{}", config.pool_name_prefix, template.display_name());
        let persistent = template.persistent_hint().unwrap_or(false);
        let anchor = host.create_anchor(&name, pools_anchor, context.as_ref());

        log::info!(
            "created group '{}' for template {} (persistent: {})",
            name,
            key,
            persistent
        );

        Self {
            key,
            name,
            persistent,
            max_idle: config.max_idle_per_group,
            context,
            anchor,
            idle: Vec::new(),
            live: 0,
        }
    }

    /// Template key this group recycles.
    pub fn key(&self) -> TemplateKey {
        self.key
    }

    /// Diagnostic name, also the name of the group's anchor node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this group survives bulk reclamation.
    pub fn persistent(&self) -> bool {
        self.persistent
    }

    /// Mark or unmark this group persistent.
    pub fn set_persistent(&mut self, persistent: bool) {
        self.persistent = persistent;
    }

    /// Number of parked instances ready for reuse.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Number of instances currently out in the world.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Hand out an instance, reusing a parked one when available.
    pub fn spawn(
        &mut self,
        host: &mut H,
        template: &H::Template,
        parent: Option<&H::Anchor>,
    ) -> H::Instance {
        self.spawn_inner(host, template, None, parent)
    }

    /// Hand out an instance at a specific placement.
    pub fn spawn_at(
        &mut self,
        host: &mut H,
        template: &H::Template,
        placement: &Placement,
        parent: Option<&H::Anchor>,
    ) -> H::Instance {
        self.spawn_inner(host, template, Some(placement), parent)
    }

    fn spawn_inner(
        &mut self,
        host: &mut H,
        template: &H::Template,
        placement: Option<&Placement>,
        parent: Option<&H::Anchor>,
    ) -> H::Instance {
        let mut instance = match self.idle.pop() {
            Some(mut instance) => {
                if let Some(placement) = placement {
                    host.place(&mut instance, placement);
                }
                host.set_live(&mut instance, true);
                log::trace!(
                    "group '{}': reused parked instance ({} still idle)",
                    self.name,
                    self.idle.len()
                );
                instance
            }
            None => {
                let mut instance = host.instantiate(template, placement, self.context.as_ref());
                host.tag(&mut instance, self.key);
                instance
            }
        };

        if let Some(parent) = parent {
            host.reparent(&mut instance, parent);
        }
        self.live += 1;
        instance
    }

    /// Take an instance back: park it for reuse, or retire it when the
    /// idle list is at its retention cap.
    pub fn despawn(&mut self, host: &mut H, mut instance: H::Instance) {
        self.live = self.live.saturating_sub(1);

        if self.idle.len() < self.max_idle {
            host.set_live(&mut instance, false);
            host.reparent(&mut instance, &self.anchor);
            self.idle.push(instance);
        } else {
            log::debug!(
                "group '{}': idle list at cap ({}), retiring instance",
                self.name,
                self.max_idle
            );
            host.destroy(instance);
        }
    }

    /// Destroy every parked instance and the group's anchor node.
    ///
    /// Live instances are not reachable from here; once their group is
    /// gone their routing tags dangle, and the pool manager destroys them
    /// on despawn.
    pub(crate) fn dispose(&mut self, host: &mut H) {
        let parked = self.idle.len();
        for instance in self.idle.drain(..) {
            host.destroy(instance);
        }
        host.dispose_anchor(self.anchor.clone());

        log::debug!(
            "group '{}': disposed, {} parked instance(s) destroyed",
            self.name,
            parked
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::stub::{StubHost, StubTemplate};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn group(host: &mut StubHost, template: &StubTemplate) -> SpawnGroup<StubHost> {
        SpawnGroup::new(host, template, None, None, &PoolConfig::default())
    }

    #[test]
    fn test_spawn_tags_fresh_instance() {
        let mut host = StubHost::default();
        let template = StubTemplate::new("drone");
        let mut group = group(&mut host, &template);

        let instance = group.spawn(&mut host, &template, None);

        assert_eq!(instance.tag, Some(template.key()));
        assert_eq!(host.created, 1);
        assert_eq!(group.live_count(), 1);
    }

    #[test]
    fn test_despawn_parks_under_group_anchor() {
        let mut host = StubHost::default();
        let template = StubTemplate::new("drone");
        let mut group = group(&mut host, &template);

        let instance = group.spawn(&mut host, &template, None);
        group.despawn(&mut host, instance);

        assert_eq!(group.idle_count(), 1);
        assert_eq!(group.live_count(), 0);
        assert_eq!(host.destroyed, 0);
    }

    #[test]
    fn test_spawn_reuses_parked_instance() {
        let mut host = StubHost::default();
        let template = StubTemplate::new("drone");
        let mut group = group(&mut host, &template);

        let first = group.spawn(&mut host, &template, None);
        let first_id = first.id;
        group.despawn(&mut host, first);

        let second = group.spawn(&mut host, &template, None);

        assert_eq!(second.id, first_id);
        assert!(second.live);
        assert_eq!(host.created, 1);
        assert_eq!(group.idle_count(), 0);
    }

    #[test]
    fn test_spawn_at_places_reused_instance() {
        let mut host = StubHost::default();
        let template = StubTemplate::new("drone");
        let mut group = group(&mut host, &template);

        let instance = group.spawn(&mut host, &template, None);
        group.despawn(&mut host, instance);

        let placement = Placement::from_position(Vector3::new(4.0, 0.0, -2.5));
        let reused = group.spawn_at(&mut host, &template, &placement, None);

        assert_relative_eq!(reused.placement.position.x, 4.0);
        assert_relative_eq!(reused.placement.position.z, -2.5);
    }

    #[test]
    fn test_despawn_past_cap_retires_instance() {
        let mut host = StubHost::default();
        let template = StubTemplate::new("drone");
        let config = PoolConfig {
            max_idle_per_group: 1,
            ..PoolConfig::default()
        };
        let mut group = SpawnGroup::new(&mut host, &template, None, None, &config);

        let first = group.spawn(&mut host, &template, None);
        let second = group.spawn(&mut host, &template, None);
        group.despawn(&mut host, first);
        group.despawn(&mut host, second);

        assert_eq!(group.idle_count(), 1);
        assert_eq!(host.destroyed, 1);
    }

    #[test]
    fn test_dispose_destroys_parked_instances_and_anchor() {
        let mut host = StubHost::default();
        let template = StubTemplate::new("drone");
        let mut group = group(&mut host, &template);

        let instance = group.spawn(&mut host, &template, None);
        group.despawn(&mut host, instance);
        group.dispose(&mut host);

        assert_eq!(group.idle_count(), 0);
        assert_eq!(host.destroyed, 1);
        assert_eq!(host.disposed_anchors, vec!["pool_drone".to_owned()]);
    }

    #[test]
    fn test_persistence_hint_propagates() {
        let mut host = StubHost::default();
        let transient = StubTemplate::new("drone");
        let persistent = StubTemplate::persistent("explosion");

        let transient_group = group(&mut host, &transient);
        let persistent_group = group(&mut host, &persistent);

        assert!(!transient_group.persistent());
        assert!(persistent_group.persistent());
    }
}
