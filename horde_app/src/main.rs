//! Horde demo application
//!
//! Exercises the pool manager against a simulated stage: waves of drones
//! spawn and despawn with recycling between waves, a persistent explosion
//! pool rides through a level transition warm, and a straggler left alive
//! across the transition shows the dangling-tag fallback.
//!
//! Run with `RUST_LOG=debug` to watch group creation and reclamation.

use rand::Rng;
use slotmap::{DefaultKey, SlotMap};
use spawn_pool::prelude::*;

/// Template for stage entities: a name plus an optional persistence marker.
struct StageTemplate {
    name: &'static str,
    key: TemplateKey,
    persistent: Option<bool>,
}

impl StageTemplate {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            key: TemplateKey::of(name),
            persistent: None,
        }
    }

    fn persistent(name: &'static str) -> Self {
        Self {
            persistent: Some(true),
            ..Self::new(name)
        }
    }
}

impl PoolTemplate for StageTemplate {
    fn key(&self) -> TemplateKey {
        self.key
    }

    fn display_name(&self) -> &str {
        self.name
    }

    fn persistent_hint(&self) -> Option<bool> {
        self.persistent
    }
}

/// Record backing one stage entity.
struct EntityRecord {
    template: &'static str,
    placement: Placement,
    parent: Option<DefaultKey>,
    tag: Option<TemplateKey>,
    live: bool,
}

/// Handle to a stage entity.
#[derive(Debug)]
struct StageInstance(DefaultKey);

/// Slotmap-backed scene standing in for a real engine.
#[derive(Default)]
struct StageHost {
    entities: SlotMap<DefaultKey, EntityRecord>,
    anchors: SlotMap<DefaultKey, String>,
}

impl StageHost {
    fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn live_count(&self) -> usize {
        self.entities.values().filter(|record| record.live).count()
    }

    /// Entities sitting deactivated under a pool anchor.
    fn parked_count(&self) -> usize {
        self.entities
            .values()
            .filter(|record| !record.live && record.parent.is_some())
            .count()
    }
}

impl SpawnHost for StageHost {
    type Template = StageTemplate;
    type Instance = StageInstance;
    type Context = u32;
    type Anchor = DefaultKey;

    fn instantiate(
        &mut self,
        template: &StageTemplate,
        placement: Option<&Placement>,
        _context: Option<&u32>,
    ) -> StageInstance {
        let key = self.entities.insert(EntityRecord {
            template: template.name,
            placement: placement.cloned().unwrap_or_default(),
            parent: None,
            tag: None,
            live: true,
        });
        StageInstance(key)
    }

    fn destroy(&mut self, instance: StageInstance) {
        if let Some(record) = self.entities.remove(instance.0) {
            log::trace!("destroyed '{}'", record.template);
        }
    }

    fn create_anchor(
        &mut self,
        name: &str,
        _parent: Option<&DefaultKey>,
        _context: Option<&u32>,
    ) -> DefaultKey {
        self.anchors.insert(name.to_owned())
    }

    fn dispose_anchor(&mut self, anchor: DefaultKey) {
        self.anchors.remove(anchor);
    }

    fn reparent(&mut self, instance: &mut StageInstance, parent: &DefaultKey) {
        if let Some(record) = self.entities.get_mut(instance.0) {
            record.parent = Some(*parent);
        }
    }

    fn place(&mut self, instance: &mut StageInstance, placement: &Placement) {
        if let Some(record) = self.entities.get_mut(instance.0) {
            record.placement = placement.clone();
            log::trace!(
                "moved '{}' to {:?}",
                record.template,
                record.placement.position
            );
        }
    }

    fn set_live(&mut self, instance: &mut StageInstance, live: bool) {
        if let Some(record) = self.entities.get_mut(instance.0) {
            record.live = live;
        }
    }

    fn tag(&mut self, instance: &mut StageInstance, key: TemplateKey) {
        if let Some(record) = self.entities.get_mut(instance.0) {
            record.tag = Some(key);
        }
    }

    fn tag_of(&self, instance: &StageInstance) -> Option<TemplateKey> {
        self.entities.get(instance.0).and_then(|record| record.tag)
    }
}

fn random_placement(rng: &mut impl Rng) -> Placement {
    Placement::from_position(Vec3::new(
        rng.gen_range(-40.0..40.0),
        0.0,
        rng.gen_range(-40.0..40.0),
    ))
}

fn main() {
    spawn_pool::foundation::logging::init();

    let mut host = StageHost::default();
    let mut pool = PoolManager::with_config(PoolConfig {
        max_idle_per_group: 32,
        ..PoolConfig::default()
    });
    let mut rng = rand::thread_rng();

    let pools_root = host.anchors.insert("pools".to_owned());
    pool.set_pools_anchor(pools_root);

    let drone = StageTemplate::new("drone");
    let barrel = StageTemplate::new("barrel");
    let explosion = StageTemplate::persistent("explosion");

    // Level 1: three waves of drones, recycled between waves.
    log::info!("--- level 1 ---");
    for wave in 0..3 {
        let mut squad = Vec::new();
        for _ in 0..8 {
            let placement = random_placement(&mut rng);
            squad.push(pool.spawn_at(&mut host, &drone, &placement, None));
        }
        let cover = pool.spawn(&mut host, &barrel, None);
        let boom = pool.spawn_at(&mut host, &explosion, &Placement::identity(), None);

        log::info!(
            "wave {}: {} entities on stage ({} live)",
            wave,
            host.entity_count(),
            host.live_count()
        );

        for instance in squad {
            let _ = pool.despawn(&mut host, instance);
        }
        let _ = pool.despawn(&mut host, cover);
        let _ = pool.despawn(&mut host, boom);
    }

    // A scoped sub-stage: same drone template, isolated group.
    let sub_stage: u32 = 7;
    let scoped = pool.spawn_scoped(
        &mut host,
        &drone,
        &random_placement(&mut rng),
        &sub_stage,
        None,
    );
    let _ = pool.despawn_scoped(&mut host, scoped, &sub_stage);

    // One drone stays live across the transition; its group will be gone
    // when it finally despawns.
    let straggler = pool.spawn(&mut host, &drone, None);

    log::info!(
        "before transition: {} groups, stats: {:?}",
        pool.group_count(),
        pool.stats()
    );

    // Level transition: transient pools go, the explosion pool stays warm.
    pool.release_transient_groups(&mut host);

    log::info!("--- level 2 ---");
    match pool.despawn(&mut host, straggler) {
        Despawn::Destroyed => log::info!("straggler destroyed (its group was reclaimed)"),
        outcome => log::warn!("unexpected straggler outcome: {:?}", outcome),
    }

    // The explosion pool is still warm; drones start cold again.
    let boom = pool.spawn(&mut host, &explosion, None);
    let fresh_drone = pool.spawn(&mut host, &drone, None);
    let _ = pool.despawn(&mut host, boom);
    let _ = pool.despawn(&mut host, fresh_drone);

    log::info!(
        "final: {} groups, {} entities on stage ({} parked), stats: {:?}",
        pool.group_count(),
        host.entity_count(),
        host.parked_count(),
        pool.stats()
    );
}
