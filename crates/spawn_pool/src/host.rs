//! Host engine seam
//!
//! The pool never creates, destroys, or moves entities itself; it drives
//! the host engine through [`SpawnHost`]. The trait is the full capability
//! contract the pool needs: instantiation and destruction primitives,
//! organizational scene nodes for parking idle instances, and the routing
//! tag an instance carries back to its owning group on despawn.

use crate::foundation::math::Placement;
use crate::template::{PoolTemplate, TemplateKey};

/// Engine-provided primitives the pool manager is built on.
///
/// All operations are synchronous and, from the pool's point of view,
/// infallible: a host that cannot create or destroy an instance should
/// panic, and that failure propagates uncaught (the pool has no recovery
/// for it). The pool calls these primitives from the host's single update
/// thread; no internal synchronization is expected or provided.
pub trait SpawnHost {
    /// Template/blueprint type instances are created from.
    type Template: PoolTemplate;

    /// Live entity instance type. Owned by the pool while parked, by the
    /// caller while spawned.
    type Instance;

    /// Opaque allocation-context handle. The pool only compares contexts
    /// for identity and uses them as cache discriminators; a clone must
    /// compare equal to its source.
    type Context: Clone + Eq + std::hash::Hash;

    /// Organizational scene node. Each group parks its idle instances
    /// under one; callers can pass one as a spawn parent.
    type Anchor: Clone;

    /// Create a fresh instance from `template`, optionally already placed,
    /// optionally inside `context` (absent means the default context).
    fn instantiate(
        &mut self,
        template: &Self::Template,
        placement: Option<&Placement>,
        context: Option<&Self::Context>,
    ) -> Self::Instance;

    /// Destroy an instance outright.
    fn destroy(&mut self, instance: Self::Instance);

    /// Create a named organizational node, optionally parented under
    /// `parent`, optionally inside `context`.
    fn create_anchor(
        &mut self,
        name: &str,
        parent: Option<&Self::Anchor>,
        context: Option<&Self::Context>,
    ) -> Self::Anchor;

    /// Tear down a node created with [`create_anchor`](Self::create_anchor).
    fn dispose_anchor(&mut self, anchor: Self::Anchor);

    /// Re-parent an instance under `parent`.
    fn reparent(&mut self, instance: &mut Self::Instance, parent: &Self::Anchor);

    /// Move an existing instance to `placement`.
    fn place(&mut self, instance: &mut Self::Instance, placement: &Placement);

    /// Activate or deactivate an instance. Parked instances stay
    /// deactivated until they are handed out again.
    fn set_live(&mut self, instance: &mut Self::Instance, live: bool);

    /// Record `key` on the instance so a later despawn can route back to
    /// the owning group.
    fn tag(&mut self, instance: &mut Self::Instance, key: TemplateKey);

    /// Read the routing tag recorded at spawn time, if any.
    fn tag_of(&self, instance: &Self::Instance) -> Option<TemplateKey>;
}

#[cfg(test)]
pub(crate) mod stub {
    //! Minimal in-memory host shared by the crate's tests.

    use super::{Placement, PoolTemplate, SpawnHost, TemplateKey};

    /// Test template: a name plus an optional persistence marker.
    #[derive(Debug, Clone)]
    pub struct StubTemplate {
        pub name: &'static str,
        pub persistent: Option<bool>,
    }

    impl StubTemplate {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                persistent: None,
            }
        }

        pub fn persistent(name: &'static str) -> Self {
            Self {
                name,
                persistent: Some(true),
            }
        }
    }

    impl PoolTemplate for StubTemplate {
        fn key(&self) -> TemplateKey {
            TemplateKey::of(self.name)
        }

        fn display_name(&self) -> &str {
            self.name
        }

        fn persistent_hint(&self) -> Option<bool> {
            self.persistent
        }
    }

    /// Instance minted by [`StubHost`].
    #[derive(Debug)]
    pub struct StubInstance {
        pub id: u32,
        pub tag: Option<TemplateKey>,
        pub parent: Option<String>,
        pub placement: Placement,
        pub live: bool,
    }

    /// Recording host: counts every primitive call so tests can assert on
    /// exactly what the pool did.
    #[derive(Debug, Default)]
    pub struct StubHost {
        next_id: u32,
        pub created: u32,
        pub destroyed: u32,
        pub anchors: Vec<(String, Option<String>)>,
        pub disposed_anchors: Vec<String>,
    }

    impl SpawnHost for StubHost {
        type Template = StubTemplate;
        type Instance = StubInstance;
        type Context = &'static str;
        type Anchor = String;

        fn instantiate(
            &mut self,
            _template: &StubTemplate,
            placement: Option<&Placement>,
            _context: Option<&&'static str>,
        ) -> StubInstance {
            self.next_id += 1;
            self.created += 1;
            StubInstance {
                id: self.next_id,
                tag: None,
                parent: None,
                placement: placement.cloned().unwrap_or_default(),
                live: true,
            }
        }

        fn destroy(&mut self, _instance: StubInstance) {
            self.destroyed += 1;
        }

        fn create_anchor(
            &mut self,
            name: &str,
            parent: Option<&String>,
            _context: Option<&&'static str>,
        ) -> String {
            self.anchors.push((name.to_owned(), parent.cloned()));
            name.to_owned()
        }

        fn dispose_anchor(&mut self, anchor: String) {
            self.disposed_anchors.push(anchor);
        }

        fn reparent(&mut self, instance: &mut StubInstance, parent: &String) {
            instance.parent = Some(parent.clone());
        }

        fn place(&mut self, instance: &mut StubInstance, placement: &Placement) {
            instance.placement = placement.clone();
        }

        fn set_live(&mut self, instance: &mut StubInstance, live: bool) {
            instance.live = live;
        }

        fn tag(&mut self, instance: &mut StubInstance, key: TemplateKey) {
            instance.tag = Some(key);
        }

        fn tag_of(&self, instance: &StubInstance) -> Option<TemplateKey> {
            instance.tag
        }
    }
}
