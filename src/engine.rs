//! Permission and scope resolution
//!
//! The precedence chain, first matching rule wins:
//! no actor → deny; bypass role → allow; explicit overrides → that object
//! alone; otherwise the role preset. Scope resolution follows the same
//! shape with `own_data` as the floor.

use tracing::trace;

use crate::actor::Actor;
use crate::bypass::BypassPolicy;
use crate::perm::Permission;
use crate::preset::PresetRegistry;
use crate::scope::DataScope;

/// The decision engine.
///
/// Pure and O(1) per call, bounded by the fixed permission-set size.
/// Holds only immutable tables; any number of callers may resolve
/// concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEngine {
    registry: PresetRegistry,
    bypass: BypassPolicy,
}

impl AccessEngine {
    /// Engine over the built-in preset table
    pub const fn new() -> Self {
        AccessEngine::with_registry(PresetRegistry::builtin())
    }

    /// Engine over an injected preset table
    pub const fn with_registry(registry: PresetRegistry) -> Self {
        AccessEngine {
            registry,
            bypass: BypassPolicy,
        }
    }

    pub const fn registry(&self) -> &PresetRegistry {
        &self.registry
    }

    /// Resolve one permission for an actor snapshot.
    ///
    /// Bypass dominates explicit overrides, which dominate presets, which
    /// dominate the global default of deny. Total over all inputs; no
    /// side effects on denial beyond the trace event.
    pub fn has_permission(&self, actor: Option<&Actor>, perm: Permission) -> bool {
        let Some(actor) = actor else {
            trace!(perm = %perm, "no actor, deny");
            return false;
        };
        if self.bypass.bypasses(actor.role) {
            trace!(actor = %actor.id, role = %actor.role, perm = %perm, "bypass, allow");
            return true;
        }
        if let Some(overrides) = &actor.permissions {
            // An overrides object replaces preset lookup outright; keys it
            // does not grant resolve to deny
            let granted = overrides.grants.contains(perm);
            trace!(actor = %actor.id, perm = %perm, granted, "explicit overrides");
            return granted;
        }
        let granted = self.registry.preset(actor.role).grants.contains(perm);
        trace!(actor = %actor.id, role = %actor.role, perm = %perm, granted, "role preset");
        granted
    }

    /// Resolve a raw wire name; unknown names deny
    pub fn has_permission_named(&self, actor: Option<&Actor>, name: &str) -> bool {
        match Permission::from_name(name) {
            Some(perm) => self.has_permission(actor, perm),
            None => {
                trace!(name, "unknown permission name, deny");
                false
            }
        }
    }

    /// Page guard: namespaces a bare page name into `access_*`
    pub fn can_access_page(&self, actor: Option<&Actor>, page: &str) -> bool {
        self.has_permission_named(actor, &format!("access_{page}"))
    }

    /// Action guard: namespaces a bare action name into `action_*`
    pub fn can_perform_action(&self, actor: Option<&Actor>, action: &str) -> bool {
        self.has_permission_named(actor, &format!("action_{action}"))
    }

    /// Resolve the breadth of data an actor may query.
    ///
    /// Bypass roles get their fixed scope regardless of overrides or
    /// presets; an explicit override scope is returned verbatim with no
    /// validation against the role; everything else falls back to the
    /// role preset.
    pub fn data_scope(&self, actor: Option<&Actor>) -> DataScope {
        let Some(actor) = actor else {
            trace!("no actor, own_data");
            return DataScope::OwnData;
        };
        if let Some(scope) = self.bypass.bypass_scope(actor.role) {
            trace!(actor = %actor.id, role = %actor.role, scope = %scope, "bypass scope");
            return scope;
        }
        if let Some(scope) = actor.permissions.as_ref().and_then(|o| o.scope) {
            trace!(actor = %actor.id, scope = %scope, "override scope");
            return scope;
        }
        let scope = self.registry.preset(actor.role).scope;
        trace!(actor = %actor.id, role = %actor.role, scope = %scope, "preset scope");
        scope
    }
}

impl Default for AccessEngine {
    fn default() -> Self {
        AccessEngine::new()
    }
}
