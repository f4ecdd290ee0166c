//! Scopegate - Role and scope based authorization for multi-tenant platforms
//!
//! A pure decision engine: given an actor snapshot, resolve page/action
//! permissions and the breadth of data the actor may query. Role presets,
//! per-user overrides and an unconditional bypass for the top roles are
//! combined by a fixed precedence chain that always fails closed. No I/O,
//! no shared mutable state; every decision is a function of its inputs.

pub mod actor;
pub mod bypass;
pub mod engine;
pub mod error;
pub mod perm;
pub mod preset;
pub mod role;
pub mod scope;

pub use actor::{Actor, UserPermissionOverrides};
pub use bypass::BypassPolicy;
pub use engine::AccessEngine;
pub use error::{ParseError, Result};
pub use perm::{Permission, PermissionSet};
pub use preset::{PermissionPreset, PresetRegistry};
pub use role::Role;
pub use scope::{DataScope, ScopeFilter};
