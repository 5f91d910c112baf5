#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod layout_dump;
pub mod permissions;
pub mod roles;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use error::SnapshotError;
pub use graph::{FamilyUnit, Gender, Person, PersonIndex, Snapshot, parse_snapshot};
pub use layout::{EdgeKind, EdgeLayout, Layout, NodeKind, PositionedNode, compute_layout};
pub use permissions::{
    AddKind, Capabilities, GuardViolation, first_guard_violation, resolve_permissions,
    validate_add,
};
pub use roles::{Role, resolve_role};
