//! Well-known role name constants.
//!
//! These are the natural keys of the baseline `roles` rows.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERVISOR: &str = "supervisor";
pub const ROLE_HEALTH_WORKER: &str = "health_worker";

/// A baseline role and its human-readable description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// The three roles every store must carry, in insertion order.
pub const BASELINE_ROLES: [RoleSpec; 3] = [
    RoleSpec {
        name: ROLE_ADMIN,
        description: "Full access to configuration, accounts and reference data",
    },
    RoleSpec {
        name: ROLE_SUPERVISOR,
        description: "Reviews screenings and follow-ups for a catchment area",
    },
    RoleSpec {
        name: ROLE_HEALTH_WORKER,
        description: "Registers patients and records MUAC measurements",
    },
];
