//! Pure building blocks for bootstrapping and seeding the MUAC screening store.
//!
//! Nothing in this crate touches a database. The `muac-db` crate drives these
//! pieces against a live connection.

pub mod bands;
pub mod dialect;
pub mod error;
pub mod password;
pub mod reference;
pub mod roles;
pub mod script;
pub mod splitter;
pub mod types;
