//! One-shot migration of legacy per-user cluster role bindings to the
//! global-role IAM model.
//!
//! The run is strictly sequential: enumerate legacy bindings, resolve each
//! to a global role (mapping well-known roles directly, synthesizing
//! aggregated roles for user-authored custom ones), publish roles then
//! bindings idempotently, and finally retire the legacy bindings.

pub mod catalog;
pub mod globalrolebindings;
pub mod rules;

pub use catalog::MigrationCatalog;
pub use globalrolebindings::GlobalRoleBindingMigration;
