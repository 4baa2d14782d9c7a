//! Typed objects exchanged with the state store: legacy RBAC inputs and the
//! global-role IAM objects that replace them.

pub mod iam;
pub mod rbac;
