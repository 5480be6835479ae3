//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **credentials**: secrets-file and environment credential resolution
//! - **iam**: AWS SDK backed identity directory
//! - **scratch**: temporary-directory staging for credentials downloads
//!
//! Adapters translate between domain types and infrastructure-specific
//! representations. They contain no provisioning logic.

pub mod credentials;
pub mod iam;
pub mod scratch;
