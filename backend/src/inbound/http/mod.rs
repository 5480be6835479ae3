//! HTTP inbound adapter: the provisioning form, its JSON twin and probes.

pub mod accounts;
pub mod error;
pub mod form;
pub mod health;
pub mod page;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
