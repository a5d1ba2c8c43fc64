//! The payment engine public API.
//!
//! Thin, backend-generic wrappers around the ledger store traits. A caller composes a concrete
//! backend (e.g. [`crate::SqliteDatabase`]) into the API structs it needs; the wrappers own no
//! state of their own beyond the injected store handle.
pub mod ledger_objects;
mod profile_api;
mod reporting_api;
mod transfer_api;

pub use profile_api::ProfileApi;
pub use reporting_api::{ReportingApi, DEFAULT_BEST_CLIENTS_LIMIT};
pub use transfer_api::TransferApi;
