//! # Ledger store interface contracts.
//!
//! This module defines the behaviour a storage backend must expose in order to act as the ledger
//! store for the payment engine.
//!
//! * [`LedgerDatabase`] defines the write path: the atomic payment and deposit operations, and
//!   record creation. Every write happens inside a single store transaction that is committed or
//!   rolled back as one unit.
//! * [`LedgerManagement`] provides the read-only queries: profile and contract lookups, the
//!   unpaid-job listing and the reporting aggregations. These run against committed state only.
mod ledger_database;
mod ledger_management;

pub use ledger_database::{ErrorKind, LedgerDatabase, LedgerError};
pub use ledger_management::LedgerManagement;
