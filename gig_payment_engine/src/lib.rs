//! Gig Payment Engine
//!
//! The ledger core of a contractor marketplace: profiles (clients and contractors) hold cash
//! balances, clients commission contracts, contracts contain priced jobs, and clients pay for
//! completed jobs, moving funds from client to contractor. This library contains the payment and
//! deposit engine, the deposit-limit enforcement, and the read-side reporting aggregations.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You
//!    should never need to access the database directly. Instead, use the public API provided by
//!    the payment engine. The exception is the data types used in the database. These are
//!    defined in the `db_types` module and are public.
//! 2. The payment engine public API ([`mod@api`]): [`TransferApi`] for the atomic pay/deposit
//!    operations, [`ProfileApi`] for profile and contract lookups, and [`ReportingApi`] for the
//!    date-windowed aggregations. Backends implement the traits in [`mod@traits`] in order to
//!    serve these APIs.
//!
//! Correctness under concurrency rests entirely on the store's transaction manager: every write
//! operation is one transaction, the decisive updates are guarded by state predicates, and no
//! in-process locking exists anywhere in the engine.
mod api;
pub mod db_types;
mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use api::{
    ledger_objects,
    ProfileApi,
    ReportingApi,
    TransferApi,
    DEFAULT_BEST_CLIENTS_LIMIT,
};
pub use traits::{ErrorKind, LedgerDatabase, LedgerError, LedgerManagement};
