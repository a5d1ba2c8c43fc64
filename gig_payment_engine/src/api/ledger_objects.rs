use gig_common::Cents;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db_types::{Contract, Job, Profile};

/// The result of a successful payment: the paid job together with its contract and both parties,
/// as committed. The client and contractor balances reflect the transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaidJob {
    pub job: Job,
    pub contract: Contract,
    pub client: Profile,
    pub contractor: Profile,
}

/// One row of the best-profession aggregation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ProfessionEarnings {
    pub profession: String,
    pub total_earned: Cents,
}

/// One row of the best-clients aggregation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ClientSpend {
    pub id: i64,
    pub full_name: String,
    pub total_paid: Cents,
}
