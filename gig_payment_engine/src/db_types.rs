use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use gig_common::Cents;
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------    ProfileType      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    /// Commissions contracts and pays for jobs.
    Client,
    /// Performs jobs and is paid for them.
    Contractor,
}

impl Display for ProfileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileType::Client => write!(f, "client"),
            ProfileType::Contractor => write!(f, "contractor"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid value: {0}")]
pub struct ConversionError(String);

impl FromStr for ProfileType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "contractor" => Ok(Self::Contractor),
            s => Err(ConversionError(format!("Invalid profile type: {s}"))),
        }
    }
}

//--------------------------------------      Profile        ---------------------------------------------------------
/// An account holding a monetary balance, typed client or contractor.
///
/// The balance is only ever mutated by the deposit and payment operations, inside a store
/// transaction, and never goes negative in any committed state.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub profession: String,
    pub balance: Cents,
    pub profile_type: ProfileType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_client(&self) -> bool {
        self.profile_type == ProfileType::Client
    }
}

//--------------------------------------     NewProfile      ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub profession: String,
    pub profile_type: ProfileType,
    /// Opening balance. Zero unless explicitly set.
    pub balance: Cents,
}

impl NewProfile {
    pub fn client<S: Into<String>>(first_name: S, last_name: S, profession: S) -> Self {
        Self::new(first_name, last_name, profession, ProfileType::Client)
    }

    pub fn contractor<S: Into<String>>(first_name: S, last_name: S, profession: S) -> Self {
        Self::new(first_name, last_name, profession, ProfileType::Contractor)
    }

    fn new<S: Into<String>>(first_name: S, last_name: S, profession: S, profile_type: ProfileType) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            profession: profession.into(),
            profile_type,
            balance: Cents::default(),
        }
    }

    pub fn with_balance(mut self, balance: Cents) -> Self {
        self.balance = balance;
        self
    }
}

//--------------------------------------   ContractStatus    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// The contract has been created but work has not started.
    New,
    /// Work is underway. Only contracts in this state take part in payment activity.
    InProgress,
    /// The contract has ended.
    Terminated,
}

impl Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractStatus::New => write!(f, "new"),
            ContractStatus::InProgress => write!(f, "in_progress"),
            ContractStatus::Terminated => write!(f, "terminated"),
        }
    }
}

impl FromStr for ContractStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "terminated" => Ok(Self::Terminated),
            s => Err(ConversionError(format!("Invalid contract status: {s}"))),
        }
    }
}

impl From<String> for ContractStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid contract status: {value}. But this conversion cannot fail. Defaulting to new");
            ContractStatus::New
        })
    }
}

//--------------------------------------      Contract       ---------------------------------------------------------
/// An agreement between a client and a contractor profile, with a lifecycle status.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub terms: String,
    pub status: ContractStatus,
    pub client_id: i64,
    pub contractor_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    /// Whether the given profile is one of the two parties to this contract.
    pub fn is_party(&self, profile_id: i64) -> bool {
        self.client_id == profile_id || self.contractor_id == profile_id
    }
}

//--------------------------------------    NewContract      ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewContract {
    pub terms: String,
    pub status: ContractStatus,
    pub client_id: i64,
    pub contractor_id: i64,
}

impl NewContract {
    pub fn new<S: Into<String>>(terms: S, client_id: i64, contractor_id: i64) -> Self {
        Self { terms: terms.into(), status: ContractStatus::New, client_id, contractor_id }
    }

    pub fn with_status(mut self, status: ContractStatus) -> Self {
        self.status = status;
        self
    }
}

//--------------------------------------        Job          ---------------------------------------------------------
/// A unit of billable work under a contract.
///
/// `paid` transitions from false to true at most once; `payment_date` is set in the same commit
/// and never changes afterwards.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub contract_id: i64,
    pub description: String,
    pub price: Cents,
    pub paid: bool,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewJob         ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewJob {
    pub contract_id: i64,
    pub description: String,
    pub price: Cents,
}

impl NewJob {
    pub fn new<S: Into<String>>(contract_id: i64, description: S, price: Cents) -> Self {
        Self { contract_id, description: description.into(), price }
    }
}
