use sqlx::SqliteConnection;

use crate::{
    db_types::{Contract, ContractStatus, NewContract},
    traits::LedgerError,
};

pub async fn insert_contract(contract: NewContract, conn: &mut SqliteConnection) -> Result<Contract, LedgerError> {
    let contract = sqlx::query_as(
        r#"
            INSERT INTO contracts (terms, status, client_id, contractor_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(contract.terms)
    .bind(contract.status)
    .bind(contract.client_id)
    .bind(contract.contractor_id)
    .fetch_one(conn)
    .await?;
    Ok(contract)
}

pub async fn fetch_contract(contract_id: i64, conn: &mut SqliteConnection) -> Result<Option<Contract>, LedgerError> {
    let contract =
        sqlx::query_as("SELECT * FROM contracts WHERE id = $1").bind(contract_id).fetch_optional(conn).await?;
    Ok(contract)
}

/// The contract with the given id, but only if the profile is one of its parties.
pub async fn contract_for_profile(
    contract_id: i64,
    profile_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Contract>, LedgerError> {
    let contract = sqlx::query_as(
        r#"
            SELECT * FROM contracts
            WHERE id = $1 AND (client_id = $2 OR contractor_id = $2)
        "#,
    )
    .bind(contract_id)
    .bind(profile_id)
    .fetch_optional(conn)
    .await?;
    Ok(contract)
}

/// Non-terminated contracts where the profile is either party, oldest first.
pub async fn contracts_for_profile(
    profile_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Contract>, LedgerError> {
    let contracts = sqlx::query_as(
        r#"
            SELECT * FROM contracts
            WHERE (client_id = $1 OR contractor_id = $1) AND status <> $2
            ORDER BY created_at ASC
        "#,
    )
    .bind(profile_id)
    .bind(ContractStatus::Terminated)
    .fetch_all(conn)
    .await?;
    Ok(contracts)
}
