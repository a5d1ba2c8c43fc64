use gig_common::Cents;
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewProfile, Profile, ProfileType},
    traits::LedgerError,
};

pub async fn insert_profile(profile: NewProfile, conn: &mut SqliteConnection) -> Result<Profile, LedgerError> {
    let profile = sqlx::query_as(
        r#"
            INSERT INTO profiles (first_name, last_name, profession, balance, profile_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(profile.first_name)
    .bind(profile.last_name)
    .bind(profile.profession)
    .bind(profile.balance)
    .bind(profile.profile_type)
    .fetch_one(conn)
    .await?;
    Ok(profile)
}

pub async fn fetch_profile(profile_id: i64, conn: &mut SqliteConnection) -> Result<Option<Profile>, LedgerError> {
    let profile =
        sqlx::query_as("SELECT * FROM profiles WHERE id = $1").bind(profile_id).fetch_optional(conn).await?;
    Ok(profile)
}

/// Fetches the profile only if it exists and is a client.
pub async fn fetch_client(profile_id: i64, conn: &mut SqliteConnection) -> Result<Option<Profile>, LedgerError> {
    let client = sqlx::query_as("SELECT * FROM profiles WHERE id = $1 AND profile_type = $2")
        .bind(profile_id)
        .bind(ProfileType::Client)
        .fetch_optional(conn)
        .await?;
    Ok(client)
}

/// Adds `amount` to the profile's balance and returns the new balance.
pub async fn credit_balance(
    profile_id: i64,
    amount: Cents,
    conn: &mut SqliteConnection,
) -> Result<Cents, LedgerError> {
    let balance = sqlx::query_scalar(
        r#"
            UPDATE profiles SET balance = balance + $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2
            RETURNING balance;
        "#,
    )
    .bind(amount)
    .bind(profile_id)
    .fetch_one(conn)
    .await?;
    debug!("🧑️ Credited {amount} to profile #{profile_id}");
    Ok(balance)
}

/// Subtracts `amount` from the profile's balance, guarded so the balance can never go negative.
/// Returns `false` if the balance did not cover the amount (no row was changed).
pub async fn debit_balance(profile_id: i64, amount: Cents, conn: &mut SqliteConnection) -> Result<bool, LedgerError> {
    let result = sqlx::query(
        r#"
            UPDATE profiles SET balance = balance - $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2 AND balance >= $1;
        "#,
    )
    .bind(amount)
    .bind(profile_id)
    .execute(conn)
    .await?;
    let debited = result.rows_affected() == 1;
    if debited {
        debug!("🧑️ Debited {amount} from profile #{profile_id}");
    }
    Ok(debited)
}
