use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::{
    api::ledger_objects::{ClientSpend, ProfessionEarnings},
    traits::LedgerError,
};

/// The single profession with the highest summed price over paid jobs in the window, traversing
/// job → contract → contractor profile. Ties break by profession, ascending.
pub async fn best_profession(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Option<ProfessionEarnings>, LedgerError> {
    let best = sqlx::query_as(
        r#"
            SELECT p.profession AS profession, SUM(j.price) AS total_earned
            FROM jobs j
            INNER JOIN contracts c ON j.contract_id = c.id
            INNER JOIN profiles p ON c.contractor_id = p.id
            WHERE j.paid = 1 AND j.payment_date >= $1 AND j.payment_date <= $2
            GROUP BY p.profession
            ORDER BY total_earned DESC, p.profession ASC
            LIMIT 1
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_optional(conn)
    .await?;
    Ok(best)
}

/// Clients ranked by total paid over paid jobs in the window, descending. Ties break by id,
/// ascending.
pub async fn best_clients(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    limit: u32,
    conn: &mut SqliteConnection,
) -> Result<Vec<ClientSpend>, LedgerError> {
    let clients = sqlx::query_as(
        r#"
            SELECT p.id AS id, p.first_name || ' ' || p.last_name AS full_name, SUM(j.price) AS total_paid
            FROM jobs j
            INNER JOIN contracts c ON j.contract_id = c.id
            INNER JOIN profiles p ON c.client_id = p.id
            WHERE j.paid = 1 AND j.payment_date >= $1 AND j.payment_date <= $2
            GROUP BY p.id
            ORDER BY total_paid DESC, p.id ASC
            LIMIT $3
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(i64::from(limit))
    .fetch_all(conn)
    .await?;
    Ok(clients)
}
