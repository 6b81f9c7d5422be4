//! Append-only `exchange_rates` table in a file-backed SQLite database.
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tokio::time::{Instant, timeout_at};

use crate::error::{QuoteError, Result};
use crate::exchange_rate::ExchangeRate;

/// Budget for the insert, counted from request arrival.
pub const STORE_TIMEOUT: Duration = Duration::from_millis(100);

/// Opens a pool on `database_url`, creating the database file if it is missing.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    Ok(pool)
}

pub async fn create_exchange_rates(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS exchange_rates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL,
            code_in TEXT NOT NULL,
            name TEXT NOT NULL,
            high TEXT NOT NULL,
            low TEXT NOT NULL,
            var_bid TEXT NOT NULL,
            pct_change TEXT NOT NULL,
            bid TEXT NOT NULL,
            ask TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            create_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Inserts one row, abandoning the statement at `deadline`. Returns the new id.
///
/// A deadline that has already passed fails before the statement reaches the
/// database, so nothing is written.
pub async fn insert_exchange_rate(
    pool: &SqlitePool,
    rate: &ExchangeRate,
    deadline: Instant,
) -> Result<i64> {
    if Instant::now() >= deadline {
        return Err(QuoteError::DeadlineExceeded);
    }

    let query = sqlx::query(
        r#"
        INSERT INTO exchange_rates
        (code, code_in, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&rate.code)
    .bind(&rate.code_in)
    .bind(&rate.name)
    .bind(&rate.high)
    .bind(&rate.low)
    .bind(&rate.var_bid)
    .bind(&rate.pct_change)
    .bind(&rate.bid)
    .bind(&rate.ask)
    .bind(&rate.timestamp)
    .bind(&rate.create_date);

    let id = timeout_at(deadline, query.execute(pool))
        .await
        .map_err(|_| QuoteError::DeadlineExceeded)??
        .last_insert_rowid();

    Ok(id)
}

pub async fn count_exchange_rates(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM exchange_rates")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("total"))
}

/// The most recently inserted rate, if any.
pub async fn latest_exchange_rate(pool: &SqlitePool) -> Result<Option<ExchangeRate>> {
    let row = sqlx::query(
        r#"
        SELECT code, code_in, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date
        FROM exchange_rates
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| ExchangeRate {
        code: row.get("code"),
        code_in: row.get("code_in"),
        name: row.get("name"),
        high: row.get("high"),
        low: row.get("low"),
        var_bid: row.get("var_bid"),
        pct_change: row.get("pct_change"),
        bid: row.get("bid"),
        ask: row.get("ask"),
        timestamp: row.get("timestamp"),
        create_date: row.get("create_date"),
    }))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn open() -> (TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("rates.db").display());
        let pool = connect(&url).await.unwrap();
        create_exchange_rates(&pool).await.unwrap();
        (dir, pool)
    }

    fn rate(bid: &str) -> ExchangeRate {
        ExchangeRate {
            code: "USD".into(),
            code_in: "BRL".into(),
            name: "Dólar Americano/Real Brasileiro".into(),
            high: "5.4400".into(),
            low: "5.3900".into(),
            var_bid: "-0.0250".into(),
            pct_change: "-0.46".into(),
            bid: bid.into(),
            ask: "5.4331".into(),
            timestamp: "1715374798".into(),
            create_date: "2024-05-10 17:59:58".into(),
        }
    }

    fn far() -> Instant {
        Instant::now() + Duration::from_secs(5)
    }

    #[tokio::test]
    async fn connect_creates_missing_file() {
        let (dir, _pool) = open().await;
        assert!(dir.path().join("rates.db").exists());
    }

    #[tokio::test]
    async fn table_creation_is_idempotent() {
        let (_dir, pool) = open().await;
        insert_exchange_rate(&pool, &rate("5.10"), far()).await.unwrap();
        create_exchange_rates(&pool).await.unwrap();
        assert_eq!(count_exchange_rates(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn insert_appends_rows_verbatim() {
        let (_dir, pool) = open().await;
        assert_eq!(latest_exchange_rate(&pool).await.unwrap(), None);

        let first = insert_exchange_rate(&pool, &rate("5.4321"), far()).await.unwrap();
        let second = insert_exchange_rate(&pool, &rate("005.43210"), far()).await.unwrap();

        assert!(second > first);
        assert_eq!(count_exchange_rates(&pool).await.unwrap(), 2);
        assert_eq!(latest_exchange_rate(&pool).await.unwrap(), Some(rate("005.43210")));
    }

    #[tokio::test]
    async fn expired_deadline_writes_nothing() {
        let (_dir, pool) = open().await;

        let err = insert_exchange_rate(&pool, &rate("5.10"), Instant::now())
            .await
            .unwrap_err();

        assert!(err.is_deadline());
        assert_eq!(count_exchange_rates(&pool).await.unwrap(), 0);
    }
}
