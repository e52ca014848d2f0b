//! SQLite-backed [`MetricsStore`].
//!
//! Timestamps go through sqlx's chrono encoding (RFC 3339 text, UTC offset),
//! which orders lexicographically in time order, so range predicates compare
//! the stored text directly.

use crate::models::{
    Category, Component, ComponentSalesRow, DatedAmount, PeriodAggregate, Purchase, PurchaseStatus,
    RecentSaleRow, User, UserSignup,
};
use crate::store::MetricsStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashstats_common::{DashError, DateRange, Result};
use dashstats_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Database schema version for migrations
const SCHEMA_VERSION: i32 = 1;

/// URL of a private in-memory database.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Dashboard store over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

impl SqliteStore {
    /// Opens a pool per `config`, creating the database file if missing and
    /// the schema when `create_schema` is set.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to dashboard database: {}", config.url);

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| {
                DashError::database_with_source(format!("Invalid database URL: {}", config.url), e)
            })?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds));

        // Each in-memory connection is its own database; keep exactly one alive.
        pool_options = if is_memory_url(&config.url) {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            DashError::database_with_source(format!("Failed to connect to database: {}", config.url), e)
        })?;

        let store = Self { pool };
        if config.create_schema {
            store.initialize_schema().await?;
        }
        Ok(store)
    }

    /// Fresh in-memory database with the schema in place.
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig {
            url: IN_MEMORY_URL.to_string(),
            create_schema: true,
            ..DatabaseConfig::default()
        })
        .await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates tables and indexes that do not exist yet. Safe to run repeatedly.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        let current_version: Option<i32> =
            sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        match current_version {
            Some(version) if version >= SCHEMA_VERSION => {
                debug!("Database schema is up to date (version {})", version);
                return Ok(());
            }
            Some(version) => {
                info!("Upgrading database schema from version {} to {}", version, SCHEMA_VERSION);
            }
            None => {
                info!("Creating initial database schema (version {})", SCHEMA_VERSION);
            }
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS components (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category_id TEXT,
                is_featured BOOLEAN NOT NULL DEFAULT 0,
                is_ai BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL,
                FOREIGN KEY (category_id) REFERENCES categories (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                image TEXT,
                last_login DATETIME,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS purchases (
                id TEXT PRIMARY KEY,
                amount REAL NOT NULL,
                date DATETIME NOT NULL,
                status TEXT NOT NULL,
                user_id TEXT NOT NULL,
                component_id TEXT,
                FOREIGN KEY (user_id) REFERENCES users (id),
                FOREIGN KEY (component_id) REFERENCES components (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_purchases_date ON purchases(date)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_purchases_status_date ON purchases(status, date)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_purchases_component_id ON purchases(component_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_last_login ON users(last_login)")
            .execute(&self.pool)
            .await?;

        sqlx::query("INSERT OR REPLACE INTO schema_version (version) VALUES (?)")
            .bind(SCHEMA_VERSION)
            .execute(&self.pool)
            .await?;

        info!("Database schema initialized successfully");
        Ok(())
    }

    pub async fn insert_category(&self, category: &Category) -> Result<()> {
        sqlx::query("INSERT INTO categories (id, name) VALUES (?, ?)")
            .bind(&category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await?;

        debug!("Saved category: {} ({})", category.name, category.id);
        Ok(())
    }

    pub async fn insert_component(&self, component: &Component) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO components (id, name, category_id, is_featured, is_ai, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&component.id)
        .bind(&component.name)
        .bind(&component.category_id)
        .bind(component.is_featured)
        .bind(component.is_ai)
        .bind(component.created_at)
        .execute(&self.pool)
        .await?;

        debug!("Saved component: {} ({})", component.name, component.id);
        Ok(())
    }

    pub async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, image, last_login, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image)
        .bind(user.last_login)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        debug!("Saved user: {}", user.id);
        Ok(())
    }

    pub async fn insert_purchase(&self, purchase: &Purchase) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO purchases (id, amount, date, status, user_id, component_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&purchase.id)
        .bind(purchase.amount)
        .bind(purchase.date)
        .bind(purchase.status.as_str())
        .bind(&purchase.user_id)
        .bind(&purchase.component_id)
        .execute(&self.pool)
        .await?;

        debug!("Saved purchase: {} ({})", purchase.id, purchase.status);
        Ok(())
    }
}

fn period_aggregate(row: &SqliteRow) -> Result<PeriodAggregate> {
    Ok(PeriodAggregate {
        revenue_sum: row.try_get("revenue_sum")?,
        transaction_count: count(row.try_get("transaction_count")?),
    })
}

#[async_trait]
impl MetricsStore for SqliteStore {
    async fn successful_purchase_totals(&self, range: Option<DateRange>) -> Result<PeriodAggregate> {
        let row = match range {
            Some(range) => {
                sqlx::query(
                    r#"
                    SELECT COALESCE(SUM(amount), 0.0) AS revenue_sum, COUNT(*) AS transaction_count
                    FROM purchases
                    WHERE status = 'SUCCESS' AND date >= ? AND date < ?
                    "#,
                )
                .bind(range.start)
                .bind(range.end)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT COALESCE(SUM(amount), 0.0) AS revenue_sum, COUNT(*) AS transaction_count
                    FROM purchases
                    WHERE status = 'SUCCESS'
                    "#,
                )
                .fetch_one(&self.pool)
                .await?
            }
        };

        period_aggregate(&row)
    }

    async fn count_active_users(&self, range: DateRange) -> Result<u64> {
        let active: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE last_login >= ? AND last_login < ?")
                .bind(range.start)
                .bind(range.end)
                .fetch_one(&self.pool)
                .await?;
        Ok(count(active))
    }

    async fn count_components(&self) -> Result<u64> {
        let components: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM components")
            .fetch_one(&self.pool)
            .await?;
        Ok(count(components))
    }

    async fn successful_purchases_between(&self, range: DateRange) -> Result<Vec<DatedAmount>> {
        let rows = sqlx::query(
            r#"
            SELECT amount, date
            FROM purchases
            WHERE status = 'SUCCESS' AND date >= ? AND date < ?
            ORDER BY date
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<DatedAmount> {
                Ok(DatedAmount {
                    amount: row.try_get("amount")?,
                    date: row.try_get("date")?,
                })
            })
            .collect()
    }

    async fn users_created_between(&self, range: DateRange) -> Result<Vec<UserSignup>> {
        let rows = sqlx::query(
            r#"
            SELECT id, created_at
            FROM users
            WHERE created_at >= ? AND created_at < ?
            ORDER BY created_at, id
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<UserSignup> {
                Ok(UserSignup {
                    id: row.try_get("id")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    async fn count_users_created_before(&self, end: DateTime<Utc>) -> Result<u64> {
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at < ?")
            .bind(end)
            .fetch_one(&self.pool)
            .await?;
        Ok(count(users))
    }

    async fn recent_component_purchases(&self, limit: usize) -> Result<Vec<RecentSaleRow>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        // No status filter: pending and failed purchases are listed too.
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.amount, p.date, p.status,
                   u.name AS customer_name, u.email AS customer_email, u.image AS customer_image,
                   c.name AS component_name
            FROM purchases p
            JOIN users u ON u.id = p.user_id
            LEFT JOIN components c ON c.id = p.component_id
            WHERE p.component_id IS NOT NULL AND p.amount > 0
            ORDER BY p.date DESC, p.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let sales = rows
            .iter()
            .map(|row| -> Result<RecentSaleRow> {
                let status: String = row.try_get("status")?;
                Ok(RecentSaleRow {
                    id: row.try_get("id")?,
                    amount: row.try_get("amount")?,
                    date: row.try_get("date")?,
                    status: PurchaseStatus::from_db(&status),
                    customer_name: row.try_get("customer_name")?,
                    customer_email: row.try_get("customer_email")?,
                    customer_image: row.try_get("customer_image")?,
                    component_name: row.try_get("component_name")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} recent component purchases", sales.len());
        Ok(sales)
    }

    async fn component_sales(&self) -> Result<Vec<ComponentSalesRow>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, cat.name AS category, c.is_featured, c.is_ai, c.created_at,
                   COUNT(p.id) AS sales,
                   COALESCE(SUM(p.amount), 0.0) AS revenue
            FROM components c
            LEFT JOIN categories cat ON cat.id = c.category_id
            LEFT JOIN purchases p
                   ON p.component_id = c.id AND p.status = 'SUCCESS' AND p.amount > 0
            GROUP BY c.id, c.name, cat.name, c.is_featured, c.is_ai, c.created_at
            ORDER BY c.created_at, c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let components = rows
            .iter()
            .map(|row| -> Result<ComponentSalesRow> {
                Ok(ComponentSalesRow {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    category: row.try_get("category")?,
                    is_featured: row.try_get("is_featured")?,
                    is_ai: row.try_get("is_ai")?,
                    created_at: row.try_get("created_at")?,
                    sales: count(row.try_get("sales")?),
                    revenue: row.try_get("revenue")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Rolled up sales for {} components", components.len());
        Ok(components)
    }
}
