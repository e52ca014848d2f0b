//! Store-bound entry point for the five dashboard reports.

use crate::report::{DashboardStat, PopularComponent, RecentSale, SalesDataPoint, UserGrowthPoint};
use crate::store::MetricsStore;
use crate::{popular, recent_sales, sales, summary, user_growth};
use chrono::{DateTime, Utc};
use dashstats_common::Result;
use dashstats_config::DashboardConfig;
use tracing::{info, instrument};

/// Runs dashboard reports against one store with configured list defaults.
#[derive(Debug, Clone)]
pub struct DashboardService<S> {
    store: S,
    config: DashboardConfig,
}

impl<S: MetricsStore> DashboardService<S> {
    /// Creates a service over `store` using the given report defaults.
    pub fn new(store: S, config: DashboardConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Report defaults in effect.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Summary tiles for the current month.
    pub async fn dashboard_stats(&self) -> Result<Vec<DashboardStat>> {
        self.dashboard_stats_at(Utc::now()).await
    }

    /// Summary tiles for the month containing `now`.
    #[instrument(skip(self))]
    pub async fn dashboard_stats_at(&self, now: DateTime<Utc>) -> Result<Vec<DashboardStat>> {
        let stats = summary::dashboard_stats(&self.store, now).await?;
        info!(tiles = stats.len(), "Dashboard summary produced");
        Ok(stats)
    }

    #[instrument(skip(self))]
    pub async fn sales_by_year(&self, year: i32) -> Result<Vec<SalesDataPoint>> {
        let series = sales::sales_by_year(&self.store, year).await?;
        info!(year, "Sales series produced");
        Ok(series)
    }

    #[instrument(skip(self))]
    pub async fn user_growth_by_year(&self, year: i32) -> Result<Vec<UserGrowthPoint>> {
        let series = user_growth::user_growth_by_year(&self.store, year).await?;
        info!(year, "User growth series produced");
        Ok(series)
    }

    /// Recent sales, `limit` defaulting to `dashboard.recent_sales_limit`.
    #[instrument(skip(self))]
    pub async fn recent_sales(&self, limit: Option<usize>) -> Result<Vec<RecentSale>> {
        let limit = limit.unwrap_or(self.config.recent_sales_limit);
        let sales = recent_sales::recent_sales(&self.store, limit).await?;
        info!(rows = sales.len(), "Recent sales produced");
        Ok(sales)
    }

    /// Popular components as of now.
    pub async fn popular_components(&self, limit: Option<usize>) -> Result<Vec<PopularComponent>> {
        self.popular_components_at(limit, Utc::now()).await
    }

    /// Popular components with `is_new` judged against `now`.
    #[instrument(skip(self))]
    pub async fn popular_components_at(
        &self,
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<Vec<PopularComponent>> {
        let limit = limit.unwrap_or(self.config.popular_components_limit);
        let ranked = popular::popular_components(
            &self.store,
            limit,
            now,
            self.config.new_component_window_days,
        )
        .await?;
        info!(rows = ranked.len(), "Popular components produced");
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentSalesRow;
    use crate::store::MockMetricsStore;
    use dashstats_common::test_utils::mock_timestamp;
    use dashstats_common::ComponentId;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_recent_sales_uses_configured_default() {
        let mut store = MockMetricsStore::new();
        store
            .expect_recent_component_purchases()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(vec![]));
        let config = DashboardConfig {
            recent_sales_limit: 3,
            ..DashboardConfig::default()
        };

        let service = DashboardService::new(store, config);
        assert!(service.recent_sales(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_limit_overrides_default() {
        let mut store = MockMetricsStore::new();
        store
            .expect_recent_component_purchases()
            .with(eq(10))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = DashboardService::new(store, DashboardConfig::default());
        service.recent_sales(Some(10)).await.unwrap();
    }

    #[tokio::test]
    async fn test_popular_uses_configured_window() {
        let mut store = MockMetricsStore::new();
        store.expect_component_sales().returning(|| {
            Ok(vec![ComponentSalesRow {
                id: ComponentId::from("cmp"),
                name: "Navbar".to_string(),
                category: None,
                is_featured: true,
                is_ai: false,
                created_at: mock_timestamp(2024, 5, 20, 0, 0, 0),
                sales: 1,
                revenue: 29.0,
            }])
        });
        let config = DashboardConfig {
            new_component_window_days: 7,
            ..DashboardConfig::default()
        };

        let service = DashboardService::new(store, config);
        let now = mock_timestamp(2024, 6, 1, 0, 0, 0);
        let ranked = service.popular_components_at(None, now).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert!(!ranked[0].is_new);
    }
}
