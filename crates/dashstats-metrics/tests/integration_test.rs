//! End-to-end report tests against an in-memory SQLite store.

use chrono::{DateTime, Duration, Utc};
use dashstats_common::test_utils::{init_test_logging, mock_timestamp};
use dashstats_common::{CategoryId, ComponentId, PurchaseId, UserId};
use dashstats_config::DashboardConfig;
use dashstats_metrics::{
    Category, Component, DashboardService, Purchase, PurchaseStatus, SqliteStore, Trend, User,
};

struct Fixture {
    store: SqliteStore,
    next_purchase: usize,
}

impl Fixture {
    async fn new() -> Self {
        init_test_logging();
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .insert_category(&Category {
                id: CategoryId::from("cat_forms"),
                name: "Forms".to_string(),
            })
            .await
            .unwrap();
        Self {
            store,
            next_purchase: 0,
        }
    }

    async fn user(&self, id: &str, created_at: DateTime<Utc>, last_login: Option<DateTime<Utc>>) {
        self.store
            .insert_user(&User {
                id: UserId::from(id),
                name: format!("User {id}"),
                email: format!("{id}@email.com"),
                image: None,
                last_login,
                created_at,
            })
            .await
            .unwrap();
    }

    async fn component(&self, id: &str, category: Option<&str>, created_at: DateTime<Utc>) {
        self.store
            .insert_component(&Component {
                id: ComponentId::from(id),
                name: format!("Component {id}"),
                category_id: category.map(CategoryId::from),
                is_featured: false,
                is_ai: id.ends_with("ai"),
                created_at,
            })
            .await
            .unwrap();
    }

    async fn purchase(
        &mut self,
        user: &str,
        component: Option<&str>,
        amount: f64,
        date: DateTime<Utc>,
        status: PurchaseStatus,
    ) {
        self.next_purchase += 1;
        self.store
            .insert_purchase(&Purchase {
                id: PurchaseId::from(format!("p{:03}", self.next_purchase)),
                amount,
                date,
                status,
                user_id: UserId::from(user),
                component_id: component.map(ComponentId::from),
            })
            .await
            .unwrap();
    }

    fn service(self) -> DashboardService<SqliteStore> {
        DashboardService::new(self.store, DashboardConfig::default())
    }
}

#[tokio::test]
async fn test_january_sales_ignore_failed_purchases() {
    let mut fx = Fixture::new().await;
    fx.user("u1", mock_timestamp(2023, 12, 1, 0, 0, 0), None).await;
    fx.purchase("u1", None, 100.0, mock_timestamp(2024, 1, 3, 9, 0, 0), PurchaseStatus::Success)
        .await;
    fx.purchase("u1", None, 50.0, mock_timestamp(2024, 1, 31, 23, 59, 59), PurchaseStatus::Success)
        .await;
    fx.purchase("u1", None, 999.0, mock_timestamp(2024, 1, 15, 12, 0, 0), PurchaseStatus::Failed)
        .await;
    // Outside the year on both sides.
    fx.purchase("u1", None, 10.0, mock_timestamp(2023, 12, 31, 23, 59, 59), PurchaseStatus::Success)
        .await;
    fx.purchase("u1", None, 10.0, mock_timestamp(2025, 1, 1, 0, 0, 0), PurchaseStatus::Success)
        .await;

    let series = fx.service().sales_by_year(2024).await.unwrap();

    assert_eq!(series.len(), 12);
    assert_eq!(series[0].name, "Jan");
    assert_eq!(series[0].revenue, 150.0);
    assert_eq!(series[0].transactions, 2);
    assert!(series[1..].iter().all(|p| p.revenue == 0.0 && p.transactions == 0));
}

#[tokio::test]
async fn test_empty_year_is_twelve_zero_months() {
    let fx = Fixture::new().await;
    let series = fx.service().sales_by_year(1999).await.unwrap();

    let names: Vec<&str> = series.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
    );
    assert!(series.iter().all(|p| p.revenue == 0.0 && p.transactions == 0));
}

#[tokio::test]
async fn test_user_growth_is_cumulative_across_years() {
    let fx = Fixture::new().await;
    fx.user("old", mock_timestamp(2022, 5, 1, 0, 0, 0), None).await;
    fx.user("jan_early", mock_timestamp(2024, 1, 2, 0, 0, 0), None).await;
    fx.user("jan_late", mock_timestamp(2024, 1, 28, 10, 0, 0), None).await;
    fx.user("apr_late", mock_timestamp(2024, 4, 30, 23, 0, 0), None).await;
    fx.user("next_year", mock_timestamp(2025, 1, 30, 0, 0, 0), None).await;

    let growth = fx.service().user_growth_by_year(2024).await.unwrap();

    assert_eq!(growth.len(), 12);
    assert_eq!(growth[0].users, 3);
    assert_eq!(growth[0].new_users, 1);
    assert_eq!(growth[2].users, 3);
    assert_eq!(growth[3].users, 4);
    assert_eq!(growth[3].new_users, 1);
    assert_eq!(growth[11].users, 4);
    assert!(growth.windows(2).all(|w| w[0].users <= w[1].users));
}

#[tokio::test]
async fn test_recent_sales_lists_any_status_with_component() {
    let mut fx = Fixture::new().await;
    fx.user("u1", mock_timestamp(2024, 1, 1, 0, 0, 0), None).await;
    fx.component("cmp_a", Some("cat_forms"), mock_timestamp(2024, 1, 1, 0, 0, 0))
        .await;
    fx.purchase("u1", Some("cmp_a"), 20.0, mock_timestamp(2024, 3, 1, 0, 0, 0), PurchaseStatus::Success)
        .await;
    fx.purchase("u1", Some("cmp_a"), 20.0, mock_timestamp(2024, 3, 5, 0, 0, 0), PurchaseStatus::Failed)
        .await;
    fx.purchase("u1", Some("cmp_a"), 20.0, mock_timestamp(2024, 3, 3, 0, 0, 0), PurchaseStatus::Pending)
        .await;
    // Excluded: bundle purchase and a zero amount.
    fx.purchase("u1", None, 80.0, mock_timestamp(2024, 3, 9, 0, 0, 0), PurchaseStatus::Success)
        .await;
    fx.purchase("u1", Some("cmp_a"), 0.0, mock_timestamp(2024, 3, 8, 0, 0, 0), PurchaseStatus::Success)
        .await;

    let service = fx.service();
    let sales = service.recent_sales(None).await.unwrap();

    assert_eq!(sales.len(), 3);
    assert!(sales.windows(2).all(|w| w[0].date >= w[1].date));
    assert!(sales.iter().all(|s| s.amount > 0.0));
    assert!(sales.iter().all(|s| s.component.as_deref() == Some("Component cmp_a")));
    assert_eq!(sales[0].status, PurchaseStatus::Failed);
    assert_eq!(sales[0].customer.email, "u1@email.com");

    assert_eq!(service.recent_sales(Some(2)).await.unwrap().len(), 2);
    assert!(service.recent_sales(Some(0)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_popular_components_ranked_in_one_query() {
    let mut fx = Fixture::new().await;
    let now = mock_timestamp(2024, 6, 30, 12, 0, 0);
    fx.user("u1", mock_timestamp(2024, 1, 1, 0, 0, 0), None).await;
    fx.component("cmp_old", Some("cat_forms"), mock_timestamp(2023, 1, 1, 0, 0, 0))
        .await;
    fx.component("cmp_new_ai", None, mock_timestamp(2024, 6, 20, 0, 0, 0))
        .await;
    fx.component("cmp_unsold", Some("cat_forms"), mock_timestamp(2024, 2, 1, 0, 0, 0))
        .await;

    for day in 1..=3 {
        fx.purchase("u1", Some("cmp_new_ai"), 12.5, mock_timestamp(2024, 6, day, 0, 0, 0), PurchaseStatus::Success)
            .await;
    }
    fx.purchase("u1", Some("cmp_old"), 40.0, mock_timestamp(2024, 6, 4, 0, 0, 0), PurchaseStatus::Success)
        .await;
    fx.purchase("u1", Some("cmp_old"), 40.0, mock_timestamp(2024, 6, 5, 0, 0, 0), PurchaseStatus::Failed)
        .await;

    let ranked = fx.service().popular_components_at(Some(5), now).await.unwrap();

    let ids: Vec<&str> = ranked.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["cmp_new_ai", "cmp_old", "cmp_unsold"]);

    assert_eq!(ranked[0].sales, 3);
    assert_eq!(ranked[0].revenue, 37.5);
    assert_eq!(ranked[0].category, "Uncategorized");
    assert!(ranked[0].is_new);
    assert!(ranked[0].is_ai);

    assert_eq!(ranked[1].sales, 1);
    assert_eq!(ranked[1].revenue, 40.0);
    assert_eq!(ranked[1].category, "Forms");
    assert!(!ranked[1].is_new);

    assert_eq!(ranked[2].sales, 0);
    assert_eq!(ranked[2].revenue, 0.0);
}

#[tokio::test]
async fn test_dashboard_summary_against_store() {
    let mut fx = Fixture::new().await;
    let now = mock_timestamp(2024, 3, 15, 12, 0, 0);
    fx.user("u1", mock_timestamp(2023, 6, 1, 0, 0, 0), Some(mock_timestamp(2024, 3, 14, 8, 0, 0)))
        .await;
    fx.user("u2", mock_timestamp(2023, 6, 2, 0, 0, 0), Some(mock_timestamp(2024, 3, 1, 0, 0, 0)))
        .await;
    fx.user("u3", mock_timestamp(2023, 6, 3, 0, 0, 0), Some(mock_timestamp(2024, 2, 29, 23, 59, 59)))
        .await;
    fx.component("cmp_a", Some("cat_forms"), mock_timestamp(2023, 1, 1, 0, 0, 0))
        .await;

    fx.purchase("u1", Some("cmp_a"), 120.0, mock_timestamp(2024, 3, 2, 0, 0, 0), PurchaseStatus::Success)
        .await;
    fx.purchase("u2", Some("cmp_a"), 100.0, mock_timestamp(2024, 2, 10, 0, 0, 0), PurchaseStatus::Success)
        .await;
    fx.purchase("u2", None, 1000.0, mock_timestamp(2023, 7, 10, 0, 0, 0), PurchaseStatus::Success)
        .await;
    fx.purchase("u3", Some("cmp_a"), 500.0, mock_timestamp(2024, 3, 3, 0, 0, 0), PurchaseStatus::Failed)
        .await;

    let stats = fx.service().dashboard_stats_at(now).await.unwrap();

    assert_eq!(stats.len(), 4);
    assert_eq!(stats[0].title, "Total Revenue");
    assert_eq!(stats[0].value, "$1,220.00");
    assert_eq!(stats[0].change, "20.0%");
    assert_eq!(stats[0].trend, Trend::Up);

    assert_eq!(stats[1].value, "1");

    assert_eq!(stats[2].value, "+3");
    assert_eq!(stats[2].change, "0.0%");

    assert_eq!(stats[3].value, "+2");
    assert_eq!(stats[3].change, "100.0%");
}

#[tokio::test]
async fn test_sub_millisecond_month_end_purchases_are_counted() {
    let mut fx = Fixture::new().await;
    let last_instant = Duration::microseconds(999_500);
    fx.user("u1", mock_timestamp(2024, 1, 1, 0, 0, 0), None).await;
    fx.purchase(
        "u1",
        None,
        100.0,
        mock_timestamp(2024, 12, 31, 23, 59, 59) + last_instant,
        PurchaseStatus::Success,
    )
    .await;
    fx.purchase(
        "u1",
        None,
        100.0,
        mock_timestamp(2025, 1, 31, 23, 59, 59) + last_instant,
        PurchaseStatus::Success,
    )
    .await;

    let service = fx.service();
    let series = service.sales_by_year(2024).await.unwrap();
    assert_eq!(series[11].revenue, 100.0);
    assert_eq!(series[11].transactions, 1);

    let stats = service
        .dashboard_stats_at(mock_timestamp(2025, 2, 10, 12, 0, 0))
        .await
        .unwrap();
    assert_eq!(stats[0].value, "$200.00");
    assert_eq!(stats[0].change, "-100.0%");
    assert_eq!(stats[0].trend, Trend::Down);
}

#[tokio::test]
async fn test_reports_are_repeatable() {
    let mut fx = Fixture::new().await;
    fx.user("u1", mock_timestamp(2024, 1, 1, 0, 0, 0), None).await;
    fx.purchase("u1", None, 33.33, mock_timestamp(2024, 5, 5, 0, 0, 0), PurchaseStatus::Success)
        .await;

    let service = fx.service();
    let first = service.sales_by_year(2024).await.unwrap();
    let second = service.sales_by_year(2024).await.unwrap();
    assert_eq!(first, second);
}
