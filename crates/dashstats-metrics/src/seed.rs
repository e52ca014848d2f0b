//! Small demo data set, dated relative to a reference time so every report
//! has something to show.

use crate::models::{Category, Component, Purchase, PurchaseStatus, User};
use crate::sqlite::SqliteStore;
use chrono::{DateTime, Duration, Utc};
use dashstats_common::{CategoryId, ComponentId, PurchaseId, Result, UserId};
use serde::Serialize;
use tracing::info;

/// Rows written by [`seed_demo_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub categories: usize,
    pub components: usize,
    pub users: usize,
    pub purchases: usize,
}

const CATEGORIES: [&str; 3] = ["Marketing", "Forms", "Navigation"];

// (name, category index, featured, ai, age in days)
const COMPONENTS: [(&str, Option<usize>, bool, bool, i64); 5] = [
    ("Animated Hero", Some(0), true, true, 90),
    ("Pricing Table", Some(0), true, false, 200),
    ("Signup Form", Some(1), false, false, 45),
    ("Command Menu", Some(2), false, true, 6),
    ("Mega Footer", None, false, false, 12),
];

// (name, email, signed up days ago, last login days ago)
const USERS: [(&str, &str, i64, Option<i64>); 5] = [
    ("Olivia Martin", "olivia.martin@email.com", 400, Some(1)),
    ("Jackson Lee", "jackson.lee@email.com", 120, Some(3)),
    ("Isabella Nguyen", "isabella.nguyen@email.com", 60, Some(35)),
    ("William Kim", "will@email.com", 20, None),
    ("Sofia Davis", "sofia.davis@email.com", 2, Some(0)),
];

// (user index, component index, amount, days ago, status)
const PURCHASES: [(usize, Option<usize>, f64, i64, PurchaseStatus); 12] = [
    (0, Some(0), 49.0, 1, PurchaseStatus::Success),
    (1, Some(0), 49.0, 4, PurchaseStatus::Success),
    (4, Some(3), 29.0, 0, PurchaseStatus::Pending),
    (2, Some(1), 99.0, 33, PurchaseStatus::Success),
    (0, Some(1), 99.0, 40, PurchaseStatus::Success),
    (3, Some(2), 19.0, 10, PurchaseStatus::Failed),
    (1, Some(2), 19.0, 15, PurchaseStatus::Success),
    (2, Some(4), 39.0, 70, PurchaseStatus::Success),
    (0, None, 249.0, 50, PurchaseStatus::Success),
    (4, Some(3), 29.0, 1, PurchaseStatus::Success),
    (3, Some(0), 0.0, 2, PurchaseStatus::Success),
    (1, Some(1), 99.0, 120, PurchaseStatus::Success),
];

/// Inserts the demo catalog, customers and purchases with timestamps counted
/// back from `now`. Ids are freshly generated on every call.
pub async fn seed_demo_data(store: &SqliteStore, now: DateTime<Utc>) -> Result<SeedReport> {
    let days_ago = |days: i64| now - Duration::days(days);

    let categories: Vec<Category> = CATEGORIES
        .iter()
        .map(|name| Category {
            id: CategoryId::generate(),
            name: (*name).to_string(),
        })
        .collect();
    for category in &categories {
        store.insert_category(category).await?;
    }

    let components: Vec<Component> = COMPONENTS
        .iter()
        .map(|&(name, category, is_featured, is_ai, age)| Component {
            id: ComponentId::generate(),
            name: name.to_string(),
            category_id: category.map(|index| categories[index].id.clone()),
            is_featured,
            is_ai,
            created_at: days_ago(age),
        })
        .collect();
    for component in &components {
        store.insert_component(component).await?;
    }

    let users: Vec<User> = USERS
        .iter()
        .map(|&(name, email, signed_up, last_login)| User {
            id: UserId::generate(),
            name: name.to_string(),
            email: email.to_string(),
            image: None,
            last_login: last_login.map(days_ago),
            created_at: days_ago(signed_up),
        })
        .collect();
    for user in &users {
        store.insert_user(user).await?;
    }

    let mut purchases = 0;
    for (user, component, amount, age, status) in PURCHASES.iter().cloned() {
        store
            .insert_purchase(&Purchase {
                id: PurchaseId::generate(),
                amount,
                date: days_ago(age),
                status,
                user_id: users[user].id.clone(),
                component_id: component.map(|index| components[index].id.clone()),
            })
            .await?;
        purchases += 1;
    }

    let report = SeedReport {
        categories: categories.len(),
        components: components.len(),
        users: users.len(),
        purchases,
    };
    info!(?report, "Seeded demo data");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MetricsStore;
    use dashstats_common::test_utils::mock_timestamp;

    #[tokio::test]
    async fn test_seed_populates_every_table() {
        let store = SqliteStore::in_memory().await.unwrap();
        let now = mock_timestamp(2024, 6, 15, 12, 0, 0);

        let report = seed_demo_data(&store, now).await.unwrap();
        assert_eq!(report.components, COMPONENTS.len());
        assert_eq!(report.purchases, PURCHASES.len());

        assert_eq!(store.count_components().await.unwrap(), 5);
        let all_time = store.successful_purchase_totals(None).await.unwrap();
        assert_eq!(all_time.transaction_count, 10);
        assert_eq!(store.component_sales().await.unwrap().len(), 5);
    }
}
