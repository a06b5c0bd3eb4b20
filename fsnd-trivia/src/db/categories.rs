//! Category queries

use crate::models::Category;
use fsnd_common::Result;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::info;

/// Categories created on first start
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// Seed [`DEFAULT_CATEGORIES`] when the table is empty
pub async fn init_default_categories(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for kind in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO categories (type) VALUES (?)")
            .bind(*kind)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
    Ok(())
}

/// All categories ordered by id
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

/// One category by id
pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Shape categories as the `id -> type` mapping clients expect
pub fn category_map(categories: &[Category]) -> BTreeMap<i64, String> {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_map_keys_by_id() {
        let categories = vec![
            Category { id: 2, kind: "Art".to_string() },
            Category { id: 1, kind: "Science".to_string() },
        ];
        let map = category_map(&categories);

        assert_eq!(map.get(&1).map(String::as_str), Some("Science"));
        assert_eq!(map.get(&2).map(String::as_str), Some("Art"));

        // JSON object keys are the ids as strings
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["1"], "Science");
    }
}
