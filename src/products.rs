use crate::error::{Error, Result};
use crate::models::Product;
use sqlx::SqlitePool;
use uuid::Uuid;

pub const MAX_PRODUCT_NAME_LEN: usize = 20;

/// Read side of the catalog plus the insert used for seeding.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> Result<Product> {
        if name.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(Error::Validation(format!(
                "product name must be at most {MAX_PRODUCT_NAME_LEN} characters"
            )));
        }

        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (id, name) VALUES (?, ?) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(self.pool)
        .await?;
        Ok(product)
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT id, name FROM products ORDER BY rowid")
            .fetch_all(self.pool)
            .await?;
        Ok(products)
    }
}
