//! The (user, product) favorites relation.
//!
//! This repository does not know who is calling. Route handlers must check
//! that `user_id` is the authenticated identity before creating or deleting.

use crate::db::{insert_error, is_foreign_key_violation};
use crate::error::{Conflict, Error, Result};
use crate::models::Favorite;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct FavoriteRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoriteRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Favorites of `user_id` in insertion order.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, product_id FROM favorites WHERE user_id = ? ORDER BY rowid",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(favorites)
    }

    /// Fails with `Conflict::Favorite` on a repeated pair and `NotFound` when
    /// the product or the user does not exist.
    pub async fn create(&self, user_id: Uuid, product_id: Uuid) -> Result<Favorite> {
        let inserted = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (id, user_id, product_id)
            VALUES (?, ?, ?)
            RETURNING id, user_id, product_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await;

        let favorite = match inserted {
            Ok(favorite) => favorite,
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(Error::NotFound(
                    self.missing_reference(user_id, product_id).await?,
                ))
            }
            Err(e) => return Err(insert_error(e, Conflict::Favorite)),
        };

        tracing::info!(
            favorite_id = %favorite.id,
            user_id = %user_id,
            product_id = %product_id,
            "Favorite created"
        );
        Ok(favorite)
    }

    /// Names the side of a rejected foreign key. The product is checked
    /// first since it is the caller-supplied one.
    async fn missing_reference(&self, user_id: Uuid, product_id: Uuid) -> Result<&'static str> {
        let product_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?)")
                .bind(product_id)
                .fetch_one(self.pool)
                .await?;
        if !product_exists {
            return Ok("product");
        }

        tracing::warn!(user_id = %user_id, "Favorite rejected for unknown user");
        Ok("user")
    }

    /// Deletes only when the favorite belongs to `user_id`. Missing or
    /// foreign ids are a silent no-op.
    pub async fn destroy(&self, user_id: Uuid, favorite_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(favorite_id)
            .execute(self.pool)
            .await?;

        tracing::debug!(
            favorite_id = %favorite_id,
            user_id = %user_id,
            deleted = result.rows_affected(),
            "Favorite destroy"
        );
        Ok(())
    }
}
