//! Locations repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::location::{CreateLocation, Location, LocationQuery, UpdateLocation},
};

use super::page_bounds;

#[derive(Clone)]
pub struct LocationsRepository {
    pool: Pool<Postgres>,
}

impl LocationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List locations with pagination
    pub async fn list(&self, query: &LocationQuery) -> AppResult<Vec<Location>> {
        let (skip, limit) = page_bounds(query.skip, query.limit);
        let rows = sqlx::query_as::<_, Location>(
            "SELECT * FROM locations ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get location by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    /// Get location by ID, returning None when absent
    pub async fn get_optional(&self, id: i32) -> AppResult<Option<Location>> {
        let row = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create location
    pub async fn create(&self, data: &CreateLocation) -> AppResult<Location> {
        let row = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (site, floor, room, exact_position)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.site)
        .bind(&data.floor)
        .bind(&data.room)
        .bind(&data.exact_position)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Apply a partial update; only supplied fields change
    pub async fn update(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.site, "site");
        add_field!(data.floor, "floor");
        add_field!(data.room, "room");
        add_field!(data.exact_position, "exact_position");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE locations SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Location>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.site);
        bind_field!(data.floor);
        bind_field!(data.room);
        bind_field!(data.exact_position);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    /// Delete location
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Location {} not found", id)));
        }
        Ok(())
    }
}
