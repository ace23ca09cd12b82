//! Equipment movement repository (append-only)

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::movement::{CreateMovement, EquipmentMovement},
};

#[derive(Clone)]
pub struct MovementsRepository {
    pool: Pool<Postgres>,
}

impl MovementsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Movement history for one piece of equipment, oldest first
    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<EquipmentMovement>> {
        let rows = sqlx::query_as::<_, EquipmentMovement>(
            "SELECT * FROM equipment_movements WHERE equipment_id = $1 ORDER BY id",
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Append a movement record for the given acting user
    pub async fn create(&self, user_id: i32, data: &CreateMovement) -> AppResult<EquipmentMovement> {
        let row = sqlx::query_as::<_, EquipmentMovement>(
            r#"
            INSERT INTO equipment_movements
                (equipment_id, user_id, action, from_location, to_location, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(user_id)
        .bind(&data.action)
        .bind(&data.from_location)
        .bind(&data.to_location)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
