//! Equipment repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentCondition, EquipmentStatus, EquipmentType},
        equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    },
};

use super::page_bounds;

/// One staged row of a bulk import
#[derive(Debug, Clone)]
pub struct StagedEquipment {
    pub serial_number: String,
    pub model: String,
    pub equipment_type: EquipmentType,
    pub condition: EquipmentCondition,
    pub status: EquipmentStatus,
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with optional type/status filters and pagination
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let (skip, limit) = page_bounds(query.skip, query.limit);
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT * FROM equipment
            WHERE ($1::text IS NULL OR equipment_type = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY id
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(query.equipment_type)
        .bind(query.status)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Check if a serial number already exists
    pub async fn serial_exists(&self, serial_number: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM equipment WHERE serial_number = $1)",
        )
        .bind(serial_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create equipment (condition/status fall back to their defaults)
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment
                (serial_number, model, equipment_type, condition, status, location_id, employee_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.serial_number)
        .bind(&data.model)
        .bind(data.equipment_type)
        .bind(data.condition.unwrap_or(EquipmentCondition::New))
        .bind(data.status.unwrap_or(EquipmentStatus::InStock))
        .bind(data.location_id)
        .bind(data.employee_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Apply a partial update; only supplied fields change, updated_at always refreshes
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.serial_number, "serial_number");
        add_field!(data.model, "model");
        add_field!(data.equipment_type, "equipment_type");
        add_field!(data.condition, "condition");
        add_field!(data.status, "status");
        add_field!(data.location_id, "location_id");
        add_field!(data.employee_id, "employee_id");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.serial_number);
        bind_field!(data.model);
        bind_field!(data.equipment_type);
        bind_field!(data.condition);
        bind_field!(data.status);
        bind_field!(data.location_id);
        bind_field!(data.employee_id);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Link equipment to an employee and mark it assigned
    pub async fn assign(&self, id: i32, employee_id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET employee_id = $1, status = 'assigned', updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// All equipment currently held by an employee
    pub async fn list_by_employee(&self, employee_id: i32) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE employee_id = $1 ORDER BY id",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// In-stock equipment, optionally restricted to one type
    pub async fn list_available(
        &self,
        equipment_type: Option<EquipmentType>,
    ) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT * FROM equipment
            WHERE status = 'in_stock'
              AND ($1::text IS NULL OR equipment_type = $1)
            ORDER BY id
            "#,
        )
        .bind(equipment_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Equipment joined to a location, with substring filters on floor/room
    pub async fn list_at_location(
        &self,
        floor: Option<&str>,
        room: Option<&str>,
    ) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT e.* FROM equipment e
            JOIN locations l ON l.id = e.location_id
            WHERE ($1::text IS NULL OR l.floor LIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR l.room LIKE '%' || $2 || '%')
            ORDER BY e.id
            "#,
        )
        .bind(floor)
        .bind(room)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert staged rows as a single all-or-nothing transaction
    pub async fn insert_batch(&self, rows: &[StagedEquipment]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO equipment (serial_number, model, equipment_type, condition, status)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(&row.serial_number)
            .bind(&row.model)
            .bind(row.equipment_type)
            .bind(row.condition)
            .bind(row.status)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(rows.len() as u64)
    }
}
