//! Equipment model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::{EquipmentCondition, EquipmentStatus, EquipmentType};

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Globally unique serial number
    pub serial_number: String,
    pub model: String,
    pub equipment_type: EquipmentType,
    pub condition: EquipmentCondition,
    pub status: EquipmentStatus,
    /// Physical location, when known
    pub location_id: Option<i32>,
    /// Employee currently holding the equipment
    pub employee_id: Option<i32>,
    /// Direct user assignment, distinct from employee assignment
    pub assigned_user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipment {
    pub serial_number: String,
    pub model: String,
    pub equipment_type: EquipmentType,
    /// Defaults to `new` when unspecified
    pub condition: Option<EquipmentCondition>,
    /// Defaults to `in_stock` when unspecified
    pub status: Option<EquipmentStatus>,
    pub location_id: Option<i32>,
    pub employee_id: Option<i32>,
}

/// Update equipment request (only supplied fields are applied)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub equipment_type: Option<EquipmentType>,
    pub condition: Option<EquipmentCondition>,
    pub status: Option<EquipmentStatus>,
    pub location_id: Option<i32>,
    pub employee_id: Option<i32>,
}

/// Equipment list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    pub equipment_type: Option<EquipmentType>,
    pub status: Option<EquipmentStatus>,
    /// Number of records to skip (default 0)
    pub skip: Option<i64>,
    /// Maximum number of records to return (1-1000, default 100)
    pub limit: Option<i64>,
}

/// Assign equipment to an employee
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignEquipment {
    pub equipment_id: i32,
    pub employee_id: i32,
    pub notes: Option<String>,
}
