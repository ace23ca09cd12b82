//! Equipment movement history (append-only audit log)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Movement record: who did what with a piece of equipment, and when.
/// Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentMovement {
    pub id: i32,
    pub equipment_id: i32,
    /// Acting user (not the receiving employee)
    pub user_id: i32,
    /// Action label, e.g. "assigned", "returned", "moved"
    pub action: String,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Create movement request (acting user comes from the caller's token)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMovement {
    pub equipment_id: i32,
    pub action: String,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub notes: Option<String>,
}
