//! Location model and request payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Location record (site / floor / room, optional exact position)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub id: i32,
    pub site: String,
    pub floor: String,
    pub room: String,
    /// Free-text precision, e.g. "Armoire A, Poste 12"
    pub exact_position: Option<String>,
}

/// Create location request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLocation {
    pub site: String,
    pub floor: String,
    pub room: String,
    pub exact_position: Option<String>,
}

/// Update location request (only supplied fields are applied)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLocation {
    pub site: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub exact_position: Option<String>,
}

/// Location list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LocationQuery {
    /// Number of records to skip (default 0)
    pub skip: Option<i64>,
    /// Maximum number of records to return (1-1000, default 100)
    pub limit: Option<i64>,
}
