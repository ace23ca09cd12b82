//! Employee model and request payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Employee record (a staff member, distinct from a login-capable User)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

/// Create employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub department: String,
}

/// Update employee request (only supplied fields are applied)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub department: Option<String>,
}

/// Employee list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Number of records to skip (default 0)
    pub skip: Option<i64>,
    /// Maximum number of records to return (1-1000, default 100)
    pub limit: Option<i64>,
}
