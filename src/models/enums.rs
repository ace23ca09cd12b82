//! Shared domain enums, persisted by their string tags

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

macro_rules! impl_pg_text_enum {
    ($ty:ty) => {
        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                let s: String = self.as_str().to_string();
                <String as Encode<Postgres>>::encode(s, buf)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// EquipmentType
// ---------------------------------------------------------------------------

/// Categories of IT equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentType {
    Pc,
    Laptop,
    Monitor,
    Phone,
    Accessory,
}

impl EquipmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Pc => "pc",
            EquipmentType::Laptop => "laptop",
            EquipmentType::Monitor => "monitor",
            EquipmentType::Phone => "phone",
            EquipmentType::Accessory => "accessory",
        }
    }
}

impl std::str::FromStr for EquipmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pc" => Ok(EquipmentType::Pc),
            "laptop" => Ok(EquipmentType::Laptop),
            "monitor" => Ok(EquipmentType::Monitor),
            "phone" => Ok(EquipmentType::Phone),
            "accessory" => Ok(EquipmentType::Accessory),
            _ => Err(format!("Invalid equipment type: {}", s)),
        }
    }
}

impl_pg_text_enum!(EquipmentType);

// ---------------------------------------------------------------------------
// EquipmentCondition
// ---------------------------------------------------------------------------

/// Physical condition of an equipment item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCondition {
    New,
    Used,
    OutOfService,
}

impl EquipmentCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentCondition::New => "new",
            EquipmentCondition::Used => "used",
            EquipmentCondition::OutOfService => "out_of_service",
        }
    }
}

impl std::str::FromStr for EquipmentCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(EquipmentCondition::New),
            "used" => Ok(EquipmentCondition::Used),
            "out_of_service" => Ok(EquipmentCondition::OutOfService),
            _ => Err(format!("Invalid equipment condition: {}", s)),
        }
    }
}

impl_pg_text_enum!(EquipmentCondition);

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Availability status of an equipment item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    InStock,
    Assigned,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::InStock => "in_stock",
            EquipmentStatus::Assigned => "assigned",
        }
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_stock" => Ok(EquipmentStatus::InStock),
            "assigned" => Ok(EquipmentStatus::Assigned),
            _ => Err(format!("Invalid equipment status: {}", s)),
        }
    }
}

impl_pg_text_enum!(EquipmentStatus);

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User roles for role-based access control (flat set, no hierarchy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Collaborator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Collaborator => "collaborator",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "collaborator" => Ok(UserRole::Collaborator),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

impl_pg_text_enum!(UserRole);
