//! Repository layer for database operations

pub mod employees;
pub mod equipment;
pub mod locations;
pub mod movements;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub employees: employees::EmployeesRepository,
    pub locations: locations::LocationsRepository,
    pub movements: movements::MovementsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            movements: movements::MovementsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Clamp a skip/limit pair to safe bounds (skip >= 0, 1 <= limit <= 1000)
pub(crate) fn page_bounds(skip: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let skip = skip.unwrap_or(0).max(0);
    let limit = limit.unwrap_or(100).clamp(1, 1000);
    (skip, limit)
}
