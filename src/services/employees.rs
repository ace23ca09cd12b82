//! Employees service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee},
    repository::Repository,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EmployeeQuery) -> AppResult<Vec<Employee>> {
        self.repository.employees.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        self.repository.employees.get_by_id(id).await
    }

    /// Create employee; the email must not already exist
    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if self.repository.employees.email_exists(&data.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        self.repository.employees.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEmployee) -> AppResult<Employee> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.employees.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.employees.delete(id).await
    }
}
