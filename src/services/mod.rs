//! Business logic services

pub mod chatbot;
pub mod employees;
pub mod equipment;
pub mod import;
pub mod locations;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub equipment: equipment::EquipmentService,
    pub employees: employees::EmployeesService,
    pub locations: locations::LocationsService,
    pub chatbot: chatbot::ChatbotService,
    pub import: import::ImportService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone()),
            employees: employees::EmployeesService::new(repository.clone()),
            locations: locations::LocationsService::new(repository.clone()),
            chatbot: chatbot::ChatbotService::new(repository.clone()),
            import: import::ImportService::new(repository),
        }
    }
}
