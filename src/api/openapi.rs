//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, chatbot, employees, equipment, health, import, locations, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Parcinfo API",
        version = "1.0.0",
        description = "IT Asset Inventory Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Parcinfo Team", email = "contact@parcinfo.dev")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::assign_equipment,
        equipment::list_movements,
        equipment::create_movement,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        // Chatbot
        chatbot::query,
        // Import
        import::import_equipment,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Enums
            crate::models::enums::EquipmentType,
            crate::models::enums::EquipmentCondition,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::UserRole,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentQuery,
            crate::models::equipment::AssignEquipment,
            crate::models::movement::EquipmentMovement,
            crate::models::movement::CreateMovement,
            // Employees
            crate::models::employee::Employee,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            crate::models::employee::EmployeeQuery,
            // Locations
            crate::models::location::Location,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            crate::models::location::LocationQuery,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::UserQuery,
            // Chatbot
            chatbot::ChatbotQuery,
            crate::services::chatbot::ChatbotReply,
            // Import
            crate::services::import::ImportReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipment", description = "Equipment inventory management"),
        (name = "employees", description = "Employee management"),
        (name = "locations", description = "Location management"),
        (name = "users", description = "User account management"),
        (name = "chatbot", description = "Natural-language inventory queries"),
        (name = "import", description = "Bulk spreadsheet import")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
