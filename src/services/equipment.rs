//! Equipment service

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{AssignEquipment, CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
        movement::{CreateMovement, EquipmentMovement},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Create equipment; the serial number must not already exist
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        if self.repository.equipment.serial_exists(&data.serial_number).await? {
            return Err(AppError::Conflict("Serial number already exists".to_string()));
        }
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }

    /// Assign equipment to an employee. Fails if the equipment is already
    /// assigned, regardless of to whom.
    pub async fn assign(&self, data: &AssignEquipment) -> AppResult<Equipment> {
        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;

        if equipment.status == EquipmentStatus::Assigned {
            return Err(AppError::Conflict("Equipment is already assigned".to_string()));
        }

        self.repository
            .equipment
            .assign(data.equipment_id, data.employee_id)
            .await
    }

    /// Movement history for one piece of equipment
    pub async fn list_movements(&self, equipment_id: i32) -> AppResult<Vec<EquipmentMovement>> {
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.movements.list_for_equipment(equipment_id).await
    }

    /// Append a movement record on behalf of the acting user
    pub async fn record_movement(
        &self,
        user_id: i32,
        data: &CreateMovement,
    ) -> AppResult<EquipmentMovement> {
        self.repository.equipment.get_by_id(data.equipment_id).await?;
        self.repository.movements.create(user_id, data).await
    }
}
