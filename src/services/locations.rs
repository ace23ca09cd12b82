//! Locations service

use crate::{
    error::AppResult,
    models::location::{CreateLocation, Location, LocationQuery, UpdateLocation},
    repository::Repository,
};

#[derive(Clone)]
pub struct LocationsService {
    repository: Repository,
}

impl LocationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &LocationQuery) -> AppResult<Vec<Location>> {
        self.repository.locations.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        self.repository.locations.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateLocation) -> AppResult<Location> {
        self.repository.locations.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        self.repository.locations.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.locations.delete(id).await
    }
}
