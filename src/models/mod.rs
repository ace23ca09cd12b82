//! Domain models

pub mod employee;
pub mod enums;
pub mod equipment;
pub mod location;
pub mod movement;
pub mod user;
