//! DTOs de la API
//!
//! Requests y responses del contrato HTTP.

pub mod auth_dto;
pub mod booking_dto;
pub mod checkout_dto;
pub mod common;
pub mod driver_dto;
pub mod vehicle_dto;

pub use common::ApiResponse;
