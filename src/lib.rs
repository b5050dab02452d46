//! Vehicle Rental API
//!
//! Catálogo de vehículos, checkout de reservas en dos pasos, métodos de
//! pago tokenizados y panel de administración sobre Axum.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
