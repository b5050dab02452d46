//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio: vehículos, reservas,
//! conductores, usuarios, identidad y métodos de pago.

pub mod auth;
pub mod booking;
pub mod driver;
pub mod payment;
pub mod user;
pub mod vehicle;
