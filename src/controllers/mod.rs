//! Controladores
//!
//! Orquestan repositorios y servicios para cada área de la API.

pub mod booking_controller;
pub mod checkout_controller;
pub mod dashboard_controller;
pub mod driver_controller;
pub mod vehicle_controller;

pub use booking_controller::BookingController;
pub use checkout_controller::CheckoutController;
pub use dashboard_controller::DashboardController;
pub use driver_controller::DriverController;
pub use vehicle_controller::VehicleController;
