//! Filtros de listados
//!
//! Catálogo de vehículos, conductores y reservas (pestañas del renter y
//! listado del back office).

use crate::models::booking::{Booking, BookingDetails, BookingStatus, BookingTab};
use crate::models::driver::{Driver, DriverFilters};
use crate::models::vehicle::{Vehicle, VehicleFilters};

/// Categoría (sin distinguir mayúsculas), búsqueda libre y sólo disponibles; ordenado por nombre
pub fn filter_vehicles(vehicles: Vec<Vehicle>, filters: &VehicleFilters) -> Vec<Vehicle> {
    let category = filters
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));

    let mut result: Vec<Vehicle> = vehicles
        .into_iter()
        .filter(|v| category.map_or(true, |c| v.category.eq_ignore_ascii_case(c)))
        .filter(|v| filters.search.as_deref().map_or(true, |q| v.matches_search(q)))
        .filter(|v| !filters.available_only || v.available)
        .collect();

    result.sort_by(|a, b| a.name.cmp(&b.name));
    result
}

pub fn filter_drivers(drivers: Vec<Driver>, filters: &DriverFilters) -> Vec<Driver> {
    let mut result: Vec<Driver> = drivers
        .into_iter()
        .filter(|d| filters.search.as_deref().map_or(true, |q| d.matches_search(q)))
        .filter(|d| !filters.available_only || d.available)
        .collect();

    result.sort_by(|a, b| a.name.cmp(&b.name));
    result
}

/// Reservas del renter de una pestaña, más recientes primero
pub fn bookings_for_tab(bookings: Vec<Booking>, tab: Option<BookingTab>) -> Vec<Booking> {
    let mut result: Vec<Booking> = bookings
        .into_iter()
        .filter(|b| tab.map_or(true, |t| t.includes(b.status)))
        .collect();

    result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    result
}

/// Listado del back office: `status = None` equivale a "all"
pub fn filter_admin_bookings(
    bookings: Vec<BookingDetails>,
    status: Option<BookingStatus>,
    search: Option<&str>,
) -> Vec<BookingDetails> {
    let mut result: Vec<BookingDetails> = bookings
        .into_iter()
        .filter(|d| status.map_or(true, |s| d.booking.status == s))
        .filter(|d| search.map_or(true, |q| d.matches_search(q)))
        .collect();

    result.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
    result
}
