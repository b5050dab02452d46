use chrono::NaiveDate;

use crate::controllers::booking_controller::BookingController;
use crate::services::dashboard::{compute_dashboard, DashboardStats};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct DashboardController<'a> {
    state: &'a AppState,
}

impl<'a> DashboardController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn stats(&self, today: NaiveDate) -> AppResult<DashboardStats> {
        let vehicles = self.state.vehicles.list().await?;
        let bookings = BookingController::new(self.state)
            .with_details(self.state.bookings.list_all().await?)
            .await?;
        let total_users = self.state.users.list().await?.len();
        let total_drivers = self.state.drivers.list().await?.len();

        Ok(compute_dashboard(&vehicles, &bookings, total_users, total_drivers, today))
    }
}
