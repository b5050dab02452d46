//! Datos de ejemplo
//!
//! Flota y conductores de muestra con ids estables. Se cargan en el almacén
//! en memoria con `SEED_FIXTURES=true` y se usan en los tests.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::{DriverRepository, VehicleRepository};
use crate::models::driver::Driver;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

pub const LAMBORGHINI_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0001);
pub const MERCEDES_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0002);
pub const SAFARI_JEEP_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0003);
pub const BENTLEY_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0004);
pub const PORSCHE_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0005);
pub const RANGE_ROVER_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0006);

pub const DRIVER_JEAN_PAUL_ID: Uuid = Uuid::from_u128(0xd71e_0000_0000_0000_0000_0000_0000_0001);
pub const DRIVER_MARIE_CLAIRE_ID: Uuid = Uuid::from_u128(0xd71e_0000_0000_0000_0000_0000_0000_0002);
pub const DRIVER_EMMANUEL_ID: Uuid = Uuid::from_u128(0xd71e_0000_0000_0000_0000_0000_0000_0003);
pub const DRIVER_DIANE_ID: Uuid = Uuid::from_u128(0xd71e_0000_0000_0000_0000_0000_0000_0004);

struct VehicleSeed {
    id: Uuid,
    name: &'static str,
    brand: &'static str,
    model: &'static str,
    year: i32,
    daily_rate: i64,
    seat_count: i32,
    transmission: &'static str,
    fuel_type: &'static str,
    category: &'static str,
    description: &'static str,
    image_url: &'static str,
    features: &'static [&'static str],
}

const FLEET: [VehicleSeed; 6] = [
    VehicleSeed {
        id: LAMBORGHINI_ID,
        name: "Lamborghini Aventador",
        brand: "Lamborghini",
        model: "Aventador",
        year: 2022,
        daily_rate: 899,
        seat_count: 2,
        transmission: "Automatic",
        fuel_type: "Gasoline",
        category: "sports",
        description: "Experience the thrill of driving a Lamborghini Aventador, a luxury sports car that combines stunning design with exhilarating performance.",
        image_url: "https://images.unsplash.com/photo-1522255272218-7ac5249be344?ixlib=rb-4.0.3&fit=fillmax&h=600&w=800",
        features: &["V12 Engine", "Carbon Fiber Body", "Launch Control"],
    },
    VehicleSeed {
        id: MERCEDES_ID,
        name: "Mercedes S-Class",
        brand: "Mercedes-Benz",
        model: "S-Class",
        year: 2023,
        daily_rate: 499,
        seat_count: 5,
        transmission: "Automatic",
        fuel_type: "Hybrid",
        category: "luxury",
        description: "The Mercedes-Benz S-Class is the epitome of luxury sedans, offering exceptional comfort, cutting-edge technology, and sophisticated design.",
        image_url: "https://images.unsplash.com/photo-1500627964684-141351970a7f?ixlib=rb-4.0.3&fit=fillmax&h=600&w=800",
        features: &["Massage Seats", "Burmester Sound", "Night Vision"],
    },
    VehicleSeed {
        id: SAFARI_JEEP_ID,
        name: "Premium Safari Jeep",
        brand: "Jeep",
        model: "Wrangler",
        year: 2023,
        daily_rate: 299,
        seat_count: 4,
        transmission: "Manual",
        fuel_type: "Diesel",
        category: "suv",
        description: "Perfect for adventurous safaris through Rwanda's national parks. Rugged and reliable with open-air options.",
        image_url: "https://images.unsplash.com/photo-1528154291023-a6525fabe5b4?ixlib=rb-4.0.3&fit=fillmax&h=600&w=800",
        features: &["4x4", "Pop-up Roof", "Cooler Box"],
    },
    VehicleSeed {
        id: BENTLEY_ID,
        name: "Bentley Continental GT",
        brand: "Bentley",
        model: "Continental GT",
        year: 2022,
        daily_rate: 799,
        seat_count: 4,
        transmission: "Automatic",
        fuel_type: "Gasoline",
        category: "luxury",
        description: "The Bentley Continental GT is a grand tourer that represents the perfect blend of luxury, performance, and British craftsmanship.",
        image_url: "https://images.unsplash.com/photo-1550355291-bbee04a92027?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&h=800&q=80",
        features: &["W12 Engine", "Rotating Display", "Handcrafted Interior"],
    },
    VehicleSeed {
        id: PORSCHE_ID,
        name: "Porsche 911",
        brand: "Porsche",
        model: "911",
        year: 2023,
        daily_rate: 599,
        seat_count: 2,
        transmission: "Automatic",
        fuel_type: "Gasoline",
        category: "sports",
        description: "The Porsche 911 is an iconic sports car that offers exceptional handling, speed, and the unmistakable Porsche driving experience.",
        image_url: "https://images.unsplash.com/photo-1580274455191-1c62238fa333?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&h=800&q=80",
        features: &["Sport Chrono", "PASM Suspension", "Bose Sound"],
    },
    VehicleSeed {
        id: RANGE_ROVER_ID,
        name: "Range Rover Autobiography",
        brand: "Land Rover",
        model: "Range Rover Autobiography",
        year: 2023,
        daily_rate: 549,
        seat_count: 5,
        transmission: "Automatic",
        fuel_type: "Hybrid",
        category: "suv",
        description: "The Range Rover Autobiography combines off-road capability with luxury, offering a premium SUV experience for both driver and passengers.",
        image_url: "https://images.unsplash.com/photo-1549317661-bd32c8ce0db2?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&h=800&q=80",
        features: &["Terrain Response", "Panoramic Roof", "Executive Seating"],
    },
];

fn fixture_timestamp() -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200, 0).single().unwrap_or_else(Utc::now)
}

fn build_vehicle(seed: &VehicleSeed) -> Vehicle {
    Vehicle {
        id: seed.id,
        name: seed.name.to_string(),
        brand: seed.brand.to_string(),
        model: seed.model.to_string(),
        year: seed.year,
        daily_rate: Decimal::from(seed.daily_rate),
        seat_count: seed.seat_count,
        transmission: seed.transmission.to_string(),
        fuel_type: seed.fuel_type.to_string(),
        category: seed.category.to_string(),
        location: "Kigali".to_string(),
        description: seed.description.to_string(),
        image_url: seed.image_url.to_string(),
        features: seed.features.iter().map(|f| f.to_string()).collect(),
        available: true,
        driver_id: None,
        created_at: fixture_timestamp(),
    }
}

/// El jeep de safari, disponible y sin conductor
pub fn sample_vehicle() -> Vehicle {
    build_vehicle(&FLEET[2])
}

pub fn sample_fleet() -> Vec<Vehicle> {
    FLEET.iter().map(build_vehicle).collect()
}

#[allow(clippy::too_many_arguments)]
fn driver(
    id: Uuid,
    name: &str,
    email: &str,
    phone: &str,
    license_number: &str,
    experience_years: i32,
    rating: Decimal,
    available: bool,
    image_url: &str,
    specialties: &[&str],
) -> Driver {
    Driver {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        license_number: license_number.to_string(),
        experience_years,
        rating,
        available,
        image_url: Some(image_url.to_string()),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        created_at: fixture_timestamp(),
    }
}

pub fn sample_drivers() -> Vec<Driver> {
    vec![
        driver(
            DRIVER_JEAN_PAUL_ID,
            "Jean-Paul Mugisha",
            "jeanpaul@example.com",
            "+250 789 123 456",
            "RW-DL-123456",
            8,
            Decimal::new(49, 1),
            true,
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&fit=fillmax&h=150&w=150&q=80",
            &["Safari Tours", "Mountain Driving", "Wildlife Expert"],
        ),
        driver(
            DRIVER_MARIE_CLAIRE_ID,
            "Marie Claire Uwimana",
            "marieclaire@example.com",
            "+250 788 987 654",
            "RW-DL-789012",
            5,
            Decimal::new(47, 1),
            true,
            "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?ixlib=rb-4.0.3&fit=fillmax&h=150&w=150&q=80",
            &["City Tours", "Business Travel", "Cultural Tours"],
        ),
        driver(
            DRIVER_EMMANUEL_ID,
            "Emmanuel Habimana",
            "emmanuel@example.com",
            "+250 787 456 789",
            "RW-DL-345678",
            10,
            Decimal::new(50, 1),
            true,
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?ixlib=rb-4.0.3&fit=fillmax&h=150&w=150&q=80",
            &["Off-Road Driving", "Gorilla Trekking", "Photography Tours"],
        ),
        driver(
            DRIVER_DIANE_ID,
            "Diane Iradukunda",
            "diane@example.com",
            "+250 786 234 567",
            "RW-DL-234567",
            3,
            Decimal::new(45, 1),
            false,
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?ixlib=rb-4.0.3&fit=fillmax&h=150&w=150&q=80",
            &["Luxury Transportation", "Airport Transfers"],
        ),
    ]
}

/// Carga flota y conductores de muestra
pub async fn seed(vehicles: &dyn VehicleRepository, drivers: &dyn DriverRepository) -> AppResult<()> {
    let sample_drivers = sample_drivers();
    for driver in &sample_drivers {
        drivers.create(driver).await?;
    }

    let fleet = sample_fleet();
    for vehicle in &fleet {
        vehicles.create(vehicle).await?;
    }

    info!(
        "🌱 Fixtures cargados: {} vehículos, {} conductores",
        fleet.len(),
        sample_drivers.len()
    );
    Ok(())
}
