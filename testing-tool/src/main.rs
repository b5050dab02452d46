use anyhow::{anyhow, Result};
use colored::*;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::io::{self, Write};

struct Session {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚙 Vehicle Rental Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = prompt("URL del servidor (Enter = http://localhost:3000): ")?;
    let base_url = if base_url.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        base_url.trim_end_matches('/').to_string()
    };

    let mut session = Session {
        client: Client::new(),
        base_url,
        token: None,
    };

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🔑 Registrar o iniciar sesión");
        println!("2. 🚗 Listar vehículos");
        println!("3. 💰 Cotizar un vehículo");
        println!("4. 🛒 Checkout completo");
        println!("5. 📋 Mis reservas");
        println!("6. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-6): ")?;

        let result = match choice.as_str() {
            "1" => login(&mut session).await,
            "2" => list_vehicles(&session).await,
            "3" => quote(&session).await,
            "4" => full_checkout(&session).await,
            "5" => my_bookings(&session).await,
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("{} {}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn call(session: &Session, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
    let url = format!("{}{}", session.base_url, path);
    println!("{} {} {}", "📤".bright_blue(), method, url);

    let mut request = session.client.request(method, &url);
    if let Some(token) = &session.token {
        request = request.bearer_auth(token);
    }
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request.send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        println!("{} {}", "📥".bright_green(), status.to_string().bright_green());
        Ok(body)
    } else {
        println!("{} {}", "📥".bright_red(), status.to_string().bright_red());
        println!("{}", serde_json::to_string_pretty(&body)?);
        Err(anyhow!("la petición falló con {}", status))
    }
}

async fn login(session: &mut Session) -> Result<()> {
    println!();
    println!("{}", "🔐 CREDENCIALES".bright_cyan().bold());
    println!("{}", "===============".bright_cyan());
    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;
    let name = prompt("Nombre (Enter = sólo login): ")?;

    let body = if name.is_empty() {
        call(session, Method::POST, "/api/auth/login", Some(json!({ "email": email, "password": password }))).await?
    } else {
        call(
            session,
            Method::POST,
            "/api/auth/register",
            Some(json!({
                "name": name,
                "email": email,
                "password": password,
                "confirm_password": password,
            })),
        )
        .await?
    };

    let token = body["data"]["access_token"]
        .as_str()
        .ok_or_else(|| anyhow!("la respuesta no contiene access_token"))?;
    session.token = Some(token.to_string());
    println!("{}", "✅ Sesión iniciada".bright_green().bold());
    Ok(())
}

async fn list_vehicles(session: &Session) -> Result<()> {
    let category = prompt("Categoría (Enter = todas): ")?;
    let path = if category.is_empty() {
        "/api/vehicles".to_string()
    } else {
        format!("/api/vehicles?category={}", category)
    };
    let body = call(session, Method::GET, &path, None).await?;

    println!();
    for vehicle in body["data"].as_array().into_iter().flatten() {
        let available = if vehicle["available"].as_bool().unwrap_or(false) {
            "disponible".bright_green()
        } else {
            "no disponible".bright_red()
        };
        println!(
            "🚗 {} | {} | {}/día | {} | {}",
            vehicle["id"].as_str().unwrap_or("-").dimmed(),
            vehicle["name"].as_str().unwrap_or("-").bold(),
            vehicle["daily_rate"].as_str().unwrap_or("-"),
            vehicle["category"].as_str().unwrap_or("-"),
            available
        );
    }
    Ok(())
}

async fn quote(session: &Session) -> Result<()> {
    let vehicle_id = prompt("ID del vehículo: ")?;
    let pickup = prompt("Fecha de recogida (YYYY-MM-DD): ")?;
    let ret = prompt("Fecha de devolución (YYYY-MM-DD): ")?;
    let path = format!("/api/vehicles/{}/quote?pickup_date={}&return_date={}", vehicle_id, pickup, ret);
    let body = call(session, Method::GET, &path, None).await?;

    println!(
        "{} {} días, total {}",
        "💰 Cotización:".bright_green().bold(),
        body["data"]["duration_days"],
        body["data"]["total_price"].as_str().unwrap_or("-")
    );
    Ok(())
}

async fn full_checkout(session: &Session) -> Result<()> {
    if session.token.is_none() {
        println!("{}", "⚠️ Inicia sesión primero (opción 1)".bright_yellow());
        return Ok(());
    }

    let vehicle_id = prompt("ID del vehículo: ")?;
    let pickup = prompt("Fecha de recogida (YYYY-MM-DD): ")?;
    let ret = prompt("Fecha de devolución (YYYY-MM-DD): ")?;

    let started = call(session, Method::POST, "/api/checkout", Some(json!({ "vehicle_id": vehicle_id }))).await?;
    let checkout_id = started["data"]["id"]
        .as_str()
        .ok_or_else(|| anyhow!("la respuesta no contiene id de checkout"))?
        .to_string();

    let summary = call(
        session,
        Method::PUT,
        &format!("/api/checkout/{}/dates", checkout_id),
        Some(json!({ "pickup_date": pickup, "return_date": ret })),
    )
    .await?;
    println!("{}", serde_json::to_string_pretty(&summary["data"]["quote"])?);

    call(session, Method::POST, &format!("/api/checkout/{}/payment", checkout_id), None).await?;

    println!("{}", "💳 Tarjeta de prueba".bright_cyan().bold());
    let card_number = prompt("Número (Enter = 4111 1111 1111 1111): ")?;
    let card_number = if card_number.is_empty() {
        "4111 1111 1111 1111".to_string()
    } else {
        card_number
    };
    call(
        session,
        Method::POST,
        &format!("/api/checkout/{}/payment-method", checkout_id),
        Some(json!({
            "card_number": card_number,
            "card_holder": "Testing Tool",
            "expiry_date": "12/99",
            "cvv": "123",
        })),
    )
    .await?;

    let booking = call(session, Method::POST, &format!("/api/checkout/{}/confirm", checkout_id), None).await?;
    println!("{}", "✅ RESERVA CREADA".bright_green().bold());
    println!("{}", serde_json::to_string_pretty(&booking["data"])?);
    Ok(())
}

async fn my_bookings(session: &Session) -> Result<()> {
    let body = call(session, Method::GET, "/api/bookings", None).await?;
    for booking in body["data"].as_array().into_iter().flatten() {
        println!(
            "📋 {} | {} | {} → {} | {} | {}",
            booking["id"].as_str().unwrap_or("-").dimmed(),
            booking["vehicle_name"].as_str().unwrap_or("-").bold(),
            booking["pickup_date"].as_str().unwrap_or("-"),
            booking["return_date"].as_str().unwrap_or("-"),
            booking["total_price"].as_str().unwrap_or("-"),
            booking["status"].as_str().unwrap_or("-")
        );
    }
    Ok(())
}
