//! Servicio de métodos de pago
//!
//! Validación de tarjetas, detección de marca y una pasarela en proceso que
//! tokeniza la tarjeta. Sólo se guardan marca, últimos cuatro dígitos,
//! titular y caducidad.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::models::payment::{CardBrand, CardDetails, PaymentMethod, PaymentMethodToken};
use crate::utils::errors::BookingError;

lazy_static! {
    static ref CARD_NUMBER_REGEX: Regex = Regex::new(r"^[0-9]{15,19}$").unwrap();
    static ref EXPIRY_REGEX: Regex = Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").unwrap();
    static ref CVV_REGEX: Regex = Regex::new(r"^[0-9]{3,4}$").unwrap();
}

const TOKEN_LENGTH: usize = 24;

fn digits_only(card_number: &str) -> String {
    card_number.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Marca por prefijo del número
pub fn detect_card_brand(card_number: &str) -> CardBrand {
    let number = digits_only(card_number);
    let prefix2 = number.get(..2).and_then(|p| p.parse::<u32>().ok());

    if number.starts_with('4') {
        CardBrand::Visa
    } else if matches!(prefix2, Some(51..=55)) {
        CardBrand::Mastercard
    } else if matches!(prefix2, Some(34) | Some(37)) {
        CardBrand::Amex
    } else if number.starts_with("6011") || number.starts_with("65") {
        CardBrand::Discover
    } else {
        CardBrand::Unknown
    }
}

fn group_digits(chars: &[char], brand: CardBrand) -> String {
    let groups: Vec<String> = if brand == CardBrand::Amex {
        let mut groups = Vec::new();
        let mut start = 0;
        for size in [4, 6, 5] {
            if start >= chars.len() {
                break;
            }
            let end = (start + size).min(chars.len());
            groups.push(chars[start..end].iter().collect());
            start = end;
        }
        if start < chars.len() {
            groups.push(chars[start..].iter().collect());
        }
        groups
    } else {
        chars.chunks(4).map(|chunk| chunk.iter().collect()).collect()
    };

    groups.join(" ")
}

/// Número para mostrar (amex 4-6-5, resto en grupos de 4) ocultando todo salvo los últimos 4 dígitos
pub fn mask_card_number(card_number: &str) -> String {
    let number = digits_only(card_number);
    let visible_from = number.len().saturating_sub(4);
    let chars: Vec<char> = number
        .chars()
        .enumerate()
        .map(|(i, c)| if i < visible_from { '•' } else { c })
        .collect();
    group_digits(&chars, detect_card_brand(&number))
}

/// Valida los datos de tarjeta contra la fecha `today`
pub fn validate_card_details(card: &CardDetails, today: NaiveDate) -> Result<(), BookingError> {
    if [&card.card_number, &card.card_holder, &card.expiry_date, &card.cvv]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(BookingError::validation("card", "All fields are required"));
    }

    if !CARD_NUMBER_REGEX.is_match(&digits_only(&card.card_number)) {
        return Err(BookingError::validation("card_number", "Invalid card number"));
    }

    let captures = EXPIRY_REGEX
        .captures(card.expiry_date.trim())
        .ok_or_else(|| BookingError::validation("expiry_date", "Invalid expiry date"))?;
    let month: u32 = captures[1]
        .parse()
        .map_err(|_| BookingError::validation("expiry_date", "Invalid expiry date"))?;
    let year: i32 = captures[2]
        .parse::<i32>()
        .map(|yy| 2000 + yy)
        .map_err(|_| BookingError::validation("expiry_date", "Invalid expiry date"))?;
    if (year, month) < (today.year(), today.month()) {
        return Err(BookingError::validation("expiry_date", "Invalid expiry date"));
    }

    if !CVV_REGEX.is_match(card.cvv.trim()) {
        return Err(BookingError::validation("cvv", "Invalid CVV"));
    }

    Ok(())
}

fn generate_token() -> PaymentMethodToken {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    PaymentMethodToken(format!("pm_{}", suffix))
}

/// Pasarela de pago consumida por el checkout
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn add_payment_method(
        &self,
        renter_id: Uuid,
        card: CardDetails,
        today: NaiveDate,
    ) -> Result<PaymentMethod, BookingError>;

    async fn list_payment_methods(&self, renter_id: Uuid) -> Result<Vec<PaymentMethod>, BookingError>;

    async fn find_payment_method(
        &self,
        renter_id: Uuid,
        token: &PaymentMethodToken,
    ) -> Result<Option<PaymentMethod>, BookingError>;
}

/// Pasarela en proceso: valida y guarda sólo datos no sensibles
#[derive(Clone, Default)]
pub struct InProcessPaymentGateway {
    methods: Arc<RwLock<HashMap<Uuid, Vec<PaymentMethod>>>>,
}

impl InProcessPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> BookingError {
    BookingError::Persistence(format!("Failed to acquire payment methods lock: {}", e))
}

#[async_trait]
impl PaymentGateway for InProcessPaymentGateway {
    async fn add_payment_method(
        &self,
        renter_id: Uuid,
        card: CardDetails,
        today: NaiveDate,
    ) -> Result<PaymentMethod, BookingError> {
        validate_card_details(&card, today)?;

        let number = digits_only(&card.card_number);
        let last4 = number[number.len() - 4..].to_string();
        let method = PaymentMethod {
            token: generate_token(),
            renter_id,
            brand: detect_card_brand(&number),
            last4,
            display_number: mask_card_number(&number),
            card_holder: card.card_holder.trim().to_string(),
            expiry_date: card.expiry_date.trim().to_string(),
            created_at: Utc::now(),
        };

        self.methods
            .write()
            .map_err(lock_error)?
            .entry(renter_id)
            .or_default()
            .push(method.clone());

        info!("💳 Método de pago {:?} ****{} añadido para {}", method.brand, method.last4, renter_id);
        Ok(method)
    }

    async fn list_payment_methods(&self, renter_id: Uuid) -> Result<Vec<PaymentMethod>, BookingError> {
        Ok(self
            .methods
            .read()
            .map_err(lock_error)?
            .get(&renter_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_payment_method(
        &self,
        renter_id: Uuid,
        token: &PaymentMethodToken,
    ) -> Result<Option<PaymentMethod>, BookingError> {
        Ok(self
            .methods
            .read()
            .map_err(lock_error)?
            .get(&renter_id)
            .and_then(|methods| methods.iter().find(|m| &m.token == token).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str, expiry: &str, cvv: &str) -> CardDetails {
        CardDetails {
            card_number: number.to_string(),
            card_holder: "Aline Mukamana".to_string(),
            expiry_date: expiry.to_string(),
            cvv: cvv.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_detect_card_brand() {
        assert_eq!(detect_card_brand("4111 1111 1111 1111"), CardBrand::Visa);
        assert_eq!(detect_card_brand("5500 0000 0000 0004"), CardBrand::Mastercard);
        assert_eq!(detect_card_brand("5600 0000 0000 0004"), CardBrand::Unknown);
        assert_eq!(detect_card_brand("3782 822463 10005"), CardBrand::Amex);
        assert_eq!(detect_card_brand("6011 0000 0000 0004"), CardBrand::Discover);
        assert_eq!(detect_card_brand("6500 0000 0000 0002"), CardBrand::Discover);
        assert_eq!(detect_card_brand(""), CardBrand::Unknown);
    }

    #[test]
    fn test_mask_card_number_keeps_last_four() {
        assert_eq!(mask_card_number("4111 1111 1111 1234"), "•••• •••• •••• 1234");
        assert_eq!(mask_card_number("378282246310005"), "•••• •••••• •0005");
        assert_eq!(mask_card_number("41111"), "•111 1");
    }

    #[test]
    fn test_validate_card_details_messages() {
        let missing = validate_card_details(&card("", "12/30", "123"), today()).unwrap_err();
        assert_eq!(missing, BookingError::validation("card", "All fields are required"));

        let short = validate_card_details(&card("4111 1111", "12/30", "123"), today()).unwrap_err();
        assert_eq!(short, BookingError::validation("card_number", "Invalid card number"));

        let bad_month = validate_card_details(&card("4111111111111111", "13/30", "123"), today()).unwrap_err();
        assert_eq!(bad_month, BookingError::validation("expiry_date", "Invalid expiry date"));

        let bad_cvv = validate_card_details(&card("4111111111111111", "12/30", "12"), today()).unwrap_err();
        assert_eq!(bad_cvv, BookingError::validation("cvv", "Invalid CVV"));
    }

    #[test]
    fn test_expiry_month_boundaries() {
        assert!(validate_card_details(&card("4111111111111111", "06/24", "123"), today()).is_ok());
        assert!(validate_card_details(&card("4111111111111111", "05/24", "123"), today()).is_err());
        assert!(validate_card_details(&card("4111111111111111", "01/25", "1234"), today()).is_ok());
    }

    #[tokio::test]
    async fn test_gateway_tokenizes_and_keeps_only_last4() {
        let gateway = InProcessPaymentGateway::new();
        let renter = Uuid::new_v4();
        let method = gateway
            .add_payment_method(renter, card("4111 1111 1111 1234", "12/30", "123"), today())
            .await
            .unwrap();

        assert!(method.token.as_str().starts_with("pm_"));
        assert_eq!(method.token.as_str().len(), 3 + TOKEN_LENGTH);
        assert_eq!(method.last4, "1234");
        assert_eq!(method.display_number, "•••• •••• •••• 1234");
        assert_eq!(method.brand, CardBrand::Visa);

        let found = gateway.find_payment_method(renter, &method.token).await.unwrap();
        assert_eq!(found, Some(method.clone()));
        assert!(gateway
            .find_payment_method(Uuid::new_v4(), &method.token)
            .await
            .unwrap()
            .is_none());
        assert_eq!(gateway.list_payment_methods(renter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_gateway_rejects_invalid_card() {
        let gateway = InProcessPaymentGateway::new();
        let renter = Uuid::new_v4();
        let result = gateway
            .add_payment_method(renter, card("1234", "12/30", "123"), today())
            .await;
        assert!(result.is_err());
        assert!(gateway.list_payment_methods(renter).await.unwrap().is_empty());
    }
}
