use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::repositories::phone::{NewPhone, PhoneChanges};

/// The raw catalog-entry request body, every field optional so absences are
/// reported by name.
#[derive(Deserialize, Debug, Default)]
pub struct PhoneRequest {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<Decimal>,
    pub storage: Option<String>,
    pub color: Option<String>,
    pub stock_quantity: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Field \"{field}\" is required"))
}

fn required_text(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing(field)),
    }
}

fn check_price(price: Decimal) -> Result<Decimal> {
    if price.is_sign_negative() {
        return Err(AppError::Validation(
            "Price must be non-negative".to_string(),
        ));
    }
    Ok(price)
}

fn check_stock(stock: i32) -> Result<i32> {
    if stock < 0 {
        return Err(AppError::Validation(
            "Stock quantity must be non-negative".to_string(),
        ));
    }
    Ok(stock)
}

/// Checks the required fields for creating a catalog entry.
pub fn validate_new_phone(req: PhoneRequest) -> Result<NewPhone> {
    let brand = required_text(req.brand, "brand")?;
    let model = required_text(req.model, "model")?;
    let price = check_price(req.price.ok_or_else(|| missing("price"))?)?;
    let storage = required_text(req.storage, "storage")?;
    let color = required_text(req.color, "color")?;
    let stock_quantity = check_stock(req.stock_quantity.ok_or_else(|| missing("stock_quantity"))?)?;

    Ok(NewPhone {
        brand,
        model,
        price,
        storage,
        color,
        stock_quantity,
        description: req.description.unwrap_or_default(),
        image_url: req.image_url.unwrap_or_default(),
    })
}

/// Turns a partial-update body into the change set, checking the numeric
/// invariants on whichever fields are present.
pub fn validate_phone_changes(req: PhoneRequest) -> Result<PhoneChanges> {
    let price = req.price.map(check_price).transpose()?;
    let stock_quantity = req.stock_quantity.map(check_stock).transpose()?;

    Ok(PhoneChanges {
        brand: req.brand,
        model: req.model,
        price,
        storage: req.storage,
        color: req.color,
        stock_quantity,
        description: req.description,
        image_url: req.image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> PhoneRequest {
        PhoneRequest {
            brand: Some("Nokia".to_string()),
            model: Some("3310".to_string()),
            price: Some("49.99".parse().unwrap()),
            storage: Some("16MB".to_string()),
            color: Some("Blue".to_string()),
            stock_quantity: Some(100),
            description: None,
            image_url: None,
        }
    }

    #[test]
    fn complete_request_passes_with_defaulted_extras() {
        let phone = validate_new_phone(full_request()).unwrap();
        assert_eq!(phone.brand, "Nokia");
        assert_eq!(phone.description, "");
        assert_eq!(phone.image_url, "");
    }

    #[test]
    fn missing_required_fields_are_named() {
        let mut req = full_request();
        req.price = None;
        match validate_new_phone(req) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Field \"price\" is required"),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn negative_numbers_are_rejected() {
        let mut req = full_request();
        req.price = Some("-1".parse().unwrap());
        assert!(validate_new_phone(req).is_err());

        let mut req = full_request();
        req.stock_quantity = Some(-5);
        assert!(validate_new_phone(req).is_err());
    }

    #[test]
    fn zero_stock_is_a_valid_catalog_entry() {
        let mut req = full_request();
        req.stock_quantity = Some(0);
        assert!(validate_new_phone(req).is_ok());
    }

    #[test]
    fn changes_keep_only_provided_fields() {
        let changes = validate_phone_changes(PhoneRequest {
            price: Some("10.00".parse().unwrap()),
            ..Default::default()
        })
        .unwrap();
        assert!(changes.brand.is_none());
        assert_eq!(changes.price, Some("10.00".parse().unwrap()));
    }
}
