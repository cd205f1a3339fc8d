use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::repositories::order::NewOrder;

/// The raw order request body. Every field is optional at the wire level so
/// each absence can be reported by name instead of as a blanket
/// deserialization failure.
#[derive(Deserialize, Debug, Default)]
pub struct OrderRequest {
    pub phone_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub quantity: Option<i32>,
    pub house_number: Option<String>,
    pub street_address: Option<String>,
    pub delivery_city: Option<String>,
    pub delivery_state: Option<String>,
    pub delivery_zip: Option<String>,
    pub delivery_country: Option<String>,
    pub delivery_notes: Option<String>,
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

/// Checks every required field and produces the persistable order.
///
/// Each absent or blank field fails with its own name; quantity must be a
/// positive integer; delivery notes are the one optional field.
pub fn validate_order(req: OrderRequest) -> Result<NewOrder> {
    let phone_id = req.phone_id.ok_or_else(|| missing("phone_id"))?;
    let customer_name = required_text(req.customer_name, "customer_name")?;
    let customer_email = required_text(req.customer_email, "customer_email")?;
    let customer_phone = required_text(req.customer_phone, "customer_phone")?;

    let quantity = req.quantity.ok_or_else(|| missing("quantity"))?;
    if quantity <= 0 {
        return Err(AppError::Validation(
            "Quantity must be a positive integer".to_string(),
        ));
    }

    let house_number = required_text(req.house_number, "house_number")?;
    let street_address = required_text(req.street_address, "street_address")?;
    let delivery_city = required_text(req.delivery_city, "delivery_city")?;
    let delivery_state = required_text(req.delivery_state, "delivery_state")?;
    let delivery_zip = required_text(req.delivery_zip, "delivery_zip")?;
    let delivery_country = required_text(req.delivery_country, "delivery_country")?;

    Ok(NewOrder {
        phone_id,
        customer_name,
        customer_email,
        customer_phone,
        quantity,
        house_number,
        street_address,
        delivery_city,
        delivery_state,
        delivery_zip,
        delivery_country,
        delivery_notes: req.delivery_notes.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> OrderRequest {
        OrderRequest {
            phone_id: Some(1),
            customer_name: Some("John Doe".to_string()),
            customer_email: Some("john@example.com".to_string()),
            customer_phone: Some("123-456-7890".to_string()),
            quantity: Some(2),
            house_number: Some("123".to_string()),
            street_address: Some("Main Street".to_string()),
            delivery_city: Some("New York".to_string()),
            delivery_state: Some("NY".to_string()),
            delivery_zip: Some("10001".to_string()),
            delivery_country: Some("USA".to_string()),
            delivery_notes: None,
        }
    }

    fn error_message(req: OrderRequest) -> String {
        match validate_order(req) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn complete_request_passes() {
        let order = validate_order(full_request()).unwrap();
        assert_eq!(order.phone_id, 1);
        assert_eq!(order.quantity, 2);
        assert_eq!(order.delivery_notes, "");
    }

    #[test]
    fn each_missing_field_is_named() {
        let mut req = full_request();
        req.customer_email = None;
        assert_eq!(error_message(req), "Field \"customer_email\" is required");

        let mut req = full_request();
        req.delivery_country = Some("  ".to_string());
        assert_eq!(error_message(req), "Field \"delivery_country\" is required");

        let mut req = full_request();
        req.phone_id = None;
        assert_eq!(error_message(req), "Field \"phone_id\" is required");
    }

    #[test]
    fn quantity_must_be_positive() {
        let mut req = full_request();
        req.quantity = Some(0);
        assert_eq!(error_message(req), "Quantity must be a positive integer");

        let mut req = full_request();
        req.quantity = Some(-3);
        assert_eq!(error_message(req), "Quantity must be a positive integer");

        let mut req = full_request();
        req.quantity = None;
        assert_eq!(error_message(req), "Field \"quantity\" is required");
    }

    #[test]
    fn delivery_notes_stay_optional() {
        let mut req = full_request();
        req.delivery_notes = Some("leave at the door".to_string());
        let order = validate_order(req).unwrap();
        assert_eq!(order.delivery_notes, "leave at the door");
    }
}
