//! Order form validation and payload construction.
//!
//! The calendar input speaks `YYYY-MM-DD`; the API expects `DD.MM.YYYY`.
//! That wire format is fixed here and used for create and update alike.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use lavka_api::{OrderPayload, OrderUpdate};

/// Wire representation of delivery dates.
pub const WIRE_DATE_FORMAT: &str = "%d.%m.%Y";

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// The editable order fields as the shopper entered them.
///
/// `delivery_date` is the calendar-input representation (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub delivery_address: String,
    pub delivery_date: String,
    pub delivery_interval: String,
    pub comment: String,
    pub subscribe: bool,
}

/// A required field found empty during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    FullName,
    Email,
    Phone,
    DeliveryAddress,
    DeliveryDate,
    DeliveryInterval,
    Cart,
}

impl MissingField {
    #[must_use]
    fn label(self) -> &'static str {
        match self {
            MissingField::FullName => "full name",
            MissingField::Email => "email",
            MissingField::Phone => "phone",
            MissingField::DeliveryAddress => "delivery address",
            MissingField::DeliveryDate => "delivery date",
            MissingField::DeliveryInterval => "delivery interval",
            MissingField::Cart => "cart",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum OrderFormError {
    #[error("missing required fields: {}", format_fields(.0))]
    MissingFields(Vec<MissingField>),
}

fn format_fields(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses the calendar-input date representation.
#[must_use]
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), CALENDAR_DATE_FORMAT).ok()
}

/// Formats a date for the wire.
#[must_use]
pub fn wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Validates a form against the required-field rules, cart included.
///
/// # Errors
///
/// Returns [`OrderFormError::MissingFields`] naming every missing field.
/// A delivery date that does not parse counts as missing.
pub fn validate(form: &OrderForm, cart_ids: &[i64]) -> Result<(), OrderFormError> {
    let mut missing = missing_form_fields(form);
    if cart_ids.is_empty() {
        missing.push(MissingField::Cart);
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(OrderFormError::MissingFields(missing))
    }
}

/// Builds the create payload: trimmed fields, wire-format date, subscribe
/// as 0/1, comment only when non-empty, and the flat possibly-repeating
/// cart identifiers as the line-item source.
///
/// # Errors
///
/// Returns [`OrderFormError::MissingFields`] when validation fails.
pub fn build_payload(form: &OrderForm, cart_ids: &[i64]) -> Result<OrderPayload, OrderFormError> {
    validate(form, cart_ids)?;
    let Some(date) = parse_calendar_date(&form.delivery_date) else {
        return Err(OrderFormError::MissingFields(vec![MissingField::DeliveryDate]));
    };

    Ok(OrderPayload {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        delivery_address: form.delivery_address.trim().to_string(),
        delivery_date: wire_date(date),
        delivery_interval: form.delivery_interval.trim().to_string(),
        subscribe: u8::from(form.subscribe),
        comment: non_empty(&form.comment),
        good_ids: cart_ids.to_vec(),
    })
}

/// Builds the update payload: the same field rules as creation, but no cart
/// requirement — the line items of an existing order are not editable.
///
/// # Errors
///
/// Returns [`OrderFormError::MissingFields`] when validation fails.
pub fn build_update(form: &OrderForm) -> Result<OrderUpdate, OrderFormError> {
    let missing = missing_form_fields(form);
    if !missing.is_empty() {
        return Err(OrderFormError::MissingFields(missing));
    }
    let Some(date) = parse_calendar_date(&form.delivery_date) else {
        return Err(OrderFormError::MissingFields(vec![MissingField::DeliveryDate]));
    };

    Ok(OrderUpdate {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        delivery_address: form.delivery_address.trim().to_string(),
        delivery_date: wire_date(date),
        delivery_interval: form.delivery_interval.trim().to_string(),
        subscribe: u8::from(form.subscribe),
        comment: non_empty(&form.comment),
    })
}

fn missing_form_fields(form: &OrderForm) -> Vec<MissingField> {
    let mut missing = Vec::new();
    if form.full_name.trim().is_empty() {
        missing.push(MissingField::FullName);
    }
    if form.email.trim().is_empty() {
        missing.push(MissingField::Email);
    }
    if form.phone.trim().is_empty() {
        missing.push(MissingField::Phone);
    }
    if form.delivery_address.trim().is_empty() {
        missing.push(MissingField::DeliveryAddress);
    }
    if parse_calendar_date(&form.delivery_date).is_none() {
        missing.push(MissingField::DeliveryDate);
    }
    if form.delivery_interval.trim().is_empty() {
        missing.push(MissingField::DeliveryInterval);
    }
    missing
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> OrderForm {
        OrderForm {
            full_name: "Ivanov Ivan".into(),
            email: "ivan@example.com".into(),
            phone: "+7 900 000-00-00".into(),
            delivery_address: "Moscow, Tverskaya 1".into(),
            delivery_date: "2024-06-08".into(),
            delivery_interval: "18:00-22:00".into(),
            comment: String::new(),
            subscribe: false,
        }
    }

    #[test]
    fn valid_form_with_cart_passes() {
        assert!(validate(&filled_form(), &[5, 7]).is_ok());
    }

    #[test]
    fn validation_names_every_missing_field() {
        let form = OrderForm {
            full_name: "  ".into(),
            email: String::new(),
            ..filled_form()
        };
        let err = validate(&form, &[]).unwrap_err();
        let OrderFormError::MissingFields(missing) = err;
        assert_eq!(
            missing,
            vec![MissingField::FullName, MissingField::Email, MissingField::Cart]
        );
    }

    #[test]
    fn unparsable_date_counts_as_missing() {
        let form = OrderForm {
            delivery_date: "next tuesday".into(),
            ..filled_form()
        };
        let err = validate(&form, &[5]).unwrap_err();
        let OrderFormError::MissingFields(missing) = err;
        assert_eq!(missing, vec![MissingField::DeliveryDate]);
    }

    #[test]
    fn payload_converts_the_date_to_wire_format() {
        let payload = build_payload(&filled_form(), &[5, 5, 7]).unwrap();
        assert_eq!(payload.delivery_date, "08.06.2024");
        assert_eq!(payload.good_ids, vec![5, 5, 7]);
        assert_eq!(payload.subscribe, 0);
        assert_eq!(payload.comment, None);
    }

    #[test]
    fn payload_trims_fields_and_keeps_nonempty_comment() {
        let form = OrderForm {
            full_name: "  Ivanov Ivan  ".into(),
            comment: "  call before arriving  ".into(),
            subscribe: true,
            ..filled_form()
        };
        let payload = build_payload(&form, &[5]).unwrap();
        assert_eq!(payload.full_name, "Ivanov Ivan");
        assert_eq!(payload.comment.as_deref(), Some("call before arriving"));
        assert_eq!(payload.subscribe, 1);
    }

    #[test]
    fn update_does_not_require_a_cart() {
        let update = build_update(&filled_form()).unwrap();
        assert_eq!(update.delivery_date, "08.06.2024");
    }

    #[test]
    fn error_message_lists_the_missing_fields() {
        let err = validate(&OrderForm::default(), &[]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("full name"), "got: {message}");
        assert!(message.contains("delivery date"), "got: {message}");
        assert!(message.contains("cart"), "got: {message}");
    }
}
