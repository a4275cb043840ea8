use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Credit,
    Paypal,
    ApplePay,
}

impl PaymentMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "credit",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::ApplePay => "applepay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "credit" | "card" | "credit_card" => Ok(PaymentMethod::Credit),
            "paypal" => Ok(PaymentMethod::Paypal),
            "applepay" | "apple_pay" => Ok(PaymentMethod::ApplePay),
            other => Err(AppError::Validation(format!("Unsupported payment method: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    pub card_number: String,
    pub card_holder: String,
    pub expiry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaypalDetails {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplePayDetails {
    pub device_token: String,
}

/// Payment information attached to a booking. Stored as JSON, tagged by `method`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentDetails {
    Credit(CardDetails),
    Paypal(PaypalDetails),
    ApplePay(ApplePayDetails),
}

impl PaymentDetails {
    /// Builds the typed payment from a method name and its untyped field set,
    /// validating the fields that method requires.
    pub fn parse(method: PaymentMethod, details: serde_json::Value) -> Result<Self, AppError> {
        let invalid = |e: serde_json::Error| {
            AppError::Validation(format!("Invalid payment details for {}: {}", method, e))
        };

        let payment = match method {
            PaymentMethod::Credit => PaymentDetails::Credit(serde_json::from_value(details).map_err(invalid)?),
            PaymentMethod::Paypal => PaymentDetails::Paypal(serde_json::from_value(details).map_err(invalid)?),
            PaymentMethod::ApplePay => PaymentDetails::ApplePay(serde_json::from_value(details).map_err(invalid)?),
        };

        payment.validate()?;
        Ok(payment)
    }

    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Credit(_) => PaymentMethod::Credit,
            PaymentDetails::Paypal(_) => PaymentMethod::Paypal,
            PaymentDetails::ApplePay(_) => PaymentMethod::ApplePay,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            PaymentDetails::Credit(card) => {
                let digits: String = card.card_number.chars().filter(|c| !c.is_whitespace()).collect();
                if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(AppError::Validation("Card number must be 12-19 digits".into()));
                }
                if card.card_holder.trim().is_empty() {
                    return Err(AppError::Validation("Card holder is required".into()));
                }
                if !is_valid_expiry(&card.expiry) {
                    return Err(AppError::Validation("Card expiry must be MM/YY".into()));
                }
                match &card.cvv {
                    Some(cvv) if (3..=4).contains(&cvv.len()) && cvv.chars().all(|c| c.is_ascii_digit()) => Ok(()),
                    _ => Err(AppError::Validation("CVV must be 3-4 digits".into())),
                }
            }
            PaymentDetails::Paypal(paypal) => {
                if !paypal.email.contains('@') {
                    return Err(AppError::Validation("PayPal email is invalid".into()));
                }
                Ok(())
            }
            PaymentDetails::ApplePay(apple) => {
                if apple.device_token.trim().is_empty() {
                    return Err(AppError::Validation("Apple Pay device token is required".into()));
                }
                Ok(())
            }
        }
    }

    /// The form that is safe to persist: card numbers keep only their last
    /// four digits and the CVV is dropped.
    pub fn redacted(&self) -> Self {
        match self {
            PaymentDetails::Credit(card) => {
                let digits: Vec<char> = card.card_number.chars().filter(|c| c.is_ascii_digit()).collect();
                let last4: String = digits[digits.len().saturating_sub(4)..].iter().collect();
                PaymentDetails::Credit(CardDetails {
                    card_number: format!("**** **** **** {}", last4),
                    card_holder: card.card_holder.clone(),
                    expiry: card.expiry.clone(),
                    cvv: None,
                })
            }
            other => other.clone(),
        }
    }
}

fn is_valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let month_ok = month.len() == 2 && matches!(month.parse::<u8>(), Ok(1..=12));
    let year_ok = year.len() == 2 && year.chars().all(|c| c.is_ascii_digit());
    month_ok && year_ok
}
