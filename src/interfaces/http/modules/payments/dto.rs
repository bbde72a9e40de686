//! Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::PaymentRequest;
use crate::domain::{PaymentLog, PaymentMethod, PaymentType};

/// Payment against an appointment: `{amount, method, type, reference}`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordPaymentRequest {
    /// Amount in minor currency units; must be positive
    pub amount: i64,
    /// Cash, Card, BankTransfer or Wallet
    pub method: String,
    /// Advance or Final
    #[serde(rename = "type", alias = "payment_type", alias = "paymentType")]
    pub payment_type: String,
    /// Reference supplied by the payer or terminal
    #[validate(length(max = 100))]
    #[serde(
        default,
        rename = "reference",
        alias = "transaction_reference",
        alias = "transactionReference"
    )]
    pub transaction_reference: Option<String>,
}

impl RecordPaymentRequest {
    /// Resolve the textual enums; `Err` names the offending field
    pub fn into_payment(self, appointment_id: i32) -> Result<PaymentRequest, String> {
        let method = PaymentMethod::parse(&self.method)
            .ok_or_else(|| format!("Unknown payment method '{}'", self.method))?;
        let payment_type = PaymentType::parse(&self.payment_type)
            .ok_or_else(|| format!("Unknown payment type '{}'", self.payment_type))?;

        Ok(PaymentRequest {
            appointment_id,
            amount: self.amount,
            method,
            payment_type,
            transaction_reference: self.transaction_reference,
        })
    }
}

/// One payment attempt
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentLogDto {
    pub id: i32,
    pub appointment_id: i32,
    pub amount: i64,
    pub method: String,
    pub payment_type: String,
    /// Pending, Success or Failed
    pub status: String,
    pub transaction_reference: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentLog> for PaymentLogDto {
    fn from(p: PaymentLog) -> Self {
        Self {
            id: p.id,
            appointment_id: p.appointment_id,
            amount: p.amount,
            method: p.method.as_str().to_string(),
            payment_type: p.payment_type.as_str().to_string(),
            status: p.status.as_str().to_string(),
            transaction_reference: p.transaction_reference,
            failure_reason: p.failure_reason,
            created_at: p.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, payment_type: &str) -> RecordPaymentRequest {
        RecordPaymentRequest {
            amount: 1500,
            method: method.to_string(),
            payment_type: payment_type.to_string(),
            transaction_reference: None,
        }
    }

    #[test]
    fn known_enums_resolve() {
        let payment = request("Card", "Advance").into_payment(4).unwrap();
        assert_eq!(payment.appointment_id, 4);
        assert_eq!(payment.method, PaymentMethod::Card);
        assert_eq!(payment.payment_type, PaymentType::Advance);
    }

    #[test]
    fn unknown_method_is_reported() {
        let err = request("Cheque", "Final").into_payment(4).unwrap_err();
        assert!(err.contains("Cheque"));
    }

    #[test]
    fn unknown_type_is_reported() {
        let err = request("Cash", "Deposit").into_payment(4).unwrap_err();
        assert!(err.contains("Deposit"));
    }
}
