//! Payment gateway collaborator
//!
//! The payment workflow charges through this trait before recording a
//! payment. `ManualPaymentGateway` covers over-the-counter payments taken
//! by staff: it approves every charge.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::PaymentMethod;

#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub appointment_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    /// Caller-supplied reference (receipt number, bank transfer id)
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeReceipt {
    pub transaction_reference: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("declined: {0}")]
    Declined(String),

    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt, GatewayError>;
}

#[derive(Debug, Default, Clone)]
pub struct ManualPaymentGateway;

#[async_trait]
impl PaymentGateway for ManualPaymentGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt, GatewayError> {
        let transaction_reference = match &request.reference {
            Some(r) if !r.trim().is_empty() => r.trim().to_string(),
            _ => format!("MANUAL-{}", Uuid::new_v4().simple()),
        };
        Ok(ChargeReceipt {
            transaction_reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(reference: Option<&str>) -> ChargeRequest {
        ChargeRequest {
            appointment_id: 1,
            amount: 1000,
            method: PaymentMethod::Cash,
            reference: reference.map(String::from),
        }
    }

    #[tokio::test]
    async fn manual_gateway_echoes_reference() {
        let receipt = ManualPaymentGateway.charge(&request(Some(" RCPT-9 "))).await.unwrap();
        assert_eq!(receipt.transaction_reference, "RCPT-9");
    }

    #[tokio::test]
    async fn manual_gateway_generates_reference() {
        let receipt = ManualPaymentGateway.charge(&request(None)).await.unwrap();
        assert!(receipt.transaction_reference.starts_with("MANUAL-"));
    }
}
