//! Payment log domain entity

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Wallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::BankTransfer => "BankTransfer",
            Self::Wallet => "Wallet",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Cash" => Some(Self::Cash),
            "Card" => Some(Self::Card),
            "BankTransfer" => Some(Self::BankTransfer),
            "Wallet" => Some(Self::Wallet),
            _ => None,
        }
    }
}

/// What a payment settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentType {
    /// Deposit taken before the visit
    Advance,
    /// Settlement of the remaining cost
    Final,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advance => "Advance",
            Self::Final => "Final",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Advance" => Some(Self::Advance),
            "Final" => Some(Self::Final),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Success" => Self::Success,
            "Pending" => Self::Pending,
            _ => Self::Failed,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One payment attempt. Append-only; only `status` may change later.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLog {
    pub id: i32,
    pub appointment_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub transaction_reference: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaymentLog {
    pub fn new(
        appointment_id: i32,
        amount: i64,
        method: PaymentMethod,
        payment_type: PaymentType,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id: 0,
            appointment_id,
            amount,
            method,
            payment_type,
            status,
            transaction_reference: None,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }
}
