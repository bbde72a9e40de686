//! Application layer - workflows orchestrating the domain repositories

pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use services::{
    start_transfer_expiry_task, BookingRequest, BookingService, ManualPaymentGateway,
    NotificationGenerator, PaymentGateway, PaymentRequest, PaymentService, Quote, ScanReport,
    SlotAllocator, TransferService,
};
