//! Application services

pub mod booking;
pub mod notification_generator;
pub mod payment_gateway;
pub mod payments;
pub mod pricing;
pub mod slot_allocator;
pub mod transfer_expiry;
pub mod transfers;

pub use booking::{BookingRequest, BookingService};
pub use notification_generator::{NotificationGenerator, ScanReport};
pub use payment_gateway::{
    ChargeReceipt, ChargeRequest, GatewayError, ManualPaymentGateway, PaymentGateway,
};
pub use payments::{PaymentRequest, PaymentService};
pub use pricing::Quote;
pub use slot_allocator::SlotAllocator;
pub use transfer_expiry::start_transfer_expiry_task;
pub use transfers::TransferService;
