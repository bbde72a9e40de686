//! Appointment aggregate
//!
//! Contains the Appointment entity, its service lines, the status
//! state machine, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{
    Appointment, AppointmentLine, AppointmentStatus, CancelOutcome, Completion, NewAppointment,
};
pub use repository::AppointmentRepository;
