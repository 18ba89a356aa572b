//! Domain models for the clinic-triage system.

mod appointment;
mod ticket;

pub use appointment::*;
pub use ticket::*;
