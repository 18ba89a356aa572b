//! Headless walkthrough of the booking → rebuild → triage flow.
//!
//! Opens a store (path from the first argument, in-memory by default),
//! books a handful of appointments, rebuilds the indexes, and drains the
//! triage queue.

use anyhow::Result;
use clinic_triage_core::{AppointmentForm, ClinicCore};

fn form(name: &str, age: &str, time: &str, emergency: bool) -> AppointmentForm {
    AppointmentForm {
        name: name.into(),
        age: age.into(),
        gender: "F".into(),
        location: "Main clinic".into(),
        scheduled_time: time.into(),
        phone: "555-0100".into(),
        is_emergency: emergency,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let core = match std::env::args().nth(1) {
        Some(path) => ClinicCore::open(path)?,
        None => ClinicCore::open_in_memory()?,
    };

    for (name, age, time, emergency) in [
        ("Asha Rao", "42", "09:00", false),
        ("Ben Ito", "67", "09:15", true),
        ("Carla Mendes", "29", "09:30", false),
        ("Dev Okafor", "54", "09:45", true),
    ] {
        let (id, ticket) = core.book_appointment(form(name, age, time, emergency))?;
        println!("booked #{id} ({name}), queue ticket {}", ticket.number);
    }

    core.rebuild_indexes()?;

    println!("\nappointments by id:");
    for appointment in core.appointments_by_id()? {
        println!("{}", serde_json::to_string(&appointment)?);
    }

    println!("\nqueue status: {}", serde_json::to_string(&core.queue_status()?)?);

    println!("\ncalling patients:");
    while let Some(ticket) = core.call_next_patient()? {
        println!("  ticket {}: {}", ticket.number, ticket.name);
    }

    Ok(())
}
