//! Guest RSVP intake and dashboard aggregates.

use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use shared::GuestSummary;

use crate::domain::commands::guests::{
    CompanionInput, ListGuestsResult, SubmitRsvpCommand, SubmitRsvpResult,
};
use crate::domain::models::guest::{Guest, RsvpValidationError};
use crate::storage::traits::{Connection, GuestStorage};

/// Service for guest RSVP submissions and the dashboard numbers over them.
#[derive(Clone)]
pub struct GuestService<C: Connection> {
    guest_repository: C::GuestRepository,
}

impl<C: Connection> GuestService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            guest_repository: connection.create_guest_repository(),
        }
    }

    /// Record one RSVP, attending or declining.
    ///
    /// Attending: companions are flattened into a display string and counted.
    /// Declining: the companion fields are zeroed, a visit frequency is
    /// required, and it is folded into the message as a bracketed footer.
    pub fn submit_rsvp(&self, command: SubmitRsvpCommand) -> Result<SubmitRsvpResult> {
        info!(
            "Submitting RSVP: name={}, attending={}",
            command.full_name, command.attending
        );

        let full_name = command.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(RsvpValidationError::EmptyName.into());
        }

        let visit_frequency = command
            .visit_frequency
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if !command.attending && visit_frequency.is_none() {
            return Err(RsvpValidationError::MissingVisitFrequency.into());
        }

        let (companion_count, companion_names) = if command.attending {
            for (index, companion) in command.companions.iter().enumerate() {
                if companion.name.trim().is_empty() {
                    return Err(RsvpValidationError::UnnamedCompanion(index + 1).into());
                }
            }
            let names = command
                .companions
                .iter()
                .map(format_companion)
                .collect::<Vec<_>>()
                .join(", ");
            let names = if names.is_empty() { None } else { Some(names) };
            (command.companions.len() as u32, names)
        } else {
            (0, None)
        };

        let base_message = command
            .message
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        let message = match visit_frequency {
            Some(frequency) if !command.attending => {
                let footer = format!("[Frequência de visita: {}]", frequency);
                Some(match base_message {
                    Some(text) => format!("{}\n\n{}", text, footer),
                    None => footer,
                })
            }
            _ => base_message,
        };

        let guest = Guest {
            id: Guest::generate_id(),
            created_at: Utc::now(),
            full_name,
            age: command.age,
            attending: command.attending,
            companion_count,
            companion_names,
            message,
        };

        self.guest_repository.store_guest(&guest)?;
        info!("Stored RSVP {} for {}", guest.id, guest.full_name);
        Ok(SubmitRsvpResult { guest })
    }

    /// All responses, newest first.
    pub fn list_guests(&self) -> Result<ListGuestsResult> {
        let guests = self.guest_repository.list_guests()?;
        Ok(ListGuestsResult { guests })
    }

    /// Dashboard headline numbers over every response ever recorded.
    pub fn summary(&self) -> Result<GuestSummary> {
        let guests = self.guest_repository.list_guests()?;
        let mut summary = GuestSummary {
            confirmed: 0,
            declined: 0,
            total_attendees: 0,
        };
        for guest in &guests {
            if guest.attending {
                summary.confirmed += 1;
                summary.total_attendees += guest.party_size();
            } else {
                summary.declined += 1;
            }
        }
        Ok(summary)
    }
}

/// "Ana (8 anos)" when the age is known, the bare name otherwise.
fn format_companion(companion: &CompanionInput) -> String {
    match companion.age {
        Some(age) => format!("{} ({} anos)", companion.name.trim(), age),
        None => companion.name.trim().to_string(),
    }
}
