use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::GuestResponse;

/// Domain model for one RSVP submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub age: Option<u32>,
    pub attending: bool,
    pub companion_count: u32,
    /// Companion names preformatted for display, e.g. "Ana (8 anos), Pedro".
    pub companion_names: Option<String>,
    /// Free-form note; for declined responses the visit-frequency footer is
    /// already appended.
    pub message: Option<String>,
}

impl Guest {
    /// Generate a fresh record id.
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Seats this response accounts for: the guest plus companions when
    /// attending, zero when declined.
    pub fn party_size(&self) -> u32 {
        if self.attending {
            1 + self.companion_count
        } else {
            0
        }
    }
}

/// Why an RSVP submission was rejected.
#[derive(Debug, thiserror::Error)]
pub enum RsvpValidationError {
    #[error("Guest name cannot be empty")]
    EmptyName,
    #[error("Companion {0} is missing a name")]
    UnnamedCompanion(usize),
    #[error("Declining requires saying how often you visit the family")]
    MissingVisitFrequency,
}

/// Why a stored row could not be accepted as a domain guest.
#[derive(Debug, thiserror::Error)]
pub enum GuestRowError {
    #[error("Invalid created_at '{0}': expected RFC 3339")]
    InvalidCreatedAt(String),
}

impl TryFrom<GuestResponse> for Guest {
    type Error = GuestRowError;

    fn try_from(row: GuestResponse) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|_| GuestRowError::InvalidCreatedAt(row.created_at.clone()))?
            .with_timezone(&Utc);

        Ok(Guest {
            id: row.id,
            created_at,
            full_name: row.nome_completo,
            age: row.idade,
            attending: row.vai_comparecer,
            companion_count: row.qtd_acompanhantes,
            companion_names: row.nomes_acompanhantes.filter(|s| !s.is_empty()),
            message: row.mensagem_justificativa.filter(|s| !s.is_empty()),
        })
    }
}

impl From<&Guest> for GuestResponse {
    fn from(guest: &Guest) -> Self {
        GuestResponse {
            id: guest.id.clone(),
            created_at: guest.created_at.to_rfc3339(),
            nome_completo: guest.full_name.clone(),
            idade: guest.age,
            vai_comparecer: guest.attending,
            qtd_acompanhantes: guest.companion_count,
            nomes_acompanhantes: guest.companion_names.clone(),
            mensagem_justificativa: guest.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_guest() -> Guest {
        Guest {
            id: "g1".to_string(),
            created_at: Utc::now(),
            full_name: "Beatriz Lima".to_string(),
            age: Some(34),
            attending: true,
            companion_count: 2,
            companion_names: Some("Ana (8 anos), Pedro".to_string()),
            message: None,
        }
    }

    #[test]
    fn test_party_size() {
        let mut guest = sample_guest();
        assert_eq!(guest.party_size(), 3);

        guest.attending = false;
        assert_eq!(guest.party_size(), 0);
    }

    #[test]
    fn test_wire_round_trip() {
        let guest = sample_guest();
        let row = GuestResponse::from(&guest);
        assert_eq!(row.nome_completo, "Beatriz Lima");
        assert_eq!(row.qtd_acompanhantes, 2);

        let back = Guest::try_from(row).unwrap();
        assert_eq!(back, guest);
    }

    #[test]
    fn test_try_from_normalizes_empty_strings() {
        let row = GuestResponse {
            id: "g1".to_string(),
            created_at: "2024-05-01T09:30:00+00:00".to_string(),
            nome_completo: "Beatriz Lima".to_string(),
            idade: None,
            vai_comparecer: false,
            qtd_acompanhantes: 0,
            nomes_acompanhantes: Some(String::new()),
            mensagem_justificativa: Some(String::new()),
        };

        let guest = Guest::try_from(row).unwrap();
        assert_eq!(guest.companion_names, None);
        assert_eq!(guest.message, None);
    }

    #[test]
    fn test_try_from_rejects_bad_timestamp() {
        let row = GuestResponse {
            id: "g1".to_string(),
            created_at: "last tuesday".to_string(),
            nome_completo: "Beatriz Lima".to_string(),
            idade: None,
            vai_comparecer: true,
            qtd_acompanhantes: 0,
            nomes_acompanhantes: None,
            mensagem_justificativa: None,
        };

        assert!(matches!(
            Guest::try_from(row),
            Err(GuestRowError::InvalidCreatedAt(_))
        ));
    }
}
