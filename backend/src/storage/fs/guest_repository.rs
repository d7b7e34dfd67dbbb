//! CSV-file guest repository.

use anyhow::Result;
use csv::{Reader, Writer};
use log::{info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};

use shared::GuestResponse;

use crate::domain::models::guest::Guest;
use crate::storage::traits::GuestStorage;

use super::connection::FsConnection;

/// Guest repository backed by a single CSV file whose header carries the
/// wire column names (`nome_completo`, `vai_comparecer`, ...).
#[derive(Clone)]
pub struct GuestRepository {
    connection: FsConnection,
}

impl GuestRepository {
    pub fn new(connection: FsConnection) -> Self {
        Self { connection }
    }

    fn read_guests(&self) -> Result<Vec<Guest>> {
        let file_path = self.connection.guests_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut guests = Vec::new();
        for result in csv_reader.deserialize::<GuestResponse>() {
            // One bad row must not take the whole guest list down.
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping unreadable guest row: {}", e);
                    continue;
                }
            };
            match Guest::try_from(row) {
                Ok(guest) => guests.push(guest),
                Err(e) => warn!("Skipping invalid guest row: {}", e),
            }
        }
        Ok(guests)
    }

    fn write_guests(&self, guests: &[Guest]) -> Result<()> {
        let file_path = self.connection.guests_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            for guest in guests {
                csv_writer.serialize(GuestResponse::from(guest))?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

impl GuestStorage for GuestRepository {
    fn store_guest(&self, guest: &Guest) -> Result<()> {
        let mut guests = self.read_guests()?;
        guests.push(guest.clone());
        self.write_guests(&guests)?;
        info!("Stored guest response {} ({})", guest.id, guest.full_name);
        Ok(())
    }

    fn list_guests(&self) -> Result<Vec<Guest>> {
        let mut guests = self.read_guests()?;
        guests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(guests)
    }
}
