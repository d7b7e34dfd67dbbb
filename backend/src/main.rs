//! Smoke binary: prints a JSON status report for a data directory.
//!
//! Usage: `celebra-backend [data-dir]`. Defaults to the standard data
//! directory when no argument is given.

use anyhow::Result;
use log::info;

use celebra_backend::Backend;

fn main() -> Result<()> {
    env_logger::init();

    let backend = match std::env::args().nth(1) {
        Some(data_dir) => Backend::new(data_dir)?,
        None => Backend::new_default()?,
    };

    let members = backend.member_service.list_members()?;
    info!("Loaded {} members", members.members.len());

    let report = serde_json::json!({
        "lineage": backend.lineage_service.stats()?,
        "rsvp": backend.guest_service.summary()?,
        "graph": backend.lineage_service.family_graph()?,
        "timeline": backend.lineage_service.timeline()?,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
