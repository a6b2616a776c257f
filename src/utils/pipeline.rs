use anyhow::Result;
use log::{debug, info};

use crate::utils::output::{read_schedule, render_json, write_schedule};
use crate::utils::reshape::reshape;
use crate::utils::settings::Settings;
use crate::utils::unicatt::retrieve_schedule;

// Fetches, reshapes and persists the schedule. The output file is only touched once
// everything before the write has succeeded.
pub async fn pull_schedule(settings: &Settings) -> Result<String> {
    let raw = retrieve_schedule(settings).await?;
    info!("Schedule retrieved successfully ({} days)", raw.lezioni_calendario.len());

    // Groups the lessons under their date with the simplified field names.
    let schedule = reshape(raw);
    let pretty = render_json(&schedule)?;

    println!("{}", pretty);

    // The previous file is replaced wholesale, never merged.
    if let Ok(previous) = read_schedule(&settings.output_path) {
        debug!("Replacing schedule last refreshed at {}", previous.last_executed);
    }

    write_schedule(&settings.output_path, &pretty)?;
    Ok(pretty)
}
