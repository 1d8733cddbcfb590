use super::{http_client, supported_cycles};
use crate::cli::OutputFormat;
use crate::config::types::Config;
use crate::error::{Result, SyncError};
use crate::versions::{ReleaseCycle, today};
use chrono::NaiveDate;

pub fn handle_supported(config: &Config, format: OutputFormat) -> Result<()> {
    let client = http_client(config)?;
    let today = today();
    let supported = supported_cycles(&client, config, today)?;

    let output = match format {
        OutputFormat::Table => format_table(&supported, today)?,
        OutputFormat::Json => serde_json::to_string_pretty(&supported)
            .map_err(|e| SyncError::decode("supported cycles", e))?,
    };
    println!("{}", output);
    Ok(())
}

fn format_table(cycles: &[ReleaseCycle], today: NaiveDate) -> Result<String> {
    let mut out = format!(
        "{:<8} {:<12} {:<12} {:<10} {}\n",
        "CYCLE", "LATEST", "RELEASED", "EOL", "DAYS LEFT"
    );
    for cycle in cycles {
        let days_left = (cycle.eol_date()? - today).num_days();
        out.push_str(&format!(
            "{:<8} {:<12} {:<12} {:<10} {}\n",
            cycle.cycle, cycle.latest, cycle.release_date, cycle.eol, days_left
        ));
    }
    Ok(out.trim_end().to_string())
}
