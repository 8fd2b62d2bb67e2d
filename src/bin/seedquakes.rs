use chrono::{Duration, Local};
use clap::Parser;
use log::info;
use quakerisk::{EventType, QuakeDatabase, QuakeRiskResult, SeismicEvent};
use simple_logger::SimpleLogger;
use std::{
    fmt::{self, Display},
    path::PathBuf,
};

/*-------------------------------------------------------------------------------------------------
 *                                     Command Line Options
 *-----------------------------------------------------------------------------------------------*/

///
/// Load the sample Caraga earthquakes into a database.
///
/// The events are dated relative to the time this program is run, so the analysis always has
/// recent activity to work with. Running it more than once does not duplicate any events.
///
#[derive(Debug, Parser)]
#[clap(bin_name = "seedquakes")]
#[clap(author, version, about)]
struct SeedQuakesOptions {
    /// The path to the earthquake database file.
    ///
    /// If this is not specified, then the program will check for it in the "QUAKE_DB"
    /// environment variable.
    #[clap(short, long)]
    #[clap(env = "QUAKE_DB")]
    quake_store_file: PathBuf,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

impl Display for SeedQuakesOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "\n")?; // yes, two blank lines.
        writeln!(f, "    Database: {}", self.quake_store_file.display())?;
        writeln!(f, "\n")?; // yes, two blank lines.

        Ok(())
    }
}

/// Get the command line arguments and check them.
///
/// If there is missing data, try to fill it in with environment variables.
fn parse_args() -> QuakeRiskResult<SeedQuakesOptions> {
    let opts = SeedQuakesOptions::parse();

    if opts.verbose {
        info!(target: "startup", "{}", opts);
    }

    Ok(opts)
}

/*-------------------------------------------------------------------------------------------------
 *                                        Sample Data
 *-----------------------------------------------------------------------------------------------*/

#[rustfmt::skip]
const SAMPLE_QUAKES: [(&str, f64, f64, f64, f64, EventType, i64, &str); 8] = [
    ("EQ001-2025-11", 6.8, 8.9750, 125.5350, 15.5, EventType::MainShock, 2, "Significant earthquake near Butuan City"),
    ("EQ002-2025-11", 5.2, 8.2422, 125.2449, 22.3, EventType::Aftershock, 2, "Aftershock following main earthquake"),
    ("EQ003-2025-11", 7.1, 9.2100, 125.7800, 18.0, EventType::MainShock, 5, "High magnitude earthquake in northern Caraga"),
    ("EQ004-2025-11", 4.8, 8.6200, 125.4100, 12.8, EventType::Aftershock, 1, "Minor aftershock in central region"),
    ("EQ005-2025-11", 5.9, 8.4500, 125.6200, 25.5, EventType::MainShock, 7, "Moderate earthquake in eastern Caraga"),
    ("EQ006-2025-11", 4.3, 8.1800, 125.3300, 20.0, EventType::Aftershock, 3, "Light aftershock near Butuan region"),
    ("EQ007-2025-11", 6.2, 9.0500, 125.4500, 16.2, EventType::MainShock, 10, "Moderate-strong earthquake in Caraga"),
    ("EQ008-2025-11", 5.5, 8.3200, 125.5800, 19.5, EventType::MainShock, 14, "Moderate earthquake in central Caraga"),
];

/*-------------------------------------------------------------------------------------------------
 *                                             MAIN
 *-----------------------------------------------------------------------------------------------*/
fn main() -> QuakeRiskResult<()> {
    SimpleLogger::new().init()?;

    let opts = parse_args()?;

    let db = QuakeDatabase::connect(&opts.quake_store_file)?;
    let mut add_stmt = db.prepare_to_add_quakes()?;

    let region_id = add_stmt.add_region(
        "Caraga",
        Some("CAR"),
        Some("Caraga Administrative Region"),
    )?;

    let now = Local::now().naive_local();
    let quakes: Vec<SeismicEvent> = SAMPLE_QUAKES
        .iter()
        .map(
            |&(event_id, magnitude, lat, lon, depth, event_type, days_ago, description)| {
                SeismicEvent {
                    id: 0,
                    event_id: event_id.to_owned(),
                    magnitude,
                    lat,
                    lon,
                    depth,
                    event_type,
                    description: Some(description.to_owned()),
                    triggered_at: now - Duration::days(days_ago),
                    recorded_at: now,
                    region_id,
                }
            },
        )
        .collect();

    let num_added = add_stmt.add_quakes(&quakes)?;

    info!(target: "seed",
        "Added {} of {} sample earthquakes, {} were already present.",
        num_added, quakes.len(), quakes.len() - num_added);

    Ok(())
}
