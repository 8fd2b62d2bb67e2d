use clap::Parser;
use log::info;
use quakerisk::{quakes_near, Coord, QuakeDatabase, QuakeRiskResult};
use simple_logger::SimpleLogger;
use std::{
    fmt::{self, Display},
    path::PathBuf,
};

/*-------------------------------------------------------------------------------------------------
 *                                     Command Line Options
 *-----------------------------------------------------------------------------------------------*/

/// List the earthquakes in the database within a distance of a location.
#[derive(Debug, Parser)]
#[clap(bin_name = "nearquakes")]
#[clap(author, version, about)]
struct NearQuakesOptions {
    /// Latitude of the location in degrees.
    #[clap(allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the location in degrees.
    #[clap(allow_hyphen_values = true)]
    lon: f64,

    /// The search radius in kilometers.
    #[clap(short, long)]
    #[clap(default_value_t = 50.0)]
    radius_km: f64,

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

impl Display for NearQuakesOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "\n")?; // yes, two blank lines.
        writeln!(f, "    Database: {}", self.quake_store_file.display())?;
        writeln!(f, "    Location: {:.4},{:.4}", self.lat, self.lon)?;
        writeln!(f, "      Radius: {} km", self.radius_km)?;
        writeln!(f, "\n")?; // yes, two blank lines.

        Ok(())
    }
}

/// Get the command line arguments and check them.
///
/// If there is missing data, try to fill it in with environment variables.
fn parse_args() -> QuakeRiskResult<NearQuakesOptions> {
    let opts = NearQuakesOptions::parse();

    if opts.radius_km < 0.0 {
        return Err(format!("Search radius must not be negative: {}", opts.radius_km).into());
    }

    if opts.verbose {
        info!(target: "startup", "{}", opts);
    }

    Ok(opts)
}

/*-------------------------------------------------------------------------------------------------
 *                                             MAIN
 *-----------------------------------------------------------------------------------------------*/
fn main() -> QuakeRiskResult<()> {
    SimpleLogger::new().init()?;

    let opts = parse_args()?;

    let db = QuakeDatabase::connect(&opts.quake_store_file)?;
    let all_quakes = db.all_quakes()?;
    drop(db);

    let center = Coord {
        lat: opts.lat,
        lon: opts.lon,
    };
    let nearby = quakes_near(&all_quakes, center, opts.radius_km);

    if opts.verbose {
        info!("{} of {} earthquakes are nearby.", nearby.len(), all_quakes.len());
    }

    println!(
        "{:^13} {:^4} {:^9} {:^9} {:^6} {:^10} {:^19}",
        "EVENT", "MAG", "LAT", "LON", "DEPTH", "TYPE", "TIME"
    );
    for eq in &nearby {
        println!(
            "{:13} {:4.1} {:9.4} {:9.4} {:6.1} {:10} {}",
            eq.event_id,
            eq.magnitude,
            eq.lat,
            eq.lon,
            eq.depth,
            <&str>::from(eq.event_type),
            eq.triggered_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}
