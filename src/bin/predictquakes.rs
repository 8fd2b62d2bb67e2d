use clap::Parser;
use log::{error, info};
use quakerisk::{
    get_zone_statistics, predict_possible_earthquakes, save_kml, PredictionSummary, QuakeDatabase,
    QuakeRiskResult,
};
use simple_logger::SimpleLogger;
use std::{
    fmt::{self, Display},
    path::PathBuf,
};

/*-------------------------------------------------------------------------------------------------
 *                                     Command Line Options
 *-----------------------------------------------------------------------------------------------*/

///
/// Rank the places in the Caraga region most at risk of a damaging earthquake.
///
/// The last year of earthquakes in the database is clustered and combined with the known fault
/// zones. The predictions are printed highest risk first, followed by summary statistics.
///
#[derive(Debug, Parser)]
#[clap(bin_name = "predictquakes")]
#[clap(author, version, about)]
struct PredictQuakesOptions {
    /// The path to the earthquake database file.
    ///
    /// If this is not specified, then the program will check for it in the "QUAKE_DB"
    /// environment variable.
    #[clap(short, long)]
    #[clap(env = "QUAKE_DB")]
    quake_store_file: PathBuf,

    /// The path to a KML file to produce from this run.
    ///
    /// If the extension is "kmz" the output is compressed. If this is not specified, no file is
    /// written.
    #[clap(short, long)]
    kml_file: Option<PathBuf>,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

impl Display for PredictQuakesOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "\n")?; // yes, two blank lines.
        writeln!(f, "    Database: {}", self.quake_store_file.display())?;
        match self.kml_file {
            Some(ref kml_file) => writeln!(f, "  Output KML: {}", kml_file.display())?,
            None => writeln!(f, "  Output KML: None")?,
        }
        writeln!(f, "\n")?; // yes, two blank lines.

        Ok(())
    }
}

/// Get the command line arguments and check them.
///
/// If there is missing data, try to fill it in with environment variables.
fn parse_args() -> QuakeRiskResult<PredictQuakesOptions> {
    let opts = PredictQuakesOptions::parse();

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

    let predictions = match predict_possible_earthquakes(&db) {
        Ok(predictions) => predictions,
        Err(err) => {
            error!("Prediction failed with status {}: {}", err.status(), err);
            return Err(err.into());
        }
    };

    let stats = match get_zone_statistics(&db) {
        Ok(stats) => stats,
        Err(err) => {
            error!("Statistics failed with status {}: {}", err.status(), err);
            return Err(err.into());
        }
    };
    drop(db);

    if opts.verbose {
        info!("Ranked {} locations.", predictions.len());
    }

    for (rank, pred) in predictions.iter().enumerate() {
        println!("{:>3}.", rank + 1);
        println!("{}", pred);
    }

    println!("{}", stats);
    println!("{}", PredictionSummary::from_predictions(&predictions));

    if let Some(ref kml_file) = opts.kml_file {
        save_kml(&predictions, kml_file)?;
    }

    Ok(())
}
