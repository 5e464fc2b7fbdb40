#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::error::Error as _;
use std::path::PathBuf;

use structopt::StructOpt;
use tracing::{error, info, warn, Level};

use health_center_map::{
    load_centers, nearby_icu_centers, render_map, total_beds_accessible, LatLon, Result,
};

#[derive(StructOpt)]
#[structopt(name = "centros", about = "Query healthcare centers and map the ones with an ICU nearby")]
struct Args {
    #[structopt(
        short = "i",
        long = "input",
        parse(from_os_str),
        default_value = "./data/centrosSanitarios.csv"
    )]
    input: PathBuf,
    /// Log at debug level
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(StructOpt)]
enum Command {
    /// Print every center in the input file
    List,
    /// Print the total number of beds in centers with disability access
    Beds,
    /// Print the centers with an ICU near a point and draw them on a map
    Nearby {
        /// Reference point as <lat>,<lon>
        #[structopt(short = "p", long = "point", allow_hyphen_values = true)]
        point: LatLon,
        /// Maximum straight-line distance, in degrees
        #[structopt(short = "t", long = "threshold", default_value = "0.5")]
        threshold: f64,
        #[structopt(
            short = "o",
            long = "output",
            parse(from_os_str),
            default_value = "./centros_cercanos.html"
        )]
        output: PathBuf,
    },
}

fn run(args: Args) -> Result<()> {
    info!("Reading centers from {}...", args.input.display());
    let centers = load_centers(&args.input)?;
    info!("Loaded {} centers", centers.len());

    match args.command.unwrap_or(Command::List) {
        Command::List => {
            for c in &centers {
                println!("{}", c);
            }
        }
        Command::Beds => {
            println!("{}", total_beds_accessible(&centers));
        }
        Command::Nearby {
            point,
            threshold,
            output,
        } => {
            let nearby = nearby_icu_centers(&centers, point, threshold);
            for c in &nearby {
                println!("{}", c);
            }

            if nearby.is_empty() {
                warn!("No center with ICU within {} of {}, no map written", threshold, point);
            } else {
                render_map(&nearby, &output)?;
                info!("Map saved to {}", output.display());
            }
        }
    }

    Ok(())
}

fn main() {
    let args = Args::from_args();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        error!("{}", e);
        if let Some(source) = e.source() {
            error!("caused by: {}", source);
        }
        std::process::exit(1);
    }
}
