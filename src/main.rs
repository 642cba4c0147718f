use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use parcelgrid::config::FileConfig;
use parcelgrid::domain::{GeoPoint, Polygon};
use parcelgrid::geometry::{area_m2, bounding_box, epsilon_for_meters, simplify_ring};
use parcelgrid::raster::{DEFAULT_EXPORT_NAME, Rasterizer, write_matrix};
use parcelgrid::store::{FileStore, HttpStore, ParcelId, ParcelStore};

/// Rasterize land parcel polygons into binary occupancy grids
///
/// Examples:
///   # List the polygons stored for parcel 12
///   parcelgrid show 12
///
///   # Rasterize the second polygon at 100x100 and write it to grid.txt
///   parcelgrid rasterize 12 --index 1 -r 100 -o grid.txt
///
///   # Rasterize the whole parcel (all polygons combined) to stdout
///   parcelgrid rasterize 12 --print
///
///   # Add a triangle, then remove the first polygon
///   parcelgrid add 12 "37.7749,-122.4194;37.7749,-122.4180;37.7760,-122.4180"
///   parcelgrid remove 12 0
///
///   # Work against the land API instead of local files
///   PARCELGRID_TOKEN=... parcelgrid --api-url http://localhost:3000 show 12
#[derive(Parser, Debug)]
#[command(name = "parcelgrid")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches parcelgrid.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of <parcel>.json files (defaults to ./parcels)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Base URL of the land record API; overrides --store-dir
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a parcel's polygons with vertex counts, bounds and area
    Show { parcel: ParcelId },

    /// Rasterize one polygon, or all of them combined, into a 0/1 matrix
    Rasterize {
        parcel: ParcelId,

        /// Polygon index (defaults to the union of every polygon)
        #[arg(short = 'i', long)]
        index: Option<usize>,

        /// Sample steps per axis
        #[arg(short = 'r', long)]
        resolution: Option<usize>,

        /// Output text file (defaults to polygon_binary_matrix.txt)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Print the matrix to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        print: bool,
    },

    /// Append a polygon given as "lat,lng;lat,lng;..."
    Add {
        parcel: ParcelId,
        #[arg(allow_hyphen_values = true)]
        points: String,
    },

    /// Remove the polygon at an index; later polygons shift down one
    Remove { parcel: ParcelId, index: usize },

    /// Drop near-collinear vertices from a polygon
    Simplify {
        parcel: ParcelId,
        index: usize,

        /// Tolerance in meters
        #[arg(long, default_value = "1.0")]
        tolerance: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    run(&args, &config)
}

fn run(args: &Args, config: &FileConfig) -> Result<()> {
    let verbose = args.verbose || config.verbose;
    let store = open_store(args, config, verbose)?;

    match &args.command {
        Command::Show { parcel } => show(store.as_ref(), *parcel),
        Command::Rasterize {
            parcel,
            index,
            resolution,
            output,
            print,
        } => {
            let resolution = config.resolve_resolution(*resolution)?;
            let output = if *print {
                None
            } else {
                Some(
                    output
                        .clone()
                        .or_else(|| config.output.clone())
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_NAME)),
                )
            };
            rasterize(store.as_ref(), *parcel, *index, resolution, output)
        }
        Command::Add { parcel, points } => {
            let polygon = Polygon::new(parse_points(points)?)?;
            let mut set = store.load(*parcel)?;
            let index = set.add(polygon);
            store.save(*parcel, &set).context("Failed to save polygons")?;
            println!("Added polygon {} to parcel {}", index, parcel);
            Ok(())
        }
        Command::Remove { parcel, index } => {
            let mut set = store.load(*parcel)?;
            let removed = set.remove_at(*index)?;
            store.save(*parcel, &set).context("Failed to save polygons")?;
            println!(
                "Removed polygon {} ({} vertices) from parcel {}; {} remaining",
                index,
                removed.vertex_count(),
                parcel,
                set.len()
            );
            Ok(())
        }
        Command::Simplify {
            parcel,
            index,
            tolerance,
        } => {
            let mut set = store.load(*parcel)?;
            let before = set.try_get(*index)?.vertex_count();
            let simplified = simplify_ring(set.try_get(*index)?, epsilon_for_meters(*tolerance));
            let after = simplified.vertex_count();
            set.replace_vertex_path(*index, simplified)?;
            store.save(*parcel, &set).context("Failed to save polygons")?;
            println!(
                "Simplified polygon {}: {} -> {} vertices",
                index, before, after
            );
            Ok(())
        }
    }
}

fn open_store(args: &Args, config: &FileConfig, verbose: bool) -> Result<Box<dyn ParcelStore>> {
    let api_url = args
        .api_url
        .clone()
        .or_else(|| config.store.api_url.clone());

    if let Some(url) = api_url {
        let token = config.store.token();
        if token.is_none() {
            log::warn!(
                "{} is not set, sending requests without a token",
                config.store.token_env
            );
        }
        if verbose {
            println!("Store: land API at {}", url);
        }
        let store = HttpStore::new(
            &url,
            token,
            Duration::from_secs(config.store.timeout_secs),
        )?
        .with_max_retries(config.store.max_retries);
        return Ok(Box::new(store));
    }

    let dir = args
        .store_dir
        .clone()
        .or_else(|| config.store.dir.clone())
        .unwrap_or_else(|| PathBuf::from("parcels"));
    if verbose {
        println!("Store: files in {}", dir.display());
    }
    Ok(Box::new(FileStore::new(dir)))
}

fn show(store: &dyn ParcelStore, parcel: ParcelId) -> Result<()> {
    let set = store.load(parcel)?;
    if set.is_empty() {
        println!("Parcel {} has no polygons", parcel);
        return Ok(());
    }

    println!("Parcel {}: {} polygons", parcel, set.len());
    for (i, polygon) in set.iter().enumerate() {
        let b = bounding_box(polygon);
        println!(
            "  [{}] {} vertices, lat {:.6}..{:.6}, lng {:.6}..{:.6}, ~{:.1} m²{}",
            i,
            polygon.vertex_count(),
            b.min_lat,
            b.max_lat,
            b.min_lng,
            b.max_lng,
            area_m2(polygon),
            if polygon.is_valid() { "" } else { " (degenerate)" }
        );
    }
    Ok(())
}

fn rasterize(
    store: &dyn ParcelStore,
    parcel: ParcelId,
    index: Option<usize>,
    resolution: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let set = store.load(parcel)?;
    if set.is_empty() {
        bail!("Parcel {} has no polygons to rasterize", parcel);
    }

    let rasterizer = Rasterizer::new(resolution);
    let spinner = create_spinner(&format!(
        "Rasterizing at {}x{}...",
        resolution, resolution
    ));
    let start = Instant::now();

    let matrix = match index {
        Some(i) => rasterizer.rasterize(set.try_get(i)?),
        None => rasterizer.rasterize_union(&set),
    };

    spinner.finish_with_message(format!(
        "Rasterized {} [{} of {} cells inside, {:.1}%] [{:.2}s]",
        index.map_or_else(|| "all polygons".to_string(), |i| format!("polygon {}", i)),
        matrix.filled_cells(),
        matrix.height() * matrix.width(),
        matrix.coverage() * 100.0,
        start.elapsed().as_secs_f32()
    ));

    match output {
        Some(path) => {
            write_matrix(&path, &matrix).context("Failed to write matrix")?;
            println!("Output: {}", path.display());
        }
        None => println!("{}", matrix.export_text()),
    }
    Ok(())
}

/// Parse "lat,lng;lat,lng;..." into points
fn parse_points(raw: &str) -> Result<Vec<GeoPoint>> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (lat, lng) = pair
                .split_once(',')
                .with_context(|| format!("Expected lat,lng but got {:?}", pair))?;
            let lat: f64 = lat
                .trim()
                .parse()
                .with_context(|| format!("Invalid latitude in {:?}", pair))?;
            let lng: f64 = lng
                .trim()
                .parse()
                .with_context(|| format!("Invalid longitude in {:?}", pair))?;
            Ok(GeoPoint::new(lat, lng))
        })
        .collect()
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
