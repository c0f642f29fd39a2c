//! Définition et implémentation des commandes CLI
//!
//! Une seule commande :
//! - `convert` : CSV → GeoJSON ou CSV à colonne WKT

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use tracing::info;

use geotable::{convert, ConversionRequest, ConversionSummary, GeometryKind};

use crate::export::{GeoJsonFileWriter, WktCsvWriter};
use crate::load::load_csv;
use crate::report::ConversionReport;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CSV file into vector features
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the source CSV file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (.geojson or .csv)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Geometry kind built for each feature
    #[arg(short, long, value_enum, default_value_t = GeometryArg::Point)]
    pub geometry: GeometryArg,

    /// Latitude column (point geometry only)
    #[arg(long)]
    pub lat: Option<String>,

    /// Longitude column (point geometry only)
    #[arg(long)]
    pub lon: Option<String>,

    /// EPSG spatial reference identifier (défaut : 4326 / WGS84)
    #[arg(long, default_value_t = 4326)]
    pub srid: u32,

    /// Fields to export as attributes (comma-separated or repeated; default: all eligible)
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Geojson)]
    pub format: FormatArg,

    /// Print the conversion report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Forme géométrique côté CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeometryArg {
    Point,
    Polyline,
    Polygon,
}

impl From<GeometryArg> for GeometryKind {
    fn from(arg: GeometryArg) -> Self {
        match arg {
            GeometryArg::Point => GeometryKind::Point,
            GeometryArg::Polyline => GeometryKind::Polyline,
            GeometryArg::Polygon => GeometryKind::Polygon,
        }
    }
}

/// Format de sortie côté CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Geojson,
    /// CSV avec une colonne `wkt` en tête
    WktCsv,
}

/// Exécute la commande convert
pub fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let started = Instant::now();

    let table = load_csv(&args.input)
        .with_context(|| format!("Failed to load CSV: {}", args.input.display()))?;
    info!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        "Loaded source table"
    );

    let request = ConversionRequest {
        kind: args.geometry.into(),
        latitude_column: args.lat.clone(),
        longitude_column: args.lon.clone(),
        spatial_reference: args.srid,
        selected_fields: args.fields.clone(),
    };

    let summary = run_conversion(&table, &request, &args)
        .with_context(|| format!("Conversion failed for {}", args.input.display()))?;

    let report = ConversionReport::new(&args, &summary, started.elapsed());
    if args.json {
        report.print_json()?;
    } else {
        report.print_human();
    }

    Ok(())
}

fn run_conversion(
    table: &geotable::Table,
    request: &ConversionRequest,
    args: &ConvertArgs,
) -> Result<ConversionSummary, geotable::GeoTableError> {
    match args.format {
        FormatArg::Geojson => {
            let mut writer = GeoJsonFileWriter::new(&args.output);
            convert(table, request, &mut writer)
        }
        FormatArg::WktCsv => {
            let mut writer = WktCsvWriter::new(&args.output);
            convert(table, request, &mut writer)
        }
    }
}
