//! # csv2geo
//!
//! Conversion de fichiers CSV en features vectorielles.
//!
//! ## Features
//!
//! - Chargement CSV avec promotion de type par colonne (entier, réel, texte)
//! - Trois formes géométriques : point, polyligne, polygone
//! - Sorties GeoJSON (FeatureCollection + CRS) ou CSV à colonne WKT
//! - CLI simple
//!
//! ## Usage CLI
//!
//! ```bash
//! # Points depuis des colonnes lat/lon
//! csv2geo convert -i cities.csv -o cities.geojson --geometry point --lat lat --lon lon
//!
//! # Polygones depuis des lignes groupées par `name`
//! csv2geo convert -i parcels.csv -o parcels.geojson --geometry polygon --fields name,elevation
//! ```

pub mod cli;
pub mod export;
pub mod load;
pub mod report;

pub use export::{GeoJsonFileWriter, WktCsvWriter};
pub use load::load_csv;
pub use report::ConversionReport;
