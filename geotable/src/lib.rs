//! # geotable
//!
//! Transformation de tables de données (lignes CSV typées) en features
//! vectorielles prêtes à écrire (WKT, schéma de champs, attributs).
//!
//! ## Features
//!
//! - Catalogue de champs : noms d'export uniques (≤ 10 caractères) et
//!   types inférés depuis les colonnes sources
//! - Regroupement des lignes en tracks par runs contigus de clé
//! - Trois formes géométriques (point, polyligne, polygone fermé) avec
//!   sérialisation WKT exacte et pont vers les types `geo`
//! - Erreurs typées de bout en bout, sessions tout-ou-rien
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geotable::{convert, ConversionRequest, GeometryKind, Table};
//!
//! let request = ConversionRequest {
//!     kind: GeometryKind::Point,
//!     latitude_column: Some("lat".to_string()),
//!     longitude_column: Some("lon".to_string()),
//!     spatial_reference: 4326,
//!     selected_fields: vec![],
//! };
//! let summary = convert(&table, &request, &mut writer)?;
//! println!("{} features", summary.features);
//! ```

pub mod assemble;
pub mod convert;
pub mod error;
pub mod fields;
pub mod geometry;
pub mod table;
pub mod track;

pub use assemble::{FeatureRecord, VectorWriter};
pub use convert::{convert, ConversionRequest, ConversionSummary};
pub use error::GeoTableError;
pub use fields::FieldDescriptor;
pub use geometry::{Geometry, GeometryKind};
pub use table::{Column, Number, Table, Value, ValueKind};
pub use track::{Node, Track};
