//! Regroupement des lignes en tracks (suites contiguës de même nom)

use tracing::debug;

use crate::table::{Number, Table};
use crate::GeoTableError;

/// Colonnes imposées par le contrat d'entrée des formes groupées
pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "latitude", "longitude", "elevation"];

/// Un noeud de track : paire (latitude, longitude) telle que stockée
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub lat: Number,
    pub lon: Number,
}

/// Suite ordonnée de noeuds partageant une même clé `name`
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub nodes: Vec<Node>,
    pub elevation_mean: f64,
}

/// Partitionne les lignes en tracks par runs contigus de `name`.
///
/// Précondition côté appelant : les lignes de même clé sont contiguës.
/// Aucun tri ni fusion n'est fait ici ; une clé qui réapparaît plus loin
/// ouvre un nouveau track distinct.
///
/// Chaque ligne fournit un noeud (latitude, longitude) et son élévation
/// (flottante) à la moyenne du track. Un track compte toujours au moins
/// un noeud, la moyenne est donc définie.
pub fn group_into_tracks(table: &Table) -> Result<Vec<Track>, GeoTableError> {
    for required in REQUIRED_COLUMNS {
        if table.column(required).is_none() {
            return Err(GeoTableError::MissingRequiredColumn(required.to_string()));
        }
    }

    let mut tracks: Vec<Track> = Vec::new();
    let mut current: Option<PartialTrack> = None;

    for row in 0..table.n_rows() {
        let name = table
            .value(row, "name")
            .map(|v| v.to_string())
            .unwrap_or_default();
        let node = read_node(table, row)?;
        let elevation = read_elevation(table, row)?;

        match current.as_mut() {
            Some(partial) if partial.name == name => {
                partial.nodes.push(node);
                partial.elevation_sum += elevation;
            }
            _ => {
                // Changement de clé (ou toute première ligne) : finaliser
                // le run en cours et en ouvrir un nouveau
                if let Some(done) = current.take() {
                    tracks.push(done.finalize());
                }
                current = Some(PartialTrack {
                    name,
                    nodes: vec![node],
                    elevation_sum: elevation,
                });
            }
        }
    }

    if let Some(done) = current.take() {
        tracks.push(done.finalize());
    }

    debug!(tracks = tracks.len(), rows = table.n_rows(), "Grouped rows into tracks");
    Ok(tracks)
}

/// Run en cours de construction
struct PartialTrack {
    name: String,
    nodes: Vec<Node>,
    elevation_sum: f64,
}

impl PartialTrack {
    fn finalize(self) -> Track {
        // nodes n'est jamais vide : un run démarre toujours avec un noeud
        let elevation_mean = self.elevation_sum / self.nodes.len() as f64;
        Track {
            name: self.name,
            nodes: self.nodes,
            elevation_mean,
        }
    }
}

fn read_node(table: &Table, row: usize) -> Result<Node, GeoTableError> {
    let lat = read_number(table, row, "latitude")?;
    let lon = read_number(table, row, "longitude")?;
    Ok(Node { lat, lon })
}

fn read_number(table: &Table, row: usize, column: &str) -> Result<Number, GeoTableError> {
    let value = table
        .value(row, column)
        .ok_or_else(|| GeoTableError::MissingRequiredColumn(column.to_string()))?;
    let number = value.as_number().ok_or_else(|| {
        GeoTableError::invalid_geometry_input(
            column,
            format!("non-numeric value `{value}` at row {row}"),
        )
    })?;
    // inf/nan passent le parsing mais produiraient un WKT invalide
    if !number.as_f64().is_finite() {
        return Err(GeoTableError::invalid_geometry_input(
            column,
            format!("non-finite value `{value}` at row {row}"),
        ));
    }
    Ok(number)
}

fn read_elevation(table: &Table, row: usize) -> Result<f64, GeoTableError> {
    let value = table
        .value(row, "elevation")
        .ok_or_else(|| GeoTableError::MissingRequiredColumn("elevation".to_string()))?;
    let elevation = value.as_f64().ok_or_else(|| {
        GeoTableError::invalid_geometry_input(
            "elevation",
            format!("non-numeric value `{value}` at row {row}"),
        )
    })?;
    if !elevation.is_finite() {
        return Err(GeoTableError::invalid_geometry_input(
            "elevation",
            format!("non-finite value `{value}` at row {row}"),
        ));
    }
    Ok(elevation)
}
