//! Construction des géométries et sérialisation WKT
//!
//! Trois formes fermées (point, polyligne, polygone), choisies une fois
//! par session. Le stockage interne est (latitude, longitude) ; le WKT
//! impose X,Y = (longitude, latitude), la conversion se fait ici.

use std::fmt::Write as _;

use geo::{Coord, LineString, Point, Polygon};

use crate::table::Table;
use crate::track::{Node, Track};
use crate::GeoTableError;

/// Forme géométrique d'une session de conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    Polyline,
    Polygon,
}

impl GeometryKind {
    /// La forme passe-t-elle par le regroupement en tracks ?
    pub fn is_grouped(&self) -> bool {
        matches!(self, GeometryKind::Polyline | GeometryKind::Polygon)
    }
}

/// Géométrie construite, prête pour le writer
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Un point (noeud unique)
    Point(Node),

    /// Une polyligne ouverte
    LineString(Vec<Node>),

    /// Un anneau fermé : premier noeud == dernier noeud
    Polygon(Vec<Node>),
}

impl Geometry {
    /// Sérialise en WKT, au format exact attendu en aval :
    /// `POINT(<lon> <lat>)`, `LINESTRING (<lon> <lat>,...)`,
    /// `POLYGON ((<lon> <lat>,...))`
    pub fn to_wkt(&self) -> String {
        match self {
            Geometry::Point(node) => format!("POINT({} {})", node.lon, node.lat),
            Geometry::LineString(nodes) => {
                format!("LINESTRING ({})", join_nodes(nodes))
            }
            Geometry::Polygon(nodes) => {
                format!("POLYGON (({}))", join_nodes(nodes))
            }
        }
    }

    /// Conversion vers les types `geo` pour les backends d'export
    pub fn to_geo(&self) -> geo::Geometry {
        match self {
            Geometry::Point(node) => geo::Geometry::Point(Point::new(
                node.lon.as_f64(),
                node.lat.as_f64(),
            )),
            Geometry::LineString(nodes) => {
                geo::Geometry::LineString(LineString::new(coords(nodes)))
            }
            Geometry::Polygon(nodes) => {
                geo::Geometry::Polygon(Polygon::new(LineString::new(coords(nodes)), vec![]))
            }
        }
    }
}

fn coords(nodes: &[Node]) -> Vec<Coord> {
    nodes
        .iter()
        .map(|n| Coord {
            x: n.lon.as_f64(),
            y: n.lat.as_f64(),
        })
        .collect()
}

/// Joint les noeuds en `lon lat` séparés par des virgules (sans espace)
fn join_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // write! sur String ne peut pas échouer
        let _ = write!(out, "{} {}", node.lon, node.lat);
    }
    out
}

/// Construit un point par ligne depuis les colonnes choisies.
///
/// Tout-ou-rien : la première valeur non numérique (ou une colonne
/// introuvable) fait échouer la conversion entière, aucune géométrie
/// partielle n'est retournée.
pub fn build_points(
    table: &Table,
    lat_column: &str,
    lon_column: &str,
) -> Result<Vec<Geometry>, GeoTableError> {
    for column in [lat_column, lon_column] {
        if table.column(column).is_none() {
            return Err(GeoTableError::invalid_geometry_input(
                column,
                "column not found in source table",
            ));
        }
    }

    let mut geometries = Vec::with_capacity(table.n_rows());
    for row in 0..table.n_rows() {
        let lat = numeric_cell(table, row, lat_column)?;
        let lon = numeric_cell(table, row, lon_column)?;
        geometries.push(Geometry::Point(Node { lat, lon }));
    }
    Ok(geometries)
}

fn numeric_cell(
    table: &Table,
    row: usize,
    column: &str,
) -> Result<crate::table::Number, GeoTableError> {
    // La colonne existe (vérifiée en amont), la ligne est dans les bornes
    let value = table.value(row, column).ok_or_else(|| {
        GeoTableError::invalid_geometry_input(column, format!("missing value at row {row}"))
    })?;
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

/// Construit une polyligne par track, dans l'ordre des tracks.
/// Les noeuds gardent leur ordre d'origine, sans fermeture.
pub fn build_polylines(tracks: &[Track]) -> Vec<Geometry> {
    tracks
        .iter()
        .map(|t| Geometry::LineString(t.nodes.clone()))
        .collect()
}

/// Construit un polygone fermé par track.
///
/// L'anneau est fermé en répétant le premier noeud en fin de suite.
/// Un track de moins de 3 noeuds distincts ne peut pas former un
/// anneau et fait échouer la session.
pub fn build_polygons(tracks: &[Track]) -> Result<Vec<Geometry>, GeoTableError> {
    tracks
        .iter()
        .map(|track| {
            let distinct = count_distinct(&track.nodes);
            if distinct < 3 {
                return Err(GeoTableError::DegenerateGeometry {
                    track: track.name.clone(),
                    distinct,
                });
            }
            let mut ring = track.nodes.clone();
            ring.push(ring[0]);
            Ok(Geometry::Polygon(ring))
        })
        .collect()
}

/// Compare deux noeuds avec tolérance
fn nodes_equal(a: Node, b: Node) -> bool {
    const TOLERANCE: f64 = 1e-6;
    (a.lon.as_f64() - b.lon.as_f64()).abs() < TOLERANCE
        && (a.lat.as_f64() - b.lat.as_f64()).abs() < TOLERANCE
}

fn count_distinct(nodes: &[Node]) -> usize {
    let mut distinct: Vec<Node> = Vec::new();
    for &node in nodes {
        if !distinct.iter().any(|&seen| nodes_equal(seen, node)) {
            distinct.push(node);
        }
    }
    distinct.len()
}
