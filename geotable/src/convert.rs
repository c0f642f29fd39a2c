//! Session de conversion : une requête, une table, un writer
//!
//! Toute la conversion passe par une valeur de session explicite
//! ([`ConversionRequest`]) créée par requête ; aucun état global.

use tracing::{debug, info};

use crate::assemble::{
    assemble_from_rows, assemble_from_tracks, resolve_selection, FeatureRecord, VectorWriter,
    GROUPED_FIELDS,
};
use crate::fields::{derive_descriptors, infer_kind, FieldDescriptor};
use crate::geometry::{build_points, build_polygons, build_polylines, GeometryKind};
use crate::table::{Table, ValueKind};
use crate::track::group_into_tracks;
use crate::GeoTableError;

/// Paramètres d'une session de conversion.
///
/// Remplace les sélections que l'interface graphique accumulait en état
/// global : tout est fourni d'un bloc, la session est jetable.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Forme géométrique de la session (fixée une fois pour toutes)
    pub kind: GeometryKind,

    /// Colonne latitude (forme point uniquement)
    pub latitude_column: Option<String>,

    /// Colonne longitude (forme point uniquement)
    pub longitude_column: Option<String>,

    /// Identifiant EPSG, transmis tel quel au writer
    pub spatial_reference: u32,

    /// Colonnes sources à exporter comme attributs ;
    /// vide = toutes les colonnes éligibles
    pub selected_fields: Vec<String>,
}

/// Bilan d'une session réussie
#[derive(Debug, Clone, Copy)]
pub struct ConversionSummary {
    pub rows: usize,
    pub tracks: usize,
    pub features: usize,
}

/// Exécute une session complète : catalogue → (tracks) → géométries →
/// features → writer.
///
/// Tout-ou-rien : la première erreur interrompt la session et rien
/// n'est transmis au writer ; un writer conforme ne laisse de son côté
/// aucun artefact partiel.
pub fn convert(
    table: &Table,
    request: &ConversionRequest,
    writer: &mut dyn VectorWriter,
) -> Result<ConversionSummary, GeoTableError> {
    debug!(kind = ?request.kind, rows = table.n_rows(), "Starting conversion session");

    // 1. Catalogue des champs éligibles pour cette forme
    let available = eligible_descriptors(table, request.kind)?;

    // 2. Résolution de la sélection (vide = tout)
    let selected_names: Vec<String> = if request.selected_fields.is_empty() {
        available.iter().map(|d| d.original_name.clone()).collect()
    } else {
        request.selected_fields.clone()
    };
    let mut schema = resolve_selection(&available, &selected_names, request.kind)?;

    // 3. Types d'export des champs retenus
    fill_kinds(table, request.kind, &mut schema)?;

    // 4. Géométries puis features, dans l'ordre source
    let (features, n_tracks) = build_features(table, request, &schema)?;

    // 5. Remise au writer (schéma + features ordonnées)
    writer.write(request.spatial_reference, &schema, &features)?;

    let summary = ConversionSummary {
        rows: table.n_rows(),
        tracks: n_tracks,
        features: features.len(),
    };
    info!(
        features = summary.features,
        tracks = summary.tracks,
        srid = request.spatial_reference,
        "Conversion session complete"
    );
    Ok(summary)
}

/// Descripteurs dérivés des colonnes visibles par la forme demandée.
///
/// Une forme groupée ne voit que `name` et `elevation` (le contrat de
/// colonnes fixes est vérifié au regroupement) ; un point voit toutes
/// les colonnes de la table.
fn eligible_descriptors(
    table: &Table,
    kind: GeometryKind,
) -> Result<Vec<FieldDescriptor>, GeoTableError> {
    if kind.is_grouped() {
        for required in crate::track::REQUIRED_COLUMNS {
            if table.column(required).is_none() {
                return Err(GeoTableError::MissingRequiredColumn(required.to_string()));
            }
        }
        Ok(derive_descriptors(
            GROUPED_FIELDS.iter().map(|s| s.to_string()),
        ))
    } else {
        Ok(derive_descriptors(
            table.column_names().map(|s| s.to_string()),
        ))
    }
}

fn fill_kinds(
    table: &Table,
    kind: GeometryKind,
    schema: &mut [FieldDescriptor],
) -> Result<(), GeoTableError> {
    for descriptor in schema {
        descriptor.kind = if kind.is_grouped() {
            // Après regroupement, name est une clé textuelle et
            // elevation la moyenne flottante
            match descriptor.original_name.as_str() {
                "name" => ValueKind::String,
                _ => ValueKind::Real,
            }
        } else {
            let column = table
                .column(&descriptor.original_name)
                .ok_or_else(|| GeoTableError::UnknownColumn(descriptor.original_name.clone()))?;
            infer_kind(column)?
        };
    }
    Ok(())
}

fn build_features(
    table: &Table,
    request: &ConversionRequest,
    schema: &[FieldDescriptor],
) -> Result<(Vec<FeatureRecord>, usize), GeoTableError> {
    match request.kind {
        GeometryKind::Point => {
            let lat = request.latitude_column.as_deref().ok_or_else(|| {
                GeoTableError::invalid_geometry_input("latitude", "no latitude column selected")
            })?;
            let lon = request.longitude_column.as_deref().ok_or_else(|| {
                GeoTableError::invalid_geometry_input("longitude", "no longitude column selected")
            })?;
            let geometries = build_points(table, lat, lon)?;
            let features = assemble_from_rows(table, geometries, schema)?;
            Ok((features, 0))
        }
        GeometryKind::Polyline => {
            let tracks = group_into_tracks(table)?;
            let geometries = build_polylines(&tracks);
            let features = assemble_from_tracks(&tracks, geometries, schema);
            let n = tracks.len();
            Ok((features, n))
        }
        GeometryKind::Polygon => {
            let tracks = group_into_tracks(table)?;
            let geometries = build_polygons(&tracks)?;
            let features = assemble_from_tracks(&tracks, geometries, schema);
            let n = tracks.len();
            Ok((features, n))
        }
    }
}
