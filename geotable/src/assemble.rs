//! Assemblage des features et contrat du writer externe

use std::collections::{HashMap, HashSet};

use crate::fields::FieldDescriptor;
use crate::geometry::{Geometry, GeometryKind};
use crate::table::{Table, Value};
use crate::track::Track;
use crate::GeoTableError;

/// Seuls champs survivant au regroupement en tracks
pub const GROUPED_FIELDS: [&str; 2] = ["name", "elevation"];

/// Une feature prête à écrire : géométrie + valeurs dans l'ordre de la
/// sélection, indexées par nom d'export
#[derive(Debug, Clone)]
pub struct FeatureRecord {
    pub geometry: Geometry,
    pub values: Vec<(String, Value)>,
}

/// Backend de persistance (GeoJSON, CSV WKT, base spatiale...).
///
/// Le writer reçoit le schéma avant les features, dans l'ordre exact
/// d'assemblage. Contrat : rejeter un identifiant de référence spatiale
/// inconnu, et ne laisser aucun artefact partiel en cas d'échec.
pub trait VectorWriter {
    fn write(
        &mut self,
        srid: u32,
        schema: &[FieldDescriptor],
        features: &[FeatureRecord],
    ) -> Result<(), GeoTableError>;
}

/// Résout la sélection de champs contre les descripteurs disponibles.
///
/// Les doublons sont éliminés par un index nom → descripteur (la
/// première occurrence gagne). Pour une forme groupée, tout champ hors
/// de `{name, elevation}` est refusé dès la sélection ; pour un point,
/// un nom absent de la table est une `UnknownColumn`.
pub fn resolve_selection(
    available: &[FieldDescriptor],
    selected: &[String],
    kind: GeometryKind,
) -> Result<Vec<FieldDescriptor>, GeoTableError> {
    let by_name: HashMap<&str, &FieldDescriptor> = available
        .iter()
        .map(|d| (d.original_name.as_str(), d))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut resolved = Vec::with_capacity(selected.len());

    for name in selected {
        if kind.is_grouped() && !GROUPED_FIELDS.contains(&name.as_str()) {
            return Err(GeoTableError::FieldNotAvailableAfterGrouping(name.clone()));
        }
        let descriptor = by_name
            .get(name.as_str())
            .ok_or_else(|| GeoTableError::UnknownColumn(name.clone()))?;
        if seen.insert(name.as_str()) {
            resolved.push((*descriptor).clone());
        }
    }

    Ok(resolved)
}

/// Assemble une feature par ligne (forme point).
///
/// La feature *i* correspond à la géométrie *i*, elle-même issue de la
/// ligne *i* : l'ordre d'entrée est préservé de bout en bout.
pub fn assemble_from_rows(
    table: &Table,
    geometries: Vec<Geometry>,
    schema: &[FieldDescriptor],
) -> Result<Vec<FeatureRecord>, GeoTableError> {
    geometries
        .into_iter()
        .enumerate()
        .map(|(row, geometry)| {
            let mut values = Vec::with_capacity(schema.len());
            for descriptor in schema {
                let value = table.value(row, &descriptor.original_name).ok_or_else(|| {
                    GeoTableError::UnknownColumn(descriptor.original_name.clone())
                })?;
                values.push((descriptor.export_name.clone(), value.clone()));
            }
            Ok(FeatureRecord { geometry, values })
        })
        .collect()
}

/// Assemble une feature par track (formes groupées).
///
/// Seuls `name` et `elevation` (la moyenne calculée) existent encore à
/// ce stade ; le schéma résolu ne peut contenir qu'eux.
pub fn assemble_from_tracks(
    tracks: &[Track],
    geometries: Vec<Geometry>,
    schema: &[FieldDescriptor],
) -> Vec<FeatureRecord> {
    geometries
        .into_iter()
        .zip(tracks)
        .map(|(geometry, track)| {
            let values = schema
                .iter()
                .map(|descriptor| {
                    let value = match descriptor.original_name.as_str() {
                        "name" => Value::Str(track.name.clone()),
                        _ => Value::Real(track.elevation_mean),
                    };
                    (descriptor.export_name.clone(), value)
                })
                .collect();
            FeatureRecord { geometry, values }
        })
        .collect()
}
