//! Export CSV avec colonne WKT en tête
//!
//! Sortie directement ingérable par les SIG de bureau : une colonne
//! `wkt` portant le texte exact produit par le coeur, suivie des champs
//! sélectionnés sous leurs noms d'export.

use std::path::{Path, PathBuf};

use geotable::{FeatureRecord, FieldDescriptor, GeoTableError, VectorWriter};

use super::{commit_atomically, validate_srid};

/// Writer CSV : géométrie WKT + attributs
pub struct WktCsvWriter {
    path: PathBuf,
}

impl WktCsvWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VectorWriter for WktCsvWriter {
    fn write(
        &mut self,
        srid: u32,
        schema: &[FieldDescriptor],
        features: &[FeatureRecord],
    ) -> Result<(), GeoTableError> {
        validate_srid(srid)?;

        let mut csv_writer = csv::Writer::from_writer(Vec::new());

        let mut header = Vec::with_capacity(schema.len() + 1);
        header.push("wkt".to_string());
        header.extend(schema.iter().map(|d| d.export_name.clone()));
        csv_writer
            .write_record(&header)
            .map_err(|e| GeoTableError::writer_failure(self.path.display().to_string(), e.to_string()))?;

        for feature in features {
            let mut record = Vec::with_capacity(feature.values.len() + 1);
            record.push(feature.geometry.to_wkt());
            record.extend(feature.values.iter().map(|(_, value)| value.to_string()));
            csv_writer
                .write_record(&record)
                .map_err(|e| GeoTableError::writer_failure(self.path.display().to_string(), e.to_string()))?;
        }

        let buffer = csv_writer
            .into_inner()
            .map_err(|e| GeoTableError::writer_failure(self.path.display().to_string(), e.to_string()))?;

        commit_atomically(&self.path, &buffer)
    }
}
