//! Types d'erreurs pour le crate geotable

use thiserror::Error;

/// Erreurs pouvant survenir pendant une session de conversion
#[derive(Debug, Error)]
pub enum GeoTableError {
    /// Erreur d'I/O lors de l'écriture de la sortie
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table source illisible ou sans colonnes
    #[error("Invalid CSV input: {0}")]
    InvalidCsv(String),

    /// Colonne obligatoire absente pour une forme groupée
    #[error("Missing required column: {0}")]
    MissingRequiredColumn(String),

    /// Type d'une colonne indéterminable
    #[error("Cannot infer value kind for column {column}: {reason}")]
    TypeInference { column: String, reason: String },

    /// Entrée géométrique invalide (colonne non choisie ou valeur non numérique)
    #[error("Invalid geometry input in column {column}: {reason}")]
    InvalidGeometryInput { column: String, reason: String },

    /// Anneau de polygone dégénéré (moins de 3 noeuds distincts)
    #[error("Degenerate polygon ring for track {track}: {distinct} distinct node(s)")]
    DegenerateGeometry { track: String, distinct: usize },

    /// Champ sélectionné indisponible après regroupement en tracks
    #[error("Field `{0}` is not available after grouping (only `name` and `elevation` survive)")]
    FieldNotAvailableAfterGrouping(String),

    /// Champ sélectionné absent de la table source
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Identifiant de référence spatiale non reconnu par le writer
    #[error("Unknown spatial reference identifier: EPSG:{0}")]
    InvalidSpatialReference(u32),

    /// Échec du writer (cible inaccessible ou écriture interrompue)
    #[error("Writer failed for {target}: {reason}")]
    WriterFailure { target: String, reason: String },
}

impl GeoTableError {
    /// Crée une erreur d'entrée géométrique avec contexte
    pub fn invalid_geometry_input(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGeometryInput {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Crée une erreur de writer avec contexte
    pub fn writer_failure(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WriterFailure {
            target: target.into(),
            reason: reason.into(),
        }
    }
}
