//! Catalogue de champs : noms d'export uniques et types inférés
//!
//! Les formats vecteur classiques (DBF notamment) limitent les noms de
//! champ à 10 caractères ; la troncature peut créer des collisions que
//! le catalogue lève avec un suffixe numérique.

use std::collections::HashSet;

use tracing::warn;

use crate::table::{Column, ValueKind};
use crate::GeoTableError;

/// Descripteur d'un champ exportable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Nom de la colonne source
    pub original_name: String,

    /// Nom d'export (≤ 10 caractères, unique dans le jeu)
    pub export_name: String,

    /// Type exporté
    pub kind: ValueKind,
}

/// Dérive un descripteur par nom de colonne, dans l'ordre d'entrée.
///
/// Base = 9 premiers caractères, espaces en bordure retirés ; en cas de
/// collision un compteur décimal est suffixé jusqu'à trouver un nom
/// libre. Déterministe et sensible à l'ordre : `["Longitude1",
/// "Longitude2", "Lon"]` donne `["Longitude", "Longitude1", "Lon"]`.
///
/// Quand le compteur dépasse un chiffre, la base est raccourcie pour
/// que `base + compteur` tienne toujours dans les 10 caractères
/// (`measurem10` et non `measureme10`).
///
/// Le type de chaque descripteur est rempli plus tard par
/// [`infer_kind`] ; ici il vaut `String` par défaut.
pub fn derive_descriptors(column_names: impl IntoIterator<Item = String>) -> Vec<FieldDescriptor> {
    let mut used: HashSet<String> = HashSet::new();
    let mut descriptors = Vec::new();

    for name in column_names {
        let base: String = name.chars().take(9).collect();
        let base = base.trim().to_string();

        let mut candidate = base.clone();
        let mut counter = 1usize;
        while used.contains(&candidate) {
            let suffix = counter.to_string();
            let keep = 10usize.saturating_sub(suffix.len());
            candidate = base.chars().take(keep).collect::<String>() + &suffix;
            counter += 1;
        }

        used.insert(candidate.clone());
        descriptors.push(FieldDescriptor {
            original_name: name,
            export_name: candidate,
            kind: ValueKind::String,
        });
    }

    descriptors
}

/// Infère le type d'une colonne depuis ses valeurs.
///
/// Une colonne homogène garde son type ; une colonne mixte retombe sur
/// `String` (avec un warning, jamais silencieusement). Une colonne sans
/// aucune valeur est indéterminable et retourne une erreur.
pub fn infer_kind(column: &Column) -> Result<ValueKind, GeoTableError> {
    let mut kinds = column.values.iter().map(|v| v.kind());

    let Some(first) = kinds.next() else {
        return Err(GeoTableError::TypeInference {
            column: column.name.clone(),
            reason: "column has no values".to_string(),
        });
    };

    if kinds.all(|k| k == first) {
        Ok(first)
    } else {
        warn!(
            column = %column.name,
            "Mixed value kinds in column, falling back to string"
        );
        Ok(ValueKind::String)
    }
}
