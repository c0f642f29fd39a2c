//! Backends d'export (GeoJSON, CSV à colonne WKT)

pub mod geojson;
pub mod wkt_csv;

pub use geojson::GeoJsonFileWriter;
pub use wkt_csv::WktCsvWriter;

use std::path::Path;

use geotable::GeoTableError;

/// Vérifie que l'identifiant EPSG appartient à une plage allouée.
///
/// EPSG alloue 1024..=32767 pour les codes standard ; la plage étendue
/// jusqu'à 998999 couvre les codes utilisateurs et dérivés. Le coeur ne
/// valide rien : c'est bien au writer de refuser un code inconnu.
pub(crate) fn validate_srid(srid: u32) -> Result<(), GeoTableError> {
    if (1024..=998_999).contains(&srid) {
        Ok(())
    } else {
        Err(GeoTableError::InvalidSpatialReference(srid))
    }
}

/// Écrit le contenu via un fichier temporaire voisin puis renomme.
///
/// Une session qui échoue ne doit laisser aucune sortie partielle ; le
/// rename final est la seule étape visible de l'extérieur.
pub(crate) fn commit_atomically(path: &Path, bytes: &[u8]) -> Result<(), GeoTableError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| GeoTableError::writer_failure(path.display().to_string(), "not a file path"))?;
    let tmp = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    // Quel que soit l'échec, le fichier temporaire ne doit pas survivre
    if let Err(e) = std::fs::write(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srid_ranges() {
        assert!(validate_srid(4326).is_ok());
        assert!(validate_srid(2154).is_ok());
        assert!(validate_srid(0).is_err());
        assert!(validate_srid(999_999_9).is_err());
    }

    #[test]
    fn test_commit_leaves_no_tmp_file() {
        let path = std::env::temp_dir().join("csv2geo_commit.txt");
        commit_atomically(&path, b"ok").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ok");
        assert!(!path.with_file_name("csv2geo_commit.txt.tmp").exists());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_failed_commit_leaves_no_tmp_file() {
        // Parent inexistant : l'écriture échoue avant le rename
        let dir = std::env::temp_dir().join("csv2geo_commit_missing_dir");
        std::fs::remove_dir_all(&dir).ok();
        let path = dir.join("out.txt");

        assert!(matches!(
            commit_atomically(&path, b"ko"),
            Err(GeoTableError::Io(_))
        ));
        assert!(!path.exists());
        assert!(!dir.join("out.txt.tmp").exists());

        // Cible invalide pour le rename : un répertoire existant
        let target = std::env::temp_dir().join("csv2geo_commit_dir_target");
        std::fs::create_dir_all(&target).unwrap();

        assert!(commit_atomically(&target, b"ko").is_err());
        let tmp = std::env::temp_dir().join("csv2geo_commit_dir_target.tmp");
        assert!(!tmp.exists(), "tmp sibling must be removed on failure");

        std::fs::remove_dir_all(&target).ok();
    }
}
