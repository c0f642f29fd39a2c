//! Chargement CSV vers une table typée
//!
//! La promotion de type se fait colonne par colonne, après lecture
//! complète : tout-entier → entier, tout-numérique → réel, sinon texte.
//! C'est le comportement de dtypes sur lequel le flux d'origine
//! reposait.

use std::path::Path;

use tracing::debug;

use geotable::{Column, GeoTableError, Table, Value};

/// Charge un fichier CSV en [`Table`] typée.
///
/// Erreurs : fichier illisible, en-tête absent ou vide, ligne de
/// largeur incohérente — toutes remontées en `InvalidCsv`.
pub fn load_csv(path: &Path) -> Result<Table, GeoTableError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| GeoTableError::InvalidCsv(format!("{}: {e}", path.display())))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| GeoTableError::InvalidCsv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(GeoTableError::InvalidCsv("no columns in header".to_string()));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| GeoTableError::InvalidCsv(e.to_string()))?;
        if record.len() != headers.len() {
            return Err(GeoTableError::InvalidCsv(format!(
                "row has {} fields, expected {}",
                record.len(),
                headers.len()
            )));
        }
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column::new(name, promote(raw)))
        .collect();

    let table = Table::new(columns)?;
    debug!(rows = table.n_rows(), columns = table.n_columns(), "CSV loaded");
    Ok(table)
}

/// Promotion de type d'une colonne entière
fn promote(raw: Vec<String>) -> Vec<Value> {
    if !raw.is_empty() && raw.iter().all(|c| c.trim().parse::<i64>().is_ok()) {
        return raw
            .into_iter()
            .map(|c| Value::Int(c.trim().parse().unwrap_or_default()))
            .collect();
    }

    if !raw.is_empty()
        && raw
            .iter()
            .all(|c| fast_float::parse::<f64, _>(c.trim()).is_ok())
    {
        return raw
            .into_iter()
            .map(|c| Value::Real(fast_float::parse(c.trim()).unwrap_or_default()))
            .collect();
    }

    raw.into_iter().map(Value::Str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_promotes_column_kinds() {
        let path = write_fixture(
            "csv2geo_load_kinds.csv",
            "city,lat,population\nMinneapolis,44.98,429954\nDuluth,46.78,86697\n",
        );

        let table = load_csv(&path).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.value(0, "city"), Some(&Value::Str("Minneapolis".to_string())));
        assert_eq!(table.value(0, "lat"), Some(&Value::Real(44.98)));
        assert_eq!(table.value(1, "population"), Some(&Value::Int(86697)));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_mixed_numeric_column_becomes_real() {
        let path = write_fixture("csv2geo_load_mixed.csv", "v\n1\n2.5\n");

        let table = load_csv(&path).unwrap();
        assert_eq!(table.value(0, "v"), Some(&Value::Real(1.0)));
        assert_eq!(table.value(1, "v"), Some(&Value::Real(2.5)));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_invalid_csv() {
        let path = std::env::temp_dir().join("csv2geo_does_not_exist.csv");
        assert!(matches!(
            load_csv(&path),
            Err(GeoTableError::InvalidCsv(_))
        ));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let path = write_fixture("csv2geo_load_ragged.csv", "a,b\n1,2\n3\n");
        // Le reader csv signale lui-même la largeur incohérente
        assert!(matches!(
            load_csv(&path),
            Err(GeoTableError::InvalidCsv(_))
        ));
        std::fs::remove_file(path).ok();
    }
}
