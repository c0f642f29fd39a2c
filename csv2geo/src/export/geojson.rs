//! Export vers GeoJSON avec geozero
//!
//! La FeatureCollection entière est construite en mémoire puis commise
//! d'un bloc : une session en échec ne laisse aucun fichier derrière.

use std::io::Write;
use std::path::{Path, PathBuf};

use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;

use geotable::{FeatureRecord, FieldDescriptor, GeoTableError, Value, VectorWriter};

use super::{commit_atomically, validate_srid};

/// Writer GeoJSON : une FeatureCollection avec membre CRS
pub struct GeoJsonFileWriter {
    path: PathBuf,
}

impl GeoJsonFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VectorWriter for GeoJsonFileWriter {
    fn write(
        &mut self,
        srid: u32,
        _schema: &[FieldDescriptor],
        features: &[FeatureRecord],
    ) -> Result<(), GeoTableError> {
        validate_srid(srid)?;

        let mut buffer: Vec<u8> = Vec::new();

        // Header FeatureCollection avec CRS
        write!(
            buffer,
            r#"{{"type":"FeatureCollection","crs":{{"type":"name","properties":{{"name":"urn:ogc:def:crs:EPSG::{srid}"}}}},"features":["#
        )?;

        for (i, feature) in features.iter().enumerate() {
            if i > 0 {
                write!(buffer, ",")?;
            }
            write_feature(&mut buffer, feature)?;
        }

        write!(buffer, "]}}")?;

        commit_atomically(&self.path, &buffer)
    }
}

/// Écrit une feature en GeoJSON
fn write_feature<W: Write>(writer: &mut W, feature: &FeatureRecord) -> Result<(), GeoTableError> {
    write!(writer, r#"{{"type":"Feature","geometry":"#)?;

    // Géométrie via geozero depuis les types geo
    let mut geom_buf = Vec::new();
    let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
    feature
        .geometry
        .to_geo()
        .process_geom(&mut geom_writer)
        .map_err(|e| GeoTableError::writer_failure("geojson", e.to_string()))?;
    writer.write_all(&geom_buf)?;

    // Properties dans l'ordre de la sélection, clés = noms d'export
    write!(writer, r#","properties":{{"#)?;
    for (i, (key, value)) in feature.values.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write!(writer, r#""{}":"#, escape_json(key))?;
        write_value(writer, value)?;
    }
    write!(writer, "}}}}")?;

    Ok(())
}

/// Écrit une valeur typée en JSON
fn write_value<W: Write>(writer: &mut W, value: &Value) -> Result<(), GeoTableError> {
    match value {
        Value::Str(s) => write!(writer, r#""{}""#, escape_json(s))?,
        Value::Int(v) => write!(writer, "{v}")?,
        Value::Real(v) if v.is_finite() => write!(writer, "{v}")?,
        // NaN/inf n'existent pas en JSON
        Value::Real(_) => write!(writer, "null")?,
    }
    Ok(())
}

/// Échappe une chaîne pour JSON
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotable::{Geometry, Node, Number};

    fn point_feature(name: &str, lat: f64, lon: f64) -> FeatureRecord {
        FeatureRecord {
            geometry: Geometry::Point(Node {
                lat: Number::Real(lat),
                lon: Number::Real(lon),
            }),
            values: vec![
                ("name".to_string(), Value::Str(name.to_string())),
                ("elevation".to_string(), Value::Real(120.5)),
            ],
        }
    }

    #[test]
    fn test_write_feature() {
        let feature = point_feature("lac", 47.0, 5.0);

        let mut buffer = Vec::new();
        write_feature(&mut buffer, &feature).unwrap();

        let json = String::from_utf8(buffer).unwrap();
        assert!(json.contains(r#""type":"Feature""#));
        assert!(json.contains(r#""name":"lac""#));
        assert!(json.contains(r#""elevation":120.5"#));
        // geozero émet la géométrie en (lon, lat)
        assert!(json.contains("Point") || json.contains("coordinates"));
    }

    #[test]
    fn test_escape_json() {
        assert_eq!(escape_json("hello"), "hello");
        assert_eq!(escape_json("hello\"world"), "hello\\\"world");
        assert_eq!(escape_json("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_write_collection_with_crs() {
        let features = vec![point_feature("a", 45.0, -93.0)];
        let path = std::env::temp_dir().join("csv2geo_geojson_crs.geojson");

        let mut writer = GeoJsonFileWriter::new(&path);
        writer.write(4326, &[], &features).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#""type":"FeatureCollection""#));
        assert!(content.contains("EPSG::4326"));
        assert!(content.ends_with("]}"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_srid_leaves_no_file() {
        let path = std::env::temp_dir().join("csv2geo_geojson_bad_srid.geojson");
        std::fs::remove_file(&path).ok();

        let mut writer = GeoJsonFileWriter::new(&path);
        let result = writer.write(0, &[], &[point_feature("a", 1.0, 2.0)]);

        assert!(matches!(
            result,
            Err(GeoTableError::InvalidSpatialReference(0))
        ));
        assert!(!path.exists());
    }
}
