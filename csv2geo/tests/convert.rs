//! Tests de bout en bout : CSV sur disque → fichier de sortie

use std::io::Write;
use std::path::PathBuf;

use geotable::{convert, ConversionRequest, GeoTableError, GeometryKind};

use csv2geo::export::{GeoJsonFileWriter, WktCsvWriter};
use csv2geo::load::load_csv;

fn fixture(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

const TRACKS_CSV: &str = "\
name,latitude,longitude,elevation
ridge,10,20,100.0
ridge,11,21,200.0
ridge,12,22,300.0
meadow,30,40,50.0
meadow,31,41,60.0
meadow,32,42,70.0
";

#[test]
fn test_points_to_geojson() {
    let input = fixture(
        "csv2geo_e2e_points.csv",
        "city,lat,lon\nMinneapolis,45.0,-93.0\nDuluth,46.78,-92.1\n",
    );
    let output = std::env::temp_dir().join("csv2geo_e2e_points.geojson");

    let table = load_csv(&input).unwrap();
    let request = ConversionRequest {
        kind: GeometryKind::Point,
        latitude_column: Some("lat".to_string()),
        longitude_column: Some("lon".to_string()),
        spatial_reference: 4326,
        selected_fields: vec!["city".to_string()],
    };

    let mut writer = GeoJsonFileWriter::new(&output);
    let summary = convert(&table, &request, &mut writer).unwrap();
    assert_eq!(summary.features, 2);

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains(r#""type":"FeatureCollection""#));
    assert!(content.contains("urn:ogc:def:crs:EPSG::4326"));
    assert!(content.contains(r#""city":"Minneapolis""#));
    assert!(content.contains("-93"));

    std::fs::remove_file(input).ok();
    std::fs::remove_file(output).ok();
}

#[test]
fn test_polygons_to_wkt_csv() {
    let input = fixture("csv2geo_e2e_polygons.csv", TRACKS_CSV);
    let output = std::env::temp_dir().join("csv2geo_e2e_polygons.csv.out");

    let table = load_csv(&input).unwrap();
    let request = ConversionRequest {
        kind: GeometryKind::Polygon,
        latitude_column: None,
        longitude_column: None,
        spatial_reference: 4326,
        selected_fields: vec![],
    };

    let mut writer = WktCsvWriter::new(&output);
    let summary = convert(&table, &request, &mut writer).unwrap();
    assert_eq!(summary.tracks, 2);

    let content = std::fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("wkt,name,elevation"));
    assert_eq!(
        lines.next(),
        Some("\"POLYGON ((20 10,21 11,22 12,20 10))\",ridge,200.0")
    );
    assert_eq!(
        lines.next(),
        Some("\"POLYGON ((40 30,41 31,42 32,40 30))\",meadow,60.0")
    );

    std::fs::remove_file(input).ok();
    std::fs::remove_file(output).ok();
}

#[test]
fn test_polylines_to_geojson() {
    let input = fixture("csv2geo_e2e_polylines.csv", TRACKS_CSV);
    let output = std::env::temp_dir().join("csv2geo_e2e_polylines.geojson");

    let table = load_csv(&input).unwrap();
    let request = ConversionRequest {
        kind: GeometryKind::Polyline,
        latitude_column: None,
        longitude_column: None,
        spatial_reference: 2154,
        selected_fields: vec!["name".to_string()],
    };

    let mut writer = GeoJsonFileWriter::new(&output);
    convert(&table, &request, &mut writer).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("urn:ogc:def:crs:EPSG::2154"));
    assert!(content.contains("LineString"));
    assert!(content.contains(r#""name":"ridge""#));
    // name seul sélectionné : pas d'élévation dans les properties
    assert!(!content.contains("elevation"));

    std::fs::remove_file(input).ok();
    std::fs::remove_file(output).ok();
}

#[test]
fn test_failed_session_produces_no_artifact() {
    let input = fixture(
        "csv2geo_e2e_bad_row.csv",
        "city,lat,lon\nA,45.0,-93.0\nB,north,-94.0\n",
    );
    let output = std::env::temp_dir().join("csv2geo_e2e_bad_row.geojson");
    std::fs::remove_file(&output).ok();

    let table = load_csv(&input).unwrap();
    let request = ConversionRequest {
        kind: GeometryKind::Point,
        latitude_column: Some("lat".to_string()),
        longitude_column: Some("lon".to_string()),
        spatial_reference: 4326,
        selected_fields: vec![],
    };

    let mut writer = GeoJsonFileWriter::new(&output);
    let result = convert(&table, &request, &mut writer);

    assert!(matches!(
        result,
        Err(GeoTableError::InvalidGeometryInput { .. })
    ));
    assert!(!output.exists(), "failed session must not leave output");

    std::fs::remove_file(input).ok();
}

#[test]
fn test_grouped_selection_outside_survivors() {
    let input = fixture("csv2geo_e2e_restricted.csv", TRACKS_CSV);
    let output = std::env::temp_dir().join("csv2geo_e2e_restricted.geojson");
    std::fs::remove_file(&output).ok();

    let table = load_csv(&input).unwrap();
    let request = ConversionRequest {
        kind: GeometryKind::Polygon,
        latitude_column: None,
        longitude_column: None,
        spatial_reference: 4326,
        selected_fields: vec!["latitude".to_string()],
    };

    let mut writer = GeoJsonFileWriter::new(&output);
    let result = convert(&table, &request, &mut writer);

    assert!(matches!(
        result,
        Err(GeoTableError::FieldNotAvailableAfterGrouping(_))
    ));
    assert!(!output.exists());

    std::fs::remove_file(input).ok();
}
