//! Rapport de conversion
//!
//! Résumé d'une session : volumes traités, durée, sortie produite.
//! Affichage humain par défaut, JSON sur demande.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use geotable::ConversionSummary;

use crate::cli::ConvertArgs;

/// Rapport complet d'une session réussie
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Forme géométrique demandée
    pub geometry: String,

    /// Identifiant EPSG transmis au writer
    pub srid: u32,

    /// Lignes lues dans la source
    pub rows: usize,

    /// Tracks construits (0 pour la forme point)
    pub tracks: usize,

    /// Features écrites
    pub features: usize,

    /// Durée de la session
    pub duration_secs: f64,

    /// Fichier produit
    pub output: PathBuf,
}

impl ConversionReport {
    pub fn new(args: &ConvertArgs, summary: &ConversionSummary, elapsed: Duration) -> Self {
        Self {
            geometry: format!("{:?}", args.geometry).to_lowercase(),
            srid: args.srid,
            rows: summary.rows,
            tracks: summary.tracks,
            features: summary.features,
            duration_secs: elapsed.as_secs_f64(),
            output: args.output.clone(),
        }
    }

    /// Résumé lisible sur stdout
    pub fn print_human(&self) {
        println!(
            "{} feature(s) ({}) written to {} in {:.2}s",
            self.features,
            self.geometry,
            self.output.display(),
            self.duration_secs
        );
        if self.tracks > 0 {
            println!("  {} row(s) grouped into {} track(s)", self.rows, self.tracks);
        } else {
            println!("  {} row(s) converted", self.rows);
        }
    }

    /// Rapport JSON sur stdout
    pub fn print_json(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes() {
        let report = ConversionReport {
            geometry: "polygon".to_string(),
            srid: 4326,
            rows: 6,
            tracks: 2,
            features: 2,
            duration_secs: 0.01,
            output: PathBuf::from("/tmp/out.geojson"),
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""geometry":"polygon""#));
        assert!(json.contains(r#""features":2"#));
    }
}
