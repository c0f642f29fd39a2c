//! Modèle de table typée : colonnes nommées, lignes ordonnées
//!
//! Le chargeur (crate applicatif) produit une [`Table`] à partir du CSV ;
//! le coeur ne relit jamais le fichier source.

use std::collections::HashMap;
use std::fmt;

use crate::GeoTableError;

/// Une valeur de cellule typée
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Real(f64),
}

/// Type d'une colonne, tel qu'exporté vers le writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Real,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => write!(f, "string"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Real => write!(f, "real"),
        }
    }
}

impl Value {
    /// Type de cette valeur
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
        }
    }

    /// Interprétation numérique, en conservant le style lexical de la source.
    ///
    /// Les chaînes sont parsées (entier d'abord, flottant ensuite) ;
    /// retourne `None` si la valeur n'est pas numérique.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(v) => Some(Number::Int(*v)),
            Value::Real(v) => Some(Number::Real(*v)),
            Value::Str(s) => {
                let s = s.trim();
                if let Ok(v) = s.parse::<i64>() {
                    return Some(Number::Int(v));
                }
                fast_float::parse::<f64, _>(s).ok().map(Number::Real)
            }
        }
    }

    /// Interprétation flottante, quel que soit le style
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{}", Number::Real(*v)),
        }
    }
}

/// Scalaire de coordonnée conservant le style lexical de la colonne source.
///
/// Un entier s'affiche sans point décimal (`20`), un réel en porte
/// toujours un (`-93.0`), ce que le producteur amont écrivait tel quel
/// dans le WKT.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(v) => *v as f64,
            Number::Real(v) => *v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Real(v) => {
                let s = v.to_string();
                // Forcer un point décimal pour les réels entiers (-93 → -93.0)
                if s.contains('.') || s.contains('e') || s.contains("inf") || s.contains("NaN") {
                    write!(f, "{s}")
                } else {
                    write!(f, "{s}.0")
                }
            }
        }
    }
}

/// Une colonne nommée avec ses valeurs dans l'ordre des lignes
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Table ordonnée de colonnes nommées
///
/// Invariant : toutes les colonnes ont le même nombre de lignes et des
/// noms distincts ; l'accès par nom est en O(1) via un index.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl Table {
    /// Construit une table et vérifie ses invariants
    pub fn new(columns: Vec<Column>) -> Result<Self, GeoTableError> {
        if columns.is_empty() {
            return Err(GeoTableError::InvalidCsv("table has no columns".to_string()));
        }

        let n_rows = columns[0].values.len();
        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if column.values.len() != n_rows {
                return Err(GeoTableError::InvalidCsv(format!(
                    "column `{}` has {} rows, expected {}",
                    column.name,
                    column.values.len(),
                    n_rows
                )));
            }
            if index.insert(column.name.clone(), i).is_some() {
                return Err(GeoTableError::InvalidCsv(format!(
                    "duplicate column name `{}`",
                    column.name
                )));
            }
        }

        Ok(Self { columns, index })
    }

    /// Noms de colonnes dans l'ordre de la source
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Accès à une colonne par nom
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Valeur d'une cellule (ligne, nom de colonne)
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).and_then(|c| c.values.get(row))
    }

    pub fn n_rows(&self) -> usize {
        self.columns[0].values.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}
