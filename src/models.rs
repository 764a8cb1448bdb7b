use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One dataset cell, used where the column type is only known at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

/// Column storage. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Int(_) => "integer",
            ColumnData::Float(_) => "float",
            ColumnData::Text(_) => "text",
        }
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(v: Vec<f64>) -> Self {
        ColumnData::Float(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<f64>>> for ColumnData {
    fn from(v: Vec<Option<f64>>) -> Self {
        ColumnData::Float(v)
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(v: Vec<i64>) -> Self {
        ColumnData::Int(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(v: Vec<&str>) -> Self {
        ColumnData::Text(v.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(v: Vec<String>) -> Self {
        ColumnData::Text(v.into_iter().map(Some).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Row labels used as the x-axis of line plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexValues {
    Positions(Vec<f64>),
    Dates(Vec<NaiveDate>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: Option<String>,
    pub values: IndexValues,
}

impl Index {
    pub fn dates(name: Option<&str>, dates: Vec<NaiveDate>) -> Self {
        Self {
            name: name.map(str::to_string),
            values: IndexValues::Dates(dates),
        }
    }

    pub fn positions(name: Option<&str>, positions: Vec<f64>) -> Self {
        Self {
            name: name.map(str::to_string),
            values: IndexValues::Positions(positions),
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            IndexValues::Positions(v) => v.len(),
            IndexValues::Dates(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric x coordinate per row; dates map to their day number since 0001-01-01.
    pub fn x_positions(&self) -> Vec<f64> {
        match &self.values {
            IndexValues::Positions(v) => v.clone(),
            IndexValues::Dates(v) => v.iter().map(|d| d.num_days_from_ce() as f64).collect(),
        }
    }

    pub fn is_dates(&self) -> bool {
        matches!(self.values, IndexValues::Dates(_))
    }
}

/// In-memory table: equally long named columns plus an optional row index.
///
/// Deserialization goes through the same checks as [`Dataset::with_column`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    columns: Vec<Column>,
    index: Option<Index>,
}

/// Unchecked wire form of a [`Dataset`].
#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<Column>,
    #[serde(default)]
    index: Option<Index>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DataError;

    fn try_from(raw: RawDataset) -> Result<Self, DataError> {
        let mut ds = Dataset::new();
        if let Some(index) = raw.index {
            ds = ds.with_index(index)?;
        }
        for column in raw.columns {
            ds = ds.with_column(column.name, column.data)?;
        }
        Ok(ds)
    }
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Its length must match the existing rows (and index).
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: impl Into<ColumnData>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        let data = data.into();
        if self.columns.iter().any(|c| c.name == name) {
            return Err(DataError::DuplicateColumn(name));
        }
        if let Some(expected) = self.expected_rows()
            && data.len() != expected
        {
            return Err(DataError::LengthMismatch {
                name,
                expected,
                found: data.len(),
            });
        }
        self.columns.push(Column { name, data });
        Ok(self)
    }

    pub fn with_index(mut self, index: Index) -> Result<Self, DataError> {
        if let Some(first) = self.columns.first()
            && first.data.len() != index.len()
        {
            return Err(DataError::LengthMismatch {
                name: index.name.clone().unwrap_or_else(|| "index".into()),
                expected: first.data.len(),
                found: index.len(),
            });
        }
        self.index = Some(index);
        Ok(self)
    }

    fn expected_rows(&self) -> Option<usize> {
        self.columns
            .first()
            .map(|c| c.data.len())
            .or_else(|| self.index.as_ref().map(Index::len))
    }

    pub fn len(&self) -> usize {
        self.expected_rows().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn index(&self) -> Option<&Index> {
        self.index.as_ref()
    }

    pub fn column(&self, name: &str) -> Result<&Column, DataError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    /// Numeric view of an integer or float column.
    pub fn numeric(&self, name: &str) -> Result<Vec<Option<f64>>, DataError> {
        match &self.column(name)?.data {
            ColumnData::Int(v) => Ok(v.iter().map(|x| x.map(|i| i as f64)).collect()),
            ColumnData::Float(v) => Ok(v.clone()),
            other => Err(DataError::WrongType {
                name: name.to_string(),
                expected: "numeric",
                found: other.type_name(),
            }),
        }
    }

    /// Category labels of a text or integer column.
    pub fn labels(&self, name: &str) -> Result<Vec<Option<String>>, DataError> {
        match &self.column(name)?.data {
            ColumnData::Text(v) => Ok(v.clone()),
            ColumnData::Int(v) => Ok(v.iter().map(|x| x.map(|i| i.to_string())).collect()),
            other => Err(DataError::WrongType {
                name: name.to_string(),
                expected: "categorical",
                found: other.type_name(),
            }),
        }
    }

    /// Whether the column stores floats (as opposed to integer counts).
    pub fn is_float(&self, name: &str) -> Result<bool, DataError> {
        Ok(matches!(self.column(name)?.data, ColumnData::Float(_)))
    }

    pub fn cell(&self, name: &str, row: usize) -> Result<CellValue, DataError> {
        let column = self.column(name)?;
        let cell = match &column.data {
            ColumnData::Int(v) => v.get(row).map(|x| x.map_or(CellValue::Missing, CellValue::Int)),
            ColumnData::Float(v) => {
                v.get(row).map(|x| x.map_or(CellValue::Missing, CellValue::Float))
            }
            ColumnData::Text(v) => v
                .get(row)
                .map(|x| x.clone().map_or(CellValue::Missing, CellValue::Text)),
        };
        cell.ok_or_else(|| {
            DataError::InvalidParameter(format!(
                "row {row} out of bounds for '{name}' ({} rows)",
                column.data.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_and_duplicate_columns() {
        let ds = Dataset::new().with_column("a", vec![1.0, 2.0]).unwrap();
        let err = ds.clone().with_column("b", vec![1.0]).unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch { expected: 2, found: 1, .. }));
        let err = ds.with_column("a", vec![3.0, 4.0]).unwrap_err();
        assert_eq!(err, DataError::DuplicateColumn("a".into()));
    }

    #[test]
    fn numeric_and_label_views() {
        let ds = Dataset::new()
            .with_column("n", vec![1i64, 2])
            .unwrap()
            .with_column("t", vec!["x", "y"])
            .unwrap();
        assert_eq!(ds.numeric("n").unwrap(), vec![Some(1.0), Some(2.0)]);
        assert_eq!(ds.labels("n").unwrap(), vec![Some("1".into()), Some("2".into())]);
        assert!(ds.numeric("t").is_err());
        assert!(!ds.is_float("n").unwrap());
        assert_eq!(ds.cell("t", 1).unwrap(), CellValue::Text("y".into()));
    }

    #[test]
    fn json_goes_through_column_checks() {
        let ok = r#"{"columns":[{"name":"x","data":{"type":"float","values":[1.0,null]}}]}"#;
        let ds: Dataset = serde_json::from_str(ok).unwrap();
        assert_eq!(ds.numeric("x").unwrap(), vec![Some(1.0), None]);
        let back: Dataset = serde_json::from_str(&serde_json::to_string(&ds).unwrap()).unwrap();
        assert_eq!(back, ds);

        let duplicate = r#"{"columns":[
            {"name":"x","data":{"type":"float","values":[1.0,2.0,3.0]}},
            {"name":"x","data":{"type":"int","values":[1,2,3]}}]}"#;
        let err = serde_json::from_str::<Dataset>(duplicate).unwrap_err();
        assert!(err.to_string().contains("duplicate column name 'x'"), "{err}");

        let ragged = r#"{"columns":[
            {"name":"x","data":{"type":"float","values":[1.0,2.0,3.0]}},
            {"name":"y","data":{"type":"text","values":["a"]}}]}"#;
        let err = serde_json::from_str::<Dataset>(ragged).unwrap_err();
        assert!(err.to_string().contains("has 1 rows, expected 3"), "{err}");
    }

    #[test]
    fn json_index_must_match_columns() {
        let json = r#"{"columns":[{"name":"x","data":{"type":"int","values":[1,2]}}],
            "index":{"name":null,"values":{"Positions":[0.0,1.0,2.0]}}}"#;
        assert!(serde_json::from_str::<Dataset>(json).is_err());
    }

    #[test]
    fn date_index_maps_to_day_numbers() {
        let d0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let idx = Index::dates(Some("date"), vec![d0, d1]);
        let xs = idx.x_positions();
        assert_eq!(xs[1] - xs[0], 1.0);
    }
}
