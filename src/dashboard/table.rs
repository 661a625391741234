//! Tabular review input and the annotated batch table

use std::io::Read;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::models::RowSentiment;
use crate::ReviewXaiError;
use crate::Result;

pub const SENTIMENT_COLUMN: &str = "Sentiment";
pub const POLARITY_COLUMN: &str = "Polarity";

/// Cell values read as missing, besides the empty field
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

/// A parsed CSV upload; empty fields, missing markers and short rows are missing cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl ReviewTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(ReviewXaiError::InvalidInput(
                "CSV has no header row".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let row = (0..headers.len())
                .map(|i| {
                    record
                        .get(i)
                        .filter(|cell| !is_missing(cell))
                        .map(str::to_string)
                })
                .collect();
            rows.push(row);
        }

        debug!("Parsed CSV: {} columns, {} rows", headers.len(), rows.len());
        Ok(Self { headers, rows })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_csv_str(csv: &str) -> Result<Self> {
        Self::from_reader(csv.as_bytes())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> &[Vec<Option<String>>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// The named text column, validated against the headers
    pub fn column(&self, name: &str) -> Result<ReviewColumn> {
        let index = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReviewXaiError::UnknownColumn(name.to_string()))?;
        Ok(ReviewColumn {
            name: name.to_string(),
            values: self.rows.iter().map(|row| row[index].clone()).collect(),
        })
    }
}

/// One named column of string-or-missing cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewColumn {
    name: String,
    values: Vec<Option<String>>,
}

impl ReviewColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Non-missing cells joined with single spaces
    pub fn corpus(&self) -> String {
        self.values
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A review table with `Sentiment` and `Polarity` appended
///
/// Columns of the source table that already carry those names are replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTable {
    source: ReviewTable,
    sentiments: Vec<RowSentiment>,
}

/// A batch row as shown in tables and API responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub cells: Vec<Option<String>>,
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    #[serde(rename = "Polarity")]
    pub polarity: f64,
}

impl BatchTable {
    pub fn new(source: ReviewTable, sentiments: Vec<RowSentiment>) -> Result<Self> {
        if source.len() != sentiments.len() {
            return Err(ReviewXaiError::InvalidInput(format!(
                "{} rows but {} sentiment results",
                source.len(),
                sentiments.len()
            )));
        }
        Ok(Self { source, sentiments })
    }

    pub fn sentiments(&self) -> &[RowSentiment] {
        &self.sentiments
    }

    pub fn len(&self) -> usize {
        self.sentiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentiments.is_empty()
    }

    fn kept_columns(&self) -> Vec<usize> {
        self.source
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.as_str() != SENTIMENT_COLUMN && h.as_str() != POLARITY_COLUMN)
            .map(|(i, _)| i)
            .collect()
    }

    /// Source headers followed by `Sentiment` and `Polarity`
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = self
            .kept_columns()
            .into_iter()
            .map(|i| self.source.headers[i].clone())
            .collect();
        headers.push(SENTIMENT_COLUMN.to_string());
        headers.push(POLARITY_COLUMN.to_string());
        headers
    }

    pub fn rows(&self) -> Vec<BatchRow> {
        let kept = self.kept_columns();
        self.source
            .rows
            .iter()
            .zip(&self.sentiments)
            .map(|(row, sentiment)| BatchRow {
                cells: kept.iter().map(|&i| row[i].clone()).collect(),
                sentiment: sentiment.label.to_string(),
                polarity: sentiment.polarity,
            })
            .collect()
    }

    /// Write the annotated table as CSV; missing cells become empty fields
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;
        for row in self.rows() {
            let mut record: Vec<String> = row
                .cells
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();
            record.push(row.sentiment);
            record.push(row.polarity.to_string());
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BatchLabel;

    const CSV: &str = "id,review,stars\n1,great!,5\n2,,3\n3,terrible!!,1\n4\n";

    #[test]
    fn test_parse_marks_missing_cells() {
        let table = ReviewTable::from_csv_str(CSV).unwrap();
        assert_eq!(table.headers(), ["id", "review", "stars"]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows()[1][1], None);
        // short row padded with missing cells
        assert_eq!(table.rows()[3], vec![Some("4".to_string()), None, None]);
    }

    #[test]
    fn test_missing_markers_read_as_missing() {
        let csv = "review\ngreat!\nNA\nN/A\nnull\nNone\nNaN\nnan\nna\nNone of it worked\n";
        let table = ReviewTable::from_csv_str(csv).unwrap();
        let column = table.column("review").unwrap();
        let missing = column.values().iter().filter(|v| v.is_none()).count();
        assert_eq!(missing, 6);
        // only exact markers count
        assert_eq!(column.values()[7].as_deref(), Some("na"));
        assert_eq!(column.values()[8].as_deref(), Some("None of it worked"));
        assert_eq!(column.corpus(), "great! na None of it worked");
    }

    #[test]
    fn test_column_lookup() {
        let table = ReviewTable::from_csv_str(CSV).unwrap();
        let column = table.column("review").unwrap();
        assert_eq!(column.name(), "review");
        assert_eq!(
            column.values(),
            [
                Some("great!".to_string()),
                None,
                Some("terrible!!".to_string()),
                None
            ]
        );
        assert_eq!(column.corpus(), "great! terrible!!");
    }

    #[test]
    fn test_unknown_column() {
        let table = ReviewTable::from_csv_str(CSV).unwrap();
        assert!(matches!(
            table.column("text"),
            Err(ReviewXaiError::UnknownColumn(name)) if name == "text"
        ));
    }

    #[test]
    fn test_quoted_cells_with_commas() {
        let table =
            ReviewTable::from_csv_str("review\n\"Good, but pricey\"\n\"Line\nbreak\"\n").unwrap();
        let column = table.column("review").unwrap();
        assert_eq!(column.values()[0].as_deref(), Some("Good, but pricey"));
        assert_eq!(column.values()[1].as_deref(), Some("Line\nbreak"));
    }

    #[test]
    fn test_head() {
        let table = ReviewTable::from_csv_str(CSV).unwrap();
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(10).len(), 4);
    }

    #[test]
    fn test_batch_table_rejects_length_mismatch() {
        let table = ReviewTable::from_csv_str(CSV).unwrap();
        assert!(BatchTable::new(table, vec![RowSentiment::UNKNOWN]).is_err());
    }

    #[test]
    fn test_batch_table_csv_output() {
        let table = ReviewTable::from_csv_str("review\nok\n\n").unwrap();
        // a blank line is skipped by the reader, so only one row remains
        assert_eq!(table.len(), 1);
        let batch = BatchTable::new(
            table,
            vec![RowSentiment {
                label: BatchLabel::Positive,
                polarity: 0.5,
            }],
        )
        .unwrap();

        let mut out = Vec::new();
        batch.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "review,Sentiment,Polarity\nok,Positive,0.5\n");
    }

    #[test]
    fn test_existing_sentiment_column_replaced() {
        let table = ReviewTable::new(
            vec!["Sentiment".into(), "review".into()],
            vec![vec![Some("old".into()), Some("fine".into())]],
        );
        let batch = BatchTable::new(table, vec![RowSentiment::UNKNOWN]).unwrap();
        assert_eq!(batch.headers(), ["review", "Sentiment", "Polarity"]);
        let rows = batch.rows();
        assert_eq!(rows[0].cells, vec![Some("fine".to_string())]);
        assert_eq!(rows[0].sentiment, "Unknown");
    }

    #[test]
    fn test_missing_cells_written_empty() {
        let table = ReviewTable::new(
            vec!["review".into(), "note".into()],
            vec![vec![None, Some("x".into())]],
        );
        let batch = BatchTable::new(table, vec![RowSentiment::UNKNOWN]).unwrap();
        let mut out = Vec::new();
        batch.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "review,note,Sentiment,Polarity\n,x,Unknown,0\n"
        );
    }
}
