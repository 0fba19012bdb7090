use crate::domain::model::{CardMeaning, ReferenceTable};
use crate::utils::error::{Result, TarotError};
use std::io::Read;
use std::path::Path;

pub const NAME_COLUMN: &str = "carte";
pub const UPRIGHT_COLUMN: &str = "dritto";
pub const REVERSED_COLUMN: &str = "rovescio";

const REQUIRED_COLUMNS: [&str; 3] = [NAME_COLUMN, UPRIGHT_COLUMN, REVERSED_COLUMN];

/// Loads the `;`-separated reference file at `path`.
pub fn load_reference_table<P: AsRef<Path>>(path: P) -> Result<ReferenceTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TarotError::NotFoundError {
            path: path.display().to_string(),
        },
        _ => TarotError::IoError(e),
    })?;

    let table = ReferenceTable::from_reader(file)?;
    tracing::info!(
        "📚 Reference table loaded from {}: {} cards",
        path.display(),
        table.len()
    );
    Ok(table)
}

struct ColumnIndex {
    name: usize,
    upright: usize,
    reversed: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|header| header.trim().to_lowercase())
            .collect();

        for column in &normalized {
            tracing::debug!("Column: '{}' (length: {})", column, column.len());
        }

        let position = |wanted: &str| normalized.iter().position(|column| column == wanted);

        match (
            position(NAME_COLUMN),
            position(UPRIGHT_COLUMN),
            position(REVERSED_COLUMN),
        ) {
            (Some(name), Some(upright), Some(reversed)) => Ok(Self {
                name,
                upright,
                reversed,
            }),
            _ => {
                let missing = REQUIRED_COLUMNS
                    .iter()
                    .filter(|column| position(**column).is_none())
                    .map(|column| column.to_string())
                    .collect();
                Err(TarotError::SchemaError {
                    missing,
                    found: normalized.clone(),
                })
            }
        }
    }
}

fn field(record: &csv::StringRecord, index: usize) -> String {
    record
        .get(index)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

impl ReferenceTable {
    /// Parses a reference table from any reader. Missing meaning fields
    /// default to the empty string; rows without a card name are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

        let mut table = ReferenceTable::default();
        let mut rows = 0usize;
        for record in csv_reader.records() {
            let record = record?;
            rows += 1;

            let name = field(&record, columns.name);
            if name.is_empty() {
                tracing::warn!("Skipping row {} without a card name", rows);
                continue;
            }

            let card = CardMeaning {
                name,
                upright: field(&record, columns.upright),
                reversed: field(&record, columns.reversed),
            };

            let card_name = card.name.clone();
            if table.insert(card) {
                tracing::warn!("Duplicate card '{}' in row {}, keeping the later entry", card_name, rows);
            }
        }

        tracing::debug!("Read {} rows, {} distinct cards", rows, table.len());
        Ok(table)
    }
}
