use std::sync::Arc;

use scylla::response::query_result::{IntoRowsResultError, QueryResult, RowsError};
use scylla::value::{CqlValue, Row as RawRow};
use uuid::Uuid;

use crate::errors::QueryError;

/// Rows returned by a single statement.
///
/// Rows are copied out of the response frame, so the set owns its data and
/// can outlive the session that produced it. Statements that do not return
/// rows (writes, schema changes) produce an empty set without columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRowSet {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

/// One row of a [`ResultRowSet`], addressable by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Option<CqlValue>>,
}

impl ResultRowSet {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Option<CqlValue>>>) -> Self {
        let columns: Arc<[String]> = columns.into();
        let rows = rows
            .into_iter()
            .map(|values| Row {
                columns: Arc::clone(&columns),
                values,
            })
            .collect();
        ResultRowSet { columns, rows }
    }

    pub(crate) fn from_query_result(
        statement: &str,
        result: QueryResult,
    ) -> Result<Self, QueryError> {
        let rows_result = match result.into_rows_result() {
            Ok(rows_result) => rows_result,
            Err(IntoRowsResultError::ResultNotRows(_)) => return Ok(ResultRowSet::default()),
            Err(err) => {
                return Err(QueryError::ResultMetadata {
                    statement: statement.to_owned(),
                    source: err,
                })
            }
        };

        let columns = rows_result
            .column_specs()
            .iter()
            .map(|spec| spec.name().to_owned())
            .collect();

        let rows = rows_result
            .rows::<RawRow>()
            .map_err(|err| match err {
                RowsError::TypeCheckFailed(source) => QueryError::TypeCheck {
                    statement: statement.to_owned(),
                    source,
                },
            })?
            .map(|row| row.map(|row| row.columns))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| QueryError::Deserialization {
                statement: statement.to_owned(),
                source,
            })?;

        Ok(ResultRowSet::new(columns, rows))
    }

    /// Names of the returned columns, in result order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were returned.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row, if any.
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Iterates over rows in result order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for ResultRowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultRowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Row {
    /// Value of the given column. `None` if the column is absent or null.
    pub fn get(&self, column: &str) -> Option<&CqlValue> {
        let idx = self.columns.iter().position(|name| name == column)?;
        self.values.get(idx)?.as_ref()
    }

    /// Non-null `text` (or `ascii`) value of the given column.
    pub fn text(&self, column: &str) -> Result<&str, QueryError> {
        match self.get(column) {
            Some(CqlValue::Text(s)) | Some(CqlValue::Ascii(s)) => Ok(s),
            _ => Err(QueryError::column_mismatch(column, "text")),
        }
    }

    /// Non-null `uuid` value of the given column.
    pub fn uuid(&self, column: &str) -> Result<Uuid, QueryError> {
        self.get(column)
            .and_then(CqlValue::as_uuid)
            .ok_or_else(|| QueryError::column_mismatch(column, "uuid"))
    }

    /// Elements of a `set<text>` column. A null set reads as empty,
    /// as the cluster does not distinguish the two.
    pub fn text_set(&self, column: &str) -> Result<Vec<String>, QueryError> {
        let Some(value) = self.get(column) else {
            return if self.has_column(column) {
                Ok(Vec::new())
            } else {
                Err(QueryError::column_mismatch(column, "set<text>"))
            };
        };
        let CqlValue::Set(elements) = value else {
            return Err(QueryError::column_mismatch(column, "set<text>"));
        };
        elements
            .iter()
            .map(|element| match element {
                CqlValue::Text(s) | CqlValue::Ascii(s) => Ok(s.clone()),
                _ => Err(QueryError::column_mismatch(column, "set<text>")),
            })
            .collect()
    }

    /// `blob` value of the given column, `None` when null.
    pub fn blob(&self, column: &str) -> Result<Option<&[u8]>, QueryError> {
        match self.get(column) {
            Some(CqlValue::Blob(bytes)) => Ok(Some(bytes)),
            None if self.has_column(column) => Ok(None),
            _ => Err(QueryError::column_mismatch(column, "blob")),
        }
    }

    fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }
}
