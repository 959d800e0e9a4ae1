//! Output formatting for the worldscope CLI
//!
//! The external charting component consumes the printed table; CSV keeps the
//! header row, JSON emits an array of row objects with absent scores as
//! `null` (never 0).

use std::io::Write;

use polars::prelude::*;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;

/// Write a table to the given writer in the requested format
pub fn write_table(df: &DataFrame, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut df = df.clone();
            CsvWriter::new(out).include_header(true).finish(&mut df)?;
        }
        OutputFormat::Json => {
            let rows = to_json_rows(df)?;
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Convert a `DataFrame` into a JSON array of row objects
fn to_json_rows(df: &DataFrame) -> anyhow::Result<Vec<Value>> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let mut row = Map::with_capacity(columns.len());
        for column in columns {
            row.insert(column.name().to_string(), any_value_to_json(&column.get(i)?));
        }
        rows.push(Value::Object(row));
    }

    Ok(rows)
}

fn any_value_to_json(value: &AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(*b),
        AnyValue::Int8(v) => Value::from(*v),
        AnyValue::Int16(v) => Value::from(*v),
        AnyValue::Int32(v) => Value::from(*v),
        AnyValue::Int64(v) => Value::from(*v),
        AnyValue::UInt8(v) => Value::from(*v),
        AnyValue::UInt16(v) => Value::from(*v),
        AnyValue::UInt32(v) => Value::from(*v),
        AnyValue::UInt64(v) => Value::from(*v),
        AnyValue::Float32(v) => Value::from(*v),
        AnyValue::Float64(v) => Value::from(*v),
        AnyValue::String(s) => Value::String((*s).to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(other.to_string()),
    }
}
