// GuildView - core/export.rs
//
// XLSX, CSV and JSON export of the displayed guild records.
// CSV/JSON write to any Write trait object; XLSX is written by
// rust_xlsxwriter, which owns the file creation.

use crate::core::model::{Field, GuildRecord};
use crate::util::constants::{
    MAX_EXACT_XLSX_NUMBER, MAX_XLSX_DATA_ROWS, XLSX_COLUMN_WIDTH, XLSX_SHEET_NAME,
};
use crate::util::error::ExportError;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use std::path::Path;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Json]
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Name shown in file dialogs and menus.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "Excel Workbook",
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    /// Pick a format from the target's extension; anything unrecognised is
    /// written as XLSX.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => ExportFormat::Csv,
            Some("json") => ExportFormat::Json,
            _ => ExportFormat::Xlsx,
        }
    }
}

/// Column header text, one per field in `Field::all()` order.
pub type Headers = [String; 4];

/// Headers made of the stable field keys.
pub fn field_name_headers() -> Headers {
    [
        Field::Name.key().to_string(),
        Field::MemberCount.key().to_string(),
        Field::Id.key().to_string(),
        Field::Owner.key().to_string(),
    ]
}

/// Write `records` to `path` in `format`. Returns the number of data rows.
///
/// Refuses an empty record list with `ExportError::NoData` before anything
/// is created on disk.
pub fn export_to_path<'a, I>(
    records: I,
    headers: &Headers,
    format: ExportFormat,
    path: &Path,
) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a GuildRecord>,
{
    let records: Vec<&GuildRecord> = records.into_iter().collect();
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let count = match format {
        ExportFormat::Xlsx => export_xlsx(&records, headers, path)?,
        ExportFormat::Csv => {
            let file = create_file(path)?;
            export_csv(&records, headers, file, path)?
        }
        ExportFormat::Json => {
            check_unique_headers(headers)?;
            let file = create_file(path)?;
            export_json(&records, headers, std::io::BufWriter::new(file), path)?
        }
    };

    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        rows = count,
        "Export complete"
    );
    Ok(count)
}

/// JSON keys come from the headers, so two equal labels would collapse two
/// columns into one.
fn check_unique_headers(headers: &Headers) -> Result<(), ExportError> {
    for (idx, header) in headers.iter().enumerate() {
        if headers[..idx].contains(header) {
            return Err(ExportError::DuplicateHeader {
                header: header.clone(),
            });
        }
    }
    Ok(())
}

fn create_file(path: &Path) -> Result<std::fs::File, ExportError> {
    std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write records to an XLSX workbook with a single sheet.
///
/// The header row is bold and frozen. The member count is a numeric cell,
/// or a text cell when it is too large for an exact spreadsheet number.
pub fn export_xlsx(
    records: &[&GuildRecord],
    headers: &Headers,
    path: &Path,
) -> Result<usize, ExportError> {
    if records.len() > MAX_XLSX_DATA_ROWS {
        return Err(ExportError::TooManyRows {
            count: records.len(),
            max: MAX_XLSX_DATA_ROWS,
        });
    }

    let xlsx_err = |e| ExportError::Xlsx {
        path: path.to_path_buf(),
        source: e,
    };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(XLSX_SHEET_NAME).map_err(xlsx_err)?;

    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        sheet
            .write_string_with_format(0, col, header.as_str(), &header_format)
            .map_err(xlsx_err)?;
        sheet
            .set_column_width(col, XLSX_COLUMN_WIDTH)
            .map_err(xlsx_err)?;
    }
    sheet.set_freeze_panes(1, 0).map_err(xlsx_err)?;

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, field) in Field::all().iter().enumerate() {
            let col = col as u16;
            if field.is_numeric() && record.member_count <= MAX_EXACT_XLSX_NUMBER {
                sheet
                    .write_number(row, col, record.member_count as f64)
                    .map_err(xlsx_err)?;
            } else {
                sheet
                    .write_string(row, col, record.field_text(*field))
                    .map_err(xlsx_err)?;
            }
        }
    }

    workbook.save(path).map_err(xlsx_err)?;
    Ok(records.len())
}

/// Export records to CSV format with a header row.
pub fn export_csv<W: Write>(
    records: &[&GuildRecord],
    headers: &Headers,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(headers).map_err(csv_err)?;

    for record in records {
        csv_writer
            .write_record([
                record.name.as_str(),
                record.member_count.to_string().as_str(),
                record.id.as_str(),
                record.owner.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records to JSON format (array of objects keyed by header).
pub fn export_json<W: Write>(
    records: &[&GuildRecord],
    headers: &Headers,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_unique_headers(headers)?;
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|record| {
            let mut fields = serde_json::Map::new();
            for (header, field) in headers.iter().zip(Field::all()) {
                let value = if field.is_numeric() {
                    serde_json::Value::from(record.member_count)
                } else {
                    serde_json::Value::from(record.field_text(*field).into_owned())
                };
                fields.insert(header.clone(), value);
            }
            serde_json::Value::Object(fields)
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}
