use gloo_timers::callback::Timeout;
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use wasm_bindgen::JsCast;

use crate::error::ExportError;
use crate::models::IncomeRecord;

pub const EXPORT_FILE_NAME: &str = "incomes.xlsx";
const SHEET_NAME: &str = "Incomes";
const REVOKE_DELAY_MS: u32 = 10_000;
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Header row plus one row per record. Columns are the raw field names in the
/// order they first appear across the records.
pub fn sheet_rows(records: &[IncomeRecord]) -> (Vec<String>, Vec<Vec<Cell>>) {
    let objects: Vec<serde_json::Map<String, Value>> =
        records.iter().map(IncomeRecord::export_fields).collect();

    let mut headers: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = objects
        .iter()
        .map(|object| {
            headers
                .iter()
                .map(|key| object.get(key).map_or(Cell::Empty, to_cell))
                .collect()
        })
        .collect();

    (headers, rows)
}

fn to_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => n.as_f64().map_or(Cell::Empty, Cell::Number),
        Value::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

pub fn incomes_workbook(records: &[IncomeRecord]) -> Result<Vec<u8>, ExportError> {
    let (headers, rows) = sheet_rows(records);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    sheet.write_string(row_num, col, text)?;
                }
                Cell::Number(number) => {
                    sheet.write_number(row_num, col, *number)?;
                }
                Cell::Bool(flag) => {
                    sheet.write_boolean(row_num, col, *flag)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Hands the bytes to the browser as a file download.
pub fn download(bytes: &[u8], file_name: &str) -> Result<(), ExportError> {
    let fail = |what: &str| ExportError::Download(what.to_string());
    let window = web_sys::window().ok_or_else(|| fail("no window"))?;
    let document = window.document().ok_or_else(|| fail("no document"))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let mut options = web_sys::BlobPropertyBag::new();
    options.type_(XLSX_MIME);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| fail("could not create blob"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| fail("could not create object url"))?;

    let anchor = document
        .create_element("a")
        .map_err(|_| fail("could not create link"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| fail("link is not an anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // The browser may still be reading the blob after `click()` returns.
    Timeout::new(REVOKE_DELAY_MS, move || {
        if let Err(err) = web_sys::Url::revoke_object_url(&url) {
            tracing::warn!(error = ?err, "could not revoke export url");
        }
    })
    .forget();
    Ok(())
}

pub fn export_incomes(records: &[IncomeRecord]) -> Result<(), ExportError> {
    let bytes = incomes_workbook(records)?;
    download(&bytes, EXPORT_FILE_NAME)?;
    tracing::info!(rows = records.len(), file = EXPORT_FILE_NAME, "exported incomes");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::decode_incomes;
    use serde_json::json;

    fn records() -> Vec<IncomeRecord> {
        let values: Vec<Value> = serde_json::from_value(json!([
            {
                "_id": "i1",
                "title": "Salary",
                "description": "May",
                "amount": 1000,
                "date": "2024-05-01",
                "category": "c1",
                "createdAt": "2024-05-02T10:00:00Z",
                "updatedAt": "2024-05-02T10:00:00Z",
                "__v": 0
            },
            {
                "_id": "i2",
                "title": "Bonus",
                "description": "Q2",
                "amount": 200.5,
                "date": "2024-06-01",
                "category": "c2",
                "recurring": true
            }
        ]))
        .unwrap();
        decode_incomes(values)
    }

    #[test]
    fn test_headers_are_raw_field_names() {
        let (headers, rows) = sheet_rows(&records());
        assert_eq!(
            headers,
            vec![
                "_id",
                "title",
                "description",
                "amount",
                "date",
                "category",
                "createdAt",
                "updatedAt",
                "__v",
                "recurring"
            ]
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_fields_become_empty_cells() {
        let (headers, rows) = sheet_rows(&records());
        let recurring = headers.iter().position(|h| h == "recurring").unwrap();
        let created = headers.iter().position(|h| h == "createdAt").unwrap();
        assert_eq!(rows[0][recurring], Cell::Empty);
        assert_eq!(rows[1][recurring], Cell::Bool(true));
        assert_eq!(rows[1][created], Cell::Empty);
        assert_eq!(rows[1][3], Cell::Number(200.5));
        assert_eq!(rows[0][4], Cell::Text("2024-05-01".into()));
    }

    #[test]
    fn test_backend_values_and_order_are_kept() {
        let records = decode_incomes(vec![json!({
            "_id": "i3",
            "title": "Salary",
            "description": "June",
            "amount": 1000,
            "date": "2024-05-01T00:00:00.000Z",
            "category": "c1",
            "user": "u1",
            "createdAt": "2024-05-02T10:00:00.000Z",
            "updatedAt": "2024-05-02T10:00:00.000Z",
            "__v": 0
        })]);
        let (headers, rows) = sheet_rows(&records);
        assert_eq!(
            headers,
            vec!["_id", "title", "description", "amount", "date", "category", "user", "createdAt", "updatedAt", "__v"]
        );
        assert_eq!(rows[0][4], Cell::Text("2024-05-01T00:00:00.000Z".into()));
        assert_eq!(rows[0][7], Cell::Text("2024-05-02T10:00:00.000Z".into()));
    }

    #[test]
    fn test_workbook_is_a_zip_container() {
        let bytes = incomes_workbook(&records()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_empty_export_still_builds() {
        let (headers, rows) = sheet_rows(&[]);
        assert!(headers.is_empty());
        assert!(rows.is_empty());
        assert!(incomes_workbook(&[]).is_ok());
    }
}
