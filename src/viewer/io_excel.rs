// Reading results from Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use constituency_results::builder::Builder;

use crate::viewer::io_common::simplify_file_name;
use crate::viewer::*;

/// Reads all the records of a worksheet. Without a worksheet name, the first
/// worksheet of the workbook is used.
pub fn read_excel_results(
    path: &str,
    worksheet_name: Option<&str>,
    schema: &SchemaConfig,
) -> ViewerResult<Vec<CandidateRecord>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };

    let mut rows = wrange.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells
            .iter()
            .map(|c| cell_to_string(c, 1))
            .collect::<ViewerResult<Vec<String>>>()?,
        None => whatever!("The worksheet of {} is empty", path),
    };
    debug!("read_excel_results: header: {:?}", header);
    let resource = simplify_file_name(path);
    let mut builder = Builder::new(schema, &resource, &header).context(PipelineSnafu {})?;

    for (idx, cells) in rows.enumerate() {
        let lineno = idx + 2;
        let row = cells
            .iter()
            .map(|c| cell_to_string(c, lineno))
            .collect::<ViewerResult<Vec<String>>>()?;
        if row.iter().all(|s| s.trim().is_empty()) {
            debug!("read_excel_results: skipping blank line {}", lineno);
            continue;
        }
        builder.add_row(lineno, &row).context(PipelineSnafu {})?;
    }
    Ok(builder.build())
}

/// The text of a cell. Whole floats are written without a fractional part,
/// so that a vote count stored as `50000.0` reads as `50000`.
fn cell_to_string(cell: &DataType, lineno: usize) -> ViewerResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        x => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", x),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook_path() -> String {
        let dir = option_env!("PCRESULTS_TEST_DIR")
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}/tests/data", env!("CARGO_MANIFEST_DIR")));
        format!("{}/chennai.xlsx", dir)
    }

    #[test]
    fn named_worksheet() {
        let records =
            read_excel_results(&workbook_path(), Some("Results"), &SchemaConfig::tn2019()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].constituency, "Chennai North");
        assert_eq!(records[0].candidate_name, "A");
        // Numeric cells come back as whole vote totals and plain text.
        assert_eq!(records[0].vote_total, 50000);
        assert_eq!(records[0].age, "45");
        assert_eq!(records[1].symbol, "Leaf");
        assert_eq!(records[2].candidate_name, "NOTA");
        assert_eq!(records[2].age, "");
        assert_eq!(records[3].vote_total, 99999);

        let other =
            read_excel_results(&workbook_path(), Some("Madurai"), &SchemaConfig::tn2019()).unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].vote_total, 43210);
        assert_eq!(other[0].symbol, "");
    }

    #[test]
    fn first_worksheet_by_default() {
        let records = read_excel_results(&workbook_path(), None, &SchemaConfig::pc2024()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].candidate_name, "B");
        assert_eq!(records[1].vote_total, 70000);
    }

    #[test]
    fn unknown_worksheet() {
        let res = read_excel_results(&workbook_path(), Some("Nope"), &SchemaConfig::pc2024());
        match res {
            Err(ViewerError::MissingWorksheet { name, .. }) => assert_eq!(name, "Nope"),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn missing_vote_column() {
        let mut schema = SchemaConfig::pc2024();
        schema.columns.vote_total = "votes".to_string();
        assert!(matches!(
            read_excel_results(&workbook_path(), None, &schema),
            Err(ViewerError::Pipeline {
                source: ResultsError::DataUnavailable { .. }
            })
        ));
    }

    #[test]
    fn cells() {
        assert_eq!(
            cell_to_string(&DataType::String("Chennai".to_string()), 2).unwrap(),
            "Chennai"
        );
        assert_eq!(cell_to_string(&DataType::Float(50000.0), 2).unwrap(), "50000");
        assert_eq!(cell_to_string(&DataType::Float(12.5), 2).unwrap(), "12.5");
        assert_eq!(cell_to_string(&DataType::Int(7), 2).unwrap(), "7");
        assert_eq!(cell_to_string(&DataType::Empty, 2).unwrap(), "");
        assert!(matches!(
            cell_to_string(&DataType::Error(calamine::CellErrorType::Div0), 5),
            Err(ViewerError::ExcelWrongCellType { lineno: 5, .. })
        ));
    }

    #[test]
    fn missing_workbook() {
        assert!(matches!(
            read_excel_results("/nonexistent/results.xlsx", None, &SchemaConfig::pc2024()),
            Err(ViewerError::OpeningExcel { .. })
        ));
    }
}
