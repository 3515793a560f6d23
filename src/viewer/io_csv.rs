// Reading results from CSV files.

use constituency_results::builder::Builder;

use crate::viewer::io_common::simplify_file_name;
use crate::viewer::*;

/// Reads all the records of a CSV results file.
///
/// The first row is the header. Rows may have fewer cells than the header:
/// missing optional cells read as empty.
pub fn read_csv_results(path: &str, schema: &SchemaConfig) -> ViewerResult<Vec<CandidateRecord>> {
    let resource = simplify_file_name(path);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.records();

    let header: Vec<String> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu { path, lineno: 1_usize })?
            .iter()
            .map(|s| s.to_string())
            .collect(),
        None => whatever!("The file {} is empty", path),
    };
    debug!("read_csv_results: header: {:?}", header);
    let mut builder = Builder::new(schema, &resource, &header).context(PipelineSnafu {})?;

    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        if line.iter().all(|s| s.trim().is_empty()) {
            debug!("read_csv_results: skipping blank line {}", lineno);
            continue;
        }
        let row: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        builder.add_row(lineno, &row).context(PipelineSnafu {})?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_records() {
        let f = write_csv(
            "\u{feff}pc,name,party,Votes_Total,age,category,symbol\n\
             Chennai North,A,PartyX,50000,45,GEN,Sun\n\
             Chennai North,B,PartyY,70000\n\
             ,,,\n",
        );
        let path = f.path().display().to_string();
        let records = read_csv_results(&path, &SchemaConfig::pc2024()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].age, "45");
        assert_eq!(records[1].vote_total, 70000);
        assert_eq!(records[1].symbol, "");
    }

    #[test]
    fn invalid_vote_total() {
        let f = write_csv("pc,name,party,Votes_Total\nX,A,P,12\nX,B,Q,many\n");
        let path = f.path().display().to_string();

        let res = read_csv_results(&path, &SchemaConfig::pc2024());
        match res {
            Err(ViewerError::Pipeline {
                source: ResultsError::DataUnavailable { reason, .. },
            }) => assert!(reason.contains("line 3"), "{}", reason),
            x => panic!("unexpected result {:?}", x),
        }

        let mut schema = SchemaConfig::pc2024();
        schema.invalid_vote_policy = InvalidVotePolicy::SkipRow;
        let records = read_csv_results(&path, &schema).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_column() {
        let f = write_csv("pc,name,Votes_Total\nX,A,12\n");
        let path = f.path().display().to_string();
        assert!(read_csv_results(&path, &SchemaConfig::pc2024()).is_err());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_csv_results("/nonexistent/file.csv", &SchemaConfig::pc2024()),
            Err(ViewerError::CsvOpen { .. })
        ));
    }
}
