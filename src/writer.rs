use crate::{ResultTable, Result, CSV_HEADER};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Writes the table to `path` as CSV, replacing any existing file.
///
/// The header row is always written, so an empty table still produces a
/// one-line file.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn write_table(table: &ResultTable, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_table_to(table, file)?;
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Writes the table as CSV to any sink.
pub fn write_table_to<W: Write>(table: &ResultTable, sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    writer.write_record(CSV_HEADER)?;
    for row in table {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListingRow;

    fn table() -> ResultTable {
        let mut table = ResultTable::new();
        table.push(ListingRow {
            title_text: "Book A".to_string(),
            title_link: "/view/1".to_string(),
            price: "10,000원".to_string(),
            review: "9.5".to_string(),
        });
        table.push(ListingRow {
            title_text: "Say \"hi\"\n".to_string(),
            title_link: "/view/2".to_string(),
            price: "9,000원".to_string(),
            review: "".to_string(),
        });
        table
    }

    #[test]
    fn test_empty_table_writes_header() {
        let mut out = Vec::new();
        write_table_to(&ResultTable::new(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "title_text,title_link,price,review\n");
    }

    #[test]
    fn test_output_reads_back() {
        let table = table();
        let mut out = Vec::new();
        write_table_to(&table, &mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        assert_eq!(reader.headers().unwrap(), &csv::StringRecord::from(CSV_HEADER.to_vec()));

        let rows: Vec<ListingRow> = reader.deserialize::<ListingRow>().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.as_slice(), table.rows());
    }

    #[test]
    fn test_prices_with_commas_are_quoted() {
        let mut out = Vec::new();
        write_table_to(&table(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Book A,/view/1,\"10,000원\",9.5\n"));
    }
}
