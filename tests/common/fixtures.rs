use std::io::Write;
use tempfile::NamedTempFile;

pub const ANN: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";
pub const BOB: &str = "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8";
pub const CY: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

pub fn accounts_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, email, balance").unwrap();
    writeln!(file, "{ANN}, ann@example.com, 5000").unwrap();
    writeln!(file, "{BOB}, bob@example.com, 0").unwrap();
    writeln!(file, "{CY}, cy@example.com, 100").unwrap();
    file
}

pub fn operations_csv(rows: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, from, to, amount").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}
