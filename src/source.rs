use anyhow::{Context, Result};
use std::path::Path;

use crate::model::input_row::InputRow;

pub const DEFAULT_CSV_PATH: &str = "./pivotalStories.csv";

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))
}

/// Rows of `content` in file order; the first line is the header. A bad
/// record yields an `Err` and the iterator carries on with the next one.
pub fn rows(content: &str) -> impl Iterator<Item = Result<InputRow, csv::Error>> + '_ {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes())
        .into_deserialize::<InputRow>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_header_names() {
        let csv = "usecase,app,memo\nAdd coupon,Checkout,note\n";
        let parsed: Vec<InputRow> = rows(csv).map(|r| r.unwrap()).collect();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].app, "Checkout");
        assert_eq!(parsed[0].usecase, "Add coupon");
        assert_eq!(parsed[0].memo, "note");
        assert_eq!(parsed[0].path, "");
        assert_eq!(parsed[0].figma, "");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "app,usecase,owner\nShop,Pay,alice\n";
        let parsed: Vec<InputRow> = rows(csv).map(|r| r.unwrap()).collect();
        assert_eq!(parsed[0].usecase, "Pay");
    }

    #[test]
    fn quoted_multiline_cells_stay_in_one_row() {
        let csv = "app,usecase,memo\nShop,Pay,\"line one\nline two\"\nShop,Refund,\n";
        let parsed: Vec<InputRow> = rows(csv).map(|r| r.unwrap()).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].memo, "line one\nline two");
        assert_eq!(parsed[1].usecase, "Refund");
    }

    #[test]
    fn malformed_row_is_reported_and_parsing_continues() {
        let csv = "app,usecase\nShop,Pay\nShop,Refund,extra\nShop,Cancel\n";
        let results: Vec<_> = rows(csv).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().usecase, "Cancel");
    }

    #[test]
    fn header_only_file_has_no_rows() {
        assert_eq!(rows("app,usecase,path,memo,figma\n").count(), 0);
    }

    #[test]
    fn read_file_names_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let err = read_file(&missing).unwrap_err();
        assert!(err.to_string().contains("nope.csv"));
    }
}
