//! Local quote file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rates_types::Bid;

use crate::ClientError;

/// Default output path, relative to the working directory.
pub const QUOTE_FILE: &str = "cotacao.txt";

/// `Dólar: <bid>` with six decimal digits and no trailing newline.
pub fn render_quote(bid: Bid) -> String {
    format!("Dólar: {:.6}", bid.value())
}

/// Creates or truncates `path` and writes the rendered quote.
pub fn write_quote(path: impl AsRef<Path>, bid: Bid) -> Result<(), ClientError> {
    let mut file = File::create(path.as_ref()).map_err(ClientError::CreateFile)?;
    file.write_all(render_quote(bid).as_bytes())
        .map_err(ClientError::WriteFile)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(value: f64) -> Bid {
        Bid::new(value).unwrap()
    }

    #[test]
    fn test_render_six_decimals() {
        assert_eq!(render_quote(bid(5.4321)), "Dólar: 5.432100");
        assert_eq!(render_quote(bid(5.0)), "Dólar: 5.000000");
        assert_eq!(render_quote(bid(5.1234567)), "Dólar: 5.123457");
    }

    #[test]
    fn test_write_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(QUOTE_FILE);
        std::fs::write(&path, "Dólar: 123456.789000 plus some stale trailing text").unwrap();

        write_quote(&path, bid(5.4321)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Dólar: 5.432100");
    }

    #[test]
    fn test_write_into_missing_directory_fails_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(QUOTE_FILE);

        let err = write_quote(&path, bid(5.0)).unwrap_err();

        assert!(matches!(err, ClientError::CreateFile(_)));
        assert!(!path.exists());
    }
}
