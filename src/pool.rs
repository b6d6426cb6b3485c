// 📂 Pool Loader - candidate codes from a headerless flat file

use crate::code::Code;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::info;

/// Load the candidate pool: one raw token per line, no header.
///
/// Every token is left-padded to 5 digits. Order and duplicates are kept
/// as they appear in the file. A missing file is `PoolUnavailable`.
pub fn load_pool(pool_path: &Path) -> Result<Vec<Code>> {
    if !pool_path.exists() {
        return Err(Error::PoolUnavailable {
            path: pool_path.to_path_buf(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(pool_path)?;

    let mut codes = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let token = match record.get(0) {
            Some(token) if !token.is_empty() => token,
            _ => continue,
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let code = Code::normalize(token).map_err(|_| Error::InvalidCode {
            line,
            token: token.to_string(),
        })?;

        codes.push(code);
    }

    info!("Loaded {} codes from pool {}", codes.len(), pool_path.display());

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_pool(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("favorite_patterns_pool.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_pool_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = load_pool(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, Error::PoolUnavailable { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_tokens_are_zero_padded_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_pool(&dir, "135\n98765\n4321\n7\n");

        let pool = load_pool(&path).unwrap();
        let codes: Vec<&str> = pool.iter().map(Code::as_str).collect();
        assert_eq!(codes, vec!["00135", "98765", "04321", "00007"]);
    }

    #[test]
    fn test_padding_collisions_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_pool(&dir, "1\n00001\n");

        let pool = load_pool(&path).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0], pool[1]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_pool(&dir, "11111\n\n22222\n   \n");

        let pool = load_pool(&path).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_invalid_token_names_its_line() {
        let dir = TempDir::new().unwrap();
        let path = write_pool(&dir, "11111\nabc\n");

        match load_pool(&path).unwrap_err() {
            Error::InvalidCode { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_pool_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_pool(&dir, "");
        assert!(load_pool(&path).unwrap().is_empty());
    }
}
