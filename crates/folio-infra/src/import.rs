//! Reading catalog import files from disk.

use std::path::{Path, PathBuf};

use folio_types::import::CatalogFile;

#[derive(Debug, thiserror::Error)]
pub enum ImportFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read and parse a TOML catalog file.
pub async fn read_catalog_file(path: &Path) -> Result<CatalogFile, ImportFileError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    toml::from_str(&content).map_err(|source| ImportFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_catalog_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.toml");
        tokio::fs::write(
            &path,
            r#"
[[skills]]
name = "Rust"
category = "language"

[[gigs]]
title = "API Development"
price_min = 1500.0
delivery_time_min = 3
"#,
        )
        .await
        .unwrap();

        let file = read_catalog_file(&path).await.unwrap();
        assert_eq!(file.skills.len(), 1);
        assert_eq!(file.gigs[0].title, "API Development");
        assert!(file.site.is_none());
    }

    #[tokio::test]
    async fn test_missing_and_malformed_files() {
        let tmp = TempDir::new().unwrap();
        let missing = read_catalog_file(&tmp.path().join("nope.toml")).await;
        assert!(matches!(missing, Err(ImportFileError::Read { .. })));

        let bad = tmp.path().join("bad.toml");
        tokio::fs::write(&bad, "[[projects]]\ntitle = 3").await.unwrap();
        assert!(matches!(
            read_catalog_file(&bad).await,
            Err(ImportFileError::Parse { .. })
        ));
    }
}
