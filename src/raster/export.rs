use super::BinaryMatrix;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File name the source UI offered for matrix downloads
pub const DEFAULT_EXPORT_NAME: &str = "polygon_binary_matrix.txt";

/// Write a matrix in its comma/newline text form
///
/// No trailing newline is written, matching [`BinaryMatrix::export_text`].
pub fn write_matrix(path: &Path, matrix: &BinaryMatrix) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create matrix file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(matrix.export_text().as_bytes())?;
    writer.flush()?;

    log::debug!(
        "wrote {}x{} matrix to {}",
        matrix.height(),
        matrix.width(),
        path.display()
    );
    Ok(())
}

/// Size in bytes of the text form of a `height x width` matrix
pub fn estimate_text_size(height: usize, width: usize) -> usize {
    if height == 0 || width == 0 {
        return 0;
    }
    // one digit per cell, a comma between cells, a newline between rows
    height * (2 * width - 1) + (height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_matrix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);

        let matrix = BinaryMatrix::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0]]).unwrap();
        write_matrix(&path, &matrix).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "1,0,1\n0,1,0");
        assert_eq!(written.len(), estimate_text_size(2, 3));
    }

    #[test]
    fn test_estimate_size() {
        assert_eq!(estimate_text_size(0, 0), 0);
        assert_eq!(estimate_text_size(1, 1), 1);
        assert_eq!(estimate_text_size(2, 2), 7);
        assert_eq!(estimate_text_size(50, 50), 50 * 99 + 49);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_matrix(&path, &BinaryMatrix::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to create matrix file"));
    }
}
