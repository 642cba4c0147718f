use crate::error::{GridError, Result};

/// Occupancy grid produced by rasterizing a polygon
///
/// Rows run south to north, columns west to east. Every row has the same
/// length and every cell is 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BinaryMatrix {
    rows: Vec<Vec<u8>>,
}

impl BinaryMatrix {
    /// Build from explicit rows, checking shape and cell values
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(GridError::InvalidMatrix(format!(
                "matrix row {} has length {}, expected {}",
                bad,
                rows[bad].len(),
                width
            )));
        }
        if rows.iter().flatten().any(|&c| c > 1) {
            return Err(GridError::InvalidMatrix(
                "matrix cells must be 0 or 1".to_string(),
            ));
        }
        Ok(Self { rows })
    }

    /// Build from rows the rasterizer already knows to be well-formed
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.rows.get(row)?.get(col).copied()
    }

    pub fn filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|&&c| c == 1).count()
    }

    /// Fraction of cells set, 0.0 for an empty matrix
    pub fn coverage(&self) -> f64 {
        let total = self.height() * self.width();
        if total == 0 {
            return 0.0;
        }
        self.filled_cells() as f64 / total as f64
    }

    /// Comma-separated cells per row, rows joined by newlines
    pub fn export_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
