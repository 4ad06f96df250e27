use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::DriverError;

/// Best result of one `(degree, size, link_pairs)` grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellReport {
    /// Maximum degree of the cell.
    pub degree: usize,
    /// Vertex count of the cell.
    pub size: usize,
    /// Link pairs of the cell.
    pub link_pairs: usize,
    /// Spectral radius `R` of the best gadget's transfer matrix.
    pub spectral_radius: Option<f64>,
    /// `R^(1/n)`: #CIS grows at least like this base per vertex.
    pub lower_bound: Option<f64>,
    /// Adjacency matrix of the best gadget.
    pub adjacency: Option<String>,
    /// #CIS of the best gadget chained for the cross-check.
    pub chained_cis: Option<u64>,
    /// Connected candidates discarded by the growth sanity cap.
    pub rejected: usize,
    /// Candidates that never produced a connected gadget.
    pub disconnected: usize,
}

impl CellReport {
    pub(crate) const fn empty(degree: usize, size: usize, link_pairs: usize) -> Self {
        Self {
            degree,
            size,
            link_pairs,
            spectral_radius: None,
            lower_bound: None,
            adjacency: None,
            chained_cis: None,
            rejected: 0,
            disconnected: 0,
        }
    }
}

impl fmt::Display for CellReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "n = {}, d = {}, l = {}", self.size, self.degree, self.link_pairs)?;
        match (self.lower_bound, self.spectral_radius) {
            (Some(base), Some(radius)) => {
                writeln!(f, "    #CIS = O({base}^n)")?;
                write!(f, "    Max. eigenvalue: {radius}")?;
            }
            _ => write!(f, "    no plausible gadget")?,
        }
        if let Some(cis) = self.chained_cis {
            write!(f, "\n    Chained #CIS: {cis}")?;
        }
        Ok(())
    }
}

/// One line of the values report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueRow {
    /// Maximum degree of the cell.
    pub degree: usize,
    /// Vertex count of the cell.
    pub size: usize,
    /// Link pairs of the cell.
    pub link_pairs: usize,
    /// Per-vertex growth base of the best gadget.
    pub lower_bound: Option<f64>,
    /// Spectral radius of the best gadget.
    pub spectral_radius: Option<f64>,
    /// #CIS of the chained cross-check.
    pub chained_cis: Option<u64>,
}

/// One line of the graphs report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphRow {
    /// Maximum degree of the cell.
    pub degree: usize,
    /// Vertex count of the cell.
    pub size: usize,
    /// Link pairs of the cell.
    pub link_pairs: usize,
    /// Adjacency matrix of the best gadget.
    pub adjacency: String,
}

/// Results of a whole search, in grid order.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    /// Configuration tag, used as the file name prefix.
    pub tag: String,
    /// One entry per admitted grid cell.
    pub cells: Vec<CellReport>,
}

impl SearchReport {
    /// Field separator of the CSV reports.
    pub const DELIMITER: u8 = b';';

    /// Values report rows, one per cell.
    pub fn value_rows(&self) -> impl Iterator<Item = ValueRow> + '_ {
        self.cells.iter().map(|c| ValueRow {
            degree: c.degree,
            size: c.size,
            link_pairs: c.link_pairs,
            lower_bound: c.lower_bound,
            spectral_radius: c.spectral_radius,
            chained_cis: c.chained_cis,
        })
    }

    /// Cells without a best gadget have no graph row.
    pub fn graph_rows(&self) -> impl Iterator<Item = GraphRow> + '_ {
        self.cells.iter().filter_map(|c| {
            c.adjacency.as_ref().map(|adjacency| GraphRow {
                degree: c.degree,
                size: c.size,
                link_pairs: c.link_pairs,
                adjacency: adjacency.clone(),
            })
        })
    }

    /// Writes the values report to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Csv`] if serialization or writing fails.
    pub fn write_values<W: io::Write>(&self, writer: W) -> Result<(), DriverError> {
        write_rows(writer, self.value_rows())
    }

    /// Writes the graphs report to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Csv`] if serialization or writing fails.
    pub fn write_graphs<W: io::Write>(&self, writer: W) -> Result<(), DriverError> {
        write_rows(writer, self.graph_rows())
    }

    /// Writes `<tag>_values.csv` and `<tag>_graphs.csv` into `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Io`] if a file cannot be created and
    /// [`DriverError::Csv`] if writing fails.
    pub fn write_files(&self, dir: &Path) -> Result<(PathBuf, PathBuf), DriverError> {
        let values_path = dir.join(format!("{}_values.csv", self.tag));
        let graphs_path = dir.join(format!("{}_graphs.csv", self.tag));

        self.write_values(std::fs::File::create(&values_path)?)?;
        self.write_graphs(std::fs::File::create(&graphs_path)?)?;
        Ok((values_path, graphs_path))
    }
}

/// A sampled linked cycle and its #CIS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleSample {
    /// Number of connected induced subsets.
    pub cis: u64,
    /// Adjacency matrix of the cycle.
    pub adjacency: String,
}

/// Extreme linked cycles of one `(degree, size)` cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtremesCell {
    /// Maximum degree of the sampled cycles.
    pub degree: usize,
    /// Vertex count of the sampled cycles.
    pub size: usize,
    /// Earliest sample with the largest #CIS.
    pub best: Option<CycleSample>,
    /// Earliest sample with the smallest #CIS.
    pub worst: Option<CycleSample>,
}

impl ExtremesCell {
    pub(crate) const fn empty(degree: usize, size: usize) -> Self {
        Self {
            degree,
            size,
            best: None,
            worst: None,
        }
    }
}

impl fmt::Display for ExtremesCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n = {}, d = {}", self.size, self.degree)?;
        match (&self.best, &self.worst) {
            (Some(best), Some(worst)) => {
                write!(f, "\n    BEST:  {}\n    WORST: {}", best.cis, worst.cis)
            }
            _ => write!(f, "\n    no samples"),
        }
    }
}

/// One line of the linked-cycle report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CycleRow {
    /// Maximum degree of the cell.
    pub degree: usize,
    /// Vertex count of the cell.
    pub size: usize,
    /// Largest #CIS seen.
    pub best_cis: Option<u64>,
    /// Smallest #CIS seen.
    pub worst_cis: Option<u64>,
    /// Adjacency matrix of the best cycle.
    pub best_adjacency: Option<String>,
    /// Adjacency matrix of the worst cycle.
    pub worst_adjacency: Option<String>,
}

/// Results of a linked-cycle sweep, in `(degree, size)` order.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtremesReport {
    /// Configuration tag, used as the file name prefix.
    pub tag: String,
    /// One entry per `(degree, size)` cell.
    pub cells: Vec<ExtremesCell>,
}

impl ExtremesReport {
    /// CSV rows, one per cell.
    pub fn rows(&self) -> impl Iterator<Item = CycleRow> + '_ {
        self.cells.iter().map(|c| CycleRow {
            degree: c.degree,
            size: c.size,
            best_cis: c.best.as_ref().map(|s| s.cis),
            worst_cis: c.worst.as_ref().map(|s| s.cis),
            best_adjacency: c.best.as_ref().map(|s| s.adjacency.clone()),
            worst_adjacency: c.worst.as_ref().map(|s| s.adjacency.clone()),
        })
    }

    /// Writes the report to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Csv`] if serialization or writing fails.
    pub fn write<W: io::Write>(&self, writer: W) -> Result<(), DriverError> {
        write_rows(writer, self.rows())
    }

    /// Writes `<tag>_cycles.csv` into `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Io`] if the file cannot be created and
    /// [`DriverError::Csv`] if writing fails.
    pub fn write_file(&self, dir: &Path) -> Result<PathBuf, DriverError> {
        let path = dir.join(format!("{}_cycles.csv", self.tag));
        self.write(std::fs::File::create(&path)?)?;
        Ok(path)
    }
}

fn write_rows<W, R, I>(writer: W, rows: I) -> Result<(), DriverError>
where
    W: io::Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(SearchReport::DELIMITER)
        .from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SearchReport {
        let mut found = CellReport::empty(3, 10, 2);
        found.spectral_radius = Some(16.0);
        found.lower_bound = Some(2f64.powf(0.4));
        found.adjacency = Some("[[0, 1], [1, 0]]".to_string());
        SearchReport {
            tag: "D3_N10_L2-3_I5".to_string(),
            cells: vec![found, CellReport::empty(3, 10, 3)],
        }
    }

    #[test]
    fn test_values_csv_has_header_and_empty_fields() {
        let mut out = Vec::new();
        report().write_values(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "degree;size;link_pairs;lower_bound;spectral_radius;chained_cis"
        );
        assert!(lines[1].starts_with("3;10;2;"));
        assert_eq!(lines[2], "3;10;3;;;");
    }

    #[test]
    fn test_graph_rows_skip_empty_cells() {
        let mut out = Vec::new();
        report().write_graphs(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("[[0, 1], [1, 0]]"));
    }

    #[test]
    fn test_cycle_rows_leave_empty_cells_blank() {
        let mut sampled = ExtremesCell::empty(3, 8);
        sampled.best = Some(CycleSample {
            cis: 90,
            adjacency: "[[0]]".to_string(),
        });
        sampled.worst = Some(CycleSample {
            cis: 70,
            adjacency: "[[1]]".to_string(),
        });
        let report = ExtremesReport {
            tag: "D3_N8_I0".to_string(),
            cells: vec![sampled, ExtremesCell::empty(3, 10)],
        };

        let mut out = Vec::new();
        report.write(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "degree;size;best_cis;worst_cis;best_adjacency;worst_adjacency"
        );
        assert_eq!(lines[1], "3;8;90;70;[[0]];[[1]]");
        assert_eq!(lines[2], "3;10;;;;");
        assert!(report.cells[1].to_string().ends_with("no samples"));
    }

    #[test]
    fn test_display_summarizes_cell() {
        let text = report().cells[0].to_string();
        assert!(text.starts_with("n = 10, d = 3, l = 2"));
        assert!(text.contains("Max. eigenvalue: 16"));
    }
}
