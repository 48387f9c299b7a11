use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::game::Grid;

const HEADER: &str = "Content description:\n\
                      #: wall\n\
                      H: snake head\n\
                      B: snake body\n\
                      T: snake tail\n\
                      F: food\n\
                      \n\
                      Movements:\n\n";

/// Appends a grid snapshot after every move
pub struct MovementLog<W: Write = BufWriter<File>> {
    out: W,
    snapshots: usize,
}

impl MovementLog {
    /// Create (or truncate) the log file and write the legend
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create movement log at {}", path.display()))?;
        Self::from_writer(BufWriter::new(file))
    }
}

impl<W: Write> MovementLog<W> {
    pub fn from_writer(mut out: W) -> Result<Self> {
        out.write_all(HEADER.as_bytes())?;
        Ok(Self { out, snapshots: 0 })
    }

    pub fn write_snapshot(&mut self, grid: &Grid) -> Result<()> {
        writeln!(self.out, "{grid}")?;
        self.snapshots += 1;
        Ok(())
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush movement log")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use tempfile::TempDir;

    #[test]
    fn test_header_and_snapshot() {
        let mut grid = Grid::new(4, 4).unwrap();
        Snake::spawn(&mut grid, &[Position::new(1, 1)]).unwrap();

        let mut log = MovementLog::from_writer(Vec::new()).unwrap();
        log.write_snapshot(&grid).unwrap();
        assert_eq!(log.snapshots(), 1);

        let text = String::from_utf8(log.into_inner()).unwrap();
        assert!(text.starts_with("Content description:\n#: wall\nH: snake head\n"));
        assert!(text.contains("F: food\n\nMovements:\n\n"));
        assert!(text.ends_with(&format!("{grid}\n")));
        assert!(text.contains("# H   # \n"));
    }

    #[test]
    fn test_file_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("moves.txt");
        let grid = Grid::new(4, 5).unwrap();

        let mut log = MovementLog::create(&path).unwrap();
        log.write_snapshot(&grid).unwrap();
        log.write_snapshot(&grid).unwrap();
        log.flush().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("# # # # # ").count(), 4);
        assert!(text.starts_with("Content description:"));
    }
}
