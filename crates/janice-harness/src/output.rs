//! Per-track output CSV.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use janice_core::{EnrollmentRole, Rect};

use crate::error::HarnessError;

pub const HEADER: [&str; 12] = [
    "TEMPLATE_ID",
    "TEMPLATE_ROLE",
    "FILENAME",
    "FRAME_NUM",
    "FACE_X",
    "FACE_Y",
    "FACE_WIDTH",
    "FACE_HEIGHT",
    "CONFIDENCE",
    "BATCH_IDX",
    "TEMPLATE_CREATION_TIME",
    "TEMPLATE_SIZE",
];

/// One track entry of one template.
#[derive(Debug, Clone)]
pub struct OutputRow<'a> {
    pub template_id: u64,
    pub role: EnrollmentRole,
    pub filename: &'a str,
    pub frame: u32,
    pub rect: Rect,
    pub confidence: f32,
    pub batch_idx: usize,
    /// Wall-clock time of the batch call, in milliseconds.
    pub elapsed_ms: f64,
    pub template_size: usize,
}

impl OutputRow<'_> {
    fn fields(&self) -> [String; 12] {
        [
            self.template_id.to_string(),
            self.role.as_i32().to_string(),
            self.filename.to_string(),
            self.frame.to_string(),
            self.rect.x.to_string(),
            self.rect.y.to_string(),
            self.rect.width.to_string(),
            self.rect.height.to_string(),
            format!("{:.6}", self.confidence),
            self.batch_idx.to_string(),
            format!("{:.6}", self.elapsed_ms),
            self.template_size.to_string(),
        ]
    }
}

pub struct OutputWriter<W: Write> {
    writer: csv::Writer<W>,
    path: PathBuf,
    rows: u64,
}

impl OutputWriter<File> {
    /// Create or truncate `path` and write the header.
    pub fn create(path: &Path) -> Result<Self, HarnessError> {
        let writer = csv::Writer::from_path(path).map_err(|source| HarnessError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_writer(writer, path)
    }
}

impl<W: Write> OutputWriter<W> {
    pub fn from_writer(inner: W) -> Result<Self, HarnessError> {
        Self::with_writer(csv::Writer::from_writer(inner), Path::new("<writer>"))
    }

    fn with_writer(writer: csv::Writer<W>, path: &Path) -> Result<Self, HarnessError> {
        let mut out = Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        };
        out.writer.write_record(HEADER).map_err(|e| out.error(e))?;
        Ok(out)
    }

    pub fn write_row(&mut self, row: &OutputRow<'_>) -> Result<(), HarnessError> {
        self.writer.write_record(row.fields()).map_err(|e| self.error(e))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the inner writer.
    pub fn finish(self) -> Result<W, HarnessError> {
        let path = self.path;
        self.writer.into_inner().map_err(|e| HarnessError::Output {
            path,
            source: csv::Error::from(e.into_error()),
        })
    }

    fn error(&self, source: csv::Error) -> HarnessError {
        HarnessError::Output {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(filename: &str) -> OutputRow<'_> {
        OutputRow {
            template_id: 3,
            role: EnrollmentRole::Gallery1N,
            filename,
            frame: 12,
            rect: Rect { x: 1, y: 2, width: 30, height: 40 },
            confidence: 0.5,
            batch_idx: 1,
            elapsed_ms: 2.25,
            template_size: 99,
        }
    }

    #[test]
    fn test_header_and_row_format() {
        let mut out = OutputWriter::from_writer(Vec::new()).unwrap();
        out.write_row(&row("/data/a.jpg")).unwrap();
        assert_eq!(out.rows(), 1);

        let text = String::from_utf8(out.finish().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "TEMPLATE_ID,TEMPLATE_ROLE,FILENAME,FRAME_NUM,FACE_X,FACE_Y,FACE_WIDTH,FACE_HEIGHT,CONFIDENCE,BATCH_IDX,TEMPLATE_CREATION_TIME,TEMPLATE_SIZE"
        );
        assert_eq!(lines[1], "3,3,/data/a.jpg,12,1,2,30,40,0.500000,1,2.250000,99");
    }

    #[test]
    fn test_filename_with_comma_is_quoted() {
        let mut out = OutputWriter::from_writer(Vec::new()).unwrap();
        out.write_row(&row("a,b.jpg")).unwrap();
        let text = String::from_utf8(out.finish().unwrap()).unwrap();
        assert!(text.lines().nth(1).unwrap().contains("\"a,b.jpg\""));
    }

    #[test]
    fn test_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents\nmore\nmore\n").unwrap();

        let out = OutputWriter::create(&path).unwrap();
        out.finish().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("TEMPLATE_ID,"));
    }
}
