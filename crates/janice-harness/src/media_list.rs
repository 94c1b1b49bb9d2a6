//! IJB-C media list parsing.
//!
//! The list is a headered CSV. Only `FILENAME` and `SIGHTING_ID` are read;
//! other columns may appear in any order and are ignored. Rows sharing a
//! sighting id form one piece of media.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const FILENAME_COLUMN: &str = "FILENAME";
pub const SIGHTING_ID_COLUMN: &str = "SIGHTING_ID";

#[derive(Error, Debug)]
pub enum MediaListError {
    #[error("cannot read {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column {0}")]
    MissingColumn(&'static str),
    #[error("line {line}: empty FILENAME")]
    EmptyFilename { line: u64 },
    #[error("line {line}: SIGHTING_ID '{value}' is not an integer")]
    BadSightingId { line: u64, value: String },
}

/// Every file of one sighting, in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sighting {
    pub id: i64,
    pub files: Vec<PathBuf>,
}

impl Sighting {
    pub fn first_file(&self) -> &Path {
        &self.files[0]
    }
}

/// Sightings in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaList {
    pub sightings: Vec<Sighting>,
}

impl MediaList {
    pub fn from_path(path: &Path, media_root: &Path) -> Result<Self, MediaListError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| MediaListError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(reader, media_root)
    }

    pub fn from_reader<R: Read>(rdr: R, media_root: &Path) -> Result<Self, MediaListError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        Self::parse(reader, media_root)
    }

    fn parse<R: Read>(mut reader: csv::Reader<R>, media_root: &Path) -> Result<Self, MediaListError> {
        let headers = reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(MediaListError::MissingColumn(name))
        };
        let filename_col = column(FILENAME_COLUMN)?;
        let sighting_col = column(SIGHTING_ID_COLUMN)?;

        let mut sightings: Vec<Sighting> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let filename = record.get(filename_col).unwrap_or("");
            if filename.is_empty() {
                return Err(MediaListError::EmptyFilename { line });
            }
            let raw_id = record.get(sighting_col).unwrap_or("");
            let id: i64 = raw_id.parse().map_err(|_| MediaListError::BadSightingId {
                line,
                value: raw_id.to_string(),
            })?;

            let file = media_root.join(filename);
            match index.get(&id) {
                Some(&i) => sightings[i].files.push(file),
                None => {
                    index.insert(id, sightings.len());
                    sightings.push(Sighting {
                        id,
                        files: vec![file],
                    });
                }
            }
        }

        tracing::debug!(
            sightings = sightings.len(),
            files = sightings.iter().map(|s| s.files.len()).sum::<usize>(),
            "parsed media list"
        );

        Ok(Self { sightings })
    }

    pub fn len(&self) -> usize {
        self.sightings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }
}
