#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgb, RgbImage};
use tempfile::TempDir;

/// A scratch workspace: media directory, template directory, SDK directory.
pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        for dir in ["media", "templates", "sdk"] {
            std::fs::create_dir(root.path().join(dir)).unwrap();
        }
        Self { root }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    pub fn media_dir(&self) -> PathBuf {
        self.path("media")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.path("templates")
    }

    pub fn sdk_dir(&self) -> PathBuf {
        self.path("sdk")
    }

    pub fn output(&self) -> PathBuf {
        self.path("out.csv")
    }

    pub fn write_rgb(&self, name: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([40, 80, 120]))
            .save(self.media_dir().join(name))
            .unwrap();
    }

    pub fn write_gray(&self, name: &str, width: u32, height: u32, value: u8) {
        GrayImage::from_pixel(width, height, Luma([value]))
            .save(self.media_dir().join(name))
            .unwrap();
    }

    /// Write a media list with the given (filename, sighting id) rows.
    pub fn write_list(&self, rows: &[(&str, i64)]) -> PathBuf {
        let path = self.path("media.csv");
        let mut writer = csv::Writer::from_path(&path).unwrap();
        writer
            .write_record(["TEMPLATE_ID", "SUBJECT_ID", "FILENAME", "SIGHTING_ID"])
            .unwrap();
        for (i, (file, sighting)) in rows.iter().enumerate() {
            let (i, sighting) = (i.to_string(), sighting.to_string());
            writer.write_record([i.as_str(), i.as_str(), *file, sighting.as_str()]).unwrap();
        }
        writer.flush().unwrap();
        path
    }

    /// Output rows split into fields, header excluded.
    pub fn output_rows(&self) -> Vec<Vec<String>> {
        read_rows(&self.output())
    }
}

pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().clone();
    assert_eq!(&header[0], "TEMPLATE_ID");
    assert_eq!(&header[2], "FILENAME");
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}
