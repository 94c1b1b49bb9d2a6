mod common;

use clap::Parser;
use common::Fixture;
use janice_core::{
    BatchOutcome, Context, JaniceError, MediaIterator, MediaResult, Rect, Result, Sdk, SdkConfig,
    Track,
};
use janice_harness::{run, Cli, HarnessError};

/// What the scripted SDK returns from every batch call.
enum Script {
    /// One result fewer than the media handed in.
    DropLastResult,
    /// One template per media but no detections.
    NoDetections,
    /// Fail the whole batch with this error.
    Fail(JaniceError),
}

/// An SDK whose batch behavior is picked through the `algorithm` string.
struct ScriptedSdk {
    script: Script,
}

impl Sdk for ScriptedSdk {
    type Template = u64;
    type Detection = Track;

    fn initialize(config: &SdkConfig) -> Result<Self> {
        let script = match config.algorithm.as_str() {
            "drop_last" => Script::DropLastResult,
            "no_detections" => Script::NoDetections,
            code => Script::Fail(code.parse().map_err(|_| JaniceError::BadArgument)?),
        };
        Ok(Self { script })
    }

    fn enroll_from_media_batch(
        &mut self,
        media: &mut [Box<dyn MediaIterator>],
        _context: &Context,
    ) -> Result<BatchOutcome<u64, Track>> {
        let mut outcome = BatchOutcome::default();
        match self.script {
            Script::DropLastResult => {
                for _ in 1..media.len() {
                    outcome.push(whole_frame(), Ok(()));
                }
            }
            Script::NoDetections => {
                for _ in media.iter() {
                    let result = MediaResult {
                        templates: vec![7],
                        detections: Vec::new(),
                    };
                    outcome.push(result, Ok(()));
                }
            }
            Script::Fail(error) => return Err(error),
        }
        Ok(outcome)
    }

    fn serialize_template(&self, template: &u64) -> Result<Vec<u8>> {
        Ok(template.to_le_bytes().to_vec())
    }

    fn detection_track(&self, detection: &Track) -> Result<Track> {
        Ok(detection.clone())
    }
}

fn whole_frame() -> MediaResult<u64, Track> {
    let mut track = Track::default();
    track.push(Rect { x: 0, y: 0, width: 4, height: 4 }, 1.0, 0);
    MediaResult {
        templates: vec![1],
        detections: vec![track],
    }
}

fn cli(fx: &Fixture, list: &std::path::Path, algorithm: &str, extra: &[&str]) -> Cli {
    let mut args: Vec<String> = vec![
        "janice_enroll_media".into(),
        list.display().to_string(),
        fx.media_dir().display().to_string(),
        fx.templates_dir().display().to_string(),
        fx.output().display().to_string(),
        "-a".into(),
        algorithm.into(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    Cli::try_parse_from(args).unwrap()
}

fn two_stills(fx: &Fixture) -> std::path::PathBuf {
    fx.write_gray("a.png", 4, 4, 1);
    fx.write_gray("b.png", 4, 4, 2);
    fx.write_list(&[("a.png", 1), ("b.png", 2)])
}

#[test]
fn test_too_few_results_aborts() {
    let fx = Fixture::new();
    let list = two_stills(&fx);

    let err = run::<ScriptedSdk>(&cli(&fx, &list, "drop_last", &[])).unwrap_err();
    match err {
        HarnessError::TemplateCountMismatch { batch_idx, expected, actual } => {
            assert_eq!((batch_idx, expected, actual), (0, 2, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!fx.templates_dir().join("1.tmpl").exists());
}

#[test]
fn test_templates_without_detections_abort() {
    let fx = Fixture::new();
    let list = two_stills(&fx);

    let err = run::<ScriptedSdk>(&cli(&fx, &list, "no_detections", &["-b", "1"])).unwrap_err();
    match err {
        HarnessError::DetectionCountMismatch { batch_idx, media_idx, templates, detections } => {
            assert_eq!((batch_idx, media_idx, templates, detections), (0, 0, 1, 0));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_failed_batch_is_fatal_unless_listed() {
    let fx = Fixture::new();
    let list = two_stills(&fx);

    let err = run::<ScriptedSdk>(&cli(&fx, &list, "JANICE_OUT_OF_MEMORY", &[])).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Api { call: "enroll_from_media_batch", error: JaniceError::OutOfMemory }
    ));

    let summary = run::<ScriptedSdk>(&cli(
        &fx,
        &list,
        "JANICE_OUT_OF_MEMORY",
        &["-n", "JANICE_OUT_OF_MEMORY"],
    ))
    .unwrap();
    assert_eq!(summary.media, 2);
    assert_eq!(summary.batches, 1);
    assert_eq!(summary.tolerated, 1);
    assert_eq!(summary.templates, 0);
    assert_eq!(summary.rows, 0);
    assert!(fx.output_rows().is_empty());
}
