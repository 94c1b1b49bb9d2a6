//! The enrollment run: media list in, templates and output CSV out.

use std::path::{Path, PathBuf};
use std::time::Instant;

use janice_core::{Context, MediaIterator, Sdk};

use crate::cli::Cli;
use crate::error::HarnessError;
use crate::media_list::{MediaList, Sighting};
use crate::nonfatal::NonfatalErrors;
use crate::output::{OutputRow, OutputWriter};

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub media: usize,
    pub batches: usize,
    pub templates: u64,
    pub rows: u64,
    /// Failures that were skipped because their code was nonfatal.
    pub tolerated: usize,
}

/// Media iterators ready for the SDK, with the filename reported for each.
struct PreparedMedia {
    iterators: Vec<Box<dyn MediaIterator>>,
    labels: Vec<String>,
}

fn open_sighting(sighting: &Sighting) -> janice_core::Result<Box<dyn MediaIterator>> {
    if sighting.files.len() == 1 {
        janice_io::create_media_iterator(sighting.first_file())
    } else {
        janice_io::create_sparse_media_iterator(&sighting.files, None)
    }
}

fn prepare_media(
    list: &MediaList,
    nonfatal: &NonfatalErrors,
    summary: &mut RunSummary,
) -> Result<PreparedMedia, HarnessError> {
    let mut prepared = PreparedMedia {
        iterators: Vec::with_capacity(list.len()),
        labels: Vec::with_capacity(list.len()),
    };

    for sighting in &list.sightings {
        match nonfatal.check("create_media_iterator", open_sighting(sighting))? {
            Some(it) => {
                prepared.iterators.push(it);
                prepared
                    .labels
                    .push(sighting.first_file().to_string_lossy().into_owned());
            }
            None => {
                tracing::warn!(sighting = sighting.id, "skipping sighting");
                summary.tolerated += 1;
            }
        }
    }

    Ok(prepared)
}

/// Drives batches through an SDK and records what comes back.
struct Enroller<'a, S: Sdk, W: std::io::Write> {
    sdk: &'a mut S,
    context: Context,
    nonfatal: &'a NonfatalErrors,
    output: &'a mut OutputWriter<W>,
    dst_path: &'a Path,
    include_size: bool,
    next_template_id: u64,
}

impl<S: Sdk, W: std::io::Write> Enroller<'_, S, W> {
    fn run_batch(
        &mut self,
        batch_idx: usize,
        media: &mut [Box<dyn MediaIterator>],
        labels: &[String],
        summary: &mut RunSummary,
    ) -> Result<(), HarnessError> {
        let start = Instant::now();
        let outcome = self.sdk.enroll_from_media_batch(media, &self.context);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let Some(outcome) = self.nonfatal.check("enroll_from_media_batch", outcome)? else {
            summary.tolerated += 1;
            return Ok(());
        };
        summary.tolerated += self.nonfatal.check_batch(batch_idx, &outcome)?;

        if outcome.len() != media.len() {
            return Err(HarnessError::TemplateCountMismatch {
                batch_idx,
                expected: media.len(),
                actual: outcome.len(),
            });
        }

        tracing::info!(
            batch_idx,
            media = media.len(),
            templates = outcome.results.iter().map(|r| r.templates.len()).sum::<usize>(),
            elapsed_ms,
            "batch enrolled"
        );

        for (media_idx, result) in outcome.results.iter().enumerate() {
            if result.templates.len() != result.detections.len() {
                return Err(HarnessError::DetectionCountMismatch {
                    batch_idx,
                    media_idx,
                    templates: result.templates.len(),
                    detections: result.detections.len(),
                });
            }

            for (template, detection) in result.templates.iter().zip(&result.detections) {
                self.next_template_id += 1;
                let template_id = self.next_template_id;
                summary.templates += 1;

                let template_size = if self.include_size {
                    let bytes = self.sdk.serialize_template(template);
                    match self.nonfatal.check("serialize_template", bytes)? {
                        Some(bytes) => bytes.len(),
                        None => {
                            summary.tolerated += 1;
                            0
                        }
                    }
                } else {
                    0
                };

                let tmpl_path = template_path(self.dst_path, template_id);
                let written = self.sdk.write_template(template, &tmpl_path);
                if self.nonfatal.check("write_template", written)?.is_none() {
                    summary.tolerated += 1;
                }

                let track = self.sdk.detection_track(detection);
                let Some(track) = self.nonfatal.check("detection_track", track)? else {
                    summary.tolerated += 1;
                    continue;
                };

                for (rect, confidence, frame) in track.iter() {
                    self.output.write_row(&OutputRow {
                        template_id,
                        role: self.context.role,
                        filename: &labels[media_idx],
                        frame,
                        rect: *rect,
                        confidence,
                        batch_idx,
                        elapsed_ms,
                        template_size,
                    })?;
                }
            }
        }

        Ok(())
    }
}

/// `<dst>/<id>.tmpl`
pub fn template_path(dst_path: &Path, template_id: u64) -> PathBuf {
    dst_path.join(format!("{template_id}.tmpl"))
}

/// Run a full enrollment with SDK implementation `S`.
pub fn run<S: Sdk>(cli: &Cli) -> Result<RunSummary, HarnessError> {
    let nonfatal = NonfatalErrors::new(cli.nonfatal_errors.iter().copied());

    if !cli.dst_path.is_dir() {
        return Err(HarnessError::DestinationNotDirectory(cli.dst_path.clone()));
    }

    let list = MediaList::from_path(&cli.media_file, &cli.media_path)?;
    tracing::info!(
        media_file = %cli.media_file.display(),
        sightings = list.len(),
        "media list loaded"
    );

    let mut sdk = S::initialize(&cli.sdk_config()).map_err(|error| {
        tracing::error!(error = %error, code = error.code(), "SDK initialization failed");
        HarnessError::Api {
            call: "initialize",
            error,
        }
    })?;

    let mut summary = RunSummary::default();
    let PreparedMedia {
        mut iterators,
        labels,
    } = prepare_media(&list, &nonfatal, &mut summary)?;
    summary.media = iterators.len();

    let mut output = OutputWriter::create(&cli.output_file)?;
    let batch_size = cli.batch_size.max(1) as usize;

    let mut enroller = Enroller {
        sdk: &mut sdk,
        context: cli.context(),
        nonfatal: &nonfatal,
        output: &mut output,
        dst_path: &cli.dst_path,
        include_size: cli.include_size,
        next_template_id: 0,
    };

    for (batch_idx, (media, labels)) in iterators
        .chunks_mut(batch_size)
        .zip(labels.chunks(batch_size))
        .enumerate()
    {
        enroller.run_batch(batch_idx, media, labels, &mut summary)?;
        summary.batches += 1;
    }

    summary.rows = output.rows();
    output.finish()?;

    // Media are released before finalize.
    drop(iterators);
    nonfatal.check("finalize", sdk.finalize())?;

    tracing::info!(
        media = summary.media,
        batches = summary.batches,
        templates = summary.templates,
        rows = summary.rows,
        tolerated = summary.tolerated,
        "enrollment finished"
    );

    Ok(summary)
}
