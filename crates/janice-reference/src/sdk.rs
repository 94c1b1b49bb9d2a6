use janice_core::{
    BatchOutcome, BatchPolicy, Context, DetectionPolicy, Image, JaniceError, MediaIterator,
    MediaResult, Rect, Result, Sdk, SdkConfig, Track,
};

use crate::settings::ReferenceSettings;
use crate::template::ReferenceTemplate;

const WHOLE_FRAME_CONFIDENCE: f32 = 1.0;

/// Detection produced by the reference SDK: the whole-frame track.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDetection {
    pub track: Track,
}

pub struct ReferenceSdk {
    settings: ReferenceSettings,
}

impl ReferenceSdk {
    pub fn settings(&self) -> &ReferenceSettings {
        &self.settings
    }

    /// Read every frame of one media into a template and its track.
    ///
    /// Frames are digested as they are read. `Largest` and `Best` hold only
    /// the current largest frame.
    fn enroll_media(
        &self,
        media: &mut dyn MediaIterator,
        context: &Context,
    ) -> Result<(ReferenceTemplate, ReferenceDetection)> {
        let min_side = context
            .min_object_size
            .unwrap_or(0)
            .max(self.settings.min_frame_size);
        let keep_largest = matches!(context.policy, DetectionPolicy::Largest | DetectionPolicy::Best);

        let mut template = ReferenceTemplate::new(&self.settings.template_version, context.role);
        let mut track = Track::default();
        let mut largest: Option<(u32, Image)> = None;

        loop {
            let frame = match media.tell() {
                Ok(frame) => frame,
                Err(JaniceError::MediaAtEnd) => break,
                Err(e) => return Err(e),
            };
            let image = media.next()?;

            if image.rows < min_side || image.cols < min_side {
                tracing::debug!(frame, rows = image.rows, cols = image.cols, min_side, "frame below minimum size");
                continue;
            }

            if keep_largest {
                // First frame wins ties.
                if largest.as_ref().map_or(true, |(_, best)| area(&image) > area(best)) {
                    largest = Some((frame, image));
                }
            } else {
                record_frame(&mut template, &mut track, frame, &image);
            }
        }

        if let Some((frame, image)) = largest {
            record_frame(&mut template, &mut track, frame, &image);
        }
        if track.is_empty() {
            return Err(JaniceError::MissingData);
        }

        Ok((template, ReferenceDetection { track }))
    }
}

fn area(image: &Image) -> u64 {
    image.rows as u64 * image.cols as u64
}

fn record_frame(template: &mut ReferenceTemplate, track: &mut Track, frame: u32, image: &Image) {
    template.add_frame(frame, image);
    let rect = Rect {
        x: 0,
        y: 0,
        width: image.cols,
        height: image.rows,
    };
    track.push(rect, WHOLE_FRAME_CONFIDENCE, frame);
}

impl Sdk for ReferenceSdk {
    type Template = ReferenceTemplate;
    type Detection = ReferenceDetection;

    fn initialize(config: &SdkConfig) -> Result<Self> {
        if !config.sdk_path.is_dir() {
            tracing::error!(path = %config.sdk_path.display(), "SDK path is not a directory");
            return Err(JaniceError::InvalidSdk);
        }
        for (name, path) in [("temp_path", &config.temp_path), ("log_path", &config.log_path)] {
            if !path.is_dir() {
                tracing::error!(name, path = %path.display(), "not a directory");
                return Err(JaniceError::BadArgument);
            }
        }
        if config.num_threads == 0 {
            tracing::error!("num_threads must be at least 1");
            return Err(JaniceError::BadArgument);
        }
        if !config.gpus.is_empty() {
            tracing::error!(gpus = ?config.gpus, "reference SDK runs on the CPU only");
            return Err(JaniceError::InvalidGpu);
        }

        let settings = ReferenceSettings::load(&config.sdk_path, &config.algorithm)?;
        tracing::info!(
            version = %settings.template_version,
            min_frame_size = settings.min_frame_size,
            threads = config.num_threads,
            "reference SDK initialized"
        );

        Ok(Self { settings })
    }

    fn enroll_from_media_batch(
        &mut self,
        media: &mut [Box<dyn MediaIterator>],
        context: &Context,
    ) -> Result<BatchOutcome<ReferenceTemplate, ReferenceDetection>> {
        let mut outcome = BatchOutcome::default();

        for (idx, it) in media.iter_mut().enumerate() {
            match self.enroll_media(&mut **it, context) {
                Ok((template, detection)) => outcome.push(
                    MediaResult {
                        templates: vec![template],
                        detections: vec![detection],
                    },
                    Ok(()),
                ),
                Err(e) => {
                    tracing::debug!(idx, error = %e, "media failed to enroll");
                    if context.batch_policy == BatchPolicy::AbortEarly {
                        return Err(JaniceError::BatchAbortedEarly);
                    }
                    outcome.push(MediaResult::default(), Err(e));
                }
            }
        }

        Ok(outcome)
    }

    fn serialize_template(&self, template: &ReferenceTemplate) -> Result<Vec<u8>> {
        template.to_bytes()
    }

    fn detection_track(&self, detection: &ReferenceDetection) -> Result<Track> {
        Ok(detection.track.clone())
    }

    fn finalize(self) -> Result<()> {
        tracing::info!("reference SDK finalized");
        Ok(())
    }
}
