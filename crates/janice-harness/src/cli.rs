use std::path::PathBuf;

use clap::Parser;
use janice_core::{Context, DetectionPolicy, EnrollmentRole, JaniceError, SdkConfig};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "janice_enroll_media",
    about = "Run detection and feature extraction on a set of media."
)]
pub struct Cli {
    /// A path to an IJB-C compliant csv file with FILENAME and SIGHTING_ID columns
    pub media_file: PathBuf,

    /// A prefix path prepended to every media filename before loading it
    pub media_path: PathBuf,

    /// An existing, writable directory where enrolled templates are written
    pub dst_path: PathBuf,

    /// Output csv file. Created if missing, truncated otherwise
    pub output_file: PathBuf,

    /// The path to the SDK of the implementation
    #[arg(short = 's', long = "sdk_path", env = "JANICE_SDK_PATH", default_value = "./")]
    pub sdk_path: PathBuf,

    /// An existing directory on disk where the caller has read / write access
    #[arg(short = 't', long = "temp_path", env = "JANICE_TEMP_PATH", default_value = "./")]
    pub temp_path: PathBuf,

    /// An existing directory on disk where the implementation may write logs
    #[arg(short = 'l', long = "log_path", env = "JANICE_LOG_PATH", default_value = "./")]
    pub log_path: PathBuf,

    /// The minimum sized object that should be detected
    #[arg(short = 'm', long = "min_object_size", env = "JANICE_MIN_OBJECT_SIZE")]
    pub min_object_size: Option<u32>,

    /// The detection policy: [All | Largest | Best]
    #[arg(short = 'p', long = "policy", env = "JANICE_POLICY", default_value = "All")]
    pub policy: DetectionPolicy,

    /// The enrollment role: [Reference11 | Verification11 | Probe1N | Gallery1N | Cluster]
    #[arg(short = 'r', long = "role", env = "JANICE_ROLE", default_value = "Probe1N")]
    pub role: EnrollmentRole,

    /// Implementation-defined parameters
    #[arg(short = 'a', long = "algorithm", env = "JANICE_ALGORITHM", default_value = "")]
    pub algorithm: String,

    /// The number of threads the implementation should use
    #[arg(short = 'j', long = "num_threads", env = "JANICE_NUM_THREADS", default_value_t = 1)]
    pub num_threads: u32,

    /// Media per batch. Larger batches may run faster but use more resources
    #[arg(
        short = 'b',
        long = "batch_size",
        env = "JANICE_BATCH_SIZE",
        default_value_t = 128,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub batch_size: u32,

    /// Serialize every template to report its size. Without it, 0 is reported
    #[arg(
        long = "include_size",
        env = "JANICE_INCLUDE_SIZE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub include_size: bool,

    /// Comma-separated CUDA device indices the implementation may use
    #[arg(short = 'g', long = "gpus", env = "JANICE_GPUS", value_delimiter = ',')]
    pub gpus: Vec<u32>,

    /// Comma-separated JanICE error codes that should not stop the run
    #[arg(short = 'n', long = "nonfatal_errors", env = "JANICE_NONFATAL_ERRORS", value_delimiter = ',')]
    pub nonfatal_errors: Vec<JaniceError>,
}

impl Cli {
    pub fn sdk_config(&self) -> SdkConfig {
        SdkConfig {
            sdk_path: self.sdk_path.clone(),
            temp_path: self.temp_path.clone(),
            log_path: self.log_path.clone(),
            algorithm: self.algorithm.clone(),
            num_threads: self.num_threads,
            gpus: self.gpus.clone(),
        }
    }

    /// Enrollment context: defaults plus the command-line policy, role and
    /// minimum size. Batches always flag and finish.
    pub fn context(&self) -> Context {
        Context {
            policy: self.policy,
            min_object_size: self.min_object_size,
            role: self.role,
            ..Context::default()
        }
    }
}
