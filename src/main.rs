use hifp::batch;
use hifp::config::FingerprintConfig;
use hifp::fingerprint::Fingerprint;
use hifp::runtime_setup;
use hifp::sample_reader::{self, ShortReadPolicy};
use hifp::wav::HeaderValidation;

use anyhow::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use structopt::StructOpt;

#[macro_use]
extern crate log;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "hifp",
    about = "Generate compact audio fingerprints from 16-bit PCM WAV files."
)]
struct Opt {
    #[structopt(
        short = "i",
        long = "input",
        parse(from_os_str),
        help = "Directory of .wav files to fingerprint"
    )]
    input: PathBuf,

    #[structopt(
        short = "o",
        long = "output",
        parse(from_os_str),
        help = "Directory for the generated .raw fingerprints. Defaults to the input directory."
    )]
    output: Option<PathBuf>,

    #[structopt(
        long = "lenient",
        help = "Log WAV header problems instead of rejecting the file"
    )]
    lenient: bool,

    #[structopt(
        long = "on-short-read",
        default_value = "zero-fill",
        parse(try_from_str = sample_reader::parse_short_read_policy),
        help = "What to do when a file runs out of samples: 'zero-fill' or 'fail'"
    )]
    on_short_read: ShortReadPolicy,

    #[structopt(
        short = "f",
        long = "frames",
        default_value = "128",
        help = "Fingerprint length in 32-bit words"
    )]
    frames: usize,

    #[structopt(
        long = "reference",
        parse(from_os_str),
        help = "A .raw fingerprint to verify every generated fingerprint against"
    )]
    reference: Option<PathBuf>,

    #[structopt(short = "v", long = "verbose", help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    runtime_setup::setup_logging(opt.verbose);

    let mut config = FingerprintConfig::with_frames(opt.frames);
    config.validation = if opt.lenient {
        HeaderValidation::Lenient
    } else {
        HeaderValidation::Strict
    };
    config.short_read = opt.on_short_read;
    config.validate()?;

    let reference = match &opt.reference {
        Some(path) => {
            let file = File::open(path)?;
            Some(Fingerprint::read_from(
                &mut BufReader::new(file),
                config.num_frame,
            )?)
        }
        None => None,
    };

    let output_dir = opt.output.clone().unwrap_or_else(|| opt.input.clone());
    let summary = batch::process_dir(&opt.input, &output_dir, &config, reference.as_ref())?;
    info!(
        "fingerprinted {} file(s), {} failed",
        summary.processed, summary.failed
    );
    Ok(())
}
