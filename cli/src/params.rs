use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, crate_version};
use tract_classifier::prelude::*;

/// Command line definition.
pub fn app() -> Command<'static> {
    Command::new("classify")
        .version(crate_version!())
        .about("Classifies one image with a pre-trained network and prints the top predictions")
        .arg(Arg::new("image").required(true).help("Image file to classify"))
        .arg(
            Arg::new("labels")
                .short('l')
                .long("labels")
                .takes_value(true)
                .default_value("labels.txt")
                .help("Label file, one class name per line, in model output order"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .takes_value(true)
                .default_value("model.onnx")
                .help("Model artifact (ONNX file, NNEF directory or archive)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .takes_value(true)
                .possible_values(["onnx", "nnef"])
                .help("Hint the model format instead of guessing it from the path"),
        )
        .arg(
            Arg::new("top")
                .short('k')
                .long("top")
                .takes_value(true)
                .default_value("5")
                .help("Number of predictions to print"),
        )
        .arg(
            Arg::new("machine_friendly")
                .long("machine-friendly")
                .help("Print the predictions as JSON"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .multiple_occurrences(true)
                .help("Sets the level of verbosity."),
        )
}

/// Structure holding the parsed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub image: PathBuf,
    pub labels: PathBuf,
    pub model: PathBuf,
    pub format: Option<ModelFormat>,
    pub top_k: usize,
    pub machine_friendly: bool,
}

impl Parameters {
    pub fn from_clap(matches: &ArgMatches) -> ClassifyResult<Parameters> {
        let path = |name: &str| -> ClassifyResult<PathBuf> {
            matches
                .value_of(name)
                .map(PathBuf::from)
                .ok_or_else(|| ClassifyError::Usage(format!("Missing argument: {name}")))
        };
        let format = matches.value_of("format").map(|f| f.parse()).transpose()?;
        let top = matches.value_of("top").unwrap_or("5");
        let top_k = top.parse::<usize>().map_err(|e| {
            ClassifyError::Usage(format!("Invalid value {top:?} for --top: {e}"))
        })?;
        if top_k == 0 {
            return Err(ClassifyError::Usage("--top must be at least 1".into()));
        }
        Ok(Parameters {
            image: path("image")?,
            labels: path("labels")?,
            model: path("model")?,
            format,
            top_k,
            machine_friendly: matches.is_present("machine_friendly"),
        })
    }

    /// Log filter for the verbosity count, unless RUST_LOG says otherwise.
    pub fn log_level(matches: &ArgMatches) -> &'static str {
        match matches.occurrences_of("verbosity") {
            0 => "classify=warn,tract_classifier=warn",
            1 => "classify=info,tract_classifier=info",
            2 => "classify=debug,tract_classifier=debug",
            _ => "classify=trace,tract_classifier=trace,tract=debug",
        }
    }
}
