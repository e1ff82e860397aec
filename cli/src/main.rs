#[macro_use]
extern crate log;

use std::process;

use tract_classifier::prelude::*;
use tract_classifier::report;

mod params;

use crate::params::Parameters;

/// Entrypoint for the command-line interface.
fn main() {
    let matches = match params::app().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            // --help and --version land here too, on stdout
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code)
        }
    };

    let env = env_logger::Env::default()
        .filter_or(env_logger::DEFAULT_FILTER_ENV, Parameters::log_level(&matches));
    env_logger::Builder::from_env(env).format_timestamp_nanos().init();

    if let Err(e) = handle(&matches) {
        error!("{}", e);
        process::exit(1)
    }
}

/// Handles the command-line input.
fn handle(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    let params = Parameters::from_clap(matches)?;
    debug!("{:?}", params);

    let labels = LabelTable::load(&params.labels)?;
    labels.check_top_k(params.top_k)?;
    let model = TractModel::load(&params.model, params.format)?;
    let classifier = Classifier::new(labels, model).with_top_k(params.top_k)?;

    let predictions = classifier.classify(&params.image)?;

    let stdout = std::io::stdout();
    if params.machine_friendly {
        report::write_json(stdout.lock(), &predictions)?;
    } else {
        report::write_human(stdout.lock(), &predictions)?;
    }
    Ok(())
}
