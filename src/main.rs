use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};

use xccov_report::bundle;
use xccov_report::error::CoverageError;
use xccov_report::logger::{Category, Logger};
use xccov_report::options::{Options, Registry};
use xccov_report::report::ReportPresenter;
use xccov_report::xccov::Repository;

fn main() -> ExitCode {
    let mut log = Logger::new();
    let arguments: Vec<String> = std::env::args().skip(1).collect();

    match run(&arguments, &mut log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, &log);
            ExitCode::FAILURE
        }
    }
}

fn report_error(err: &anyhow::Error, log: &Logger) {
    log.error(&format!("{err:#}"));
    if let Some(coverage_err) = err.downcast_ref::<CoverageError>() {
        for hint in coverage_err.hints() {
            log.hint(hint);
        }
    }
}

fn run(arguments: &[String], log: &mut Logger) -> Result<()> {
    let mut options = Options::new();
    let positionals = options.evaluate(arguments, log)?;

    if options.help {
        log.write(Registry::new().help().trim_end(), Category::None);
        return Ok(());
    }

    let bundle_path = resolve_bundle(&options, &positionals, log)?;
    let presenter = ReportPresenter::new(Repository::xccov(), &options, &bundle_path);

    let report = if options.view_targets {
        presenter.available_targets(log)?
    } else {
        // Evaluation guarantees a target is present when -v is absent.
        let target = positionals
            .first()
            .context("no target name provided")?;
        presenter.coverage_report(target, log)?
    };

    log.write(report.trim_end_matches('\n'), Category::None);
    log.write("coverage report generated", Category::Complete);

    if options.write {
        let path = bundle::write_report(&report, presenter.bundle(), Path::new("."))
            .context("failed to write report file")?;
        log.write(
            &format!("report written to {}", path.display()),
            Category::Complete,
        );
    }

    Ok(())
}

/// The bundle named on the command line, or the newest one under `-l DIR`.
fn resolve_bundle(options: &Options, positionals: &[String], log: &Logger) -> Result<PathBuf> {
    if let Some(dir) = &options.latest_in_directory {
        return Ok(bundle::latest_result_bundle(Path::new(dir), log)?);
    }
    positionals
        .last()
        .map(PathBuf::from)
        .context("no result bundle provided")
}
