#![no_main]
use std::path::Path;

use libfuzzer_sys::fuzz_target;
use xccov_report::error::Result;
use xccov_report::logger::Logger;
use xccov_report::model::ItemKind;
use xccov_report::options::Options;
use xccov_report::report::render;
use xccov_report::xccov::{CoverageService, Repository};

struct Raw(String);

impl CoverageService for Raw {
    fn available_targets(&self, _bundle: &Path) -> Result<String> {
        Ok(self.0.clone())
    }

    fn raw_coverage_report(&self, _target: &str, _bundle: &Path) -> Result<String> {
        Ok(self.0.clone())
    }
}

fuzz_target!(|data: &[u8]| {
    // Decoding and rendering must not panic on any tool output.
    if let Ok(s) = std::str::from_utf8(data) {
        let repository = Repository::new(Raw(s.to_string()));
        let log = Logger::with_color(false);
        let bundle = Path::new("Fuzz.xcresult");
        let options = Options::new();

        if let Ok(targets) = repository.available_targets(bundle, &log) {
            let _ = render(&targets, &options, ItemKind::Target);
        }
        if let Ok(report) = repository.coverage_report("Fuzz", bundle, &log) {
            let _ = render(&report.files, &options, ItemKind::File);
        }
    }
});
