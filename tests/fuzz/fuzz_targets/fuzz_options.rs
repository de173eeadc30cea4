#![no_main]
use libfuzzer_sys::fuzz_target;
use xccov_report::logger::Logger;
use xccov_report::options::Options;

fuzz_target!(|data: &[u8]| {
    // Option evaluation must not panic on any command line.
    if let Ok(s) = std::str::from_utf8(data) {
        let arguments: Vec<String> = s.split('\0').map(str::to_string).collect();
        let mut log = Logger::with_color(false);
        log.set_quiet(true);
        let _ = Options::new().evaluate(&arguments, &mut log);
    }
});
