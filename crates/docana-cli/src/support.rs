use docana_kernel::{KeyLine, KeySource, parse_key_lines, parse_override};
use docana_report::{ReportConfig, ReportDriver, SimInputs};
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;

pub fn fail(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn load_config_or_exit(path: Option<&str>) -> ReportConfig {
    let config = match path {
        Some(path) => ReportConfig::load(path).unwrap_or_else(|e| fail(e)),
        None => ReportConfig::default(),
    };
    config.with_env_fallbacks()
}

pub fn read_key_lines_or_exit(path: &str) -> Vec<KeyLine> {
    let file = File::open(path).unwrap_or_else(|e| fail(format!("failed to open {path}: {e}")));
    parse_key_lines(BufReader::new(file)).unwrap_or_else(|e| fail(format!("{path}: {e}")))
}

/// Feed every input file, then every override, through the driver.
pub fn absorb_inputs_or_exit(
    driver: &mut ReportDriver,
    inputs: &mut SimInputs,
    files: &[String],
    overrides: &[String],
) {
    for path in files {
        let lines = read_key_lines_or_exit(path);
        tracing::info!(path = %path, keys = lines.len(), "read input file");
        for line in &lines {
            driver
                .absorb(inputs, line, KeySource::FromFile)
                .unwrap_or_else(|e| fail(format!("{path}:{}: {e}", line.line)));
        }
        inputs.survey.input_files.push(path.clone());
    }

    for text in overrides {
        let line = parse_override(text).unwrap_or_else(|e| fail(e));
        driver
            .absorb(inputs, &line, KeySource::FromCommandLine)
            .unwrap_or_else(|e| fail(format!("override {text:?}: {e}")));
    }
}
