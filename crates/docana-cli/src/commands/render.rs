use crate::support::{absorb_inputs_or_exit, fail, load_config_or_exit, read_key_lines_or_exit};
use docana_report::{PipelineLogic, ReportDriver, RunEnvironment, RunStats, SimInputs, write_document};
use serde_json::json;
use std::path::Path;

pub struct Args {
    pub inputs: Vec<String>,
    pub overrides: Vec<String>,
    pub config: Option<String>,
    pub stats: Option<String>,
    pub out: Option<String>,
    pub rate_lines: Vec<String>,
    pub season_count: f64,
    pub json: bool,
}

pub fn run(args: Args) {
    let config = load_config_or_exit(args.config.as_deref());
    let env = RunEnvironment::capture(&config);
    let mut driver = ReportDriver::new(config);
    driver.init().unwrap_or_else(|e| fail(e));

    let mut inputs = SimInputs::default();
    absorb_inputs_or_exit(&mut driver, &mut inputs, &args.inputs, &args.overrides);
    inputs.rate.summary_lines = args.rate_lines;
    inputs.rate.season_count = args.season_count;
    load_pipeline_logic(&mut inputs, &env);

    driver.run_pass1(&inputs, &env).unwrap_or_else(|e| fail(e));
    if let Some(out) = &args.out {
        write_document(out, driver.document()).unwrap_or_else(|e| fail(e));
    }

    if let Some(stats_path) = &args.stats {
        let stats = RunStats::load(stats_path).unwrap_or_else(|e| fail(e));
        driver.run_pass2(&inputs, &stats).unwrap_or_else(|e| fail(e));
        if let Some(out) = &args.out {
            write_document(out, driver.document()).unwrap_or_else(|e| fail(e));
        }
    }

    if args.json {
        let payload = json!({
            "state": driver.state().to_string(),
            "initLineCount": driver.init_line_count(),
            "lineCount": driver.line_count(),
            "out": args.out,
            "lines": driver.document().lines(),
        });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|e| fail(e));
        println!("{rendered}");
        return;
    }

    match &args.out {
        Some(out) => {
            println!("docana render");
            println!("  State: {}", driver.state());
            println!("  Lines: {}", driver.line_count());
            println!("  Pass 1 lines: {}", driver.init_line_count());
            println!("  Written: {out}");
        }
        None => print!("{}", driver.document().to_text()),
    }
}

/// Read the detection requirement for the configured survey from the
/// pipeline-logic file, when one is named and readable.
fn load_pipeline_logic(inputs: &mut SimInputs, env: &RunEnvironment) {
    let Some(file) = inputs.search.pipeline_logic_file.clone() else {
        return;
    };
    let path = env.expand_env_path(&file);
    if !Path::new(&path).is_file() {
        tracing::warn!(path = %path, "pipeline logic file not found; skipping logic notes");
        return;
    }

    let lines = read_key_lines_or_exit(&path);
    let survey = inputs.survey.survey.clone();
    match PipelineLogic::for_survey(&lines, &survey).unwrap_or_else(|e| fail(e)) {
        Some(logic) => {
            inputs.search.readme_comment = Some(format!(
                "Pipeline logic for {survey} from {}",
                env.restore_env_path(&path)
            ));
            inputs.search.logic = Some(logic);
        }
        None => tracing::warn!(survey = %survey, path = %path, "no pipeline logic for survey"),
    }
}
