use crate::support::{absorb_inputs_or_exit, fail, load_config_or_exit};
use docana_report::{ReportDriver, SimInputs};
use serde_json::{Map, Value, json};

pub fn run(inputs: Vec<String>, overrides: Vec<String>, config: Option<String>, json_output: bool) {
    let config = load_config_or_exit(config.as_deref());
    let mut driver = ReportDriver::new(config);
    let mut sim_inputs = SimInputs::default();
    absorb_inputs_or_exit(&mut driver, &mut sim_inputs, &inputs, &overrides);

    let registries = driver.registries();
    if json_output {
        let mut domains = Map::new();
        for registry in registries.iter().filter(|r| !r.is_empty()) {
            let entries = serde_json::to_value(registry.entries()).unwrap_or_else(|e| fail(e));
            domains.insert(registry.domain().to_string(), entries);
        }
        let payload = json!({
            "totalEntries": registries.total_entries(),
            "domains": Value::Object(domains),
        });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|e| fail(e));
        println!("{rendered}");
        return;
    }

    println!("docana keys");
    println!("  Entries: {}", registries.total_entries());
    for registry in registries.iter().filter(|r| !r.is_empty()) {
        println!("  {} ({}):", registry.domain(), registry.len());
        for entry in registry {
            println!("    {} {}", entry.key, entry.argument);
        }
    }
}
