//! Integration tests: registries fed from tokenized input text, rendered
//! through the compressor and formatter into one document.

use docana_kernel::{
    DocumentBuffer, Domain, FieldSpec, KeyArgRegistry, KeySource, ListCompressor, ValueFormatter,
    domain_for_key, parse_key_lines, parse_override,
};
use insta::assert_json_snapshot;

const INPUT: &str = "\
GENMODEL:  SALT2.WFIRST-H17
FILTER:    g   # band one
FILTER:    r
FILTER:    i
HOSTLIB_FILE:  $SNDATA_ROOT/simlib/DES.HOSTLIB
H0:        70.0
HOSTLIB_MSKOPT: 258
FILTER:    z
";

fn load(domain: Domain, overrides: &[&str]) -> KeyArgRegistry {
    let mut registry = KeyArgRegistry::new(domain);
    for line in parse_key_lines(INPUT.as_bytes()).expect("input should tokenize") {
        if domain_for_key(&line.key) == Some(domain) {
            registry
                .append(&line.key, &line.args, KeySource::FromFile)
                .expect("append should succeed");
        }
    }
    for text in overrides {
        let line = parse_override(text).expect("override should tokenize");
        if domain_for_key(&line.key) == Some(domain) {
            registry
                .append(&line.key, &line.args, KeySource::FromCommandLine)
                .expect("override should succeed");
        }
    }
    registry
}

#[test]
fn filter_keys_fold_once_routed_into_their_registry() {
    let filters = load(Domain::Filter, &[]);
    let lines = ListCompressor::new("    ", 24).render(filters.entries());
    assert_json_snapshot!(lines, @r##"
    [
      "    FILTER:",
      "    - g",
      "    - r",
      "    - i",
      "    - z"
    ]
    "##);
}

#[test]
fn override_reaches_the_right_registry_without_growing_it() {
    let hostlib = load(Domain::Hostlib, &["HOSTLIB_MSKOPT 2", "NGENTOT_LC 10"]);
    assert_eq!(hostlib.len(), 2);
    let lines = ListCompressor::new("  ", 16).render(hostlib.entries());
    assert_json_snapshot!(lines, @r##"
    [
      "  HOSTLIB_FILE:    $SNDATA_ROOT/simlib/DES.HOSTLIB",
      "  HOSTLIB_MSKOPT:  2"
    ]
    "##);
}

#[test]
fn document_mixes_lists_and_formatted_fields() {
    let mut doc = DocumentBuffer::new();
    let compressor = ListCompressor::new("    ", 20);
    let formatter = ValueFormatter::new("    ", 20);

    doc.append_line("# Cosmology inputs").unwrap();
    compressor.write(&load(Domain::Cosmology, &[]), &mut doc).unwrap();
    for (spec, values) in [
        (FieldSpec::new("GENSIGMA_VPEC:", 0.0, 9000.0, -1.0), vec![300.0]),
        (FieldSpec::new("VPEC_ERR:", 0.0, 9000.0, -1.0), vec![-1.0]),
        (
            FieldSpec::new("GENRANGE_REDSHIFT:", 0.0, 10.0, -1.0),
            vec![0.005, 0.8],
        ),
    ] {
        if let Some(line) = formatter.format(&spec, &values) {
            doc.append_line(line).unwrap();
        }
    }

    assert_json_snapshot!(doc.lines(), @r##"
    [
      "# Cosmology inputs",
      "    H0:                  70.0",
      "    GENSIGMA_VPEC:       300.0000",
      "    GENRANGE_REDSHIFT:   5.0000e-03  0.8000"
    ]
    "##);
}
