//! Run statistics reported after generation finishes.
//!
//! The simulation hands these over as JSON; every field is optional in the
//! payload and defaults to zero.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// First/last draw and wrap statistics of one random-number list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RandomStream {
    pub first: f64,
    pub last: f64,
    pub wrap_avg: f64,
    pub wrap_rms: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubSurveyCount {
    pub ngen_tot: u64,
    pub ngen_write: u64,
}

/// Generated events rejected at each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RejectCounts {
    pub nepoch: u64,
    pub genrange: u64,
    pub genmag: u64,
    pub searcheff: u64,
    pub cutwin: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunStats {
    pub ngenlc_tot: u64,
    pub ngenlc_write: u64,
    pub ngenspec_write: u64,
    /// Timer value (seconds) when initialization finished.
    pub t_end_init: f64,
    /// Timer value (seconds) when generation finished.
    pub t_end: f64,
    pub gen_eff: f64,
    pub gen_eff_err: f64,
    pub random_streams: Vec<RandomStream>,
    pub subsurvey_counts: BTreeMap<String, SubSurveyCount>,
    pub rejects: RejectCounts,
    pub wronghost_count: u64,
}

impl RunStats {
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, ReportError> {
        serde_json::from_str(text).map_err(|error| ReportError::InvalidJson {
            path: origin.to_string(),
            message: error.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ReportError::io(path.display(), e))?;
        Self::from_json_str(&text, &path.display().to_string())
    }

    /// Generation time after initialization, in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.t_end - self.t_end_init
    }

    pub fn cpu_minutes(&self) -> f64 {
        self.elapsed_seconds() / 60.0
    }

    /// Generated light curves per second; zero when no time elapsed.
    pub fn generation_rate(&self) -> f64 {
        self.rate(self.ngenlc_tot)
    }

    /// Written light curves per second; zero when no time elapsed.
    pub fn write_rate(&self) -> f64 {
        self.rate(self.ngenlc_write)
    }

    fn rate(&self, count: u64) -> f64 {
        let elapsed = self.elapsed_seconds();
        if elapsed > 0.0 {
            count as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Wrong-host events as a fraction of written events.
    pub fn wronghost_fraction(&self) -> f64 {
        if self.ngenlc_write == 0 {
            return 0.0;
        }
        self.wronghost_count as f64 / self.ngenlc_write as f64
    }

    pub fn subsurvey(&self, name: &str) -> SubSurveyCount {
        self.subsurvey_counts.get(name).copied().unwrap_or_default()
    }
}

/// Generated and accepted events per season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonYield {
    pub ngen: f64,
    pub nacc: f64,
    pub nacc_err: f64,
}

impl SeasonYield {
    /// Scale the expected per-season count by the search efficiency; the
    /// error is Poisson-like in the number of written events.
    pub fn new(season_count: f64, stats: &RunStats) -> Self {
        let nacc = season_count * stats.gen_eff;
        let nacc_err = if stats.ngenlc_write > 0 {
            nacc / (stats.ngenlc_write as f64).sqrt()
        } else {
            0.0
        };
        Self {
            ngen: season_count,
            nacc,
            nacc_err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let stats =
            RunStats::from_json_str(r#"{"ngenlcTot": 1000, "tEnd": 100.0}"#, "inline").unwrap();
        assert_eq!(stats.ngenlc_tot, 1000);
        assert_eq!(stats.ngenlc_write, 0);
        assert_eq!(stats.generation_rate(), 10.0);
        assert!(stats.random_streams.is_empty());
    }

    #[test]
    fn rates_are_zero_without_elapsed_time() {
        let stats = RunStats {
            ngenlc_tot: 50,
            ngenlc_write: 5,
            t_end_init: 10.0,
            t_end: 10.0,
            ..RunStats::default()
        };
        assert_eq!(stats.generation_rate(), 0.0);
        assert_eq!(stats.write_rate(), 0.0);
    }

    #[test]
    fn wronghost_fraction_guards_division() {
        let mut stats = RunStats {
            wronghost_count: 3,
            ..RunStats::default()
        };
        assert_eq!(stats.wronghost_fraction(), 0.0);
        stats.ngenlc_write = 12;
        assert_eq!(stats.wronghost_fraction(), 0.25);
    }

    #[test]
    fn season_yield_scales_by_efficiency() {
        let stats = RunStats {
            ngenlc_write: 100,
            gen_eff: 0.5,
            ..RunStats::default()
        };
        let season = SeasonYield::new(400.0, &stats);
        assert_eq!(season.nacc, 200.0);
        assert_eq!(season.nacc_err, 20.0);
    }

    #[test]
    fn malformed_payload_names_its_origin() {
        let err = RunStats::from_json_str("{not json", "stats.json").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON at stats.json"), "{err}");
    }
}
