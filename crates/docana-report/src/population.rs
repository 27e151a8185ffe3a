//! Population profiles for stretch, color, and host-extinction parameters.
//!
//! Two shapes exist: an asymmetric Gaussian (peak, two-sided sigma, range,
//! optional second peak) and an exponential with an optional half-Gaussian
//! core. A profile is only reported once one of its keys has been read.

use docana_kernel::DocanaError;

/// Asymmetric-Gaussian variables reported for SALT-family models, in order.
pub const SALT2_VARIABLES: [&str; 4] = ["SALT2x1", "SALT2c", "SALT2ALPHA", "SALT2BETA"];
/// Asymmetric-Gaussian variables reported for every other model, in order.
pub const STRETCH_VARIABLES: [&str; 3] = ["DM15", "DELTA", "STRETCH"];
pub const EXP_HALF_VARIABLES: [&str; 2] = ["AV", "EBV_HOST"];
pub const RV_VARIABLE: &str = "RV";

#[derive(Debug, Clone, PartialEq)]
pub struct AsymGauss {
    pub name: String,
    pub used: bool,
    pub peak: f64,
    pub sigma: [f64; 2],
    pub range: [f64; 2],
    pub ngrid: i64,
    pub peak2: f64,
    pub prob2: f64,
    pub sigma2: [f64; 2],
    pub peak_range: [f64; 2],
}

impl AsymGauss {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            used: false,
            peak: 0.0,
            sigma: [0.0, 0.0],
            range: [0.0, 0.0],
            ngrid: 0,
            peak2: 0.0,
            prob2: 0.0,
            sigma2: [0.0, 0.0],
            peak_range: [0.0, 0.0],
        }
    }

    fn apply(&mut self, field: &str, key: &str, args: &[String]) -> Result<bool, DocanaError> {
        match field {
            "GENPEAK" => self.peak = number(key, args, 0)?,
            "GENSIGMA" => self.sigma = one_or_two(key, args)?,
            "GENRANGE" => self.range = pair(key, args)?,
            "GENGRID" => self.ngrid = integer(key, args, 0)?,
            "GENPEAK2" => self.peak2 = number(key, args, 0)?,
            "GENPROB2" => self.prob2 = number(key, args, 0)?,
            "GENSIGMA2" => self.sigma2 = one_or_two(key, args)?,
            "PEAKRANGE" => self.peak_range = pair(key, args)?,
            _ => return Ok(false),
        }
        self.used = true;
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpHalfGauss {
    pub name: String,
    pub used: bool,
    pub tau: f64,
    pub range: [f64; 2],
    pub peak: f64,
    pub sigma: f64,
    /// Gauss(0)/Expon(0); zero means no half-Gaussian core.
    pub ratio: f64,
}

impl ExpHalfGauss {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            used: false,
            tau: 0.0,
            range: [0.0, 0.0],
            peak: 0.0,
            sigma: 0.0,
            ratio: 0.0,
        }
    }

    fn apply(&mut self, field: &str, key: &str, args: &[String]) -> Result<bool, DocanaError> {
        match field {
            "GENTAU" => self.tau = number(key, args, 0)?,
            "GENRANGE" => self.range = pair(key, args)?,
            "GENGAUPEAK" => self.peak = number(key, args, 0)?,
            "GENSIGMA" => self.sigma = number(key, args, 0)?,
            "GENRATIO" => self.ratio = number(key, args, 0)?,
            _ => return Ok(false),
        }
        self.used = true;
        Ok(true)
    }
}

/// Every profile the report knows about.
#[derive(Debug, Clone, PartialEq)]
pub struct Profiles {
    pub asym: Vec<AsymGauss>,
    pub exp_half: Vec<ExpHalfGauss>,
}

impl Default for Profiles {
    fn default() -> Self {
        let asym = SALT2_VARIABLES
            .iter()
            .chain(STRETCH_VARIABLES.iter())
            .chain(std::iter::once(&RV_VARIABLE))
            .map(|name| AsymGauss::new(*name))
            .collect();
        let exp_half = EXP_HALF_VARIABLES
            .iter()
            .map(|name| ExpHalfGauss::new(*name))
            .collect();
        Self { asym, exp_half }
    }
}

impl Profiles {
    pub fn asym(&self, name: &str) -> Option<&AsymGauss> {
        self.asym.iter().find(|p| p.name == name)
    }

    pub fn exp_half(&self, name: &str) -> Option<&ExpHalfGauss> {
        self.exp_half.iter().find(|p| p.name == name)
    }

    /// Apply `FIELD_VARIABLE: args` when `VARIABLE` names a known profile.
    /// Returns `Ok(false)` for keys that are not population keys.
    pub fn apply_key(&mut self, bare_key: &str, args: &[String]) -> Result<bool, DocanaError> {
        let Some((field, variable)) = bare_key.split_once('_') else {
            return Ok(false);
        };
        if let Some(profile) = self.exp_half.iter_mut().find(|p| p.name == variable) {
            return profile.apply(field, bare_key, args);
        }
        if let Some(profile) = self.asym.iter_mut().find(|p| p.name == variable) {
            return profile.apply(field, bare_key, args);
        }
        Ok(false)
    }
}

pub(crate) fn number(key: &str, args: &[String], index: usize) -> Result<f64, DocanaError> {
    let token = args.get(index).ok_or_else(|| DocanaError::InvalidValue {
        key: key.to_string(),
        value: args.join(" "),
        reason: format!("expected at least {} value(s)", index + 1),
    })?;
    token.parse::<f64>().map_err(|_| DocanaError::InvalidValue {
        key: key.to_string(),
        value: token.clone(),
        reason: "not a number".to_string(),
    })
}

/// Integers may be written in float notation (`1.0E6`); the value is truncated.
pub(crate) fn integer(key: &str, args: &[String], index: usize) -> Result<i64, DocanaError> {
    if let Some(value) = args.get(index).and_then(|t| t.parse::<i64>().ok()) {
        return Ok(value);
    }
    let value = number(key, args, index)?;
    if !value.is_finite() {
        return Err(DocanaError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "not a finite integer".to_string(),
        });
    }
    Ok(value.trunc() as i64)
}

pub(crate) fn pair(key: &str, args: &[String]) -> Result<[f64; 2], DocanaError> {
    Ok([number(key, args, 0)?, number(key, args, 1)?])
}

/// A single value applies to both sides.
pub(crate) fn one_or_two(key: &str, args: &[String]) -> Result<[f64; 2], DocanaError> {
    let low = number(key, args, 0)?;
    if args.len() < 2 {
        return Ok([low, low]);
    }
    Ok([low, number(key, args, 1)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn asym_keys_mark_profile_used() {
        let mut profiles = Profiles::default();
        assert!(!profiles.asym("SALT2c").unwrap().used);

        assert!(profiles.apply_key("GENPEAK_SALT2c", &args("-0.054")).unwrap());
        assert!(profiles.apply_key("GENSIGMA_SALT2c", &args("0.043 0.101")).unwrap());
        let color = profiles.asym("SALT2c").unwrap();
        assert!(color.used);
        assert_eq!(color.peak, -0.054);
        assert_eq!(color.sigma, [0.043, 0.101]);
    }

    #[test]
    fn exp_half_sigma_is_single_valued() {
        let mut profiles = Profiles::default();
        assert!(profiles.apply_key("GENSIGMA_AV", &args("0.3")).unwrap());
        assert!(profiles.apply_key("GENRANGE_AV", &args("0 3")).unwrap());
        let av = profiles.exp_half("AV").unwrap();
        assert_eq!(av.sigma, 0.3);
        assert_eq!(av.range, [0.0, 3.0]);
    }

    #[test]
    fn unrelated_keys_are_left_alone() {
        let mut profiles = Profiles::default();
        assert!(!profiles.apply_key("GENRANGE_REDSHIFT", &args("0.1 0.5")).unwrap());
        assert!(!profiles.apply_key("GENTAU_SALT2x1", &args("1")).unwrap());
        assert!(!profiles.apply_key("NGENTOT_LC", &args("10")).unwrap());
        assert_eq!(profiles, Profiles::default());
    }

    #[test]
    fn single_sigma_applies_to_both_sides_and_bad_numbers_fail() {
        let mut profiles = Profiles::default();
        profiles.apply_key("GENSIGMA_RV", &args("0.5")).unwrap();
        assert_eq!(profiles.asym(RV_VARIABLE).unwrap().sigma, [0.5, 0.5]);

        let err = profiles.apply_key("GENPEAK_RV", &args("abc")).unwrap_err();
        assert!(matches!(err, DocanaError::InvalidValue { .. }));
        let err = profiles.apply_key("GENRANGE_RV", &args("1")).unwrap_err();
        assert!(matches!(err, DocanaError::InvalidValue { .. }));
    }

    #[test]
    fn float_notation_integers_truncate() {
        assert_eq!(integer("NGENTOT_LC", &args("1.0E6"), 0).unwrap(), 1_000_000);
        assert_eq!(integer("GENGRID_X", &args("3"), 0).unwrap(), 3);
        assert!(integer("X", &args("inf"), 0).is_err());
    }
}
