//! Conditional rendering of numeric input fields.
//!
//! A field is written only when its first value lies inside the declared
//! validity window and differs from the "do not print" sentinel. Unset or
//! default-valued parameters therefore never clutter the report.

/// Tolerance used when comparing a value against its sentinel.
pub const SENTINEL_TOLERANCE: f64 = 1.0e-8;

/// Values strictly above this magnitude render fixed-point.
pub const FIXED_POINT_THRESHOLD: f64 = 0.01;

/// Declaration of one numeric field: label, validity window, sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: String,
    pub min: f64,
    pub max: f64,
    pub no_print: f64,
    pub integral: bool,
    pub comment: Option<String>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, min: f64, max: f64, no_print: f64) -> Self {
        Self {
            key: key.into(),
            min,
            max,
            no_print,
            integral: false,
            comment: None,
        }
    }

    /// Render every value as a plain integer.
    pub fn integral(mut self) -> Self {
        self.integral = true;
        self
    }

    /// Trailing `# comment`; ignored when empty.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }

    /// Emit iff `min <= value <= max` and `value` is not the sentinel.
    pub fn should_emit(&self, value: f64) -> bool {
        let suppressed = (value - self.no_print).abs() < SENTINEL_TOLERANCE;
        let in_range = value >= self.min && value <= self.max;
        in_range && !suppressed
    }
}

/// Renders [`FieldSpec`] lines with a fixed indent and key column width.
#[derive(Debug, Clone)]
pub struct ValueFormatter {
    pad: String,
    key_width: usize,
}

impl ValueFormatter {
    pub fn new(pad: impl Into<String>, key_width: usize) -> Self {
        Self {
            pad: pad.into(),
            key_width,
        }
    }

    /// The full report line for `values`, or `None` when suppressed.
    ///
    /// Only the first value decides emission; the rest (range bounds, pairs)
    /// follow it.
    pub fn format(&self, spec: &FieldSpec, values: &[f64]) -> Option<String> {
        let first = *values.first()?;
        if !spec.should_emit(first) {
            return None;
        }

        let rendered: Vec<String> = values
            .iter()
            .map(|value| render_value(*value, spec.integral))
            .collect();
        let mut line = format!(
            "{}{:<width$} {}",
            self.pad,
            spec.key,
            rendered.join("  "),
            width = self.key_width
        );
        if let Some(comment) = &spec.comment {
            line.push_str("  # ");
            line.push_str(comment);
        }
        Some(line)
    }
}

/// Render one value: integer, 4-decimal fixed point, or 4-decimal scientific.
pub fn render_value(value: f64, integral: bool) -> String {
    if integral || value == 0.0 {
        format!("{}", value.trunc() as i64)
    } else if value.abs() > FIXED_POINT_THRESHOLD {
        format!("{value:.4}")
    } else {
        scientific(value, 4)
    }
}

/// Scientific notation with a signed, at-least-two-digit exponent (`9.9000e-03`).
fn scientific(value: f64, precision: usize) -> String {
    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> ValueFormatter {
        ValueFormatter::new("    ", 24)
    }

    #[test]
    fn sentinel_value_is_suppressed() {
        let spec = FieldSpec::new("GENSIGMA_VPEC:", 0.0, 9000.0, -1.0);
        assert_eq!(formatter().format(&spec, &[-1.0]), None);

        let spec = FieldSpec::new("DNDZ_ALLSCALE:", 0.0, 1.0e4, 1.0);
        assert_eq!(formatter().format(&spec, &[1.0 + 1.0e-10]), None);
    }

    #[test]
    fn out_of_range_is_suppressed_and_bounds_are_inclusive() {
        let spec = FieldSpec::new("GENRANGE_REDSHIFT:", 0.0, 10.0, -1.0);
        assert_eq!(formatter().format(&spec, &[10.5, 11.0]), None);
        assert_eq!(formatter().format(&spec, &[-0.5, 1.0]), None);

        let spec = FieldSpec::new("SOLID_ANGLE:", 0.05, 20.0, 0.0);
        assert!(formatter().format(&spec, &[0.05]).is_some());
        assert!(formatter().format(&spec, &[20.0]).is_some());
    }

    #[test]
    fn only_first_value_decides_emission() {
        let spec = FieldSpec::new("GENRANGE_REDSHIFT:", 0.0, 10.0, -1.0);
        let line = formatter().format(&spec, &[0.1, 99.0]).unwrap();
        assert!(line.ends_with("0.1000  99.0000"), "{line}");
    }

    #[test]
    fn rendering_boundaries() {
        assert_eq!(render_value(0.0099, false), "9.9000e-03");
        assert_eq!(render_value(0.0101, false), "0.0101");
        assert_eq!(render_value(5.0, true), "5");
        assert_eq!(render_value(0.0, false), "0");
        assert_eq!(render_value(-3.7, true), "-3");
        assert_eq!(render_value(-0.002, false), "-2.0000e-03");
        assert_eq!(render_value(0.01, false), "1.0000e-02");
        assert_eq!(render_value(371.0, false), "371.0000");
    }

    #[test]
    fn line_layout_pads_key_and_appends_comment() {
        let spec =
            FieldSpec::new("GENMAG_SMEAR:", -20.0, 20.0, 0.0).comment("coherent scatter (mag)");
        let line = formatter().format(&spec, &[0.1]).unwrap();
        assert_eq!(
            line,
            "    GENMAG_SMEAR:            0.1000  # coherent scatter (mag)"
        );
    }

    #[test]
    fn integral_pairs_and_empty_comment() {
        let spec = FieldSpec::new("SNTYPE:", 0.0, 2000.0, -1.0)
            .integral()
            .comment("");
        assert_eq!(spec.comment, None);
        let line = ValueFormatter::new("", 8).format(&spec, &[1.0, 101.0]).unwrap();
        assert_eq!(line, "SNTYPE:  1  101");
    }

    #[test]
    fn empty_value_list_emits_nothing() {
        let spec = FieldSpec::new("X:", 0.0, 1.0, -1.0);
        assert_eq!(formatter().format(&spec, &[]), None);
    }
}
