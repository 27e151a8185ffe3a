//! INPUT_NOTES: derived, human-readable recap of the run setup.

use super::{INPUT_NOTES, SectionWriter, on_off};
use crate::inputs::{SIMLIB_MSKOPT_QUIT_NOREWIND, SimInputs};
use docana_kernel::DocanaError;

const DASH: &str = "  -";

pub(crate) fn write(w: &mut SectionWriter<'_>, inputs: &SimInputs) -> Result<(), DocanaError> {
    let instr = &inputs.instrument;
    let cosmo = &inputs.cosmology;

    w.comment("")?;
    w.header(INPUT_NOTES)?;
    w.raw(format!("{DASH} Poisson noise is {}", on_off(instr.poisson_noise())))?;
    let errors = if instr.sky_only_errors() {
        "SKY only"
    } else {
        "SKY+GALAXY+SOURCE"
    };
    w.raw(format!("{DASH} Reported flux-uncertainty includes {errors}"))?;
    w.raw(format!(
        "{DASH} SB-dependent flux scatter is {}",
        on_off(instr.surface_brightness_scatter())
    ))?;

    for line in &inputs.rate.summary_lines {
        w.raw(format!("{DASH} {line}"))?;
    }

    w.raw(format!("{DASH} H0 = {:6.2} km/s/Mpc", cosmo.h0))?;
    w.raw(format!(
        "{DASH} Omega_{{M,L}} = {:6.3}, {:.3}     w0,wa = {:5.2},{:5.3}",
        cosmo.omega_matter, cosmo.omega_lambda, cosmo.w0, cosmo.wa
    ))?;

    let search = &inputs.search;
    if let Some(comment) = &search.readme_comment {
        w.raw(format!("{DASH} {comment}"))?;
    }
    if let Some(logic) = &search.logic {
        w.raw(format!(
            "{DASH} PIPELINE requires {} detections among {} (MJD dif > {:.4} days)",
            logic.nmjd, logic.bands, search.newmjd_dif
        ))?;
    }

    if instr.quit_no_rewind() {
        w.raw(format!(
            "{DASH} WARNING: STOP GENERATION AFTER ONE PASS THRU SIMLIB (MSKOPT+={SIMLIB_MSKOPT_QUIT_NOREWIND})"
        ))?;
    }
    Ok(())
}
