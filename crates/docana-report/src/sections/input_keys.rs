//! INPUT_KEYS: every documented input, grouped under `# <title>` comments.
//!
//! Numeric fields pass through the formatter, so sentinel and out-of-range
//! values disappear; verbatim keys come from the domain registries.

use super::{INPUT_KEYS, SectionWriter};
use crate::context::Registries;
use crate::environment::RunEnvironment;
use crate::inputs::{CMB_APEX_VELOCITY, SimInputs};
use crate::population::{
    AsymGauss, EXP_HALF_VARIABLES, ExpHalfGauss, RV_VARIABLE, SALT2_VARIABLES, STRETCH_VARIABLES,
};
use docana_kernel::{DocanaError, Domain, FieldSpec};

type SectionResult = Result<(), DocanaError>;

pub(crate) fn write(
    w: &mut SectionWriter<'_>,
    registries: &Registries,
    inputs: &SimInputs,
    env: &RunEnvironment,
) -> SectionResult {
    w.comment("")?;
    w.header(INPUT_KEYS)?;

    output(w, inputs)?;
    source_model(w, registries, inputs)?;
    instrument(w, registries, inputs, env)?;
    hostlib(w, registries, inputs, env)?;
    searcheff(w, inputs, env)?;
    redshift(w, inputs)?;
    epoch(w, registries, inputs)?;
    extinction(w, registries)?;
    population(w, inputs)?;
    rate(w, registries, inputs)?;
    misc(w, registries, inputs)?;
    cutwin(w, registries, inputs)
}

fn int(value: i64) -> f64 {
    value as f64
}

fn output(w: &mut SectionWriter<'_>, inputs: &SimInputs) -> SectionResult {
    let out = &inputs.output;
    w.comment("Output data")?;
    w.keyed("GENVERSION:", &out.genversion)?;
    w.field(
        FieldSpec::new("NGENTOT_LC:", 1.0, 1.0e8, 0.0).integral(),
        &[int(out.ngentot_lc)],
    )?;
    w.field(
        FieldSpec::new("NGEN_SEASON:", 0.0, 1.0e8, 0.0).integral(),
        &[out.ngen_season],
    )?;
    w.field(
        FieldSpec::new("FORMAT_MASK:", 0.0, 2000.0, -1.0)
            .integral()
            .comment("+= 2,32,16 -> TEXT, FITS, randomCID"),
        &[int(out.format_mask)],
    )?;
    w.field(
        FieldSpec::new("GENTYPE:", 0.0, 2000.0, -1.0)
            .integral()
            .comment("true type"),
        &[int(out.gentype)],
    )?;
    w.field(
        FieldSpec::new("SNTYPE:", 0.0, 2000.0, -1.0)
            .integral()
            .comment("spec Type, photID type"),
        &[int(out.sntype[0]), int(out.sntype[1])],
    )?;
    for (key, value) in [
        ("CIDOFF:", out.cidoff),
        ("CIDRAN_MIN:", out.cidran_min),
        ("CIDRAN_MAX:", out.cidran_max),
    ] {
        w.field(FieldSpec::new(key, 0.0, 1.0e9, -1.0).integral(), &[int(value)])?;
    }
    Ok(())
}

fn source_model(
    w: &mut SectionWriter<'_>,
    registries: &Registries,
    inputs: &SimInputs,
) -> SectionResult {
    let model = &inputs.model;
    w.comment("Source model")?;
    for domain in [Domain::Genmodel, Domain::Non1a, Domain::Simsed, Domain::Lclib] {
        w.list(registries.get(domain))?;
    }
    w.field(
        FieldSpec::new("GENMAG_OFF_GLOBAL:", -20.0, 20.0, 0.0),
        &[model.genmag_off_global],
    )?;
    w.field(
        FieldSpec::new("GENMAG_SMEAR:", -20.0, 20.0, 0.0).comment("coherent scatter (mag)"),
        &[model.genmag_smear],
    )?;
    w.field(
        FieldSpec::new("GENMODEL_ERRSCALE:", 0.0, 20.0, 0.0),
        &[model.genmodel_errscale],
    )?;
    w.list(registries.get(Domain::GenmagOffset))?;
    w.list(registries.get(Domain::GenmagSmear))?;

    let cosmology = registries.get(Domain::Cosmology);
    let lensing = registries.get(Domain::Lensing);
    if !cosmology.is_empty() || !lensing.is_empty() {
        w.comment("Cosmology inputs")?;
        w.list(cosmology)?;
        w.list(lensing)?;
    }
    Ok(())
}

fn instrument(
    w: &mut SectionWriter<'_>,
    registries: &Registries,
    inputs: &SimInputs,
    env: &RunEnvironment,
) -> SectionResult {
    let instr = &inputs.instrument;
    w.comment("Instrumental inputs")?;
    w.keyed("GENFILTERS:", &instr.genfilters)?;
    w.keyed("KCOR_FILE:", env.restore_env_path(&instr.kcor_file))?;
    w.list(registries.get(Domain::Simlib))?;
    w.field(
        FieldSpec::new("SMEARFLAG_FLUX:", 0.0, 100.0, -9.0)
            .integral()
            .comment("1->add Poisson noise"),
        &[int(instr.smearflag_flux)],
    )?;
    w.field(
        FieldSpec::new("SMEARFLAG_ZEROPT:", 0.0, 100.0, -9.0)
            .integral()
            .comment("+=1->apply scatter, +=2->add to FLUXERRCAL"),
        &[int(instr.smearflag_zeropt)],
    )?;
    w.field(
        FieldSpec::new("FUDGE_SNRMAX:", 0.0, 1.0e5, -9.0).integral(),
        &[instr.fudge_snrmax],
    )?;
    w.list(registries.get(Domain::Filter))?;
    w.list(registries.get(Domain::FluxErrorModel))?;

    let spectrum = registries.get(Domain::Spectrum);
    if !spectrum.is_empty() {
        w.comment("Spectrograph inputs")?;
        w.list(spectrum)?;
    }
    Ok(())
}

fn hostlib(
    w: &mut SectionWriter<'_>,
    registries: &Registries,
    inputs: &SimInputs,
    env: &RunEnvironment,
) -> SectionResult {
    if let Some(file) = &inputs.hostlib.wronghost_file {
        w.keyed("WRONGHOST_FILE:", env.restore_env_path(file))?;
    }
    if inputs.hostlib.hostlib_file.is_none() {
        return Ok(());
    }
    w.comment("HOSTLIB inputs")?;
    w.list(registries.get(Domain::Hostlib))?;
    Ok(())
}

fn searcheff(w: &mut SectionWriter<'_>, inputs: &SimInputs, env: &RunEnvironment) -> SectionResult {
    let search = &inputs.search;
    let shown = |file: &Option<String>| match file {
        Some(file) => env.restore_env_path(file),
        None => "NONE".to_string(),
    };

    w.comment("SEARCHEFF/detections")?;
    w.keyed("SEARCHEFF_PIPELINE_LOGIC_FILE:", shown(&search.pipeline_logic_file))?;
    w.field(
        FieldSpec::new("NEWMJD_DIF:", 0.0, 2000.0, -1.0)
            .comment("day-sep if > 1 detections required"),
        &[search.newmjd_dif],
    )?;
    w.keyed("SEARCHEFF_PIPELINE_EFF_FILE:", shown(&search.pipeline_eff_file))?;
    w.keyed("SEARCHEFF_SPEC_FILE:", shown(&search.spec_file))?;
    w.keyed("SEARCHEFF_zHOST_FILE:", shown(&search.zhost_file))?;
    w.field(
        FieldSpec::new("APPLY_SEARCHEFF_OPT:", 0.0, 2000.0, -1.0)
            .integral()
            .comment("+= 1,2,4 => pipe,spec,zhost"),
        &[int(search.apply_searcheff_opt)],
    )?;
    Ok(())
}

fn redshift(w: &mut SectionWriter<'_>, inputs: &SimInputs) -> SectionResult {
    let z = &inputs.redshift;
    w.comment("Redshift inputs")?;
    w.field(
        FieldSpec::new("GENRANGE_REDSHIFT:", 0.0, 10.0, -1.0),
        &z.genrange_redshift,
    )?;
    w.field(
        FieldSpec::new("GENSIGMA_REDSHIFT:", 0.0, 10.0, -1.0),
        &[z.gensigma_redshift],
    )?;
    w.field(
        FieldSpec::new("GENSIGMA_VPEC:", 0.0, 9000.0, -1.0).comment("true vpec scatter (km/sec)"),
        &[z.gensigma_vpec],
    )?;
    w.field(
        FieldSpec::new("VPEC_ERR:", 0.0, 9000.0, -1.0)
            .comment("vpec scatter after correction (km/sec)"),
        &[z.vpec_err],
    )?;
    w.field(
        FieldSpec::new("VEL_CMBAPEX:", 0.0, 400.0, CMB_APEX_VELOCITY).comment("km/sec"),
        &[z.vel_cmbapex],
    )?;
    Ok(())
}

fn epoch(w: &mut SectionWriter<'_>, registries: &Registries, inputs: &SimInputs) -> SectionResult {
    let epoch = &inputs.epoch;
    w.comment("Epoch & sky coverage inputs")?;
    w.field(
        FieldSpec::new("GENRANGE_MJD:", 21000.0, 79000.0, -1.0),
        &epoch.genrange_mjd,
    )?;
    w.field(
        FieldSpec::new("GENRANGE_PEAKMJD:", 1.0e3, 1.0e5, -1.0),
        &epoch.genrange_peakmjd,
    )?;
    w.field(
        FieldSpec::new("GENSIGMA_PEAKMJD:", 0.0, 10.0, 0.0),
        &[epoch.gensigma_peakmjd],
    )?;
    w.field(
        FieldSpec::new("GENRANGE_TREST:", -1.0e3, 1.0e4, 0.111),
        &epoch.genrange_trest,
    )?;
    w.field(
        FieldSpec::new("GENRANGE_RA:", -359.0, 360.0, -999.0),
        &epoch.genrange_ra,
    )?;
    w.field(
        FieldSpec::new("GENRANGE_DEC:", -359.0, 360.0, -999.0),
        &epoch.genrange_dec,
    )?;
    w.field(
        FieldSpec::new("SOLID_ANGLE:", 0.0, 20.0, 0.0),
        &[epoch.solid_angle],
    )?;
    w.list(registries.get(Domain::Sky))?;
    Ok(())
}

fn extinction(w: &mut SectionWriter<'_>, registries: &Registries) -> SectionResult {
    w.comment("Galactic extinction")?;
    w.list(registries.get(Domain::Extinction))?;
    Ok(())
}

fn population(w: &mut SectionWriter<'_>, inputs: &SimInputs) -> SectionResult {
    let population = &inputs.population;
    let profiles = &population.profiles;
    w.comment("Population and rate-model params")?;
    if let Some(file) = &population.genpdf_file {
        let pad = w.pad();
        w.raw(format!("{pad}GENPDF_FILE:  {file}"))?;
    }

    let family: &[&str] = if inputs.survey.is_salt_model() {
        &SALT2_VARIABLES
    } else {
        &STRETCH_VARIABLES
    };
    for name in family {
        if let Some(profile) = profiles.asym(name) {
            asym_gauss(w, profile)?;
        }
    }
    for name in EXP_HALF_VARIABLES {
        if let Some(profile) = profiles.exp_half(name) {
            exp_half_gauss(w, profile)?;
        }
    }
    if let Some(profile) = profiles.asym(RV_VARIABLE) {
        asym_gauss(w, profile)?;
    }

    w.field(
        FieldSpec::new("BIASCOR_SALT2GAMMA_GRID:", -1.0, 1.0, 9.0),
        &population.biascor_salt2gamma_grid,
    )?;
    Ok(())
}

fn asym_gauss(w: &mut SectionWriter<'_>, profile: &AsymGauss) -> SectionResult {
    if !profile.used {
        return Ok(());
    }
    let name = &profile.name;
    let wide = |field: &str, no_print: f64| {
        FieldSpec::new(format!("{field}_{name}:"), -1.0e4, 1.0e4, no_print)
    };

    w.field(wide("GENPEAK", -9.0), &[profile.peak])?;
    w.field(wide("GENSIGMA", -9.0), &profile.sigma)?;
    w.field(wide("GENRANGE", -9.0), &profile.range)?;
    w.field(
        FieldSpec::new(format!("GENGRID_{name}:"), 0.0, 5.0, 0.0).integral(),
        &[int(profile.ngrid)],
    )?;
    w.field(wide("GENPEAK2", 0.0), &[profile.peak2])?;
    w.field(wide("GENPROB2", 0.0), &[profile.prob2])?;
    w.field(wide("GENSIGMA2", 0.0), &profile.sigma2)?;
    if profile.peak_range[1] > profile.peak_range[0] {
        w.field(wide("PEAKRANGE", 0.0), &profile.peak_range)?;
    }
    Ok(())
}

fn exp_half_gauss(w: &mut SectionWriter<'_>, profile: &ExpHalfGauss) -> SectionResult {
    if !profile.used {
        return Ok(());
    }
    let name = &profile.name;
    w.field(
        FieldSpec::new(format!("GENTAU_{name}:"), 0.0, 1.0e5, -9.0),
        &[profile.tau],
    )?;
    w.field(
        FieldSpec::new(format!("GENRANGE_{name}:"), 0.0, 100.0, -9.0),
        &profile.range,
    )?;
    if profile.ratio == 0.0 {
        return Ok(());
    }
    for (field, comment, value) in [
        ("GENGAUPEAK", "peak of half-Gauss", profile.peak),
        ("GENSIGMA", "sigma of half-Gauss", profile.sigma),
        ("GENRATIO", "Gauss(0)/Expon(0)", profile.ratio),
    ] {
        w.field(
            FieldSpec::new(format!("{field}_{name}:"), 0.0, 100.0, -9.0).comment(comment),
            &[value],
        )?;
    }
    Ok(())
}

fn rate(w: &mut SectionWriter<'_>, registries: &Registries, inputs: &SimInputs) -> SectionResult {
    let rate = &inputs.rate;
    w.list(registries.get(Domain::Ratemodel))?;
    if let Some(poly) = &rate.dndz_zpoly_rewgt {
        w.keyed("DNDZ_ZPOLY_REWGT:", format!("{poly} # dNdz *= polyFun(z)"))?;
    }
    w.field(
        FieldSpec::new("DNDZ_ZEXP_REWGT:", -10.0, 10.0, 0.0).comment("dN/dz *= z^REWGT"),
        &[rate.dndz_zexp_rewgt],
    )?;
    w.field(
        FieldSpec::new("DNDZ_ALLSCALE:", 0.0, 1.0e4, 1.0).comment("dN/dz *= ALLSCALE"),
        &[rate.dndz_allscale],
    )?;
    // the sentinel test alone would hide [1, x]
    if !rate.scale_is_default() {
        w.field(
            FieldSpec::new("DNDZ_SCALE:", 0.0, 1.0e4, -9.0)
                .comment("dN/dz(SNIa,NON1A) *= SCALE[0,1]"),
            &rate.dndz_scale,
        )?;
    }
    Ok(())
}

fn misc(w: &mut SectionWriter<'_>, registries: &Registries, inputs: &SimInputs) -> SectionResult {
    let misc = &inputs.misc;
    w.comment("Misc inputs")?;
    w.keyed("GENSOURCE:", &misc.gensource)?;
    w.field(
        FieldSpec::new("RANSEED:", 0.0, 1.0e9, -1.0).integral(),
        &[int(misc.ranseed)],
    )?;
    w.field(
        FieldSpec::new("DEBUG_FLAG:", 0.0, 1.0e9, -1.0).integral(),
        &[int(misc.debug_flag)],
    )?;
    w.field(
        FieldSpec::new("GENRANGE_PEAKMAG:", 0.0, 40.0, -999.0),
        &misc.genrange_peakmag,
    )?;
    for domain in [
        Domain::Systematics,
        Domain::ZVariation,
        Domain::GridGeneration,
        Domain::CovarianceScatter,
        Domain::Dump,
    ] {
        w.list(registries.get(domain))?;
    }
    Ok(())
}

fn cutwin(w: &mut SectionWriter<'_>, registries: &Registries, inputs: &SimInputs) -> SectionResult {
    let cut_windows = registries.get(Domain::CutWindows);
    if cut_windows.is_empty() {
        return Ok(());
    }
    w.comment("CUTWIN inputs")?;
    w.field(
        FieldSpec::new("APPLY_CUTWIN_OPT:", 0.0, 100.0, 0.0).integral(),
        &[int(inputs.cutwin.apply_cutwin_opt)],
    )?;
    w.list(cut_windows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::context::ReportContext;
    use docana_kernel::{DocumentBuffer, KeySource};

    fn render(inputs: &SimInputs, keys: &[(&str, &str)]) -> Vec<String> {
        let mut ctx = ReportContext::new(&ReportConfig::default());
        for (key, arg) in keys {
            ctx.route(key, &[*arg], KeySource::FromFile).unwrap();
        }
        let mut doc = DocumentBuffer::new();
        let mut w = SectionWriter::new(&mut doc, 24);
        write(&mut w, ctx.registries(), inputs, &RunEnvironment::default()).unwrap();
        doc.lines().to_vec()
    }

    fn has(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.starts_with(needle))
    }

    #[test]
    fn conditional_blocks_are_skipped_when_empty() {
        let lines = render(&SimInputs::default(), &[]);
        for title in ["# Cosmology inputs", "# Spectrograph inputs", "# HOSTLIB inputs"] {
            assert!(!lines.iter().any(|l| l == title), "{title}");
        }
        assert!(!lines.iter().any(|l| l == "# CUTWIN inputs"));
        assert!(!has(&lines, "    DNDZ_SCALE:"));
        assert!(!has(&lines, "    NGENTOT_LC:"));
        assert!(has(&lines, "    SMEARFLAG_FLUX:"));
    }

    #[test]
    fn section_titles_follow_the_fixed_order() {
        let keys = [("H0", "70"), ("CUTWIN_SNRMAX", "5 griz 2 -20 60")];
        let lines = render(&SimInputs::default(), &keys);
        let titles: Vec<&str> = lines
            .iter()
            .filter(|line| line.starts_with("# ") || line.starts_with("  "))
            .filter(|line| !line.starts_with("    "))
            .map(String::as_str)
            .collect();
        assert_eq!(
            titles,
            [
                "  INPUT_KEYS:",
                "# Output data",
                "# Source model",
                "# Cosmology inputs",
                "# Instrumental inputs",
                "# SEARCHEFF/detections",
                "# Redshift inputs",
                "# Epoch & sky coverage inputs",
                "# Galactic extinction",
                "# Population and rate-model params",
                "# Misc inputs",
                "# CUTWIN inputs",
            ]
        );
    }

    #[test]
    fn wronghost_line_appears_without_a_hostlib() {
        let mut inputs = SimInputs::default();
        inputs.hostlib.wronghost_file = Some("wrong.dat".to_string());
        let lines = render(&inputs, &[("HOSTLIB_MSKOPT", "258")]);
        assert!(lines.contains(&format!("    {:<24} wrong.dat", "WRONGHOST_FILE:")));
        assert!(!lines.iter().any(|l| l == "# HOSTLIB inputs"));

        inputs.hostlib.hostlib_file = Some("x.HOSTLIB".to_string());
        let lines = render(&inputs, &[("HOSTLIB_MSKOPT", "258")]);
        assert!(lines.contains(&format!("    {:<24} 258", "HOSTLIB_MSKOPT:")));
    }

    #[test]
    fn dndz_scale_prints_when_either_component_differs() {
        let mut inputs = SimInputs::default();
        inputs.rate.dndz_scale = [1.0, 2.0];
        let lines = render(&inputs, &[]);
        let expected = format!(
            "    {:<24} 1.0000  2.0000  # dN/dz(SNIa,NON1A) *= SCALE[0,1]",
            "DNDZ_SCALE:"
        );
        assert!(lines.contains(&expected), "{lines:#?}");
    }

    #[test]
    fn population_profiles_follow_the_model_family() {
        let mut inputs = SimInputs::default();
        for (key, value) in [
            ("GENPEAK_SALT2c", "-0.05"),
            ("GENSIGMA_SALT2c", "0.04 0.1"),
            ("GENRANGE_SALT2c", "-0.3 0.5"),
            ("GENPEAK_DM15", "1.1"),
            ("GENTAU_AV", "0.4"),
            ("GENRANGE_AV", "0 3"),
        ] {
            let args: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            inputs.apply_key(key, &args).unwrap();
        }
        inputs.survey.genmodel = "SALT2.JLA-B14".to_string();

        let lines = render(&inputs, &[]);
        let start = lines.iter().position(|l| l == "# Population and rate-model params").unwrap();
        assert_eq!(
            &lines[start + 1..start + 6],
            [
                "    GENPEAK_SALT2c:          -0.0500",
                "    GENSIGMA_SALT2c:         0.0400  0.1000",
                "    GENRANGE_SALT2c:         -0.3000  0.5000",
                "    GENTAU_AV:               0.4000",
                "    GENRANGE_AV:             0  3.0000",
            ]
        );
        assert!(!has(&lines, "    GENPEAK_DM15:"));
    }
}
