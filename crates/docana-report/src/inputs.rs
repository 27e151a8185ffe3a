//! Typed simulation inputs read by the section builders.
//!
//! Registries keep keys verbatim for listing; these structs hold the values
//! the report formats, compares, or derives notes from. Defaults equal the
//! "do not print" sentinel of the matching report field, so anything not set
//! by the input stays out of the report.

use crate::population::{Profiles, integer, number, one_or_two, pair};
use docana_kernel::{DocanaError, KeyLine};

/// SIMLIB option bit: read the library once and stop instead of rewinding.
pub const SIMLIB_MSKOPT_QUIT_NOREWIND: i64 = 2;

/// Host-galaxy smear bit for surface-brightness-dependent flux scatter.
pub const SMEARMASK_HOSTGAL_IMAGE: i64 = 2;

/// Peculiar velocity of the Sun relative to the CMB frame (km/sec).
pub const CMB_APEX_VELOCITY: f64 = 371.0;

/// Optional-file arguments that mean "no file", compared case-insensitively.
const IGNORED_FILE_NAMES: [&str; 3] = ["NONE", "NULL", "BLANK"];

/// True when `name` is blank or one of the "no file" sentinels.
pub fn is_ignored_file(name: &str) -> bool {
    let name = name.trim();
    name.is_empty()
        || IGNORED_FILE_NAMES
            .iter()
            .any(|ignored| name.eq_ignore_ascii_case(ignored))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyInputs {
    pub survey: String,
    /// Comma-separated sub-survey names.
    pub subsurvey_list: Option<String>,
    pub genmodel: String,
    pub input_files: Vec<String>,
}

impl SurveyInputs {
    pub fn subsurveys(&self) -> Vec<&str> {
        self.subsurvey_list
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// SALT-family light-curve models report x1/c/alpha/beta populations.
    pub fn is_salt_model(&self) -> bool {
        self.genmodel.to_ascii_uppercase().starts_with("SALT")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputInputs {
    pub genversion: String,
    pub ngentot_lc: i64,
    pub ngen_season: f64,
    pub format_mask: i64,
    pub gentype: i64,
    /// Spectroscopic and photometric-ID type codes.
    pub sntype: [i64; 2],
    pub cidoff: i64,
    pub cidran_min: i64,
    pub cidran_max: i64,
}

impl Default for OutputInputs {
    fn default() -> Self {
        Self {
            genversion: String::new(),
            ngentot_lc: 0,
            ngen_season: 0.0,
            format_mask: -1,
            gentype: -1,
            sntype: [-1, -1],
            cidoff: -1,
            cidran_min: -1,
            cidran_max: -1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInputs {
    pub genmag_off_global: f64,
    pub genmag_smear: f64,
    pub genmodel_errscale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentInputs {
    pub genfilters: String,
    pub kcor_file: String,
    pub smearflag_flux: i64,
    pub smearflag_zeropt: i64,
    pub smearflag_hostgal: i64,
    pub fudge_snrmax: f64,
    pub simlib_mskopt: i64,
}

impl Default for InstrumentInputs {
    fn default() -> Self {
        Self {
            genfilters: String::new(),
            kcor_file: String::new(),
            smearflag_flux: 1,
            smearflag_zeropt: 0,
            smearflag_hostgal: 0,
            fudge_snrmax: -9.0,
            simlib_mskopt: 0,
        }
    }
}

impl InstrumentInputs {
    pub fn poisson_noise(&self) -> bool {
        self.smearflag_flux != 0
    }

    /// Reported uncertainties include only sky noise when bit 2 is set.
    pub fn sky_only_errors(&self) -> bool {
        self.smearflag_flux & 2 != 0
    }

    pub fn surface_brightness_scatter(&self) -> bool {
        self.smearflag_hostgal & SMEARMASK_HOSTGAL_IMAGE != 0
    }

    pub fn quit_no_rewind(&self) -> bool {
        self.simlib_mskopt & SIMLIB_MSKOPT_QUIT_NOREWIND != 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostlibInputs {
    pub hostlib_file: Option<String>,
    pub wronghost_file: Option<String>,
}

/// Detection requirement parsed from a pipeline-logic file.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineLogic {
    pub nmjd: i64,
    pub bands: String,
}

impl PipelineLogic {
    /// The logic line for `survey` (`SURVEY: NMJD BANDS ...`).
    pub fn for_survey(lines: &[KeyLine], survey: &str) -> Result<Option<Self>, DocanaError> {
        let wanted = format!("{survey}:");
        let Some(line) = lines.iter().find(|line| line.key == wanted) else {
            return Ok(None);
        };
        let nmjd = integer(&line.key, &line.args, 0)?;
        let bands = line.args.get(1..).unwrap_or_default().join(" ");
        Ok(Some(Self { nmjd, bands }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchInputs {
    pub pipeline_logic_file: Option<String>,
    pub pipeline_eff_file: Option<String>,
    pub spec_file: Option<String>,
    pub zhost_file: Option<String>,
    pub newmjd_dif: f64,
    pub apply_searcheff_opt: i64,
    pub logic: Option<PipelineLogic>,
    pub readme_comment: Option<String>,
}

impl Default for SearchInputs {
    fn default() -> Self {
        Self {
            pipeline_logic_file: None,
            pipeline_eff_file: None,
            spec_file: None,
            zhost_file: None,
            newmjd_dif: -1.0,
            apply_searcheff_opt: -1,
            logic: None,
            readme_comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RedshiftInputs {
    pub genrange_redshift: [f64; 2],
    pub gensigma_redshift: f64,
    pub gensigma_vpec: f64,
    pub vpec_err: f64,
    pub vel_cmbapex: f64,
}

impl Default for RedshiftInputs {
    fn default() -> Self {
        Self {
            genrange_redshift: [-1.0, -1.0],
            gensigma_redshift: -1.0,
            gensigma_vpec: -1.0,
            vpec_err: -1.0,
            vel_cmbapex: CMB_APEX_VELOCITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpochInputs {
    pub genrange_mjd: [f64; 2],
    pub genrange_peakmjd: [f64; 2],
    pub gensigma_peakmjd: f64,
    pub genrange_trest: [f64; 2],
    pub genrange_ra: [f64; 2],
    pub genrange_dec: [f64; 2],
    pub solid_angle: f64,
}

impl Default for EpochInputs {
    fn default() -> Self {
        Self {
            genrange_mjd: [-1.0, -1.0],
            genrange_peakmjd: [-1.0, -1.0],
            gensigma_peakmjd: 0.0,
            genrange_trest: [0.111, 0.111],
            genrange_ra: [-999.0, -999.0],
            genrange_dec: [-999.0, -999.0],
            solid_angle: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationInputs {
    pub genpdf_file: Option<String>,
    pub profiles: Profiles,
    pub biascor_salt2gamma_grid: [f64; 2],
}

impl Default for PopulationInputs {
    fn default() -> Self {
        Self {
            genpdf_file: None,
            profiles: Profiles::default(),
            biascor_salt2gamma_grid: [9.0, 9.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateInputs {
    pub dndz_zpoly_rewgt: Option<String>,
    pub dndz_zexp_rewgt: f64,
    pub dndz_allscale: f64,
    pub dndz_scale: [f64; 2],
    /// Rate-model summary lines produced when the rate model is initialized.
    pub summary_lines: Vec<String>,
    /// Expected number of events per season in the generation window.
    pub season_count: f64,
}

impl Default for RateInputs {
    fn default() -> Self {
        Self {
            dndz_zpoly_rewgt: None,
            dndz_zexp_rewgt: 0.0,
            dndz_allscale: 1.0,
            dndz_scale: [1.0, 1.0],
            summary_lines: Vec::new(),
            season_count: 0.0,
        }
    }
}

impl RateInputs {
    pub fn scale_is_default(&self) -> bool {
        self.dndz_scale == [1.0, 1.0]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MiscInputs {
    pub gensource: String,
    pub ranseed: i64,
    pub debug_flag: i64,
    pub genrange_peakmag: [f64; 2],
}

impl Default for MiscInputs {
    fn default() -> Self {
        Self {
            gensource: "RANDOM".to_string(),
            ranseed: -1,
            debug_flag: -1,
            genrange_peakmag: [-999.0, -999.0],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutwinInputs {
    pub apply_cutwin_opt: i64,
    /// Minimum epoch count; the first `CUTWIN_NEPOCH` argument.
    pub nepoch_min: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CosmologyInputs {
    pub h0: f64,
    pub omega_matter: f64,
    pub omega_lambda: f64,
    pub w0: f64,
    pub wa: f64,
}

impl Default for CosmologyInputs {
    fn default() -> Self {
        Self {
            h0: 70.0,
            omega_matter: 0.315,
            omega_lambda: 0.685,
            w0: -1.0,
            wa: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimInputs {
    pub survey: SurveyInputs,
    pub output: OutputInputs,
    pub model: ModelInputs,
    pub instrument: InstrumentInputs,
    pub hostlib: HostlibInputs,
    pub search: SearchInputs,
    pub redshift: RedshiftInputs,
    pub epoch: EpochInputs,
    pub population: PopulationInputs,
    pub rate: RateInputs,
    pub misc: MiscInputs,
    pub cutwin: CutwinInputs,
    pub cosmology: CosmologyInputs,
}

impl SimInputs {
    /// Store the typed value of `key` when it is one the report reads.
    ///
    /// Returns `Ok(false)` for keys the report only lists verbatim.
    pub fn apply_key(&mut self, key: &str, args: &[String]) -> Result<bool, DocanaError> {
        let bare = key.trim().trim_end_matches(':');
        match bare {
            "SURVEY" => self.survey.survey = text(args),
            "SUBSURVEY_LIST" => {
                let list = text(args);
                self.survey.subsurvey_list = (!is_ignored_file(&list)).then_some(list);
            }
            "GENMODEL" => self.survey.genmodel = text(args),

            "GENVERSION" => self.output.genversion = text(args),
            "NGENTOT_LC" => self.output.ngentot_lc = integer(bare, args, 0)?,
            "NGEN_SEASON" => self.output.ngen_season = number(bare, args, 0)?,
            "FORMAT_MASK" => self.output.format_mask = integer(bare, args, 0)?,
            "GENTYPE" => self.output.gentype = integer(bare, args, 0)?,
            "SNTYPE" => {
                let spec = integer(bare, args, 0)?;
                let phot = match args.get(1) {
                    Some(_) => integer(bare, args, 1)?,
                    None => spec + 100,
                };
                self.output.sntype = [spec, phot];
            }
            "CIDOFF" => self.output.cidoff = integer(bare, args, 0)?,
            "CIDRAN_MIN" => self.output.cidran_min = integer(bare, args, 0)?,
            "CIDRAN_MAX" => self.output.cidran_max = integer(bare, args, 0)?,

            "GENMAG_OFF_GLOBAL" => self.model.genmag_off_global = number(bare, args, 0)?,
            "GENMAG_SMEAR" => self.model.genmag_smear = number(bare, args, 0)?,
            "GENMODEL_ERRSCALE" => self.model.genmodel_errscale = number(bare, args, 0)?,

            "GENFILTERS" => self.instrument.genfilters = text(args),
            "KCOR_FILE" => self.instrument.kcor_file = text(args),
            "SMEARFLAG_FLUX" => self.instrument.smearflag_flux = integer(bare, args, 0)?,
            "SMEARFLAG_ZEROPT" => self.instrument.smearflag_zeropt = integer(bare, args, 0)?,
            "SMEARFLAG_HOSTGAL" => self.instrument.smearflag_hostgal = integer(bare, args, 0)?,
            "FUDGE_SNRMAX" => self.instrument.fudge_snrmax = number(bare, args, 0)?,
            "SIMLIB_MSKOPT" => self.instrument.simlib_mskopt = integer(bare, args, 0)?,

            "HOSTLIB_FILE" => self.hostlib.hostlib_file = file(args),
            "WRONGHOST_FILE" => self.hostlib.wronghost_file = file(args),

            "SEARCHEFF_PIPELINE_LOGIC_FILE" => self.search.pipeline_logic_file = file(args),
            "SEARCHEFF_PIPELINE_EFF_FILE" => self.search.pipeline_eff_file = file(args),
            "SEARCHEFF_SPEC_FILE" => self.search.spec_file = file(args),
            "SEARCHEFF_zHOST_FILE" => self.search.zhost_file = file(args),
            "NEWMJD_DIF" => self.search.newmjd_dif = number(bare, args, 0)?,
            "APPLY_SEARCHEFF_OPT" => self.search.apply_searcheff_opt = integer(bare, args, 0)?,

            "GENRANGE_REDSHIFT" => self.redshift.genrange_redshift = pair(bare, args)?,
            "GENSIGMA_REDSHIFT" => self.redshift.gensigma_redshift = number(bare, args, 0)?,
            "GENSIGMA_VPEC" => self.redshift.gensigma_vpec = number(bare, args, 0)?,
            "VPEC_ERR" => self.redshift.vpec_err = number(bare, args, 0)?,
            "VEL_CMBAPEX" => self.redshift.vel_cmbapex = number(bare, args, 0)?,

            "GENRANGE_MJD" => self.epoch.genrange_mjd = pair(bare, args)?,
            "GENRANGE_PEAKMJD" => self.epoch.genrange_peakmjd = pair(bare, args)?,
            "GENSIGMA_PEAKMJD" => self.epoch.gensigma_peakmjd = number(bare, args, 0)?,
            "GENRANGE_TREST" => self.epoch.genrange_trest = pair(bare, args)?,
            "GENRANGE_RA" => self.epoch.genrange_ra = pair(bare, args)?,
            "GENRANGE_DEC" => self.epoch.genrange_dec = pair(bare, args)?,
            "SOLID_ANGLE" => self.epoch.solid_angle = number(bare, args, 0)?,

            "GENPDF_FILE" => self.population.genpdf_file = file(args),
            "BIASCOR_SALT2GAMMA_GRID" => {
                self.population.biascor_salt2gamma_grid = one_or_two(bare, args)?
            }

            "DNDZ_ZPOLY_REWGT" => {
                self.rate.dndz_zpoly_rewgt = (!args.is_empty()).then(|| text(args))
            }
            "DNDZ_ZEXP_REWGT" => self.rate.dndz_zexp_rewgt = number(bare, args, 0)?,
            "DNDZ_ALLSCALE" => self.rate.dndz_allscale = number(bare, args, 0)?,
            "DNDZ_SCALE" => self.rate.dndz_scale = one_or_two(bare, args)?,

            "GENSOURCE" => self.misc.gensource = text(args),
            "RANSEED" => self.misc.ranseed = integer(bare, args, 0)?,
            "DEBUG_FLAG" => self.misc.debug_flag = integer(bare, args, 0)?,
            "GENRANGE_PEAKMAG" => self.misc.genrange_peakmag = pair(bare, args)?,

            "APPLY_CUTWIN_OPT" => self.cutwin.apply_cutwin_opt = integer(bare, args, 0)?,
            "CUTWIN_NEPOCH" => self.cutwin.nepoch_min = integer(bare, args, 0)?,

            "H0" => self.cosmology.h0 = number(bare, args, 0)?,
            "OMEGA_MATTER" => self.cosmology.omega_matter = number(bare, args, 0)?,
            "OMEGA_LAMBDA" => self.cosmology.omega_lambda = number(bare, args, 0)?,
            "W0_LAMBDA" => self.cosmology.w0 = number(bare, args, 0)?,
            "WA_LAMBDA" => self.cosmology.wa = number(bare, args, 0)?,

            _ => return self.population.profiles.apply_key(bare, args),
        }
        Ok(true)
    }
}

fn text(args: &[String]) -> String {
    args.join(" ")
}

fn file(args: &[String]) -> Option<String> {
    args.first().filter(|name| !is_ignored_file(name)).cloned()
}
