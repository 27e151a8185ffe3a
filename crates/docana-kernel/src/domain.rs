//! Configuration domains and the key → domain routing table.
//!
//! Every documented input key lives in exactly one registry. The routing
//! table below is the single authority for which registry that is; keys it
//! does not match are consumed elsewhere (typed inputs) or not documented.

use serde::{Deserialize, Serialize};

/// One logical input domain, each backed by its own key/argument registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Cosmology,
    Genmodel,
    Simlib,
    Hostlib,
    Ratemodel,
    Lensing,
    Sky,
    Extinction,
    Non1a,
    Simsed,
    Lclib,
    Filter,
    FluxErrorModel,
    GenmagOffset,
    GenmagSmear,
    Spectrum,
    Systematics,
    ZVariation,
    GridGeneration,
    CutWindows,
    CovarianceScatter,
    Dump,
}

impl Domain {
    /// All domains, in registry initialization order.
    pub const ALL: [Domain; 22] = [
        Domain::Cosmology,
        Domain::Genmodel,
        Domain::Simlib,
        Domain::Hostlib,
        Domain::Ratemodel,
        Domain::Lensing,
        Domain::Sky,
        Domain::Extinction,
        Domain::Non1a,
        Domain::Simsed,
        Domain::Lclib,
        Domain::Filter,
        Domain::FluxErrorModel,
        Domain::GenmagOffset,
        Domain::GenmagSmear,
        Domain::Spectrum,
        Domain::Systematics,
        Domain::ZVariation,
        Domain::GridGeneration,
        Domain::CutWindows,
        Domain::CovarianceScatter,
        Domain::Dump,
    ];

    /// Position in [`Domain::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cosmology => "cosmology",
            Self::Genmodel => "genmodel",
            Self::Simlib => "simlib",
            Self::Hostlib => "hostlib",
            Self::Ratemodel => "ratemodel",
            Self::Lensing => "lensing",
            Self::Sky => "sky",
            Self::Extinction => "extinction",
            Self::Non1a => "non1a",
            Self::Simsed => "simsed",
            Self::Lclib => "lclib",
            Self::Filter => "filter",
            Self::FluxErrorModel => "flux_error_model",
            Self::GenmagOffset => "genmag_offset",
            Self::GenmagSmear => "genmag_smear",
            Self::Spectrum => "spectrum",
            Self::Systematics => "systematics",
            Self::ZVariation => "z_variation",
            Self::GridGeneration => "grid_generation",
            Self::CutWindows => "cut_windows",
            Self::CovarianceScatter => "covariance_scatter",
            Self::Dump => "dump",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == wanted)
            .ok_or_else(|| format!("unknown domain: {s}"))
    }
}

/// How a routing rule matches a bare (colon-stripped) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl KeyPattern {
    pub fn matches(self, bare_key: &str) -> bool {
        match self {
            Self::Exact(name) => bare_key == name,
            Self::Prefix(prefix) => bare_key.starts_with(prefix),
        }
    }
}

/// Canonical key → domain routing. First match wins.
///
/// Keys rendered through the value formatter (for example `GENMAG_SMEAR`,
/// `GENMAG_OFF_GLOBAL`, `DNDZ_ALLSCALE`) are deliberately absent so they are
/// not documented twice.
pub const KEY_ROUTES: &[(KeyPattern, Domain)] = &[
    (KeyPattern::Exact("H0"), Domain::Cosmology),
    (KeyPattern::Exact("OMEGA_MATTER"), Domain::Cosmology),
    (KeyPattern::Exact("OMEGA_LAMBDA"), Domain::Cosmology),
    (KeyPattern::Exact("W0_LAMBDA"), Domain::Cosmology),
    (KeyPattern::Exact("WA_LAMBDA"), Domain::Cosmology),
    (KeyPattern::Exact("HzFUN_FILE"), Domain::Cosmology),
    (KeyPattern::Prefix("MUSHIFT"), Domain::Cosmology),
    (KeyPattern::Prefix("LENSING_"), Domain::Lensing),
    (KeyPattern::Prefix("STRONGLENS_"), Domain::Lensing),
    (KeyPattern::Prefix("WEAKLENS_"), Domain::Lensing),
    (KeyPattern::Exact("GENMODEL"), Domain::Genmodel),
    (KeyPattern::Prefix("GENMODEL_EXTRAP"), Domain::Genmodel),
    (KeyPattern::Prefix("USE_SIMLIB_"), Domain::Simlib),
    (KeyPattern::Prefix("SIMLIB_"), Domain::Simlib),
    (KeyPattern::Prefix("HOSTLIB_"), Domain::Hostlib),
    (KeyPattern::Exact("DNDZ"), Domain::Ratemodel),
    (KeyPattern::Exact("DNDZ_PEC1A"), Domain::Ratemodel),
    (KeyPattern::Exact("DNDB"), Domain::Ratemodel),
    (KeyPattern::Prefix("SKY_"), Domain::Sky),
    (KeyPattern::Prefix("MWEBV"), Domain::Extinction),
    (KeyPattern::Prefix("OPT_MWEBV"), Domain::Extinction),
    (KeyPattern::Prefix("OPT_MWCOLORLAW"), Domain::Extinction),
    (KeyPattern::Exact("RV_MWCOLORLAW"), Domain::Extinction),
    (KeyPattern::Prefix("NON1A"), Domain::Non1a),
    (KeyPattern::Prefix("NONIA"), Domain::Non1a),
    (KeyPattern::Prefix("SIMSED_"), Domain::Simsed),
    (KeyPattern::Prefix("LCLIB_"), Domain::Lclib),
    (KeyPattern::Prefix("FILTER"), Domain::Filter),
    (KeyPattern::Prefix("FLUXERRMODEL_"), Domain::FluxErrorModel),
    (KeyPattern::Prefix("FLUXERRMAP_"), Domain::FluxErrorModel),
    (KeyPattern::Prefix("GENMAG_OFF_MODEL"), Domain::GenmagOffset),
    (KeyPattern::Prefix("GENMAG_OFF_ZP"), Domain::GenmagOffset),
    (KeyPattern::Prefix("GENMAG_OFF_AB"), Domain::GenmagOffset),
    (KeyPattern::Prefix("GENMAG_OFF_NON1A"), Domain::GenmagOffset),
    (KeyPattern::Prefix("GENMAG_SMEAR_"), Domain::GenmagSmear),
    (KeyPattern::Prefix("TAKE_SPECTRUM"), Domain::Spectrum),
    (KeyPattern::Prefix("SPECTROGRAPH_"), Domain::Spectrum),
    (KeyPattern::Prefix("RANSYSTPAR_"), Domain::Systematics),
    (KeyPattern::Prefix("ZVARIATION_"), Domain::ZVariation),
    (KeyPattern::Prefix("GRIDGEN_"), Domain::GridGeneration),
    (KeyPattern::Prefix("GRID_"), Domain::GridGeneration),
    (KeyPattern::Prefix("CUTWIN_"), Domain::CutWindows),
    (KeyPattern::Prefix("COVMAT_SCATTER"), Domain::CovarianceScatter),
    (KeyPattern::Prefix("SIMGEN_DUMP"), Domain::Dump),
];

/// Registry domain that documents `key`, if any. A trailing colon is ignored.
pub fn domain_for_key(key: &str) -> Option<Domain> {
    let bare = key.trim().trim_end_matches(':');
    KEY_ROUTES
        .iter()
        .find_map(|(pattern, domain)| pattern.matches(bare).then_some(*domain))
}
