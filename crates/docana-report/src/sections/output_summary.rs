//! OUTPUT_SUMMARY: run statistics, written once generation has finished.

use super::{OUTPUT_SUMMARY, SectionWriter};
use crate::inputs::SimInputs;
use crate::stats::{RunStats, SeasonYield};
use docana_kernel::DocanaError;

pub(crate) fn write(
    w: &mut SectionWriter<'_>,
    inputs: &SimInputs,
    stats: &RunStats,
) -> Result<(), DocanaError> {
    let pad = w.pad();

    w.comment("")?;
    w.header(OUTPUT_SUMMARY)?;

    w.raw(format!("{pad}RANDOM_SYNC:"))?;
    for (index, stream) in stats.random_streams.iter().enumerate() {
        w.raw(format!(
            "{pad}- List={}  FIRST={:.6}  LAST={:.6}   AVG(wrap) = {:.1} +_ {:.1}",
            index + 1,
            stream.first,
            stream.last,
            stream.wrap_avg,
            stream.wrap_rms
        ))?;
    }
    w.comment("")?;

    w.raw(format!("{pad}CPU_MINUTES:       {:.1}", stats.cpu_minutes()))?;
    w.raw(format!(
        "{pad}NGENLC_TOT:        {}    # ({:.0}/sec)",
        stats.ngenlc_tot,
        stats.generation_rate()
    ))?;
    w.raw(format!(
        "{pad}NGENLC_WRITE:      {}    # ({:.0}/sec)",
        stats.ngenlc_write,
        stats.write_rate()
    ))?;

    let subsurveys = inputs.survey.subsurveys();
    if !subsurveys.is_empty() {
        w.raw(format!("{pad}NGENLC_SUBSURVEY:"))?;
        for (index, name) in subsurveys.iter().enumerate() {
            let count = stats.subsurvey(name);
            let key = format!("{name}:");
            let comment = if index == 0 { "# NTOT NWRITE" } else { "" };
            w.raw(format!(
                "{pad}  {key:<12}  {:>5} {:>5}   {comment}",
                count.ngen_tot, count.ngen_write
            ))?;
        }
    }

    w.raw(format!("{pad}NGENSPEC_WRITE:    {}", stats.ngenspec_write))?;
    w.raw(format!(
        "{pad}EFF(SEARCH+CUTS): {:7.4} +- {:7.4}",
        stats.gen_eff, stats.gen_eff_err
    ))?;

    if !inputs.rate.summary_lines.is_empty() {
        let season = SeasonYield::new(inputs.rate.season_count, stats);
        w.raw(format!(
            "{pad}NGEN_PER_SEASON:   {:.0}       # NSN(GEN) in GENRANGE(z,MJD,dOmega)",
            season.ngen
        ))?;
        w.raw(format!(
            "{pad}NACC_PER_SEASON:   {:.0} +_ {:.0}  # NSN(ACCEPT) after trigger+cuts",
            season.nacc, season.nacc_err
        ))?;
    }

    let rejects = &stats.rejects;
    w.raw(format!(
        "{pad}NREJECT:  [{},{},{},  {},{}]   # [NEP<{},GENRANGE,PEAKMAG,  SEARCHEFF,CUTWIN]",
        rejects.nepoch,
        rejects.genrange,
        rejects.genmag,
        rejects.searcheff,
        rejects.cutwin,
        inputs.cutwin.nepoch_min
    ))?;

    if inputs.hostlib.wronghost_file.is_some() {
        w.raw(format!(
            "{pad}NWRONGHOST_WRITE:   {}    # frac = {:.4}",
            stats.wronghost_count,
            stats.wronghost_fraction()
        ))?;
    }
    Ok(())
}
