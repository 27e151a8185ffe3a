//! OVERVIEW: survey, model, host, user, installation, and input files.

use super::{OVERVIEW, SectionWriter};
use crate::environment::RunEnvironment;
use crate::inputs::SimInputs;
use docana_kernel::DocanaError;

pub(crate) fn write(
    w: &mut SectionWriter<'_>,
    inputs: &SimInputs,
    env: &RunEnvironment,
) -> Result<(), DocanaError> {
    let pad = w.pad();
    w.header(OVERVIEW)?;
    w.raw(format!("{pad}SURVEY:       {}", inputs.survey.survey))?;
    if let Some(list) = &inputs.survey.subsurvey_list {
        w.raw(format!("{pad}SUBSURVEY_LIST:  {list}"))?;
    }
    w.raw(format!("{pad}GENMODEL:     {}", inputs.survey.genmodel))?;

    if let Some(host) = &env.host {
        w.raw(format!("{pad}HOST_MACHINE: {host}"))?;
    }
    if let Some(user) = &env.user {
        w.raw(format!("{pad}USERNAME:     {user}"))?;
    }
    if let Some(root) = &env.sndata_root {
        w.raw(format!("{pad}SNDATA_ROOT:  {root}"))?;
    }
    if let Some(dir) = &env.snana_dir {
        w.raw(format!("{pad}SNANA_DIR:     {dir}"))?;
    }
    if !env.version.is_empty() {
        w.raw(format!("{pad}SNANA_VERSION: {}", env.version))?;
    }
    if let Some(cwd) = &env.cwd {
        w.raw(format!("{pad}CWD:   {}", cwd.display()))?;
    }

    w.raw(format!("{pad}INPUT_FILE:"))?;
    for file in &inputs.survey.input_files {
        w.raw(format!("{pad}- {}", env.restore_env_path(file)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docana_kernel::DocumentBuffer;
    use std::path::PathBuf;

    #[test]
    fn unavailable_metadata_is_omitted() {
        let mut inputs = SimInputs::default();
        inputs.survey.survey = "DES".to_string();
        inputs.survey.genmodel = "SALT2.JLA-B14".to_string();
        inputs.survey.input_files = vec!["/data/sndata/sim/DES.INPUT".to_string()];
        let env = RunEnvironment {
            user: Some("kessler".to_string()),
            sndata_root: Some("/data/sndata".to_string()),
            cwd: Some(PathBuf::from("/work")),
            version: "v11_05".to_string(),
            ..RunEnvironment::default()
        };

        let mut doc = DocumentBuffer::new();
        write(&mut SectionWriter::new(&mut doc, 24), &inputs, &env).unwrap();
        assert_eq!(
            doc.lines(),
            [
                "  OVERVIEW:",
                "    SURVEY:       DES",
                "    GENMODEL:     SALT2.JLA-B14",
                "    USERNAME:     kessler",
                "    SNDATA_ROOT:  /data/sndata",
                "    SNANA_VERSION: v11_05",
                "    CWD:   /work",
                "    INPUT_FILE:",
                "    - $SNDATA_ROOT/sim/DES.INPUT",
            ]
        );
    }
}
