//! Tokenizing of `KEY: ARG ARG ...` lines.
//!
//! Input files carry one key per line; `#` starts a comment. A
//! `DOCUMENTATION:` ... `DOCUMENTATION_END:` block inside an input file is
//! skipped so a README can be fed back in as input. Command-line overrides
//! arrive as one string per key, with or without the colon.

use crate::error::DocanaError;
use std::io::BufRead;

const DOC_BLOCK_START: &str = "DOCUMENTATION:";
const DOC_BLOCK_END: &str = "DOCUMENTATION_END:";

/// One key with the tokens that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLine {
    pub key: String,
    pub args: Vec<String>,
    /// 1-based source line; 0 for command-line overrides.
    pub line: usize,
}

/// Read every key line from an input file.
///
/// Lines whose first token is not colon-terminated are not keys and are
/// skipped.
pub fn parse_key_lines(reader: impl BufRead) -> Result<Vec<KeyLine>, DocanaError> {
    let mut out = Vec::new();
    let mut in_doc_block = false;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| DocanaError::Io(format!("line {line_no}: {e}")))?;
        let content = strip_comment(&line).trim();
        if content.is_empty() {
            continue;
        }

        if in_doc_block {
            if content.starts_with(DOC_BLOCK_END) {
                in_doc_block = false;
            }
            continue;
        }
        if content.starts_with(DOC_BLOCK_START) {
            in_doc_block = true;
            continue;
        }

        match split_key(content) {
            Some((key, args)) => out.push(KeyLine {
                key,
                args,
                line: line_no,
            }),
            None => tracing::trace!(line = line_no, "skipping non-key line"),
        }
    }

    if in_doc_block {
        return Err(DocanaError::Parse {
            line: 0,
            message: format!("unterminated {DOC_BLOCK_START} block"),
        });
    }
    Ok(out)
}

/// Tokenize one command-line override such as `"GENRANGE_REDSHIFT 0.1 0.5"`.
pub fn parse_override(text: &str) -> Result<KeyLine, DocanaError> {
    let mut tokens = strip_comment(text).split_whitespace();
    let key = tokens
        .next()
        .filter(|key| !key.trim_end_matches(':').is_empty())
        .ok_or_else(|| DocanaError::Parse {
            line: 0,
            message: format!("override has no key: {text:?}"),
        })?;
    Ok(KeyLine {
        key: key.to_string(),
        args: tokens.map(str::to_string).collect(),
        line: 0,
    })
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn split_key(content: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = content.split_whitespace();
    let first = tokens.next()?;
    let (key, glued) = first.split_once(':')?;
    if key.is_empty() {
        return None;
    }

    let mut args = Vec::new();
    if !glued.is_empty() {
        args.push(glued.to_string());
    }
    args.extend(tokens.map(str::to_string));
    Some((format!("{key}:"), args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<KeyLine> {
        parse_key_lines(text.as_bytes()).unwrap()
    }

    #[test]
    fn splits_keys_args_and_comments() {
        let lines = parse(
            "# header comment\n\
             GENVERSION: MY_SIM   # trailing\n\
             \n\
             GENRANGE_REDSHIFT:  0.05  0.95\n",
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].key, "GENVERSION:");
        assert_eq!(lines[0].args, ["MY_SIM"]);
        assert_eq!(lines[0].line, 2);
        assert_eq!(lines[1].key, "GENRANGE_REDSHIFT:");
        assert_eq!(lines[1].args, ["0.05", "0.95"]);
    }

    #[test]
    fn non_key_lines_are_skipped() {
        let lines = parse("some free text\nFILTER: g\n  - bullet\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, "FILTER:");
    }

    #[test]
    fn glued_argument_is_split_from_key() {
        let lines = parse("GENVERSION:ABC more\n");
        assert_eq!(lines[0].key, "GENVERSION:");
        assert_eq!(lines[0].args, ["ABC", "more"]);
    }

    #[test]
    fn documentation_block_is_skipped() {
        let lines = parse(
            "DOCUMENTATION:\n  OVERVIEW:\n    SURVEY: LSST\nDOCUMENTATION_END:\nH0: 70\n",
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, "H0:");
    }

    #[test]
    fn unterminated_documentation_block_is_an_error() {
        let err = parse_key_lines("DOCUMENTATION:\n  X: 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DocanaError::Parse { .. }));
    }

    #[test]
    fn override_accepts_bare_key() {
        let line = parse_override("NGENTOT_LC 500").unwrap();
        assert_eq!(line.key, "NGENTOT_LC");
        assert_eq!(line.args, ["500"]);
        assert_eq!(line.line, 0);

        assert!(parse_override("   ").is_err());
        assert!(parse_override(":").is_err());
    }
}
