use regex::Regex;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Errors raised by a constituency-parsing backend. Callers treat every
/// variant identically: the paragraph that triggered it yields no trees.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("parser command is empty")]
    EmptyCommand,
    #[error("parser pipeline failed: {0}")]
    Pipeline(String),
    #[error("parser pipeline produced non-utf8 output: {0}")]
    BadOutput(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The external NLP capability: segment `text` into sentences and return one
/// serialized constituency tree per sentence, in sentence order.
///
/// Implementations fail as a unit. Either every sentence of the paragraph
/// parsed, or the call errors and no trees are returned at all.
pub trait ConstituencyParser {
    fn segment_and_parse(&self, text: &str) -> Result<Vec<String>, ParseError>;
}

/// Backend that delegates to an external command, e.g. a CoreNLP wrapper
/// script. The paragraph is fed to the child's stdin and stdout is expected
/// to carry one bracketed tree per line; any other stdout line is treated as
/// pipeline chatter and ignored.
///
/// Built once before the batch loop and reused unchanged for every record.
pub struct CommandParser {
    program: String,
    args: Vec<String>,
    tree_line: Regex,
}

impl CommandParser {
    pub fn new(command: &[String]) -> Result<Self, ParseError> {
        let (program, args) = command.split_first().ok_or(ParseError::EmptyCommand)?;
        Ok(CommandParser {
            program: program.clone(),
            args: args.to_vec(),
            tree_line: Regex::new(r"^\(.*\)$").unwrap(),
        })
    }
}

impl ConstituencyParser for CommandParser {
    fn segment_and_parse(&self, text: &str) -> Result<Vec<String>, ParseError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                ParseError::Pipeline(format!("failed to start '{}': {}", self.program, e))
            })?;

        // Paragraph-sized input fits the pipe buffer, so a plain write before
        // draining stdout is safe. Dropping the handle closes the child's stdin.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ParseError::Pipeline(format!(
                "'{}' exited with {}",
                self.program, output.status
            )));
        }

        let stdout = String::from_utf8(output.stdout)?;
        let trees = stdout
            .lines()
            .map(str::trim)
            .filter(|line| self.tree_line.is_match(line))
            .map(String::from)
            .collect();
        Ok(trees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_parser(parts: &[&str]) -> CommandParser {
        let command: Vec<String> = parts.iter().map(|s| s.to_string()).collect();
        CommandParser::new(&command).unwrap()
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            CommandParser::new(&[]),
            Err(ParseError::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn tree_lines_pass_through_and_chatter_is_dropped() {
        // `cat` echoes the input back, standing in for a pipeline whose
        // stdout mixes tree lines with diagnostics.
        let parser = command_parser(&["cat"]);
        let trees = parser
            .segment_and_parse(
                "loading grammar model...\n(ROOT (S (NP (DT The) (NN cat))))\n\n(ROOT (VP (VBD sat)))\n",
            )
            .unwrap();
        assert_eq!(
            trees,
            vec![
                "(ROOT (S (NP (DT The) (NN cat))))".to_string(),
                "(ROOT (VP (VBD sat)))".to_string(),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_an_error() {
        let parser = command_parser(&["false"]);
        assert!(parser.segment_and_parse("anything").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn missing_program_is_an_error() {
        let parser = command_parser(&["paratree-no-such-binary"]);
        assert!(parser.segment_and_parse("anything").is_err());
    }
}
