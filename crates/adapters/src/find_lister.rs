//! File lister that shells out to `find`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use testplan_ports::FileListerPort;
use testplan_shared::{ErrorCode, ErrorEnvelope, Result};

const FIND_ARGS: [&str; 6] = [".", "-type", "f", "-not", "-path", "*/.*"];

/// Lists files with `find . -type f -not -path '*/.*'` run in the project root.
#[derive(Debug, Clone)]
pub struct FindFileLister {
    program: PathBuf,
}

impl FindFileLister {
    /// Use `find` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("find")
    }

    /// Use a specific `find` executable.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_line(&self) -> String {
        format!("{} {}", self.program.display(), FIND_ARGS.join(" "))
    }
}

impl Default for FindFileLister {
    fn default() -> Self {
        Self::new()
    }
}

impl FileListerPort for FindFileLister {
    fn name(&self) -> &'static str {
        "find"
    }

    fn list_files(&self, root: &Path) -> Result<Vec<String>> {
        let output = Command::new(&self.program)
            .args(FIND_ARGS)
            .current_dir(root)
            .stdin(Stdio::null())
            .output()
            .map_err(|error| {
                ErrorEnvelope::from(error).with_metadata("command", self.command_line())
            })?;

        if !output.status.success() {
            let status = output
                .status
                .code()
                .map_or_else(|| "signal".to_owned(), |code| code.to_string());
            return Err(ErrorEnvelope::unexpected(
                ErrorCode::new("files", "lister_failed"),
                format!("{} failed", self.command_line()),
            )
            .with_metadata("status", status)
            .with_metadata(
                "stderr",
                String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            ));
        }

        Ok(parse_find_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Turn `find` output into repository-relative paths.
#[must_use]
pub fn parse_find_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let line = line.strip_prefix("./").unwrap_or(line);
            split_quoted(line).into_iter().next()
        })
        .collect()
}

/// Split a line into whitespace-separated tokens.
///
/// Double quotes group text into one token and are removed. A backslash
/// escapes the next character; `\t` and `\n` decode to tab and newline.
#[must_use]
pub fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    let mut quoted = false;

    for ch in line.chars() {
        if escaped {
            current.push(match ch {
                't' => '\t',
                'n' => '\n',
                other => other,
            });
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => quoted = !quoted,
            ch if !quoted && is_separator(ch) => {
                if !current.is_empty() {
                    fields.push(std::mem::take(&mut current));
                }
            },
            ch => current.push(ch),
        }
    }
    if !current.is_empty() {
        fields.push(current);
    }
    fields
}

/// ASCII whitespace plus vertical tab; other Unicode spaces stay in names.
const fn is_separator(ch: char) -> bool {
    ch.is_ascii_whitespace() || ch == '\u{b}'
}
