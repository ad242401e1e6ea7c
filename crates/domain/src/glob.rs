//! Glob compiler: POSIX-style wildcards plus `**`, minus character classes.
//!
//! A glob compiles to an anchored regular expression over `/`-separated
//! paths. Wildcards never expand to a `.` at the start of a path component,
//! so hidden files and directories are only matched when the glob spells the
//! dot out. Most of the complexity comes from `**`, which can start new path
//! components and therefore has to keep applying that rule across `/`.
//!
//! | token | at component start      | elsewhere                 |
//! |-------|-------------------------|---------------------------|
//! | `?`   | one char, not `/` or `.` | one char, not `/`        |
//! | `*`   | run of non-`/`, no leading `.` | run of non-`/`     |
//! | `*?`  | like `*`, non-empty     | like `*`, non-empty       |
//! | `**`  | components, none starting with `.` | same, first may |
//! | `**?` | like `**`, non-empty    | like `**`, non-empty      |

use regex::Regex;
use std::fmt;

/// Any string that never contains `/.` (every component after the first
/// starts with something other than a dot).
///
/// Reasoning about the alternations below starts from the leftmost `[^/.]`.
const STAR_STAR: &str = "(?:[^/]*/+[^/.])*[^/]*/*";

/// Glob compilation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlobError {
    /// `\` followed by a character other than `? * \ [`, or at end of glob.
    #[error("bad escape sequence in glob: {glob}")]
    BadEscape {
        /// The offending glob.
        glob: String,
    },
    /// The glob contains `[`.
    #[error("character classes not supported, in glob: {glob}")]
    UnsupportedCharClass {
        /// The offending glob.
        glob: String,
    },
    /// The generated expression was rejected by the regex engine.
    #[error("glob too complex to compile: {glob} ({reason})")]
    TooComplex {
        /// The offending glob.
        glob: String,
        /// Engine diagnostic.
        reason: String,
    },
}

impl GlobError {
    /// Returns the glob that failed to compile.
    #[must_use]
    pub fn glob(&self) -> &str {
        match self {
            Self::BadEscape { glob }
            | Self::UnsupportedCharClass { glob }
            | Self::TooComplex { glob, .. } => glob,
        }
    }

    /// Stable error code identifier.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadEscape { .. } => "bad_escape",
            Self::UnsupportedCharClass { .. } => "unsupported_char_class",
            Self::TooComplex { .. } => "too_complex",
        }
    }
}

/// Compiled, anchored matcher for one glob.
#[derive(Clone)]
pub struct GlobMatcher {
    glob: Box<str>,
    regex: Regex,
}

impl GlobMatcher {
    /// Returns true when the whole `path` matches the glob.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The source glob.
    #[must_use]
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// The generated regular expression.
    #[must_use]
    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for GlobMatcher {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GlobMatcher")
            .field("glob", &self.glob)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

/// Compile a glob into an anchored matcher.
pub fn compile_glob(glob: &str) -> Result<GlobMatcher, GlobError> {
    let expression = glob_to_regex(glob)?;
    let regex = Regex::new(&expression).map_err(|error| GlobError::TooComplex {
        glob: glob.to_owned(),
        reason: error.to_string(),
    })?;
    Ok(GlobMatcher {
        glob: glob.into(),
        regex,
    })
}

/// Translate a glob into regular-expression source, anchored at both ends.
pub fn glob_to_regex(glob: &str) -> Result<String, GlobError> {
    let chars: Vec<char> = glob.chars().collect();
    let mut re = String::from(r"\A");
    let mut at_component_start = true;
    let mut index = 0;

    while let Some(&ch) = chars.get(index) {
        let mut next_at_component_start = false;
        let consumed = match ch {
            '?' => {
                re.push_str(if at_component_start { "[^/.]" } else { "[^/]" });
                1
            },
            '*' => push_star(&mut re, &chars, index, at_component_start),
            '\\' => match chars.get(index + 1) {
                Some(&escaped @ ('?' | '*' | '\\' | '[')) => {
                    re.push('\\');
                    re.push(escaped);
                    2
                },
                _ => {
                    return Err(GlobError::BadEscape {
                        glob: glob.to_owned(),
                    });
                },
            },
            '[' => {
                return Err(GlobError::UnsupportedCharClass {
                    glob: glob.to_owned(),
                });
            },
            '/' => {
                next_at_component_start = true;
                re.push('/');
                1
            },
            literal if literal.is_ascii_alphanumeric() => {
                re.push(literal);
                1
            },
            other => {
                let mut buf = [0_u8; 4];
                re.push_str(&regex::escape(other.encode_utf8(&mut buf)));
                1
            },
        };
        index += consumed;
        at_component_start = next_at_component_start;
    }

    re.push_str(r"\z");
    Ok(re)
}

/// Emit the fragment for a `*` run starting at `start`; returns chars consumed.
fn push_star(re: &mut String, chars: &[char], start: usize, at_component_start: bool) -> usize {
    let run = chars
        .iter()
        .skip(start)
        .take_while(|candidate| **candidate == '*')
        .count();
    let followed_by_question = chars.get(start + run) == Some(&'?');

    if run >= 2 {
        // Any run of two or more stars means `**`.
        if followed_by_question {
            if at_component_start {
                re.push_str(&format!("(?:/*[^/.]{STAR_STAR}|/+)"));
            } else {
                re.push_str(&format!("(?:[.]*/*[^/.]{STAR_STAR}|[.]*/+|[.]+)"));
            }
            run + 1
        } else {
            if at_component_start {
                re.push_str(&format!("(?:/*[^/.]{STAR_STAR}|/*)"));
            } else {
                re.push_str(STAR_STAR);
            }
            run
        }
    } else if followed_by_question {
        re.push_str(if at_component_start {
            "[^/.][^/]*"
        } else {
            "[^/]+"
        });
        2
    } else {
        re.push_str(if at_component_start {
            "(?:[^/.][^/]*|)"
        } else {
            "[^/]*"
        });
        1
    }
}
