//! Parser for shell-style environment files such as `.env.sh`.
//!
//! Only the assignment subset of shell syntax is understood:
//!
//! ```text
//! # comment
//! export POSTGRES_HOST=rafiki_db
//! REDIS_HOST="rafiki_cache"
//! ADMIN_WEB_HOST='${literal}'
//! LOGS_DIR=$HOME/logs
//! ```
//!
//! Double-quoted and bare values expand `$VAR` and `${VAR}`, resolving
//! against earlier assignments first and then a fallback lookup. Single
//! quotes suppress expansion. A value must be one shell word; command
//! substitution and `${VAR:-default}`-style forms are rejected.

use std::path::Path;

use crate::error::{Result, TeardownError};

/// Ordered `(key, value)` assignments read from an environment file.
pub type Assignments = Vec<(String, String)>;

/// Reads and parses an environment file from disk.
///
/// # Errors
///
/// Returns `NotFound` if the file does not exist, `Io` if it cannot be
/// read, and `Config` if any line is malformed.
pub fn read(path: &Path) -> Result<Assignments> {
    if !path.exists() {
        return Err(TeardownError::NotFound {
            kind: "env file",
            id: path.display().to_string(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| TeardownError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&text)
}

/// Parses environment file text, falling back to the process environment
/// for references not assigned earlier in the file.
///
/// # Errors
///
/// Returns `Config` naming the first malformed line.
pub fn parse(text: &str) -> Result<Assignments> {
    parse_with(text, |key| std::env::var(key).ok())
}

/// Parses environment file text with an explicit fallback lookup.
///
/// # Errors
///
/// Returns `Config` naming the first malformed line.
pub fn parse_with<F>(text: &str, fallback: F) -> Result<Assignments>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out: Assignments = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").map_or(line, str::trim_start);

        let Some((key, value)) = line.split_once('=') else {
            // `export NAME` re-exports an existing variable.
            if is_valid_key(line) {
                continue;
            }
            return Err(malformed(line_no, "expected KEY=VALUE"));
        };
        let key = key.trim_end();
        if !is_valid_key(key) {
            return Err(malformed(line_no, &format!("invalid variable name `{key}`")));
        }

        let lookup = |name: &str| {
            out.iter()
                .rev()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .or_else(|| fallback(name))
        };
        let value = parse_value(value, line_no, &lookup)?;
        out.push((key.to_string(), value));
    }
    Ok(out)
}

/// Parses a value as a single shell word. Adjacent quoted and unquoted
/// segments are joined; an unquoted `#` after whitespace starts a comment.
fn parse_value<L>(raw: &str, line_no: usize, lookup: &L) -> Result<String>
where
    L: Fn(&str) -> Option<String>,
{
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while let Some(&c) = chars.get(i) {
        match c {
            c if c.is_whitespace() => {
                let rest = chars[i..].iter().find(|c| !c.is_whitespace());
                if rest.is_none_or(|&c| c == '#') {
                    break;
                }
                return Err(malformed(line_no, "value has more than one word; quote it"));
            }
            '\'' => {
                let Some(len) = chars[i + 1..].iter().position(|&c| c == '\'') else {
                    return Err(malformed(line_no, "unterminated single quote"));
                };
                out.extend(&chars[i + 1..i + 1 + len]);
                i += len + 2;
            }
            '"' => i = parse_double_quoted(&chars, i + 1, &mut out, line_no, lookup)?,
            '\\' => {
                let Some(&next) = chars.get(i + 1) else {
                    return Err(malformed(line_no, "line continuation is not supported"));
                };
                out.push(next);
                i += 2;
            }
            '$' => i = expand_at(&chars, i, &mut out, line_no, lookup)?,
            '`' => return Err(malformed(line_no, "command substitution is not supported")),
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    Ok(out)
}

/// Consumes a double-quoted segment starting just after the opening quote
/// and returns the index after the closing quote.
fn parse_double_quoted<L>(
    chars: &[char],
    mut i: usize,
    out: &mut String,
    line_no: usize,
    lookup: &L,
) -> Result<usize>
where
    L: Fn(&str) -> Option<String>,
{
    loop {
        let Some(&c) = chars.get(i) else {
            return Err(malformed(line_no, "unterminated double quote"));
        };
        match c {
            '"' => return Ok(i + 1),
            '\\' => match chars.get(i + 1) {
                Some(&next @ ('"' | '\\' | '$' | '`')) => {
                    out.push(next);
                    i += 2;
                }
                _ => {
                    out.push('\\');
                    i += 1;
                }
            },
            '$' => i = expand_at(chars, i, out, line_no, lookup)?,
            '`' => return Err(malformed(line_no, "command substitution is not supported")),
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
}

/// Expands the `$VAR` or `${VAR}` reference at `chars[i]` and returns the
/// index after it. Unknown variables expand to the empty string, as in the
/// shell. A `$` not followed by a name is kept literally.
fn expand_at<L>(
    chars: &[char],
    i: usize,
    out: &mut String,
    line_no: usize,
    lookup: &L,
) -> Result<usize>
where
    L: Fn(&str) -> Option<String>,
{
    match chars.get(i + 1) {
        Some('{') => {
            let Some(len) = chars[i + 2..].iter().position(|&c| c == '}') else {
                return Err(malformed(line_no, "unterminated ${"));
            };
            let name: String = chars[i + 2..i + 2 + len].iter().collect();
            if !is_valid_key(&name) {
                return Err(malformed(
                    line_no,
                    &format!("unsupported parameter expansion `${{{name}}}`"),
                ));
            }
            out.push_str(&lookup(&name).unwrap_or_default());
            Ok(i + len + 3)
        }
        Some('(') => Err(malformed(line_no, "command substitution is not supported")),
        Some(&c) if c.is_ascii_alphabetic() || c == '_' => {
            let len = chars[i + 1..]
                .iter()
                .take_while(|c| c.is_ascii_alphanumeric() || **c == '_')
                .count();
            let name: String = chars[i + 1..i + 1 + len].iter().collect();
            out.push_str(&lookup(&name).unwrap_or_default());
            Ok(i + len + 1)
        }
        _ => {
            out.push('$');
            Ok(i + 1)
        }
    }
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn malformed(line_no: usize, what: &str) -> TeardownError {
    TeardownError::Config {
        message: format!("env file line {line_no}: {what}"),
    }
}
