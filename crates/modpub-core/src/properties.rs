use std::collections::BTreeMap;
use std::path::Path;

use modpub_util::errors::ModpubError;

/// File name of the build properties file at the build root.
pub const PROPERTIES_FILE: &str = "gradle.properties";

/// Build properties: `gradle.properties` at the build root, overlaid with
/// `-P key=value` command-line overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProperties {
    values: BTreeMap<String, String>,
}

impl BuildProperties {
    /// Load `gradle.properties` from `root_dir`. A missing file yields no properties.
    pub fn load(root_dir: &Path) -> miette::Result<Self> {
        let path = root_dir.join(PROPERTIES_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ModpubError::Settings {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let properties = Self::parse(&content);
        tracing::debug!(
            "Loaded {} build propert(ies) from {}",
            properties.len(),
            path.display()
        );
        Ok(properties)
    }

    /// Parse properties-file content in the Java `.properties` format.
    ///
    /// Keys end at the first unescaped `=`, `:` or whitespace. `#` and `!`
    /// start comment lines, a trailing odd run of `\` continues a line, and
    /// backslash escapes (`\:`, `\=`, `\t`, `\uXXXX`, ...) are decoded in
    /// both keys and values.
    pub fn parse(content: &str) -> Self {
        let mut values = BTreeMap::new();
        for line in logical_lines(content) {
            let (key, value) = split_key_value(&line);
            if key.is_empty() {
                continue;
            }
            values.insert(key, value);
        }
        Self { values }
    }

    /// Apply command-line overrides; they win over values from the file.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.values.extend(overrides);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse a `-P` flag value. `key=value` sets a value; a bare `key` sets an
/// empty one.
pub fn parse_property_flag(flag: &str) -> miette::Result<(String, String)> {
    let (key, value) = flag.split_once('=').unwrap_or((flag, ""));
    let key = key.trim();
    if key.is_empty() {
        return Err(ModpubError::Settings {
            message: format!("Invalid property '{flag}': expected key=value"),
        }
        .into());
    }
    Ok((key.to_string(), value.to_string()))
}

/// Join continuation lines and drop blank and comment lines.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;
    for raw in content.lines() {
        let part = raw.trim_start_matches(is_separator_space);
        let mut line = match pending.take() {
            Some(mut joined) => {
                joined.push_str(part);
                joined
            }
            None if part.is_empty() || part.starts_with('#') || part.starts_with('!') => continue,
            None => part.to_string(),
        };
        if ends_with_continuation(&line) {
            line.pop();
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }
    lines.extend(pending);
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

fn is_separator_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn split_key_value(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let mut key_end = chars.len();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_separator_space(c) => {
                key_end = i;
                break;
            }
            _ => i += 1,
        }
    }

    let mut value_start = key_end;
    while value_start < chars.len() && is_separator_space(chars[value_start]) {
        value_start += 1;
    }
    if value_start < chars.len() && matches!(chars[value_start], '=' | ':') {
        value_start += 1;
        while value_start < chars.len() && is_separator_space(chars[value_start]) {
            value_start += 1;
        }
    }

    (unescape(&chars[..key_end]), unescape(&chars[value_start..]))
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut iter = chars.iter().copied();
    while let Some(c) = iter.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match iter.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = iter.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
