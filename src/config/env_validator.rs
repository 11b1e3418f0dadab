//! Environment variable validation with helpful warnings
//!
//! An invalid `UPSYNC_*` value never aborts the run: it is reported with a
//! Levenshtein-based suggestion and the lower configuration layer applies.

use std::io::Write;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, returning `None` (with a warning) if invalid
    pub fn parse<T, F, W>(&self, value: &str, parser: F, writer: &mut W) -> Option<T>
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        let parsed = parser(value);
        if parsed.is_none() {
            let _ = writeln!(
                writer,
                "Warning: Invalid {} value '{}'{}",
                self.var_name,
                value,
                self.suggest(value)
            );
            if !self.valid_values.is_empty() {
                let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
            }
        }
        parsed
    }

    fn suggest(&self, value: &str) -> String {
        let input = value.to_lowercase();
        match closest(&input, self.valid_values) {
            Some((suggested, dist)) if dist > 0 => format!(". Did you mean '{}'?", suggested),
            _ => String::new(),
        }
    }
}

pub const BOOL_VALUES: &[&str] = &["true", "false", "1", "0", "yes", "no", "on", "off"];

/// Lenient boolean parsing for environment values
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Port number in 1..=65535
pub fn parse_port(value: &str) -> Option<u16> {
    value.trim().parse::<u16>().ok().filter(|p| *p != 0)
}

/// Closest candidate within two edits
pub fn closest<'c>(input: &str, candidates: &[&'c str]) -> Option<(&'c str, usize)> {
    candidates
        .iter()
        .map(|c| (*c, levenshtein(input, c)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.is_empty() {
        return b_bytes.len();
    }
    if b_bytes.is_empty() {
        return a_bytes.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_bytes.len() + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_bytes.len()]
}
