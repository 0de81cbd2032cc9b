//! Caller locale for user-facing messages and labels.

use std::fmt;
use std::str::FromStr;

/// Language used for validation messages and category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// Available locale codes.
    pub const CODES: &[&str] = &["en", "ar"];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            other => Err(format!(
                "unknown locale \"{other}\", available: {}",
                Self::CODES.join(", ")
            )),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rounds to a whole number and inserts `,` between thousands groups.
///
/// ```
/// use bill_calc::bill::locale::group_thousands;
///
/// assert_eq!(group_thousands(740000.0), "740,000");
/// assert_eq!(group_thousands(1699.6), "1,700");
/// ```
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
