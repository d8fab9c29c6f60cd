use regex::{NoExpand, Regex};
use serde::Serialize;

use crate::extractor::RawJobRecord;

pub const DEFAULT_SALARY: &str = "$350-$500/week";
pub const DEFAULT_DESCRIPTION: &str =
    "We accept beginners with full training provided. No experience required.";

/// Ordered rewrite rules. Later rules see the output of earlier ones.
pub const DESCRIPTION_RULES: &[(&str, &str)] = &[
    (r"\d+\+? years? experience", "No experience required"),
    (r"experienced", "beginner-friendly"),
    (r"senior", "junior"),
    (r"degree required", "high school diploma accepted"),
];

/// Final, normalized unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub salary: String,
    pub description: String,
}

pub struct Normalizer {
    digits: Regex,
    digit_char: Regex,
    rules: Vec<(Regex, &'static str)>,
}

impl Normalizer {
    pub fn new() -> Self {
        let compile = |pattern: &str| {
            Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", pattern, e))
        };
        Normalizer {
            digits: compile(r"\d+"),
            digit_char: compile(r"^\d$"),
            rules: DESCRIPTION_RULES
                .iter()
                .map(|(pattern, replacement)| (compile(&format!("(?i){}", pattern)), *replacement))
                .collect(),
        }
    }

    pub fn normalize(&self, raw: RawJobRecord) -> JobRecord {
        JobRecord {
            salary: self.adjust_salary(&raw.raw_salary),
            description: self.rewrite_description(&raw.raw_description),
            title: raw.title,
            company: raw.company,
        }
    }

    /// Scales every digit run to 70% and labels the result weekly. The source
    /// period is not parsed, so "$60000/year" also comes out as "/week".
    /// Any Unicode decimal digit counts, so full-width "５００" scales to 350.
    pub fn adjust_salary(&self, salary: &str) -> String {
        if salary.is_empty() {
            return DEFAULT_SALARY.to_string();
        }
        let scaled: Vec<String> = self
            .digits
            .find_iter(salary)
            .map(|m| {
                let digits: Vec<u32> = m.as_str().chars().map(|c| self.digit_value(c)).collect();
                scale_seven_tenths(&digits)
            })
            .collect();
        if scaled.is_empty() {
            return salary.to_string();
        }
        format!("${}/week", scaled.join("-"))
    }

    /// Decimal value of a `\d` character. Unicode lays decimal digits out in
    /// contiguous runs of ten starting at zero, so the offset from the start
    /// of the run gives the value.
    fn digit_value(&self, c: char) -> u32 {
        if let Some(d) = c.to_digit(10) {
            return d;
        }
        let mut buf = [0u8; 4];
        let mut start = c as u32;
        while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
            if !self.digit_char.is_match(prev.encode_utf8(&mut buf)) {
                break;
            }
            start -= 1;
        }
        (c as u32 - start) % 10
    }

    pub fn rewrite_description(&self, description: &str) -> String {
        if description.is_empty() {
            return DEFAULT_DESCRIPTION.to_string();
        }
        self.rules
            .iter()
            .fold(description.to_string(), |text, (pattern, replacement)| {
                pattern.replace_all(&text, NoExpand(*replacement)).into_owned()
            })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// floor(n * 0.7) for a big-endian digit sequence of any length: multiply
/// by 7, then drop the last digit.
fn scale_seven_tenths(digits: &[u32]) -> String {
    let mut product: Vec<u8> = Vec::with_capacity(digits.len() + 1);
    let mut carry = 0u32;
    for &d in digits.iter().rev() {
        let v = d * 7 + carry;
        product.push((v % 10) as u8);
        carry = v / 10;
    }
    while carry > 0 {
        product.push((carry % 10) as u8);
        carry /= 10;
    }
    // product is little-endian; dropping index 0 divides by ten.
    let rendered: String = product
        .iter()
        .skip(1)
        .rev()
        .skip_while(|&&d| d == 0)
        .map(|&d| char::from(b'0' + d))
        .collect();
    if rendered.is_empty() {
        "0".to_string()
    } else {
        rendered
    }
}
