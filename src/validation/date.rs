use crate::models::{DateParts, MatchResult, ReconcileConfig};
use crate::processing::{digits_only, similarity};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

// Partial credit per component, in hundredths.
const DAY_CREDIT: u32 = 34;
const MONTH_CREDIT: u32 = 33;
const YEAR_CREDIT: u32 = 33;
const STRONG_MATCH: u32 = 66;
const WEAK_MATCH: u32 = 34;
const STRONG_BONUS: f64 = 0.2;
const YEAR_ONLY_CONFIDENCE: f64 = 0.85;

const MONTHS: [(&str, u32); 13] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("sept", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Date layouts understood by [`parse_date`], listed in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// Eight digits with no separators: YYYYMMDD, else DDMMYYYY.
    Compact,
    SeparatedYmd,
    SeparatedDmy,
    /// "14 Jul 1995", "14-JUL-1995"
    MonthNameDayFirst,
    /// "July 14, 1995"
    MonthNameFirst,
    /// Two-digit year, read as 20YY.
    ShortYear,
    BareYear,
}

lazy_static! {
    static ref PARSE_RULES: Vec<(DateRule, Regex)> = vec![
        (DateRule::Compact, Regex::new(r"^([0-9]{8})$").unwrap()),
        (
            DateRule::SeparatedYmd,
            Regex::new(r"\b([0-9]{4})[-/.\s]+([0-9]{1,2})[-/.\s]+([0-9]{1,2})\b").unwrap(),
        ),
        (
            DateRule::SeparatedDmy,
            Regex::new(r"\b([0-9]{1,2})[-/.\s]+([0-9]{1,2})[-/.\s]+([0-9]{4})\b").unwrap(),
        ),
        (
            DateRule::MonthNameDayFirst,
            Regex::new(r"(?i)\b([0-9]{1,2})[-/.,\s]*([a-z]{3,9})\.?[-/.,\s]*([0-9]{4})\b").unwrap(),
        ),
        (
            DateRule::MonthNameFirst,
            Regex::new(r"(?i)\b([a-z]{3,9})\.?[-/.\s]*([0-9]{1,2})(?:st|nd|rd|th)?,?[-/.\s]*([0-9]{4})\b").unwrap(),
        ),
        (
            DateRule::ShortYear,
            Regex::new(r"\b([0-9]{1,2})[-/.\s]([0-9]{1,2})[-/.\s]([0-9]{2})\b").unwrap(),
        ),
        (DateRule::BareYear, Regex::new(r"\b([0-9]{4})\b").unwrap()),
    ];

    // Places in OCR text where a date may appear. The label patterns capture
    // only the date part in group 1.
    static ref SCAN_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\b[0-9]{1,2}[/.-][0-9]{1,2}[/.-][0-9]{4}\b").unwrap(),
        Regex::new(r"\b[0-9]{4}[/.-][0-9]{1,2}[/.-][0-9]{1,2}\b").unwrap(),
        Regex::new(r"(?i)\b[0-9]{1,2}[-/.\s]*(?:jan|feb|mar|apr|may|jun|jul|aug|sept?|oct|nov|dec)[a-z]*\.?[-/.,\s]*[0-9]{4}\b").unwrap(),
        Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sept?|oct|nov|dec)[a-z]*\.?\s+[0-9]{1,2}(?:st|nd|rd|th)?,?\s+[0-9]{4}\b").unwrap(),
        Regex::new(r"(?i)(?:date\s*of\s*birth|\bd\.?o\.?b\b\.?|birth\s*date|जन्म\s*तिथि)\s*[:/-]?\s*([0-9]{1,2}[/.-][0-9]{1,2}[/.-][0-9]{4})").unwrap(),
        Regex::new(r"(?i)(?:year\s*of\s*birth|\by\.?o\.?b\b\.?|जन्म\s*वर्ष)\s*[:/-]?\s*([0-9]{4})").unwrap(),
    ];
}

/// Resolve a month word ("Jul", "SEPT", "september") to its number.
pub fn month_from_name(word: &str) -> Option<u32> {
    let word = word.to_lowercase();
    if word.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .rev()
        .find(|(abbr, _)| word.starts_with(abbr))
        .map(|&(_, month)| month)
}

/// Parse free-form date text, returning the first rule that yields any component.
pub fn parse_date_with_rule(text: &str) -> Option<(DateRule, DateParts)> {
    let text = text.trim();
    for (rule, pattern) in PARSE_RULES.iter() {
        let caps = match pattern.captures(text) {
            Some(caps) => caps,
            None => continue,
        };
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let year = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i32>().ok());

        let parts = match rule {
            DateRule::Compact => parse_compact(&caps[1]),
            DateRule::SeparatedYmd => DateParts::new(num(3), num(2), year(1)),
            DateRule::SeparatedDmy => DateParts::new(num(1), num(2), year(3)),
            DateRule::MonthNameDayFirst => match month_from_name(&caps[2]) {
                Some(month) => DateParts::new(num(1), Some(month), year(3)),
                None => continue,
            },
            DateRule::MonthNameFirst => match month_from_name(&caps[1]) {
                Some(month) => DateParts::new(num(2), Some(month), year(3)),
                None => continue,
            },
            DateRule::ShortYear => DateParts::new(num(1), num(2), year(3).map(|y| 2000 + y)),
            DateRule::BareYear => match year(1) {
                Some(y) => DateParts::year_only(y),
                None => continue,
            },
        };

        if !parts.is_empty() {
            return Some((*rule, parts));
        }
    }
    None
}

/// Parse free-form date text into components; unknown components stay `None`.
pub fn parse_date(text: &str) -> DateParts {
    parse_date_with_rule(text)
        .map(|(_, parts)| parts)
        .unwrap_or_default()
}

fn parse_compact(digits: &str) -> DateParts {
    let field = |range: std::ops::Range<usize>| digits[range].parse::<u32>().ok();
    let as_ymd = DateParts::new(field(6..8), field(4..6), field(0..4).map(|y| y as i32));
    let plausible_year = as_ymd.year.map_or(false, |y| (1900..=2099).contains(&y));
    if plausible_year && as_ymd.month.is_some() && as_ymd.day.is_some() {
        as_ymd
    } else {
        DateParts::new(field(0..2), field(2..4), field(4..8).map(|y| y as i32))
    }
}

pub struct DateMatcher;

impl DateMatcher {
    /// Find the declared date of birth among the dates in the OCR text.
    pub fn check(declared: &str, ocr_text: &str, config: &ReconcileConfig) -> MatchResult {
        let wanted = parse_date(declared);
        let wanted_digits = digits_only(declared);
        debug!("Declared date '{}' parsed as {:?}", declared, wanted);

        let mut best = MatchResult::not_found();
        for pattern in SCAN_PATTERNS.iter() {
            for caps in pattern.captures_iter(ocr_text) {
                let matched = match caps.get(1).or_else(|| caps.get(0)) {
                    Some(m) => m.as_str().trim(),
                    None => continue,
                };
                let candidate = parse_date(matched);
                let result = Self::score(&wanted, &wanted_digits, &candidate, matched, config);
                debug!("Date candidate '{}' -> {:?}", matched, result);
                best = best.better_of(result);
            }
        }
        best
    }

    fn score(
        wanted: &DateParts,
        wanted_digits: &str,
        candidate: &DateParts,
        matched: &str,
        config: &ReconcileConfig,
    ) -> MatchResult {
        let extracted = candidate
            .to_naive_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| matched.to_string());

        if wanted.year.is_some()
            && candidate.day.is_none()
            && candidate.month.is_none()
            && candidate.year == wanted.year
        {
            return MatchResult::found(YEAR_ONLY_CONFIDENCE, extracted);
        }

        let mut credit = 0;
        if both_equal(wanted.day, candidate.day) {
            credit += DAY_CREDIT;
        }
        if both_equal(wanted.month, candidate.month) {
            credit += MONTH_CREDIT;
        }
        if both_equal(wanted.year, candidate.year) {
            credit += YEAR_CREDIT;
        }

        if credit >= STRONG_MATCH {
            let confidence = (credit as f64 / 100.0 + STRONG_BONUS).min(1.0);
            return MatchResult::found(confidence, extracted);
        }
        if credit >= WEAK_MATCH {
            return MatchResult::found(credit as f64 / 100.0, extracted);
        }

        let digit_score = similarity(wanted_digits, &digits_only(matched));
        if !wanted_digits.is_empty() && digit_score >= config.date_digit_similarity {
            MatchResult::found(digit_score, extracted)
        } else {
            MatchResult::not_found()
        }
    }
}

fn both_equal<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}
