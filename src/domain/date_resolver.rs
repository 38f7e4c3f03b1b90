// Locale-free resolution of poll date text into timestamps
use super::poll::Timestamp;
use chrono::{DateTime, Datelike, NaiveDate};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// "15-19 Oct 2025"
static SAME_MONTH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s*-\s*(\d{1,2})\s+(\p{L}+)\.?\s+(\d{4})").expect("valid pattern")
});

/// "29 Sep - 6 Oct 2025"
static CROSS_MONTH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s+(\p{L}+)\.?\s*-\s*(\d{1,2})\s+(\p{L}+)\.?\s+(\d{4})")
        .expect("valid pattern")
});

/// "28 Dec 2025 - 2 Jan 2026"
static CROSS_YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s+(\p{L}+)\.?\s+(\d{4})\s*-\s*(\d{1,2})\s+(\p{L}+)\.?\s+(\d{4})")
        .expect("valid pattern")
});

/// "28 Aug 2025"; a trailing dash marks an unrecognised range
static SINGLE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s+(\p{L}+)\.?\s+(\d{4})\s*(-)?").expect("valid pattern")
});

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}+").expect("valid pattern"));

const PT_SHORT_MONTHS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

const PT_FULL_MONTHS: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

/// Month number (1-12) for an English or Portuguese month name, full or abbreviated.
pub fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "jan" | "january" | "janeiro" => 1,
        "feb" | "february" | "fev" | "fevereiro" => 2,
        "mar" | "march" | "março" | "marco" => 3,
        "apr" | "april" | "abr" | "abril" => 4,
        "may" | "mai" | "maio" => 5,
        "jun" | "june" | "junho" => 6,
        "jul" | "july" | "julho" => 7,
        "aug" | "august" | "ago" | "agosto" => 8,
        "sep" | "sept" | "september" | "set" | "setembro" => 9,
        "oct" | "october" | "out" | "outubro" => 10,
        "nov" | "november" | "novembro" => 11,
        "dec" | "december" | "dez" | "dezembro" => 12,
        _ => return None,
    };
    Some(month)
}

/// Resolve a poll's fieldwork date text to UTC midnight of its last day.
///
/// Ranges resolve to their end date. Anything unrecognised, including
/// impossible calendar days, resolves to `None`.
pub fn resolve_date(text: &str) -> Option<Timestamp> {
    let normalized = normalize_dashes(text);

    if let Some(caps) = SAME_MONTH_RANGE.captures(&normalized) {
        return timestamp_from(&caps, 2, 3, 4);
    }
    if let Some(caps) = CROSS_MONTH_RANGE.captures(&normalized) {
        return timestamp_from(&caps, 3, 4, 5);
    }
    if let Some(caps) = CROSS_YEAR_RANGE.captures(&normalized) {
        return timestamp_from(&caps, 4, 5, 6);
    }
    if let Some(caps) = SINGLE_DATE.captures(&normalized) {
        if caps.get(4).is_some() {
            return None;
        }
        return timestamp_from(&caps, 1, 2, 3);
    }
    None
}

fn normalize_dashes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            other => other,
        })
        .collect()
}

fn timestamp_from(caps: &Captures<'_>, day: usize, month: usize, year: usize) -> Option<Timestamp> {
    let day: u32 = caps.get(day)?.as_str().parse().ok()?;
    let month = month_number(caps.get(month)?.as_str())?;
    let year: i32 = caps.get(year)?.as_str().parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Short Portuguese label for a timestamp, e.g. "12 Fev 2026".
pub fn format_day_label(ts: Timestamp) -> String {
    match DateTime::from_timestamp_millis(ts) {
        Some(dt) => format!(
            "{} {} {}",
            dt.day(),
            PT_SHORT_MONTHS[dt.month0() as usize],
            dt.year()
        ),
        None => String::new(),
    }
}

/// Rewrite month names in raw date text to their full Portuguese form.
pub fn portuguese_date_text(text: &str) -> String {
    WORD.replace_all(text, |caps: &Captures<'_>| {
        let word = &caps[0];
        match month_number(word) {
            Some(month) => PT_FULL_MONTHS[(month - 1) as usize].to_string(),
            None => word.to_string(),
        }
    })
    .into_owned()
}
