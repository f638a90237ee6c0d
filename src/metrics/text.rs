//! Shared text heuristics over README and model-card content.

use regex::Regex;

/// Compile a static pattern.
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

/// True if any needle occurs in the (already lowercased) haystack.
#[must_use]
pub fn contains_any(haystack_lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack_lower.contains(n))
}

/// Number of distinct needles occurring in the haystack.
#[must_use]
pub fn count_present(haystack_lower: &str, needles: &[&str]) -> usize {
    needles
        .iter()
        .filter(|n| haystack_lower.contains(**n))
        .count()
}

/// Normalize a license token for comparison: lowercase with `-`, `_` and
/// spaces stripped.
#[must_use]
pub fn normalize_license_token(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect()
}

/// Extract a license statement from README text.
///
/// Probes a "License" section header, a `License:` line and a bold
/// `**License**` marker, in that order. Markdown links are reduced to their
/// text and the extracted statement is capped at 200 characters.
#[must_use]
pub fn license_from_readme(readme: &str) -> Option<String> {
    let patterns = [
        r"(?is)#{1,4}\s*licen[cs]e\s*\n\s*(.+?)(?:\n#|\n\n|$)",
        r"(?i)licen[cs]e:\s*([^\n]+)",
        r"(?i)\*\*licen[cs]e\*\*:?\s*([^\n]+)",
    ];

    for pattern in patterns {
        if let Some(captures) = regex(pattern).captures(readme) {
            let raw = captures.get(1).map_or("", |m| m.as_str()).trim();
            if raw.is_empty() {
                continue;
            }
            let without_links = regex(r"\[([^\]]+)\]\([^)]*\)").replace_all(raw, "$1");
            let mut text = without_links.trim().to_string();
            if text.len() > 200 {
                text.truncate(200);
            }
            return Some(text);
        }
    }

    None
}

/// Extract a model size estimate in gigabytes from free text.
///
/// Probes, in priority order: explicit byte units (TB/GB/MB), parameter
/// counts in billions (≈2 GB per B-param), then millions (≈0.002 GB per
/// M-param).
#[must_use]
pub fn estimate_size_gb(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();

    if let Some(captures) = regex(r"(\d+(?:\.\d+)?)\s*(tb|gb|mb)\b").captures(&lower) {
        let value: f64 = captures.get(1)?.as_str().parse().ok()?;
        return Some(match captures.get(2)?.as_str() {
            "tb" => value * 1024.0,
            "mb" => value / 1024.0,
            _ => value,
        });
    }

    if let Some(captures) = regex(r"(\d+(?:\.\d+)?)\s*(?:b\b|billion)").captures(&lower) {
        let value: f64 = captures.get(1)?.as_str().parse().ok()?;
        return Some(value * 2.0);
    }

    if let Some(captures) = regex(r"(\d+(?:\.\d+)?)\s*(?:m\b|million)").captures(&lower) {
        let value: f64 = captures.get(1)?.as_str().parse().ok()?;
        return Some(value * 0.002);
    }

    None
}

/// True if the text contains a markdown results table.
#[must_use]
pub fn has_results_table(text: &str) -> bool {
    regex(r"\|\s*:?-{2,}").is_match(text)
}

/// True if the text contains numeric result figures (percentages or
/// `metric: value` pairs).
#[must_use]
pub fn has_numeric_results(text: &str) -> bool {
    regex(r"\d+(?:\.\d+)?\s*%|(?:accuracy|f1|score|bleu|rouge)[:\s=]+\d").is_match(text)
}

/// True if the text references a paper or citation.
#[must_use]
pub fn has_citation(text: &str) -> bool {
    regex(r"arxiv|doi:\s*10\.|@article|@inproceedings|\bcitation\b|\bpaper\b").is_match(text)
}
