use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::model::{CriterionSet, Dataset};
use crate::scoring::{Agreement, ConsistencyRow, RankResult, RankingReport, Recommendation};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with a fixed number of decimals
pub fn format_score(score: f64, precision: usize) -> String {
    format!("{:.*}", precision, score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format one ranked list, one line per location: index, score, name.
pub fn format_ranking(results: &[RankResult], precision: usize, use_colors: bool) -> String {
    if results.is_empty() {
        return "No locations ranked.".to_string();
    }

    let score_width = precision + 2;
    let fixed_width = 4 + score_width + 2;
    let name_width = get_terminal_width()
        .map(|w| if w > fixed_width + 10 { w - fixed_width } else { 20 });

    results
        .iter()
        .map(|r| {
            let index_str = format!("{:>2}.", r.rank);
            let score_str = format!("{:>width$}", format_score(r.score, precision), width = score_width);
            let name = match name_width {
                Some(width) => truncate_name(&r.location_name, width),
                None => r.location_name.clone(),
            };

            if use_colors && r.rank == 1 {
                format!("{} {}  {}", index_str.dimmed(), score_str.bold(), name.green().bold())
            } else if use_colors {
                format!("{} {}  {}", index_str.dimmed(), score_str.bold(), name)
            } else {
                format!("{} {}  {}", index_str, score_str, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn rank_label(rank: usize) -> String {
    if rank == 0 {
        "-".to_string()
    } else {
        format!("#{}", rank)
    }
}

/// Format the SAW/WP side-by-side table with a header row.
pub fn format_comparison(rows: &[ConsistencyRow], precision: usize, use_colors: bool) -> String {
    if rows.is_empty() {
        return "No locations to compare.".to_string();
    }

    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Location".len());
    let score_width = (precision + 2).max(9);

    let header = format!(
        "{:<nw$}  {:>4}  {:>sw$}  {:>4}  {:>sw$}  {}",
        "Location",
        "SAW",
        "SAW score",
        "WP",
        "WP score",
        "Status",
        nw = name_width,
        sw = score_width
    );

    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for row in rows {
        let status = if row.consistent { "consistent" } else { "differs" };
        let status = if !use_colors {
            status.to_string()
        } else if row.consistent {
            status.green().to_string()
        } else {
            status.red().to_string()
        };
        lines.push(format!(
            "{:<nw$}  {:>4}  {:>sw$}  {:>4}  {:>sw$}  {}",
            row.name,
            rank_label(row.saw_rank),
            format_score(row.saw_score, precision),
            rank_label(row.wp_rank),
            format_score(row.wp_score, precision),
            status,
            nw = name_width,
            sw = score_width
        ));
    }

    lines.join("\n")
}

/// Format the recommendation block: headline, narrative, strengths, considerations.
pub fn format_recommendation(rec: &Recommendation, precision: usize, use_colors: bool) -> String {
    let headline = format!(
        "Best location: {} (SAW {})",
        rec.location_name,
        format_score(rec.saw_score, precision)
    );
    let headline = match (use_colors, rec.agreement) {
        (false, _) => headline,
        (true, Agreement::HighConsistency) => headline.green().bold().to_string(),
        (true, Agreement::PartialAgreement) => headline.yellow().bold().to_string(),
    };

    let mut lines = vec![headline, rec.narrative(), String::new(), "Strengths:".to_string()];
    lines.extend(rec.strengths.iter().map(|s| format!("  - {}", s)));
    lines.push("Considerations:".to_string());
    lines.extend(rec.considerations.iter().map(|s| format!("  - {}", s)));
    lines.join("\n")
}

fn section(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.bold().underline().to_string()
    } else {
        title.to_string()
    }
}

/// Format a whole ranking report for the terminal.
pub fn format_report(report: &RankingReport, precision: usize, use_colors: bool) -> String {
    if report.is_empty() {
        return "Nothing to rank: add at least one criterion and one location.".to_string();
    }

    let mut parts = vec![
        section("SAW (Simple Additive Weighting)", use_colors),
        format_ranking(&report.saw, precision, use_colors),
        String::new(),
        section("WP (Weighted Product)", use_colors),
        format_ranking(&report.wp, precision, use_colors),
        String::new(),
        section("Comparison", use_colors),
        format_comparison(&report.comparison, precision, use_colors),
    ];

    if let Some(ref rec) = report.recommendation {
        parts.push(String::new());
        parts.push(section("Recommendation", use_colors));
        parts.push(format_recommendation(rec, precision, use_colors));
    }

    if !report.warnings.is_empty() {
        parts.push(String::new());
        for warning in &report.warnings {
            let line = format!("warning: {}", warning);
            parts.push(if use_colors { line.yellow().to_string() } else { line });
        }
    }

    parts.join("\n")
}

/// Format rankings as tab-separated values for scripting
/// Columns: method, rank, location id, name, score (no headers, no colors)
pub fn format_tsv(report: &RankingReport) -> String {
    let rows = |method: &'static str, results: &[RankResult]| -> Vec<String> {
        results
            .iter()
            .map(|r| {
                format!(
                    "{}\t{}\t{}\t{}\t{}",
                    method, r.rank, r.location_id, r.location_name, r.score
                )
            })
            .collect()
    };

    let mut lines = rows("saw", &report.saw);
    lines.extend(rows("wp", &report.wp));
    lines.join("\n")
}

/// List criteria with weight, polarity and the weight total.
pub fn format_criteria(criteria: &CriterionSet, use_colors: bool) -> String {
    if criteria.is_empty() {
        return "No criteria defined.".to_string();
    }

    let id_width = criteria.iter().map(|c| c.id.chars().count()).max().unwrap_or(0);
    let mut lines: Vec<String> = criteria
        .iter()
        .map(|c| {
            let id = format!("{:<width$}", c.id, width = id_width);
            let id = if use_colors { id.cyan().to_string() } else { id };
            format!("{}  {:>5.3}  {:<7}  {}", id, c.weight, c.polarity.to_string(), c.name)
        })
        .collect();
    lines.push(format!("Total weight: {:.3}", criteria.total_weight()));
    lines.join("\n")
}

/// List locations with their raw scores in criterion order.
pub fn format_locations(dataset: &Dataset, use_colors: bool) -> String {
    if dataset.locations().is_empty() {
        return "No locations defined.".to_string();
    }

    dataset
        .locations()
        .iter()
        .map(|l| {
            let title = format!("{}. {}", l.id, l.name);
            let title = if use_colors { title.bold().to_string() } else { title };
            let mut lines = vec![title];
            if let Some(ref address) = l.address {
                lines.push(format!("  Address: {}", address));
            }
            lines.push(format!(
                "  Coordinates: {}, {}",
                l.coordinates.lat, l.coordinates.lng
            ));
            for c in dataset.criteria().iter() {
                lines.push(format!("  {}: {}", c.name, l.score(&c.id)));
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rank;

    fn sample_report() -> RankingReport {
        let dataset = Dataset::sample();
        rank(dataset.criteria(), dataset.locations()).unwrap()
    }

    #[test]
    fn test_format_score_precision() {
        assert_eq!(format_score(0.123456, 4), "0.1235");
        assert_eq!(format_score(1.0, 2), "1.00");
        assert_eq!(format_score(2.4, 0), "2");
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Bandung", 20), "Bandung");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("Jakarta Pusat Selatan", 10), "Jakarta...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Surabaya", 3), "Sur");
    }

    #[test]
    fn test_format_ranking_empty() {
        assert_eq!(format_ranking(&[], 4, false), "No locations ranked.");
    }

    #[test]
    fn test_format_ranking_lines() {
        let report = sample_report();
        let output = format_ranking(&report.saw, 4, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("Jakarta Pusat"));
        assert!(lines[2].starts_with(" 3."));
    }

    #[test]
    fn test_format_comparison_has_header_and_rows() {
        let report = sample_report();
        let output = format_comparison(&report.comparison, 4, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Location"));
        assert!(lines[1].starts_with("Jakarta Pusat"));
        assert!(lines[1].contains("#1"));
        assert!(lines[1].ends_with("consistent"));
    }

    #[test]
    fn test_format_comparison_absent_rank() {
        let rows = vec![ConsistencyRow {
            location_id: 1,
            name: "A".to_string(),
            saw_rank: 0,
            saw_score: 0.0,
            wp_rank: 1,
            wp_score: 1.0,
            consistent: false,
        }];
        let output = format_comparison(&rows, 2, false);
        assert!(output.lines().nth(1).unwrap().contains("   -"));
        assert!(output.ends_with("differs"));
    }

    #[test]
    fn test_format_recommendation() {
        let report = sample_report();
        let rec = report.recommendation.as_ref().unwrap();
        let output = format_recommendation(rec, 4, false);
        assert!(output.starts_with("Best location: Jakarta Pusat"));
        assert!(output.contains("high consistency"));
        assert!(output.contains("  - Validate with a field survey"));
    }

    #[test]
    fn test_format_report_empty() {
        let report = rank(&CriterionSet::default(), Dataset::sample().locations()).unwrap();
        assert!(format_report(&report, 4, false).starts_with("Nothing to rank"));
    }

    #[test]
    fn test_format_report_sections() {
        let output = format_report(&sample_report(), 3, false);
        assert!(output.contains("SAW (Simple Additive Weighting)"));
        assert!(output.contains("WP (Weighted Product)"));
        assert!(output.contains("Comparison"));
        assert!(output.contains("Recommendation"));
        assert!(!output.contains("warning:"));
    }

    #[test]
    fn test_format_tsv() {
        let output = format_tsv(&sample_report());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("saw\t1\t1\tJakarta Pusat\t"));
        assert!(lines[3].starts_with("wp\t1\t1\tJakarta Pusat\t"));
        assert_eq!(lines[0].split('\t').count(), 5);
    }

    #[test]
    fn test_format_criteria() {
        let dataset = Dataset::sample();
        let output = format_criteria(dataset.criteria(), false);
        assert!(output.contains("rentCost"));
        assert!(output.contains("cost"));
        assert!(output.ends_with("Total weight: 1.000"));
    }

    #[test]
    fn test_format_locations() {
        let output = format_locations(&Dataset::sample(), false);
        assert!(output.starts_with("1. Jakarta Pusat"));
        assert!(output.contains("  Rent Cost: 40"));
        assert!(output.contains("Coordinates: -6.1944, 106.8229"));
    }
}
