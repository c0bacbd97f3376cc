pub mod formatter;

pub use formatter::{
    format_comparison, format_criteria, format_locations, format_ranking, format_recommendation,
    format_report, format_score, format_tsv, should_use_colors,
};
