//! Markdown output formatting.

use serde_json::Value;

use crate::models::{ComparisonView, PageView};
use crate::review::VerdictStats;

/// Format one comparison as Markdown, Neotoma and OpenAlex side by side.
#[must_use]
pub fn format_comparison_markdown(view: &ComparisonView) -> String {
    let mut output = format!("## Publication {}\n\n", view.publication_id);

    if view.doi.is_empty() {
        output.push_str("**DOI**: (none)\n\n");
    } else {
        output.push_str(&format!("**DOI**: [{0}](https://doi.org/{0})\n\n", view.doi));
    }

    output.push_str("| | Neotoma | OpenAlex |\n|---|---|---|\n");
    output.push_str(&format!(
        "| **Title** | {} | {} |\n",
        cell(&view.neotoma_title),
        cell(&view.openalex_title)
    ));

    let rows = view.neotoma_authors.len().max(view.openalex_authors.len());
    for i in 0..rows {
        let neotoma = view.neotoma_authors.get(i).map(String::as_str).unwrap_or("");
        let openalex = view.openalex_authors.get(i).map(author_name).unwrap_or_default();
        output.push_str(&format!("| {} | {} | {} |\n", i + 1, cell(neotoma), cell(&openalex)));
    }

    if view.openalex_missing() {
        output.push_str("\n_OpenAlex has no record for this DOI._\n");
    }

    output
}

/// Format a page view, including navigation targets and notices.
#[must_use]
pub fn format_page_markdown(view: &PageView) -> String {
    let mut output = match &view.publication {
        Some(publication) => format!(
            "# Page {}\n\n{}",
            view.current_page,
            format_comparison_markdown(publication)
        ),
        None => "# Nothing to review\n".to_string(),
    };

    let mut nav = Vec::new();
    if let Some(prev) = view.prev_page {
        nav.push(format!("**Previous**: {prev}"));
    }
    if let Some(next) = view.next_page {
        nav.push(format!("**Next**: {next}"));
    }
    if !nav.is_empty() {
        output.push_str(&format!("\n{}\n", nav.join(" | ")));
    }

    for notice in &view.notices {
        output.push_str(&format!("\n> {notice}\n"));
    }

    output
}

/// Format verdict counts.
#[must_use]
pub fn format_stats_markdown(stats: &VerdictStats) -> String {
    format!(
        "# Verdicts\n\n- **Verified**: {}\n- **Problematic**: {}\n",
        stats.verified, stats.problematic
    )
}

fn author_name(author: &Value) -> String {
    author
        .get("display_name")
        .and_then(Value::as_str)
        .map_or_else(|| author.to_string(), str::to_owned)
}

/// Escape pipes so a value stays inside its table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
