//! Console preview of extracted profiles, as a GitHub-style table.

use crate::cli::ShowMode;
use profiledrill_camtools::holes_flat;
use profiledrill_core::ProfileRecord;

const BASE_HEADERS: [&str; 5] = ["profile_name", "profile_type", "orientation", "length_mm", "qty"];

/// Renders at most `max_rows` profiles. A trailing note tells how many were
/// left out.
pub fn render_preview(
    profiles: &[ProfileRecord],
    show: ShowMode,
    max_rows: usize,
) -> anyhow::Result<String> {
    let mut headers: Vec<String> = BASE_HEADERS.iter().map(|h| h.to_string()).collect();
    match show {
        ShowMode::Flat => headers.push("holes_flat".to_string()),
        ShowMode::Json => headers.push("holes_json".to_string()),
        ShowMode::None => {}
    }

    let mut rows = Vec::new();
    for p in profiles.iter().take(max_rows) {
        let mut row = vec![
            p.name.clone(),
            p.cross_section_type.clone().unwrap_or_default(),
            p.orientation.clone().unwrap_or_default(),
            format!("{}", p.length_mm),
            p.qty.to_string(),
        ];
        match show {
            ShowMode::Flat => row.push(holes_flat(p)),
            ShowMode::Json => row.push(serde_json::to_string(&p.holes_by_face)?),
            ShowMode::None => {}
        }
        rows.push(row);
    }

    let mut out = github_table(&headers, &rows);
    if profiles.len() > rows.len() {
        out.push_str(&format!(
            "... ({} rows not shown; use --max-rows)\n",
            profiles.len() - rows.len()
        ));
    }
    Ok(out)
}

fn github_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    let mut out = line(headers);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("|-{}-|\n", rule.join("-|-")));
    for row in rows {
        out.push_str(&line(row));
    }
    out
}
