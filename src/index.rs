//! Master index page linking every generated artifact, grouped by category.

use std::fmt::Write as _;

use crate::catalog::FormulaSpec;
use crate::util::{href_encode, html_escape};

const UNCATEGORIZED: &str = "Uncategorized";

/// Generation state of one formula as shown on the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus<'a> {
    Generated,
    Failed(&'a str),
}

#[derive(Debug, Clone, Copy)]
pub struct IndexEntry<'a> {
    pub formula: &'a FormulaSpec,
    pub status: EntryStatus<'a>,
}

/// Relative link from the output root to a formula's artifact.
pub fn artifact_href(formula: &FormulaSpec, artifact_ext: &str) -> String {
    href_encode(&format!("{}/visualization.{artifact_ext}", formula.slug()))
}

/// Render the index, grouped by each formula's first category tag.
/// Categories keep the order of their first formula.
pub fn render_index(entries: &[IndexEntry<'_>], artifact_ext: &str) -> String {
    let mut groups: Vec<(&str, Vec<&IndexEntry<'_>>)> = Vec::new();
    for entry in entries {
        let category = entry.formula.primary_category().unwrap_or(UNCATEGORIZED);
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, members)) => members.push(entry),
            None => groups.push((category, vec![entry])),
        }
    }

    let failed = entries
        .iter()
        .filter(|e| matches!(e.status, EntryStatus::Failed(_)))
        .count();

    let mut body = String::with_capacity(4096);
    let _ = writeln!(
        body,
        "<p class=\"summary\">{} formulas · {} generated · {} failed</p>",
        entries.len(),
        entries.len() - failed,
        failed
    );
    for (category, members) in &groups {
        let _ = writeln!(body, "<section class=\"category\">\n<h2>{}</h2>\n<div class=\"grid\">", html_escape(category));
        for entry in members {
            body.push_str(&card(entry, artifact_ext));
        }
        body.push_str("</div>\n</section>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Formula Visualizations</title>
<style>
{INDEX_CSS}
</style>
</head>
<body>
<header>
<h1>Formula Visualizations</h1>
<p>Interactive 3D scenes, one per formula. Open a card to explore it.</p>
</header>
<main>
{body}</main>
</body>
</html>
"#
    )
}

fn card(entry: &IndexEntry<'_>, artifact_ext: &str) -> String {
    let f = entry.formula;
    let heading = format!(
        "<span class=\"icon\">{}</span> <span class=\"id\">{}</span> {}",
        html_escape(&f.icon),
        html_escape(&f.id),
        html_escape(&f.name)
    );
    let formula = html_escape(&f.formula_unicode);
    match entry.status {
        EntryStatus::Generated => format!(
            "<a class=\"card\" href=\"{}\">\n  <h3>{heading}</h3>\n  <code>{formula}</code>\n  <p>{}</p>\n</a>\n",
            artifact_href(f, artifact_ext),
            html_escape(&f.description)
        ),
        EntryStatus::Failed(reason) => format!(
            "<div class=\"card failed\">\n  <h3>{heading}</h3>\n  <code>{formula}</code>\n  <p class=\"error\">generation failed: {}</p>\n</div>\n",
            html_escape(reason)
        ),
    }
}

const INDEX_CSS: &str = r#"* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; background: #0a0a12; color: #e0e0f0; }
header { padding: 40px 24px 16px; text-align: center; }
h1 { margin: 0 0 8px; background: linear-gradient(90deg, #667eea, #764ba2); -webkit-background-clip: text; color: transparent; }
main { max-width: 1200px; margin: 0 auto; padding: 0 24px 48px; }
.summary { color: #8888aa; text-align: center; }
.category h2 { border-bottom: 1px solid #2a2a44; padding-bottom: 6px; color: #a8b4ff; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 16px; }
.card { display: block; padding: 16px; border-radius: 10px; background: #14142a; border: 1px solid #2a2a44; color: inherit; text-decoration: none; transition: transform 0.15s, border-color 0.15s; }
a.card:hover { transform: translateY(-3px); border-color: #667eea; }
.card h3 { margin: 0 0 8px; font-size: 1.05em; }
.card .id { color: #8888aa; font-family: monospace; }
.card code { display: block; margin-bottom: 8px; color: #ffd166; white-space: pre-wrap; }
.card p { margin: 0; font-size: 0.9em; color: #b0b0c8; }
.card.failed { border-color: #ef476f; opacity: 0.8; }
.card .error { color: #ef476f; }"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": "01", "name": "Alpha Wave", "category": "Waves"},
                {"id": "02", "name": "Beta", "category": "Fields"},
                {"id": "03", "name": "Gamma", "category": "Waves"},
                {"id": "04", "name": "Delta"}
            ]"#,
        )
        .unwrap()
    }

    fn generated(catalog: &Catalog) -> Vec<IndexEntry<'_>> {
        catalog
            .list_formulas()
            .iter()
            .map(|formula| IndexEntry {
                formula,
                status: EntryStatus::Generated,
            })
            .collect()
    }

    #[test]
    fn groups_by_category_in_first_seen_order() {
        let catalog = catalog();
        let html = render_index(&generated(&catalog), "html");
        let waves = html.find("<h2>Waves</h2>").unwrap();
        let fields = html.find("<h2>Fields</h2>").unwrap();
        let other = html.find("<h2>Uncategorized</h2>").unwrap();
        assert!(waves < fields && fields < other);
        // Gamma sits in the Waves section, before Fields.
        assert!(html.find("Gamma").unwrap() < fields);
    }

    #[test]
    fn tag_list_groups_under_first_tag() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "01", "name": "A", "category": ["Fields", "Waves"]},
                {"id": "02", "name": "B", "category": "Fields"}
            ]"#,
        )
        .unwrap();
        let html = render_index(&generated(&catalog), "html");
        assert_eq!(html.matches("<h2>Fields</h2>").count(), 1);
        assert!(!html.contains("<h2>Waves</h2>"));
        assert!(html.contains("01-A/visualization.html"));
    }

    #[test]
    fn links_are_url_encoded() {
        let catalog = catalog();
        let html = render_index(&generated(&catalog), "html");
        assert!(html.contains(r#"href="01-Alpha%20Wave/visualization.html""#));
        assert!(html.contains("4 formulas · 4 generated · 0 failed"));
    }

    #[test]
    fn failed_entries_show_reason_without_link() {
        let catalog = catalog();
        let mut entries = generated(&catalog);
        entries[1].status = EntryStatus::Failed("disk <full>");
        let html = render_index(&entries, "html");
        assert!(!html.contains("02-Beta/visualization.html"));
        assert!(html.contains("generation failed: disk &lt;full&gt;"));
        assert!(html.contains("4 formulas · 3 generated · 1 failed"));
    }
}
