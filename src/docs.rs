//! Companion Markdown documents written next to each artifact.

use std::fmt::Write as _;

use crate::catalog::{FormulaSpec, ParamKind, ParameterSpec};
use crate::dispatch::{self, Route};

/// `<slug>/README.md`: what the artifact shows and how to drive it.
pub fn readme(formula: &FormulaSpec, artifact_ext: &str) -> String {
    let mut md = String::with_capacity(2048);
    let _ = writeln!(md, "# {} {}", formula.icon, formula.name);
    md.push('\n');
    if !formula.category.is_empty() {
        let _ = writeln!(md, "*Formula {} · {}*\n", formula.id, formula.category.join(", "));
    }
    let _ = writeln!(md, "$$\n{}\n$$\n", formula.formula_latex);
    if !formula.formula_unicode.is_empty() {
        let _ = writeln!(md, "`{}`\n", formula.formula_unicode);
    }
    if !formula.description.is_empty() {
        let _ = writeln!(md, "{}\n", formula.description);
    }

    md.push_str("## Files\n\n");
    let _ = writeln!(
        md,
        "- `visualization.{artifact_ext}`: interactive 3D scene (open in a browser)"
    );
    md.push_str("- `docs/theory.md`: background and concepts\n");
    md.push_str("- `assets/`, `examples/`: reserved for supporting material\n\n");

    md.push_str("## Controls\n\n");
    md.push_str("| Action | Mouse / key |\n|---|---|\n");
    md.push_str("| Orbit | left drag |\n| Zoom | wheel |\n| Pan | right drag |\n");
    md.push_str("| Start / pause | `Space` or ▶ button |\n");
    md.push_str("| Reset time and parameters | `R` or ↺ button |\n");
    md.push_str("| Full screen | `F` or ⛶ button |\n\n");

    md.push_str("## Parameters\n\n");
    md.push_str(&parameter_table(&formula.parameters));

    let d = dispatch::dispatch(formula);
    let scene = d.kind.map(|k| k.tag()).unwrap_or("generic");
    md.push_str("\n## Scene\n\n");
    if d.route == Route::Fallback {
        let _ = writeln!(
            md,
            "No dedicated scene exists for this formula yet; the generic `{scene}` reference scene is shown."
        );
    } else {
        let _ = writeln!(md, "Scene family: `{scene}` (selected by {}).", d.route);
    }
    md
}

/// `<slug>/docs/theory.md`: physical meaning and concept lists.
pub fn theory(formula: &FormulaSpec) -> String {
    let mut md = String::with_capacity(2048);
    let _ = writeln!(md, "# Theory: {}\n", formula.name);
    let _ = writeln!(md, "## Formula\n\n$$\n{}\n$$\n", formula.formula_latex);
    if !formula.formula_unicode.is_empty() {
        let _ = writeln!(md, "Plain form: `{}`\n", formula.formula_unicode);
    }

    md.push_str("## Physical meaning\n\n");
    if formula.description.is_empty() {
        md.push_str("_No description provided._\n\n");
    } else {
        let _ = writeln!(md, "{}\n", formula.description);
    }
    if let Some(insight) = &formula.insight {
        let _ = writeln!(md, "> {insight}\n");
    }

    list_section(&mut md, "Physics concepts", &formula.physics_concepts);
    list_section(&mut md, "Mathematical concepts", &formula.math_concepts);
    list_section(&mut md, "Applications", &formula.applications);

    if let Some(level) = formula.difficulty {
        let level = level.clamp(1, 5) as usize;
        let _ = writeln!(
            md,
            "## Difficulty\n\n{}{} ({level}/5)\n",
            "★".repeat(level),
            "☆".repeat(5 - level)
        );
    }

    md.push_str("## Model parameters\n\n");
    md.push_str(&parameter_table(&formula.parameters));
    md
}

fn list_section(md: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(md, "## {title}\n");
    for item in items {
        let _ = writeln!(md, "- {item}");
    }
    md.push('\n');
}

fn parameter_table(params: &[ParameterSpec]) -> String {
    if params.is_empty() {
        return "This formula has no adjustable parameters.\n".to_string();
    }
    let mut md = String::from("| Name | Label | Type | Default | Range | Unit |\n|---|---|---|---|---|---|\n");
    for p in params {
        let kind = match p.kind {
            ParamKind::Vector3 => "3-vector",
            _ => "scalar",
        };
        let _ = writeln!(
            md,
            "| `{}` | {} | {kind} | {} | {} … {} | {} |",
            p.name,
            p.display_label(),
            p.default,
            p.range[0],
            p.range[1],
            p.unit.as_deref().unwrap_or("")
        );
    }
    md
}
