//! Base artifact template and placeholder substitution.
//!
//! A template is parsed once into literal runs and typed slots. Parsing is
//! where structural problems surface (missing or unknown placeholders), so
//! rendering itself cannot fail and is a pure function of its inputs.

use std::path::Path;

use crate::catalog::FormulaSpec;
use crate::controls::ControlSet;
use crate::error::{Error, Result};
use crate::util::html_escape;

pub mod lexer;

use self::lexer::Piece;

/// The built-in artifact template (Three.js scene, MathJax formula panel).
const BASE_TEMPLATE: &str = include_str!("base.html");

/// Every placeholder the engine knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Title,
    Icon,
    FormulaId,
    FormulaLatex,
    FormulaUnicode,
    Description,
    Insight,
    Category,
    ConceptTags,
    VisualizationType,
    ParameterControls,
    ParameterBindings,
    SceneCode,
    UpdateCode,
}

impl Placeholder {
    pub const ALL: [Placeholder; 14] = [
        Placeholder::Title,
        Placeholder::Icon,
        Placeholder::FormulaId,
        Placeholder::FormulaLatex,
        Placeholder::FormulaUnicode,
        Placeholder::Description,
        Placeholder::Insight,
        Placeholder::Category,
        Placeholder::ConceptTags,
        Placeholder::VisualizationType,
        Placeholder::ParameterControls,
        Placeholder::ParameterBindings,
        Placeholder::SceneCode,
        Placeholder::UpdateCode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Title => "TITLE",
            Placeholder::Icon => "ICON",
            Placeholder::FormulaId => "FORMULA_ID",
            Placeholder::FormulaLatex => "FORMULA_LATEX",
            Placeholder::FormulaUnicode => "FORMULA_UNICODE",
            Placeholder::Description => "DESCRIPTION",
            Placeholder::Insight => "INSIGHT",
            Placeholder::Category => "CATEGORY",
            Placeholder::ConceptTags => "CONCEPT_TAGS",
            Placeholder::VisualizationType => "VISUALIZATION_TYPE",
            Placeholder::ParameterControls => "PARAMETER_CONTROLS",
            Placeholder::ParameterBindings => "PARAMETER_BINDINGS",
            Placeholder::SceneCode => "SCENE_CODE",
            Placeholder::UpdateCode => "UPDATE_CODE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Required slots: without any of these an artifact is not usable.
    pub fn is_required(self) -> bool {
        !matches!(
            self,
            Placeholder::FormulaId
                | Placeholder::Insight
                | Placeholder::Category
                | Placeholder::ConceptTags
                | Placeholder::VisualizationType
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Slot(Placeholder),
}

/// A parsed, structurally checked base template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Fragments produced by the dispatcher and control generator for one formula.
#[derive(Debug, Clone, Copy)]
pub struct Fragments<'a> {
    pub scene_code: &'a str,
    pub update_code: &'a str,
    pub controls: &'a ControlSet,
}

impl Template {
    /// Parse and check a template source.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for piece in lexer::lex(source) {
            match piece {
                Piece::Text(text) => segments.push(Segment::Text(text.to_string())),
                Piece::Placeholder { name, offset } => {
                    let slot = Placeholder::from_name(name).ok_or_else(|| {
                        Error::UnknownPlaceholder {
                            name: name.to_string(),
                            offset,
                        }
                    })?;
                    segments.push(Segment::Slot(slot));
                }
            }
        }

        let template = Self { segments };
        let missing: Vec<String> = Placeholder::ALL
            .into_iter()
            .filter(|p| p.is_required() && !template.uses(*p))
            .map(|p| p.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingPlaceholder { names: missing });
        }
        Ok(template)
    }

    /// The built-in base template.
    pub fn builtin() -> Result<Self> {
        Self::parse(BASE_TEMPLATE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&source)
    }

    pub fn uses(&self, placeholder: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Slot(p) if *p == placeholder))
    }

    /// Fill every slot for one formula.
    ///
    /// Text values are HTML-escaped; code fragments and control markup are
    /// inserted verbatim.
    pub fn render(&self, formula: &FormulaSpec, fragments: Fragments<'_>) -> String {
        let mut out = String::with_capacity(BASE_TEMPLATE.len() + 8 * 1024);
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(&slot_value(*slot, formula, &fragments)),
            }
        }
        out
    }
}

fn slot_value(slot: Placeholder, formula: &FormulaSpec, fragments: &Fragments<'_>) -> String {
    match slot {
        Placeholder::Title => html_escape(&formula.name),
        Placeholder::Icon => html_escape(&formula.icon),
        Placeholder::FormulaId => html_escape(&formula.id),
        Placeholder::FormulaLatex => html_escape(&formula.formula_latex),
        Placeholder::FormulaUnicode => html_escape(&formula.formula_unicode),
        Placeholder::Description => html_escape(&formula.description),
        Placeholder::Insight => html_escape(formula.insight.as_deref().unwrap_or("")),
        Placeholder::Category => html_escape(&formula.category.join(" · ")),
        Placeholder::ConceptTags => concept_tags(formula),
        Placeholder::VisualizationType => {
            html_escape(formula.visualization_type.as_deref().unwrap_or("generic"))
        }
        Placeholder::ParameterControls => fragments.controls.markup.clone(),
        Placeholder::ParameterBindings => fragments.controls.binding_code.clone(),
        Placeholder::SceneCode => fragments.scene_code.to_string(),
        Placeholder::UpdateCode => fragments.update_code.to_string(),
    }
}

fn concept_tags(formula: &FormulaSpec) -> String {
    let physics = formula
        .physics_concepts
        .iter()
        .map(|c| format!(r#"<span class="tag tag-physics">{}</span>"#, html_escape(c)));
    let math = formula
        .math_concepts
        .iter()
        .map(|c| format!(r#"<span class="tag tag-math">{}</span>"#, html_escape(c)));
    physics.chain(math).collect::<Vec<_>>().join("\n        ")
}
