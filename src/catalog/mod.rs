//! The formula catalog: read-only configuration describing every formula
//! the generator turns into an artifact.
//!
//! A catalog is built once (from JSON or the built-in data set), validated
//! once, and then only read. Nothing in the generator mutates it.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

mod validate;

/// Built-in data set: the nineteen core formulas.
const BUILTIN_CATALOG_JSON: &str = include_str!("../../catalog/formulas.json");

// ── Formula ────────────────────────────────────────────────────────────

/// One physical/mathematical formula and everything needed to visualize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaSpec {
    /// Short stable identifier, unique across the catalog (e.g. `"07"`).
    pub id: String,
    /// Human-readable title.
    pub name: String,
    #[serde(default)]
    pub icon: String,
    /// Formula in TeX notation, rendered by MathJax in the artifact.
    #[serde(default, alias = "formula")]
    pub formula_latex: String,
    /// Plain Unicode rendering shown when TeX is unavailable.
    #[serde(default)]
    pub formula_unicode: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    /// Category tags. The first one groups the formula on the index page.
    /// Accepts a single string or a list.
    #[serde(default, deserialize_with = "string_or_list")]
    pub category: Vec<String>,
    #[serde(default)]
    pub physics_concepts: Vec<String>,
    #[serde(default)]
    pub math_concepts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<String>,
    /// 1 (introductory) to 5 (advanced).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    /// Selects the scene specialization; see [`crate::dispatch`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

/// Deserialize either `"Waves"` or `["Waves", "Fields"]` into a list.
fn string_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.trim().is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

impl FormulaSpec {
    /// Category used for grouping, if any tag is non-blank.
    pub fn primary_category(&self) -> Option<&str> {
        self.category.iter().map(|c| c.trim()).find(|c| !c.is_empty())
    }

    /// Output folder name: `"{id}-{name}"`.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.id, self.name)
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

// ── Parameters ─────────────────────────────────────────────────────────

/// One tunable input exposed as UI controls in the generated artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub default: ParamValue,
    /// `[min, max]`. A scalar bound applies to every axis of a vector.
    #[serde(default = "default_range")]
    pub range: [ParamValue; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

fn default_range() -> [ParamValue; 2] {
    [ParamValue::Scalar(0.0), ParamValue::Scalar(1.0)]
}

impl ParameterSpec {
    pub fn scalar(name: &str, default: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Scalar,
            default: ParamValue::Scalar(default),
            range: [ParamValue::Scalar(min), ParamValue::Scalar(max)],
            label: None,
            unit: None,
        }
    }

    pub fn vector3(name: &str, default: [f64; 3], min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Vector3,
            default: ParamValue::Vector(default),
            range: [ParamValue::Scalar(min), ParamValue::Scalar(max)],
            label: None,
            unit: None,
        }
    }

    /// `(min, default, max)` for one component. Scalars ignore `axis`.
    pub fn bounds(&self, axis: Axis) -> (f64, f64, f64) {
        (
            self.range[0].component(axis),
            self.default.component(axis),
            self.range[1].component(axis),
        )
    }

    /// Label shown next to the control; falls back to the name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Parameter type. Unknown type strings are kept so validation can name them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Scalar,
    Vector3,
    Unsupported(String),
}

impl ParamKind {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "scalar" | "float" | "number" => Self::Scalar,
            "vector3" | "vec3" | "3-vector" => Self::Vector3,
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Scalar => "scalar",
            Self::Vector3 => "vector3",
            Self::Unsupported(s) => s,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParamKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParamKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// A scalar or 3-component value, used for defaults and range bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f64),
    Vector([f64; 3]),
}

impl ParamValue {
    pub fn component(&self, axis: Axis) -> f64 {
        match self {
            Self::Scalar(v) => *v,
            Self::Vector(v) => v[axis.index()],
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Vector([x, y, z]) => write!(f, "({x}, {y}, {z})"),
        }
    }
}

/// Component selector for 3-vector parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

// ── Catalog ────────────────────────────────────────────────────────────

/// Ordered, read-only set of formulas driving one generation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    formulas: Vec<FormulaSpec>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    formulas: Vec<FormulaSpec>,
}

#[derive(Serialize)]
struct CatalogDocumentRef<'a> {
    formulas: &'a [FormulaSpec],
}

impl Catalog {
    pub fn new(formulas: Vec<FormulaSpec>) -> Self {
        Self { formulas }
    }

    /// Parse `{ "formulas": [...] }` or a bare array of formulas.
    ///
    /// The shape is chosen from the first token so serde reports the real
    /// field path and position of any mistake.
    pub fn from_json(source: &str) -> Result<Self> {
        let formulas = if source.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<FormulaSpec>>(source)?
        } else {
            serde_json::from_str::<CatalogDocument>(source)?.formulas
        };
        Ok(Self { formulas })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&source)
    }

    /// The built-in nineteen-formula catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        let doc = CatalogDocumentRef {
            formulas: &self.formulas,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Every formula, in catalog order.
    pub fn list_formulas(&self) -> &[FormulaSpec] {
        &self.formulas
    }

    pub fn get(&self, id: &str) -> Option<&FormulaSpec> {
        self.formulas.iter().find(|f| f.id == id)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&FormulaSpec> {
        self.formulas.iter().find(|f| f.slug() == slug)
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Check every structural invariant. Stops at the first violation.
    pub fn validate(&self) -> Result<()> {
        validate::validate_formulas(&self.formulas)
    }
}
