use std::collections::{HashMap, HashSet};

use super::{Axis, FormulaSpec, ParamKind, ParamValue, ParameterSpec};
use crate::error::{Error, Result};

/// Characters that cannot appear in an output folder name on any platform.
const FORBIDDEN_PATH_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Keys that hit `Object.prototype` machinery instead of an own property.
const RESERVED_PARAMETER_NAMES: &[&str] = &["__proto__", "constructor", "prototype"];

const DIFFICULTY_LEVELS: std::ops::RangeInclusive<u8> = 1..=5;

pub(super) fn validate_formulas(formulas: &[FormulaSpec]) -> Result<()> {
    let mut ids: HashSet<&str> = HashSet::new();
    let mut slugs: HashMap<String, &str> = HashMap::new();

    for formula in formulas {
        if !ids.insert(formula.id.as_str()) {
            return Err(Error::DuplicateId {
                id: formula.id.clone(),
            });
        }
        check_identity(formula)?;
        if let Some(value) = formula.difficulty.filter(|d| !DIFFICULTY_LEVELS.contains(d)) {
            return Err(Error::InvalidDifficulty {
                id: formula.id.clone(),
                value,
            });
        }

        // "01-a" + "b" and "01" + "a-b" share a folder.
        if let Some(other) = slugs.insert(formula.slug(), &formula.id) {
            return Err(Error::InvalidIdentity {
                id: formula.id.clone(),
                reason: format!("output folder '{}' collides with formula '{other}'", formula.slug()),
            });
        }

        let mut names: HashSet<&str> = HashSet::new();
        for param in &formula.parameters {
            if !names.insert(param.name.as_str()) {
                return Err(Error::DuplicateParameter {
                    formula: formula.id.clone(),
                    name: param.name.clone(),
                });
            }
            if !is_identifier(&param.name) || RESERVED_PARAMETER_NAMES.contains(&param.name.as_str()) {
                return Err(Error::InvalidParameterName {
                    formula: formula.id.clone(),
                    name: param.name.clone(),
                });
            }
            validate_parameter(&formula.id, param)?;
        }
    }

    Ok(())
}

fn check_identity(formula: &FormulaSpec) -> Result<()> {
    let fail = |reason: String| -> Result<()> {
        Err(Error::InvalidIdentity {
            id: formula.id.clone(),
            reason,
        })
    };

    for (field, value) in [("id", &formula.id), ("name", &formula.name)] {
        if value.trim().is_empty() {
            return fail(format!("{field} is empty"));
        }
        if let Some(c) = value
            .chars()
            .find(|c| FORBIDDEN_PATH_CHARS.contains(c) || c.is_control())
        {
            return fail(format!("{field} contains {c:?}"));
        }
        if value.contains("..") {
            return fail(format!("{field} contains '..'"));
        }
    }
    Ok(())
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn validate_parameter(formula: &str, param: &ParameterSpec) -> Result<()> {
    let axes: &[Axis] = match &param.kind {
        ParamKind::Scalar => {
            let shapes_ok = param.default.is_scalar() && param.range.iter().all(ParamValue::is_scalar);
            if !shapes_ok {
                return Err(shape_mismatch(formula, param));
            }
            &[Axis::X]
        }
        ParamKind::Vector3 => {
            if param.default.is_scalar() {
                return Err(shape_mismatch(formula, param));
            }
            &Axis::ALL
        }
        ParamKind::Unsupported(kind) => {
            return Err(Error::UnknownParameterType {
                formula: formula.to_string(),
                name: param.name.clone(),
                kind: kind.clone(),
            });
        }
    };

    let is_vector = param.kind == ParamKind::Vector3;
    for &axis in axes {
        let (min, default, max) = param.bounds(axis);
        let at = if is_vector {
            format!(" on axis {}", axis.as_str())
        } else {
            String::new()
        };
        if !(min.is_finite() && default.is_finite() && max.is_finite()) {
            return Err(Error::invalid_range(
                formula,
                &param.name,
                format!("non-finite value{at}"),
            ));
        }
        if min > max {
            return Err(Error::invalid_range(
                formula,
                &param.name,
                format!("min {min} exceeds max {max}{at}"),
            ));
        }
        if default < min || default > max {
            return Err(Error::invalid_range(
                formula,
                &param.name,
                format!("default {default} outside [{min}, {max}]{at}"),
            ));
        }
    }
    Ok(())
}

fn shape_mismatch(formula: &str, param: &ParameterSpec) -> Error {
    Error::ParameterShapeMismatch {
        formula: formula.to_string(),
        name: param.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn formula(id: &str, name: &str, parameters: Vec<ParameterSpec>) -> FormulaSpec {
        FormulaSpec {
            id: id.to_string(),
            name: name.to_string(),
            icon: String::new(),
            formula_latex: String::new(),
            formula_unicode: String::new(),
            description: String::new(),
            insight: None,
            category: Vec::new(),
            physics_concepts: Vec::new(),
            math_concepts: Vec::new(),
            applications: Vec::new(),
            difficulty: None,
            visualization_type: None,
            parameters,
        }
    }

    #[test]
    fn valid_catalog_passes() {
        let catalog = Catalog::new(vec![
            formula("01", "X", vec![ParameterSpec::scalar("speed", 1.0, 0.1, 3.0)]),
            formula("02", "Y", vec![ParameterSpec::vector3("C", [1.0, 0.0, 0.0], -2.0, 2.0)]),
        ]);
        catalog.validate().expect("catalog should be valid");
    }

    #[test]
    fn duplicate_id_rejected() {
        let catalog = Catalog::new(vec![formula("01", "X", vec![]), formula("01", "Y", vec![])]);
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, Error::DuplicateId { ref id } if id == "01"));
    }

    #[test]
    fn default_above_range_rejected() {
        let catalog = Catalog::new(vec![formula(
            "01",
            "X",
            vec![ParameterSpec::scalar("k", 5.0, 0.0, 3.0)],
        )]);
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameterRange { ref name, .. } if name == "k"));
    }

    #[test]
    fn vector_component_checked_per_axis() {
        let catalog = Catalog::new(vec![formula(
            "01",
            "X",
            vec![ParameterSpec::vector3("v", [0.0, 4.0, 0.0], -1.0, 1.0)],
        )]);
        let err = catalog.validate().unwrap_err();
        match err {
            Error::InvalidParameterRange { detail, .. } => assert!(detail.contains("axis y")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn per_axis_range_bounds_respected() {
        let mut p = ParameterSpec::vector3("v", [0.0, 1.5, 0.0], 0.0, 1.0);
        p.range = [ParamValue::Vector([-1.0, 1.0, -1.0]), ParamValue::Vector([1.0, 2.0, 1.0])];
        Catalog::new(vec![formula("01", "X", vec![p])])
            .validate()
            .expect("per-axis bounds should allow y = 1.5");
    }

    #[test]
    fn inverted_range_rejected() {
        let catalog = Catalog::new(vec![formula(
            "01",
            "X",
            vec![ParameterSpec::scalar("k", 1.0, 2.0, 0.0)],
        )]);
        assert!(matches!(
            catalog.validate(),
            Err(Error::InvalidParameterRange { .. })
        ));
    }

    #[test]
    fn nan_default_rejected() {
        let catalog = Catalog::new(vec![formula(
            "01",
            "X",
            vec![ParameterSpec::scalar("k", f64::NAN, 0.0, 1.0)],
        )]);
        assert!(matches!(
            catalog.validate(),
            Err(Error::InvalidParameterRange { .. })
        ));
    }

    #[test]
    fn duplicate_parameter_name_rejected() {
        let catalog = Catalog::new(vec![formula(
            "01",
            "X",
            vec![
                ParameterSpec::scalar("k", 1.0, 0.0, 2.0),
                ParameterSpec::scalar("k", 0.5, 0.0, 2.0),
            ],
        )]);
        assert!(matches!(
            catalog.validate(),
            Err(Error::DuplicateParameter { ref name, .. }) if name == "k"
        ));
    }

    #[test]
    fn same_parameter_name_in_different_formulas_is_fine() {
        let catalog = Catalog::new(vec![
            formula("01", "X", vec![ParameterSpec::scalar("k", 1.0, 0.0, 2.0)]),
            formula("02", "Y", vec![ParameterSpec::scalar("k", 1.0, 0.0, 2.0)]),
        ]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn unsupported_type_rejected() {
        let mut p = ParameterSpec::scalar("m", 1.0, 0.0, 2.0);
        p.kind = ParamKind::Unsupported("matrix".into());
        let catalog = Catalog::new(vec![formula("01", "X", vec![p])]);
        assert!(matches!(
            catalog.validate(),
            Err(Error::UnknownParameterType { ref kind, .. }) if kind == "matrix"
        ));
        assert!(catalog.validate().unwrap_err().is_fatal());
    }

    #[test]
    fn difficulty_outside_levels_rejected() {
        for (value, ok) in [(0, false), (1, true), (5, true), (6, false), (200, false)] {
            let mut f = formula("01", "X", vec![]);
            f.difficulty = Some(value);
            let result = Catalog::new(vec![f]).validate();
            assert_eq!(result.is_ok(), ok, "difficulty {value}");
            if !ok {
                assert!(matches!(result, Err(Error::InvalidDifficulty { value: v, .. }) if v == value));
            }
        }
    }

    #[test]
    fn prototype_keys_rejected_as_parameter_names() {
        for name in ["__proto__", "constructor", "prototype"] {
            let catalog = Catalog::new(vec![formula(
                "01",
                "X",
                vec![ParameterSpec::scalar(name, 1.0, 0.0, 2.0)],
            )]);
            assert!(
                matches!(catalog.validate(), Err(Error::InvalidParameterName { name: ref n, .. }) if n == name),
                "{name} should be rejected"
            );
        }
        let catalog = Catalog::new(vec![formula(
            "01",
            "X",
            vec![ParameterSpec::scalar("proto", 1.0, 0.0, 2.0)],
        )]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn scalar_with_vector_default_is_shape_mismatch() {
        let mut p = ParameterSpec::scalar("k", 1.0, 0.0, 2.0);
        p.default = ParamValue::Vector([1.0, 1.0, 1.0]);
        let catalog = Catalog::new(vec![formula("01", "X", vec![p])]);
        assert!(matches!(
            catalog.validate(),
            Err(Error::ParameterShapeMismatch { .. })
        ));
    }

    #[test]
    fn path_escaping_names_rejected() {
        for name in ["../etc", "a/b", "", "  ", "tab\there"] {
            let catalog = Catalog::new(vec![formula("01", name, vec![])]);
            assert!(
                matches!(catalog.validate(), Err(Error::InvalidIdentity { .. })),
                "name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn colliding_slugs_rejected() {
        let catalog = Catalog::new(vec![formula("01-a", "b", vec![]), formula("01", "a-b", vec![])]);
        assert!(matches!(
            catalog.validate(),
            Err(Error::InvalidIdentity { ref reason, .. }) if reason.contains("collides")
        ));
    }

    #[test]
    fn parameter_names_must_be_identifiers() {
        assert!(is_identifier("speed"));
        assert!(is_identifier("_k2"));
        assert!(is_identifier("$omega"));
        assert!(!is_identifier("2k"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));

        let catalog = Catalog::new(vec![formula(
            "01",
            "X",
            vec![ParameterSpec::scalar("bad name", 1.0, 0.0, 2.0)],
        )]);
        assert!(matches!(
            catalog.validate(),
            Err(Error::InvalidParameterName { .. })
        ));
    }
}
