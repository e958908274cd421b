//! Specialization dispatch: picks the scene-construction and per-frame
//! update fragments for a formula.
//!
//! Routing order: the formula's `visualization_type` tag, then its id in
//! the canonical table, then the generic fallback scene. Every formula gets
//! a renderable pair of fragments; dispatch never fails.
//!
//! Fragments are plain script text run inside the artifact. They build
//! objects into the global `viz` registry in `buildScene()` and mutate them
//! in `updateScene(time)`, reading parameters only through `param()` and
//! `vec3()` so a missing parameter falls back to a sensible constant.

use std::fmt;

use tracing::debug;

use crate::catalog::FormulaSpec;

mod energy;
mod fallback;
mod fields;
mod kinematics;
mod waves;

/// A scene-construction fragment and its per-frame update fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneFragments {
    pub scene: &'static str,
    pub update: &'static str,
}

/// Closed set of scene families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualizationKind {
    SpacetimeVector,
    HelixTrajectory,
    SolidAngleDensity,
    VectorField,
    MomentumVector,
    UnifiedForce,
    SpaceWave,
    ChargeFlux,
    ElectricField,
    MagneticField,
    FieldCoupling,
    CurlField,
    FieldInduction,
    MassEnergy,
    Propulsion,
    SphericalWave,
    ConstantRelation,
}

impl VisualizationKind {
    pub const ALL: [VisualizationKind; 17] = [
        VisualizationKind::SpacetimeVector,
        VisualizationKind::HelixTrajectory,
        VisualizationKind::SolidAngleDensity,
        VisualizationKind::VectorField,
        VisualizationKind::MomentumVector,
        VisualizationKind::UnifiedForce,
        VisualizationKind::SpaceWave,
        VisualizationKind::ChargeFlux,
        VisualizationKind::ElectricField,
        VisualizationKind::MagneticField,
        VisualizationKind::FieldCoupling,
        VisualizationKind::CurlField,
        VisualizationKind::FieldInduction,
        VisualizationKind::MassEnergy,
        VisualizationKind::Propulsion,
        VisualizationKind::SphericalWave,
        VisualizationKind::ConstantRelation,
    ];

    /// Canonical kebab-case tag.
    pub fn tag(self) -> &'static str {
        match self {
            VisualizationKind::SpacetimeVector => "spacetime-vector",
            VisualizationKind::HelixTrajectory => "helix-trajectory",
            VisualizationKind::SolidAngleDensity => "solid-angle-density",
            VisualizationKind::VectorField => "vector-field",
            VisualizationKind::MomentumVector => "momentum-vector",
            VisualizationKind::UnifiedForce => "unified-force",
            VisualizationKind::SpaceWave => "space-wave",
            VisualizationKind::ChargeFlux => "charge-flux",
            VisualizationKind::ElectricField => "electric-field",
            VisualizationKind::MagneticField => "magnetic-field",
            VisualizationKind::FieldCoupling => "field-coupling",
            VisualizationKind::CurlField => "curl-field",
            VisualizationKind::FieldInduction => "field-induction",
            VisualizationKind::MassEnergy => "mass-energy",
            VisualizationKind::Propulsion => "propulsion",
            VisualizationKind::SphericalWave => "spherical-wave",
            VisualizationKind::ConstantRelation => "constant-relation",
        }
    }

    /// Parse a tag. Case, surrounding whitespace, and space/underscore
    /// separators are normalised, so `"Vector field"` matches.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Self::ALL.into_iter().find(|k| k.tag() == normalized)
    }

    /// Kind registered for one of the canonical formula ids.
    pub fn for_id(id: &str) -> Option<Self> {
        let kind = match id {
            "01" => VisualizationKind::SpacetimeVector,
            "02" => VisualizationKind::HelixTrajectory,
            "03" => VisualizationKind::SolidAngleDensity,
            "04" => VisualizationKind::VectorField,
            "05" | "06" => VisualizationKind::MomentumVector,
            "07" => VisualizationKind::UnifiedForce,
            "08" => VisualizationKind::SpaceWave,
            "09" => VisualizationKind::ChargeFlux,
            "10" => VisualizationKind::ElectricField,
            "11" => VisualizationKind::MagneticField,
            "12" | "15" => VisualizationKind::FieldCoupling,
            "13" => VisualizationKind::CurlField,
            "14" => VisualizationKind::FieldInduction,
            "16" => VisualizationKind::MassEnergy,
            "17" => VisualizationKind::Propulsion,
            "18" => VisualizationKind::SphericalWave,
            "19" => VisualizationKind::ConstantRelation,
            _ => return None,
        };
        Some(kind)
    }

    pub fn fragments(self) -> SceneFragments {
        match self {
            VisualizationKind::SpacetimeVector => kinematics::SPACETIME_VECTOR,
            VisualizationKind::HelixTrajectory => kinematics::HELIX_TRAJECTORY,
            VisualizationKind::MomentumVector => kinematics::MOMENTUM_VECTOR,
            VisualizationKind::UnifiedForce => kinematics::UNIFIED_FORCE,
            VisualizationKind::Propulsion => kinematics::PROPULSION,
            VisualizationKind::SolidAngleDensity => fields::SOLID_ANGLE_DENSITY,
            VisualizationKind::VectorField => fields::VECTOR_FIELD,
            VisualizationKind::ChargeFlux => fields::CHARGE_FLUX,
            VisualizationKind::ElectricField => fields::ELECTRIC_FIELD,
            VisualizationKind::MagneticField => fields::MAGNETIC_FIELD,
            VisualizationKind::FieldCoupling => fields::FIELD_COUPLING,
            VisualizationKind::CurlField => fields::CURL_FIELD,
            VisualizationKind::FieldInduction => fields::FIELD_INDUCTION,
            VisualizationKind::SpaceWave => waves::SPACE_WAVE,
            VisualizationKind::SphericalWave => waves::SPHERICAL_WAVE,
            VisualizationKind::MassEnergy => energy::MASS_ENERGY,
            VisualizationKind::ConstantRelation => energy::CONSTANT_RELATION,
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which rule selected a formula's fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ByType,
    ById,
    Fallback,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Route::ByType => "visualization type",
            Route::ById => "formula id",
            Route::Fallback => "generic fallback",
        })
    }
}

/// Outcome of dispatching one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// `None` only for the generic fallback.
    pub kind: Option<VisualizationKind>,
    pub route: Route,
}

impl Dispatch {
    pub fn fragments(&self) -> SceneFragments {
        self.kind
            .map(VisualizationKind::fragments)
            .unwrap_or(fallback::GENERIC)
    }
}

/// Select fragments for `formula`. Total: unknown formulas get the fallback.
pub fn dispatch(formula: &FormulaSpec) -> Dispatch {
    let by_type = formula
        .visualization_type
        .as_deref()
        .and_then(VisualizationKind::from_tag);

    let result = if let Some(kind) = by_type {
        Dispatch {
            kind: Some(kind),
            route: Route::ByType,
        }
    } else if let Some(kind) = VisualizationKind::for_id(&formula.id) {
        Dispatch {
            kind: Some(kind),
            route: Route::ById,
        }
    } else {
        Dispatch {
            kind: None,
            route: Route::Fallback,
        }
    };

    debug!(
        id = %formula.id,
        kind = result.kind.map(VisualizationKind::tag).unwrap_or("generic"),
        route = %result.route,
        "dispatched formula"
    );
    result
}

pub fn scene_code(formula: &FormulaSpec) -> &'static str {
    dispatch(formula).fragments().scene
}

pub fn update_code(formula: &FormulaSpec) -> &'static str {
    dispatch(formula).fragments().update
}
