//! Parameter controls: slider markup plus the script that binds each
//! slider to the artifact's parameter store.
//!
//! The store is one flat object, `params`, keyed by parameter name. Scalars
//! hold a number; 3-vectors hold `{ x, y, z }`. Scene update code reads it
//! through `param()` / `vec3()`, so an edit is visible on the next frame.

use crate::catalog::{Axis, FormulaSpec, ParamKind, ParameterSpec};
use crate::error::{Error, Result};
use crate::util::{html_escape, js_number, js_string, slider_step, step_decimals};

/// Generated control markup and its binding script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlSet {
    pub markup: String,
    pub binding_code: String,
}

/// Helpers shared by every binding script.
const BINDING_RUNTIME_JS: &str = r#"function bindSlider(id, digits, apply) {
  const input = document.getElementById(id);
  const readout = document.getElementById(id + '-value');
  if (!input) return;
  input.addEventListener('input', () => {
    const v = parseFloat(input.value);
    apply(v);
    if (readout) readout.textContent = v.toFixed(digits);
  });
}

function setSlider(id, digits, v) {
  const input = document.getElementById(id);
  const readout = document.getElementById(id + '-value');
  if (input) input.value = v;
  if (readout) readout.textContent = v.toFixed(digits);
}"#;

/// One slider: a whole scalar parameter or one axis of a vector.
struct Slider<'a> {
    param: &'a ParameterSpec,
    axis: Option<Axis>,
}

impl Slider<'_> {
    fn dom_id(&self) -> String {
        match self.axis {
            Some(axis) => format!("param-{}-{}", self.param.name, axis.as_str()),
            None => format!("param-{}", self.param.name),
        }
    }

    /// Script expression addressing this slider's slot in the store.
    fn store_target(&self, store: &str) -> String {
        let key = js_string(&self.param.name);
        match self.axis {
            Some(axis) => format!("{store}[{key}].{}", axis.as_str()),
            None => format!("{store}[{key}]"),
        }
    }

    fn bounds(&self) -> (f64, f64, f64) {
        self.param.bounds(self.axis.unwrap_or(Axis::X))
    }

    fn step(&self) -> f64 {
        let (min, _, max) = self.bounds();
        slider_step(max - min)
    }

    /// Readout precision matching the slider's resolution.
    fn digits(&self) -> usize {
        step_decimals(self.step())
    }
}

/// Build controls and bindings for every parameter of `formula`.
pub fn generate_controls(formula: &FormulaSpec) -> Result<ControlSet> {
    let mut markup = String::new();
    let mut sliders = Vec::new();

    for param in &formula.parameters {
        match &param.kind {
            ParamKind::Scalar => {
                let slider = Slider { param, axis: None };
                markup.push_str(&slider_markup(&slider, param.display_label()));
                sliders.push(slider);
            }
            ParamKind::Vector3 => {
                markup.push_str(&format!(
                    "<div class=\"parameter-group\" data-param=\"{}\">\n<div class=\"parameter-group-title\">{}</div>\n",
                    html_escape(&param.name),
                    label_with_unit(param),
                ));
                for axis in Axis::ALL {
                    let slider = Slider {
                        param,
                        axis: Some(axis),
                    };
                    markup.push_str(&slider_markup(&slider, &format!("{}.{}", param.name, axis.as_str())));
                    sliders.push(slider);
                }
                markup.push_str("</div>\n");
            }
            ParamKind::Unsupported(kind) => {
                return Err(Error::UnsupportedParameterType {
                    formula: formula.id.clone(),
                    name: param.name.clone(),
                    kind: kind.clone(),
                });
            }
        }
    }

    if formula.parameters.is_empty() {
        markup.push_str("<p class=\"no-params\">This formula has no adjustable parameters.</p>\n");
    }

    Ok(ControlSet {
        markup,
        binding_code: binding_code(formula, &sliders),
    })
}

fn label_with_unit(param: &ParameterSpec) -> String {
    match &param.unit {
        Some(unit) => format!("{} [{}]", html_escape(param.display_label()), html_escape(unit)),
        None => html_escape(param.display_label()),
    }
}

fn slider_markup(slider: &Slider<'_>, label: &str) -> String {
    let id = html_escape(&slider.dom_id());
    let (min, value, max) = slider.bounds();
    let label = if slider.axis.is_some() {
        html_escape(label)
    } else {
        label_with_unit(slider.param)
    };
    format!(
        r#"<div class="parameter-control">
  <label for="{id}">{label}</label>
  <input type="range" id="{id}" min="{min}" max="{max}" step="{step}" value="{value}">
  <span class="parameter-value" id="{id}-value">{readout:.digits$}</span>
</div>
"#,
        min = js_number(min),
        max = js_number(max),
        step = js_number(slider.step()),
        value = js_number(value),
        readout = value,
        digits = slider.digits(),
    )
}

fn defaults_literal(formula: &FormulaSpec) -> String {
    if formula.parameters.is_empty() {
        return "{}".to_string();
    }
    let mut lines = vec!["{".to_string()];
    for param in &formula.parameters {
        let value = match param.kind {
            ParamKind::Vector3 => {
                let [x, y, z] = Axis::ALL.map(|a| js_number(param.default.component(a)));
                format!("{{ x: {x}, y: {y}, z: {z} }}")
            }
            _ => js_number(param.default.component(Axis::X)),
        };
        lines.push(format!("  {}: {value},", js_string(&param.name)));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn binding_code(formula: &FormulaSpec, sliders: &[Slider<'_>]) -> String {
    let mut js = String::with_capacity(1024);
    js.push_str(&format!("const paramDefaults = {};\n", defaults_literal(formula)));
    js.push_str("const params = JSON.parse(JSON.stringify(paramDefaults));\n\n");
    js.push_str(BINDING_RUNTIME_JS);
    js.push_str("\n\nfunction bindParameterControls() {\n");
    for slider in sliders {
        js.push_str(&format!(
            "  bindSlider({}, {}, v => {{ {} = v; }});\n",
            js_string(&slider.dom_id()),
            slider.digits(),
            slider.store_target("params"),
        ));
    }
    js.push_str("}\n\nfunction resetParameters() {\n");
    for slider in sliders {
        let target = slider.store_target("params");
        js.push_str(&format!("  {target} = {};\n", slider.store_target("paramDefaults")));
        js.push_str(&format!(
            "  setSlider({}, {}, {target});\n",
            js_string(&slider.dom_id()),
            slider.digits()
        ));
    }
    js.push_str("}\n");
    js
}
