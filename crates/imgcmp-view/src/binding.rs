//! Interactive binding.
//!
//! Connects a [`ControlSurface`] (a GUI, a script) to the orchestrator. The
//! session describes its parameters as [`Control`]s; the surface builds one
//! widget per control and calls back with the current [`ParamValues`] every
//! time a value changes. Each callback builds a fresh [`CompareParams`] and
//! runs exactly one comparison, so the figure always reflects the current
//! widget state.
//!
//! # Controls
//!
//! | Name     | Kind    | Values                          | Default  |
//! |----------|---------|---------------------------------|----------|
//! | `a`      | fixed   | the first source                |          |
//! | `b`      | fixed   | the second source               |          |
//! | `method` | choice  | registry names, in order        | `blend`  |
//! | `alpha`  | slider  | `[0, 1]`, step `0.05`           | `0.5`    |
//! | `layout` | choice  | `auto`, `tall`, `wide`          | `auto`   |
//! | `swap`   | toggle  | off / on                        | off      |
//!
//! # Example
//!
//! ```rust
//! use imgcmp_core::{Image, Shape};
//! use imgcmp_view::binding::{interact, ComparisonSession, ParamValues, ScriptedSurface};
//! use imgcmp_view::canvas::testing::RecordingCanvas;
//!
//! let a = Image::zeros(Shape::new(8, 8)).unwrap();
//! let b = Image::filled(Shape::new(8, 8), 1.0).unwrap();
//! let mut session = ComparisonSession::new(a, b, RecordingCanvas::new());
//!
//! let mut surface = ScriptedSurface::new(vec![ParamValues::new().with_number("alpha", 0.75)]);
//! interact(&mut surface, &mut session).unwrap();
//! assert_eq!(session.invocations(), 2);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use imgcmp_core::Image;
use imgcmp_ops::{registry, Registry};
use tracing::{debug, trace};

use crate::canvas::Canvas;
use crate::compare::{CompareParams, Comparator, Comparison};
use crate::layout::Layout;
use crate::render::RenderOptions;
use crate::{ViewError, ViewResult};

/// Name of the first source control.
pub const A: &str = "a";
/// Name of the second source control.
pub const B: &str = "b";
/// Name of the method selector.
pub const METHOD: &str = "method";
/// Name of the alpha slider.
pub const ALPHA: &str = "alpha";
/// Name of the layout selector.
pub const LAYOUT: &str = "layout";
/// Name of the swap toggle.
pub const SWAP: &str = "swap";

/// Alpha slider step.
pub const ALPHA_STEP: f64 = 0.05;

/// Kind and range of a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Bound once, never changes.
    Fixed,
    /// Number in `[min, max]` snapped to multiples of `step` from `min`.
    Slider {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Increment
        step: f64,
        /// Initial value
        default: f64,
    },
    /// One of a fixed list of names.
    Choice {
        /// Allowed values, in display order
        options: Vec<String>,
        /// Initial value
        default: String,
    },
    /// On/off.
    Toggle {
        /// Initial value
        default: bool,
    },
}

/// A named control.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Parameter name
    pub name: &'static str,
    /// Kind and range
    pub kind: ControlKind,
}

impl Control {
    /// A fixed control.
    pub const fn fixed(name: &'static str) -> Self {
        Self {
            name,
            kind: ControlKind::Fixed,
        }
    }

    /// A slider.
    pub const fn slider(name: &'static str, min: f64, max: f64, step: f64, default: f64) -> Self {
        Self {
            name,
            kind: ControlKind::Slider {
                min,
                max,
                step,
                default,
            },
        }
    }

    /// A choice among `options`.
    pub fn choice<I, S>(name: &'static str, options: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            kind: ControlKind::Choice {
                options: options.into_iter().map(Into::into).collect(),
                default: default.to_string(),
            },
        }
    }

    /// A toggle.
    pub const fn toggle(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: ControlKind::Toggle { default },
        }
    }

    /// Initial value, `None` for fixed controls.
    pub fn default_value(&self) -> Option<ParamValue> {
        match &self.kind {
            ControlKind::Fixed => None,
            ControlKind::Slider { default, .. } => Some(ParamValue::Number(*default)),
            ControlKind::Choice { default, .. } => Some(ParamValue::Choice(default.clone())),
            ControlKind::Toggle { default } => Some(ParamValue::Flag(*default)),
        }
    }

    /// Validates `value` for this control.
    ///
    /// Slider values are clamped and snapped to the step grid. Choices must be
    /// one of the options.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidParameter`] for a value of the wrong kind, an
    /// unknown choice, a NaN number or any value for a fixed control.
    pub fn accept(&self, value: &ParamValue) -> ViewResult<ParamValue> {
        match (&self.kind, value) {
            (ControlKind::Fixed, _) => Err(ViewError::invalid_parameter(
                self.name,
                "fixed controls cannot change",
            )),
            (ControlKind::Slider { min, max, step, .. }, ParamValue::Number(v)) => {
                if v.is_nan() {
                    return Err(ViewError::invalid_parameter(self.name, "value is NaN"));
                }
                Ok(ParamValue::Number(snap(*v, *min, *max, *step)))
            }
            (ControlKind::Choice { options, .. }, ParamValue::Choice(s)) => {
                if options.iter().any(|o| o == s) {
                    Ok(value.clone())
                } else {
                    Err(ViewError::invalid_parameter(
                        self.name,
                        format!("'{s}' is not one of: {}", options.join(", ")),
                    ))
                }
            }
            (ControlKind::Toggle { .. }, ParamValue::Flag(_)) => Ok(value.clone()),
            (_, other) => Err(ViewError::invalid_parameter(
                self.name,
                format!("unexpected {} value", other.kind_name()),
            )),
        }
    }
}

/// Clamps into `[min, max]` and rounds to the nearest step from `min`.
fn snap(v: f64, min: f64, max: f64, step: f64) -> f64 {
    let v = v.clamp(min, max);
    if step <= 0.0 {
        return v;
    }
    let steps = ((v - min) / step).round();
    (min + steps * step).clamp(min, max)
}

/// Current value of one control.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Slider value
    Number(f64),
    /// Selected option
    Choice(String),
    /// Toggle state
    Flag(bool),
}

impl ParamValue {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Choice(_) => "choice",
            Self::Flag(_) => "flag",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Choice(s) => f.write_str(s),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Control name -> current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamValues(BTreeMap<String, ParamValue>);

impl ParamValues {
    /// Empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial values of `controls`.
    pub fn defaults(controls: &[Control]) -> Self {
        Self(
            controls
                .iter()
                .filter_map(|c| c.default_value().map(|v| (c.name.to_string(), v)))
                .collect(),
        )
    }

    /// Defaults of `controls` overlaid with `initial`.
    pub fn starting_values(controls: &[Control], initial: &Self) -> Self {
        let mut values = Self::defaults(controls);
        values.merge(initial);
        values
    }

    /// Sets a value.
    pub fn set(&mut self, name: impl Into<String>, value: ParamValue) {
        self.0.insert(name.into(), value);
    }

    /// Builder form of [`set`](Self::set) for a number.
    pub fn with_number(mut self, name: impl Into<String>, v: f64) -> Self {
        self.set(name, ParamValue::Number(v));
        self
    }

    /// Builder form of [`set`](Self::set) for a choice.
    pub fn with_choice(mut self, name: impl Into<String>, v: impl Into<String>) -> Self {
        self.set(name, ParamValue::Choice(v.into()));
        self
    }

    /// Builder form of [`set`](Self::set) for a flag.
    pub fn with_flag(mut self, name: impl Into<String>, v: bool) -> Self {
        self.set(name, ParamValue::Flag(v));
        self
    }

    /// Value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Overlays `update` onto these values.
    pub fn merge(&mut self, update: &Self) {
        for (k, v) in &update.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Iterates in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no value is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks every value against the control of the same name.
    ///
    /// Returns the values as the controls hold them, with sliders snapped.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidParameter`] for a name no control has, or for a
    /// value its control rejects.
    pub fn accepted_by(&self, controls: &[Control]) -> ViewResult<Self> {
        self.iter()
            .map(|(name, value)| {
                let control = controls
                    .iter()
                    .find(|c| c.name == name)
                    .ok_or_else(|| ViewError::invalid_parameter(name, "no such control"))?;
                Ok((name.to_string(), control.accept(value)?))
            })
            .collect::<ViewResult<BTreeMap<_, _>>>()
            .map(Self)
    }
}

impl From<&CompareParams> for ParamValues {
    fn from(params: &CompareParams) -> Self {
        Self::new()
            .with_choice(METHOD, params.method.clone())
            .with_number(ALPHA, params.alpha)
            .with_choice(LAYOUT, params.layout.name())
            .with_flag(SWAP, params.swap)
    }
}

/// Callback a control surface invokes on every change.
pub type ChangeFn<'a> = dyn FnMut(&ParamValues) -> ViewResult<()> + 'a;

/// Something that displays controls and reports their changes.
pub trait ControlSurface {
    /// Shows `controls` and calls `on_change` with the full current values:
    /// once on start, then once per change, until the surface closes.
    fn run(&mut self, controls: &[Control], on_change: &mut ChangeFn<'_>) -> ViewResult<()>;
}

/// Sources, registry and canvas of one interactive comparison.
pub struct ComparisonSession<C: Canvas> {
    a: Image,
    b: Image,
    comparator: Comparator,
    canvas: C,
    invocations: usize,
    last: Option<Comparison>,
}

impl<C: Canvas> ComparisonSession<C> {
    /// Creates a session with the built-in registry.
    pub fn new(a: Image, b: Image, canvas: C) -> Self {
        Self::with_comparator(a, b, canvas, Comparator::default())
    }

    /// Creates a session with custom render options.
    pub fn with_options(a: Image, b: Image, canvas: C, options: RenderOptions) -> Self {
        Self::with_comparator(a, b, canvas, Comparator::new(Registry::builtin(), options))
    }

    /// Creates a session around an existing comparator.
    pub fn with_comparator(a: Image, b: Image, canvas: C, comparator: Comparator) -> Self {
        Self {
            a,
            b,
            comparator,
            canvas,
            invocations: 0,
            last: None,
        }
    }

    /// The controls this session exposes.
    pub fn controls(&self) -> Vec<Control> {
        let layouts = Layout::interactive_choices().iter().map(|l| l.name());
        vec![
            Control::fixed(A),
            Control::fixed(B),
            Control::choice(METHOD, self.comparator.registry().names(), registry::BLEND),
            Control::slider(ALPHA, 0.0, 1.0, ALPHA_STEP, CompareParams::DEFAULT_ALPHA),
            Control::choice(LAYOUT, layouts, Layout::Auto.name()),
            Control::toggle(SWAP, false),
        ]
    }

    /// Builds comparison parameters from control values.
    ///
    /// Missing values fall back to control defaults; unknown names are
    /// rejected.
    pub fn params_from(&self, values: &ParamValues) -> ViewResult<CompareParams> {
        let controls = self.controls();
        let values = values.accepted_by(&controls)?;
        let mut params = CompareParams::default();
        for control in &controls {
            let Some(value) = values.get(control.name).cloned().or_else(|| control.default_value())
            else {
                continue;
            };
            match (control.name, value) {
                (METHOD, ParamValue::Choice(m)) => params.method = m,
                (ALPHA, ParamValue::Number(v)) => params.alpha = v,
                (LAYOUT, ParamValue::Choice(l)) => params.layout = l.parse()?,
                (SWAP, ParamValue::Flag(f)) => params.swap = f,
                _ => {}
            }
        }
        Ok(params)
    }

    /// Runs one comparison for the given control values.
    pub fn on_change(&mut self, values: &ParamValues) -> ViewResult<&Comparison> {
        self.invocations += 1;
        let params = self.params_from(values)?;
        trace!(invocation = self.invocations, ?params, "binding::on_change");
        let cmp = self
            .comparator
            .compare(&mut self.canvas, &self.a, &self.b, &params)?;
        Ok(&*self.last.insert(cmp))
    }

    /// Number of change events handled, failed ones included.
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    /// Most recent successful comparison.
    pub fn last(&self) -> Option<&Comparison> {
        self.last.as_ref()
    }

    /// The canvas.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

}

impl<C: Canvas + fmt::Debug> fmt::Debug for ComparisonSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonSession")
            .field("a", &self.a)
            .field("b", &self.b)
            .field("comparator", &self.comparator)
            .field("canvas", &self.canvas)
            .field("invocations", &self.invocations)
            .finish_non_exhaustive()
    }
}

/// Binds `session` to `surface` and runs until the surface closes.
pub fn interact<S, C>(surface: &mut S, session: &mut ComparisonSession<C>) -> ViewResult<()>
where
    S: ControlSurface + ?Sized,
    C: Canvas,
{
    let controls = session.controls();
    debug!(controls = controls.len(), "Starting interactive session");
    surface.run(&controls, &mut |values| session.on_change(values).map(|_| ()))
}

/// Surface that replays a fixed list of updates.
///
/// Invokes the callback once with the control defaults (overlaid with the
/// optional initial values), then once per update with that update merged
/// onto the running values. Stops at the first error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSurface {
    initial: ParamValues,
    updates: Vec<ParamValues>,
}

impl ScriptedSurface {
    /// Surface replaying `updates` in order.
    pub fn new(updates: Vec<ParamValues>) -> Self {
        Self {
            initial: ParamValues::new(),
            updates,
        }
    }

    /// Starts from `initial` instead of the bare control defaults.
    pub fn starting_from(mut self, initial: ParamValues) -> Self {
        self.initial = initial;
        self
    }

    /// Number of scripted updates.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Returns `true` when only the initial render will happen.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl ControlSurface for ScriptedSurface {
    fn run(&mut self, controls: &[Control], on_change: &mut ChangeFn<'_>) -> ViewResult<()> {
        let mut values = ParamValues::starting_values(controls, &self.initial);
        on_change(&values)?;
        for update in &self.updates {
            values.merge(update);
            on_change(&values)?;
        }
        Ok(())
    }
}
