//! Interactive viewer with eframe/egui integration.
//!
//! [`EguiSurface`] is a [`ControlSurface`]: it opens a window, builds one
//! widget per [`Control`] and invokes the session callback synchronously
//! inside `update` whenever a widget changes. The figure drawn by the
//! session's [`EguiCanvas`](crate::scene::EguiCanvas) is read back from the
//! shared [`SceneHandle`] and painted in the central panel.

use egui::{Color32, ColorImage, Pos2, Rect, TextureHandle, TextureOptions, Vec2};
use imgcmp_core::Image;
use tracing::{debug, info, warn};

use crate::binding::{
    interact, ChangeFn, ComparisonSession, Control, ControlKind, ControlSurface, ParamValue,
    ParamValues, A, B,
};
use crate::canvas::PanelId;
use crate::compare::CompareParams;
use crate::render::RenderOptions;
use crate::scene::{EguiCanvas, SceneHandle};
use crate::state::ViewState;
use crate::{ViewError, ViewResult};

/// Zoom factor per scroll unit.
const SCROLL_ZOOM: f32 = 0.002;

/// Configuration for launching the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Square figure width, in figure units.
    pub figure_width: f32,
    /// Window title.
    pub title: String,
    /// Control values the window opens with.
    pub params: CompareParams,
    /// Verbosity level.
    pub verbose: u8,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            figure_width: RenderOptions::DEFAULT_FIGURE_WIDTH,
            title: "imgcmp".into(),
            params: CompareParams::default(),
            verbose: 0,
        }
    }
}

/// Control surface backed by an egui window.
pub struct EguiSurface {
    scene: SceneHandle,
    title: String,
    initial: ParamValues,
    fixed_labels: Vec<(String, String)>,
}

impl EguiSurface {
    /// Surface painting `scene`.
    pub fn new(scene: SceneHandle, title: impl Into<String>) -> Self {
        Self {
            scene,
            title: title.into(),
            initial: ParamValues::new(),
            fixed_labels: Vec::new(),
        }
    }

    /// Opens with `initial` instead of the bare control defaults.
    pub fn starting_from(mut self, initial: ParamValues) -> Self {
        self.initial = initial;
        self
    }

    /// Text shown next to a fixed control.
    pub fn with_fixed_label(mut self, name: &str, text: impl Into<String>) -> Self {
        self.fixed_labels.push((name.to_string(), text.into()));
        self
    }
}

impl ControlSurface for EguiSurface {
    fn run(&mut self, controls: &[Control], on_change: &mut ChangeFn<'_>) -> ViewResult<()> {
        let values = ParamValues::starting_values(controls, &self.initial);
        let error = on_change(&values).err().map(|e| e.to_string());

        let app = ComparisonApp {
            controls: controls.to_vec(),
            fixed_labels: self.fixed_labels.clone(),
            values,
            on_change,
            scene: self.scene.clone(),
            textures: Vec::new(),
            loaded: None,
            view: ViewState::default(),
            error,
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&self.title)
                .with_inner_size([1280.0, 860.0])
                .with_min_inner_size([480.0, 360.0]),
            ..Default::default()
        };

        debug!(title = %self.title, "Opening viewer window");
        eframe::run_native(&self.title, options, Box::new(move |_cc| Ok(Box::new(app))))
            .map_err(|e| ViewError::Canvas(format!("viewer: {e}")))
    }
}

/// Window state for one interactive session.
pub struct ComparisonApp<'a, 'f> {
    controls: Vec<Control>,
    fixed_labels: Vec<(String, String)>,
    values: ParamValues,
    on_change: &'a mut ChangeFn<'f>,
    scene: SceneHandle,
    /// Textures of the loaded scene, in show order.
    textures: Vec<(PanelId, TextureHandle)>,
    loaded: Option<u64>,
    view: ViewState,
    error: Option<String>,
}

impl ComparisonApp<'_, '_> {
    /// Draws the controls; applies at most one change per frame.
    fn draw_controls(&mut self, ctx: &egui::Context) {
        let mut changed: Option<(&'static str, ParamValue)> = None;
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for control in &self.controls {
                    let current = self.values.get(control.name);
                    let fixed = self
                        .fixed_labels
                        .iter()
                        .find(|(n, _)| n == control.name)
                        .map(|(_, t)| t.as_str());
                    if let Some(v) = control_widget(ui, control, current, fixed) {
                        changed.get_or_insert((control.name, v));
                    }
                    ui.separator();
                }
            });
        });

        if let Some((name, value)) = changed {
            debug!(control = name, %value, "Control changed");
            self.values.set(name, value);
            self.error = match (self.on_change)(&self.values) {
                Ok(()) => None,
                Err(e) => {
                    warn!("{e}");
                    Some(e.to_string())
                }
            };
        }
    }

    fn draw_hints(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("hints").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if !self.view.is_reset() {
                    ui.label(format!("{}%", (self.view.zoom * 100.0) as i32));
                    ui.separator();
                }
                ui.label("Scroll: Zoom | Drag: Pan | H: Home | Esc: Exit");
            });
        });
    }

    /// Uploads the scene's images when it changed since the last frame.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let scene = self.scene.borrow();
        if self.loaded == Some(scene.generation) {
            return;
        }
        self.textures = scene
            .shown
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let image = ColorImage::from_rgba_unmultiplied(p.size, &p.rgba);
                (p.panel, ctx.load_texture(format!("panel_{i}"), image, TextureOptions::NEAREST))
            })
            .collect();
        self.loaded = Some(scene.generation);
    }

    fn draw_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref err) = self.error {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(Color32::RED, err);
                });
                return;
            }

            let available = ui.available_size();
            let (rect, response) = ui.allocate_exact_size(available, egui::Sense::drag());
            let scene = self.scene.borrow();
            let figure = fit_rect(rect, scene.figure.width, scene.figure.height);
            let painter = ui.painter_at(rect);
            painter.rect_filled(figure, 0.0, Color32::WHITE);

            let mut hovered: Option<(Rect, bool)> = None;
            for (panel, texture) in &self.textures {
                let Some(region) = scene.region(*panel) else {
                    continue;
                };
                let cell = Rect::from_min_size(
                    figure.min + Vec2::new(region.x * figure.width(), region.y * figure.height()),
                    Vec2::new(region.width * figure.width(), region.height * figure.height()),
                );
                let [w, h] = texture.size();
                let target = fit_rect(cell, w as f32, h as f32);
                let linked = scene.is_linked(*panel);
                let uv = if linked {
                    let [u0, v0, u1, v1] = self.view.uv_rect();
                    Rect::from_min_max(Pos2::new(u0, v0), Pos2::new(u1, v1))
                } else {
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0))
                };
                painter.image(texture.id(), target, uv, Color32::WHITE);

                if response.hover_pos().is_some_and(|p| target.contains(p)) {
                    hovered = Some((target, linked));
                }
            }
            drop(scene);

            let Some((target, true)) = hovered else {
                return;
            };
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                if let Some(pos) = response.hover_pos() {
                    let local = (pos - target.min) / target.size();
                    let anchor = self.view.to_uv([local.x, local.y]);
                    self.view.zoom_by((scroll * SCROLL_ZOOM).exp(), anchor);
                }
            }
            if response.dragged() {
                let d = response.drag_delta() / target.size();
                self.view.pan_by([d.x, d.y]);
            }
        });
    }

    /// Returns `true` if the window should close.
    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::H) {
                self.view.reset();
            }
            i.key_pressed(egui::Key::Escape)
        })
    }
}

impl eframe::App for ComparisonApp<'_, '_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.handle_input(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        self.draw_controls(ctx);
        self.sync_textures(ctx);
        self.draw_hints(ctx);
        self.draw_canvas(ctx);
    }
}

/// One widget for `control`. Returns the new value if the user changed it.
fn control_widget(
    ui: &mut egui::Ui,
    control: &Control,
    current: Option<&ParamValue>,
    fixed: Option<&str>,
) -> Option<ParamValue> {
    match &control.kind {
        ControlKind::Fixed => {
            ui.label(format!("{}: {}", control.name, fixed.unwrap_or("fixed")));
            None
        }
        ControlKind::Choice { options, default } => {
            let selected = match current {
                Some(ParamValue::Choice(s)) => s.as_str(),
                _ => default.as_str(),
            };
            ui.label(format!("{}:", control.name));
            let mut picked = None;
            egui::ComboBox::from_id_salt(control.name)
                .width(140.0)
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for opt in options.iter().map(String::as_str) {
                        if ui.selectable_label(opt == selected, opt).clicked() && opt != selected {
                            picked = Some(ParamValue::Choice(opt.to_string()));
                        }
                    }
                });
            picked
        }
        ControlKind::Slider {
            min,
            max,
            step,
            default,
        } => {
            let mut v = match current {
                Some(ParamValue::Number(v)) => *v,
                _ => *default,
            };
            let response = ui.add(
                egui::Slider::new(&mut v, *min..=*max)
                    .step_by(*step)
                    .fixed_decimals(2)
                    .text(control.name),
            );
            response.changed().then_some(ParamValue::Number(v))
        }
        ControlKind::Toggle { default } => {
            let mut on = match current {
                Some(ParamValue::Flag(b)) => *b,
                _ => *default,
            };
            ui.checkbox(&mut on, control.name)
                .changed()
                .then_some(ParamValue::Flag(on))
        }
    }
}

/// Largest rect with proportions `w:h`, centered in `outer`.
fn fit_rect(outer: Rect, w: f32, h: f32) -> Rect {
    if w <= 0.0 || h <= 0.0 {
        return Rect::from_center_size(outer.center(), Vec2::ZERO);
    }
    let scale = (outer.width() / w).min(outer.height() / h);
    Rect::from_center_size(outer.center(), Vec2::new(w * scale, h * scale))
}

/// Short description of a source for its fixed label.
fn describe(image: &Image) -> String {
    image.shape().to_string()
}

/// Opens the interactive viewer comparing `a` and `b`.
///
/// Blocks until the window closes.
///
/// # Errors
///
/// Fails if `config.params` holds a value the controls do not offer (such
/// as the `square` layout), or if the window cannot be created.
pub fn run_viewer(a: Image, b: Image, config: ViewerConfig) -> ViewResult<()> {
    info!(a = %a.shape(), b = %b.shape(), "Starting viewer");
    let (mut surface, mut session) = prepare(a, b, &config)?;
    interact(&mut surface, &mut session)?;

    if config.verbose > 0 {
        info!(invocations = session.invocations(), "Viewer closed");
    }
    Ok(())
}

/// Surface and session for `config`, checked before any window opens.
fn prepare(
    a: Image,
    b: Image,
    config: &ViewerConfig,
) -> ViewResult<(EguiSurface, ComparisonSession<EguiCanvas>)> {
    let scene = SceneHandle::default();
    let labels = [(A, describe(&a)), (B, describe(&b))];

    let options = RenderOptions::default().with_figure_width(config.figure_width);
    let session = ComparisonSession::with_options(a, b, EguiCanvas::new(scene.clone()), options);
    let initial = ParamValues::from(&config.params).accepted_by(&session.controls())?;

    let surface = labels.into_iter().fold(
        EguiSurface::new(scene, &config.title).starting_from(initial),
        |surface, (name, text)| surface.with_fixed_label(name, text),
    );
    Ok((surface, session))
}
