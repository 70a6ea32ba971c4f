use eframe::egui;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{DisplaySettings, Settings};
use crate::generator::{ApparatusGenerator, LayoutGenerator};
use crate::render::{self, CanvasLayout, raster};
use crate::session::Session;
use crate::theme::Theme;

const SNAPSHOT_FILE: &str = "apparatus_assembly.png";
const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

struct AssemblyApp {
    session: Session<ApparatusGenerator, StdRng>,
    theme: Theme,
    display: DisplaySettings,
    frame_duration: Duration,
    last_tick: Option<Instant>,
    snapshot_path: PathBuf,
    toast: Option<Toast>,
}

impl AssemblyApp {
    fn new(session: Session<ApparatusGenerator, StdRng>, display: DisplaySettings) -> Self {
        let theme = Theme::from_name(&display.theme);
        let frame_duration = Duration::from_secs_f64(1.0 / display.frame_rate as f64);
        Self {
            session,
            theme,
            display,
            frame_duration,
            last_tick: None,
            snapshot_path: PathBuf::from(SNAPSHOT_FILE),
            toast: None,
        }
    }

    /// Advance playback when a display tick is due.
    fn tick(&mut self) {
        let due = self
            .last_tick
            .is_none_or(|last| last.elapsed() >= self.frame_duration);
        if due {
            self.session.advance();
            self.last_tick = Some(Instant::now());
        }
    }

    fn toggle_symmetry(&mut self) {
        let symmetric = self.session.toggle_symmetry();
        let label = if symmetric { "symmetric" } else { "asymmetric" };
        self.toast = Some(Toast::new(format!("Next run: {label} assembly")));
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn save_snapshot(&mut self, image: &egui::ColorImage) {
        let message = match raster::save_color_image(image, &self.snapshot_path) {
            Ok(()) => {
                tracing::info!(path = %self.snapshot_path.display(), "snapshot saved");
                format!("Saved {}", self.snapshot_path.display())
            }
            Err(e) => {
                tracing::warn!("{e:#}");
                format!("{e}")
            }
        };
        self.toast = Some(Toast::new(message));
    }

    fn draw_toast(&self, ui: &egui::Ui, rect: egui::Rect) {
        if let Some(toast) = &self.toast {
            let color = Theme::with_opacity(self.theme.toast, toast.opacity());
            ui.painter().text(
                egui::pos2(rect.center().x, rect.bottom() - 16.0),
                egui::Align2::CENTER_BOTTOM,
                &toast.message,
                egui::FontId::proportional(18.0),
                color,
            );
        }
    }
}

impl eframe::App for AssemblyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut screenshots: Vec<Arc<egui::ColorImage>> = Vec::new();
        let mut toggle_symmetry = false;
        let mut toggle_theme = false;
        let mut regenerate = false;

        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    screenshots.push(image.clone());
                }
            }

            if i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::S) {
                toggle_symmetry = true;
            }
            if i.key_pressed(egui::Key::P) {
                viewport_cmds.push(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            }
            if i.key_pressed(egui::Key::D) {
                toggle_theme = true;
            }
            if i.key_pressed(egui::Key::R) {
                regenerate = true;
            }
        });

        for image in &screenshots {
            self.save_snapshot(image);
        }
        if toggle_symmetry {
            self.toggle_symmetry();
        }
        if toggle_theme {
            self.toggle_theme();
        }
        if regenerate {
            self.session.regenerate();
            tracing::info!(
                run = self.session.runs(),
                noop_steps = self.session.summary().noop_steps,
                "apparatus regenerated"
            );
        }
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        self.tick();
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let layout = CanvasLayout::centered(
                    rect,
                    self.session.generator().dimensions(),
                    self.display.scale,
                );
                let sprites = render::frame_sprites(
                    self.session.apparatus(),
                    self.session.frame(),
                    &layout,
                    &self.theme,
                );
                let corner_radius = self.session.generator().options().roundness * layout.scale;
                render::paint_frame(ui.painter(), rect, &sprites, &self.theme, corner_radius);
                self.draw_toast(ui, rect);
            });

        ctx.request_repaint_after(self.frame_duration);
    }
}

pub fn run(settings: Settings, fullscreen: bool, seed: Option<u64>) -> anyhow::Result<()> {
    let generator = settings.build_generator()?;
    let rng = crate::commands::seeded_rng(seed);
    let session = Session::new(generator, rng, settings.assembly.clone());
    tracing::info!(
        parts = session.apparatus().len(),
        pairs = session.apparatus().pair_count(),
        symmetric = session.settings().symmetric,
        "first apparatus assembled"
    );

    let display = settings.display;
    let viewport = if fullscreen {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title("Apparatus")
    } else {
        egui::ViewportBuilder::default()
            .with_inner_size([display.width as f32, display.height as f32])
            .with_title("Apparatus")
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Apparatus",
        options,
        Box::new(move |_cc| Ok(Box::new(AssemblyApp::new(session, display)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
