//! Dashboard application entry point

use eframe::egui;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::capture::{frame::ScanImage, load_photo};
use crate::config::{self, AppConfig};
use crate::dashboard::components::render_sidebar;
use crate::dashboard::state::{DashboardState, DashboardView, ScanCommand, ScanStatus};
use crate::dashboard::theme;
use crate::dashboard::views::{render_scan_view, render_settings_view, ScanPanel};
use crate::grid::GridData;
use crate::render::GridStyle;
use crate::scan::{ScanOutcome, ScanWorker};
use crate::vision::{MapperConfig, RecognitionMapper};

/// The main dashboard application
pub struct DashboardApp {
    /// User settings
    config: AppConfig,
    /// Where settings are auto-saved, if anywhere
    config_path: Option<PathBuf>,
    /// Dashboard-specific state
    dashboard_state: DashboardState,
    /// Whether theme has been applied
    theme_applied: bool,
    /// Recognition worker
    worker: ScanWorker,
    /// Drawing style derived from `config.grid`
    style: GridStyle,
    /// Grid currently displayed, replaced only when a scan completes
    grid: GridData,
    /// Recognized-text summary of the last scan
    summary: String,
    status: ScanStatus,
    /// Preview of the photo being scanned
    photo: Option<egui::TextureHandle>,
}

impl DashboardApp {
    /// Create a new dashboard application
    pub fn new(
        config: AppConfig,
        config_path: Option<PathBuf>,
        worker: ScanWorker,
        photo: Option<PathBuf>,
    ) -> Self {
        let style = GridStyle::from(&config.grid);
        let dashboard_state = DashboardState::with_photo(photo.as_deref());

        Self {
            config,
            config_path,
            dashboard_state,
            theme_applied: false,
            worker,
            style,
            grid: GridData::default(),
            summary: String::new(),
            status: ScanStatus::Idle,
            photo: None,
        }
    }

    /// Create eframe options for the dashboard window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1100.0, 720.0])
                .with_min_inner_size([700.0, 500.0])
                .with_title("Sudoku Scanner"),
            ..Default::default()
        }
    }

    /// Load the photo in the path field and queue it on the worker
    fn start_scan(&mut self, ctx: &egui::Context) {
        let path = PathBuf::from(self.dashboard_state.scan.photo_path.trim());

        let image = match load_photo(&path) {
            Ok(image) => image,
            Err(e) => {
                warn!("Cannot scan {:?}: {}", path, e);
                self.status = ScanStatus::Failed(e.to_string());
                return;
            }
        };

        self.photo = Some(preview_texture(ctx, &image));

        let mapper = RecognitionMapper::new(MapperConfig::from(&self.config.recognition));
        match self.worker.submit(image, mapper) {
            Ok(id) => {
                info!("Scanning {:?} as {}", path, id);
                self.status = ScanStatus::Scanning;
                self.config.general.last_photo = Some(path);
                self.save_config();
            }
            Err(e) => {
                warn!("Scan rejected: {}", e);
                self.status = ScanStatus::Failed(e.to_string());
            }
        }
    }

    /// Swap in the result of a finished scan
    fn collect_scan(&mut self) {
        if let Some(outcome) = self.worker.try_complete() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: ScanOutcome) {
        self.status = match &outcome.error {
            Some(message) => ScanStatus::Failed(message.clone()),
            None => ScanStatus::Done {
                entries: outcome.grid.len(),
                regions: outcome.observation_count,
                elapsed_ms: outcome.elapsed_ms,
            },
        };
        self.grid = outcome.grid;
        self.summary = outcome.summary;
    }

    /// Process the command recorded by the scan view this frame
    fn process_scan_command(&mut self, ctx: &egui::Context) {
        match self.dashboard_state.scan.command.take() {
            Some(ScanCommand::Scan) => self.start_scan(ctx),
            Some(ScanCommand::Solve) => {
                info!("Solve requested for {} digits; no solver is available", self.grid.len());
            }
            None => {}
        }
    }

    /// Persist settings edited in the settings view
    fn process_settings_changes(&mut self) {
        if self.dashboard_state.settings.has_unsaved_changes {
            self.style = GridStyle::from(&self.config.grid);
            self.save_config();
            self.dashboard_state.settings.has_unsaved_changes = false;
        }
    }

    fn save_config(&self) {
        if let Some(path) = &self.config_path {
            if let Err(e) = config::save_config(&self.config, path) {
                error!("Failed to save config: {:#}", e);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.collect_scan();

        // Keep polling while the worker is busy
        if self.worker.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                render_sidebar(ui, &mut self.dashboard_state.current_view, &self.status);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(24.0).show(ui, |ui| {
                match self.dashboard_state.current_view {
                    DashboardView::Scan => {
                        let panel = ScanPanel {
                            grid: &self.grid,
                            style: &self.style,
                            inset: self.config.grid.inset,
                            summary: &self.summary,
                            status: &self.status,
                            photo: self.photo.as_ref(),
                            busy: self.worker.is_busy(),
                            recognizer: self.worker.recognizer_name(),
                        };
                        render_scan_view(ui, &mut self.dashboard_state.scan, &panel);
                    }
                    DashboardView::Settings => {
                        render_settings_view(
                            ui,
                            &mut self.dashboard_state.settings,
                            &mut self.config,
                        );
                    }
                }
            });
        });

        self.process_scan_command(ctx);
        self.process_settings_changes();
    }
}

/// Upload a photo as an egui texture for the preview pane
fn preview_texture(ctx: &egui::Context, image: &ScanImage) -> egui::TextureHandle {
    let (width, height) = image.dimensions();
    let size = [width as usize, height as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.data);
    ctx.load_texture("scan-photo", color_image, egui::TextureOptions::LINEAR)
}

/// Run the dashboard application
pub fn run_dashboard(
    config: AppConfig,
    config_path: Option<PathBuf>,
    worker: ScanWorker,
    photo: Option<PathBuf>,
) -> Result<(), eframe::Error> {
    let app = DashboardApp::new(config, config_path, worker, photo);
    eframe::run_native(
        "Sudoku Scanner",
        DashboardApp::options(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
