use eframe::egui;

use monoview::engine::pipeline::Engine;
use monoview::render::layout::VSTEP;
use monoview::render::viewport::{Canvas, Viewport};

const WIDTH: i32 = 1000;
const HEIGHT: i32 = 800;

/// Frame buffer bridging the viewport to the egui painter.
///
/// The viewport redraws only on load and on accepted scrolls; egui repaints
/// every frame. The buffer holds the last emitted draw pass in between.
#[derive(Default)]
struct GlyphFrame {
    glyphs: Vec<(i32, i32, char)>,
}

impl Canvas for GlyphFrame {
    fn clear(&mut self) {
        self.glyphs.clear();
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: char) {
        self.glyphs.push((x, y, glyph));
    }
}

struct ViewerApp {
    viewport: Viewport,
    frame: GlyphFrame,
    error: Option<String>,
}

impl ViewerApp {
    /// Load the target once, synchronously, before the first frame.
    fn new(url: &str) -> Self {
        let mut frame = GlyphFrame::default();
        let mut viewport = Viewport::new(WIDTH, HEIGHT, VSTEP);
        let engine = Engine::new(viewport.width());

        let error = match engine.load(url) {
            Ok(page) => {
                viewport.on_load(page.display_list, &mut frame);
                None
            }
            Err(e) => {
                log::error!("load failed: {e}");
                Some(e.to_string())
            }
        };

        Self {
            viewport,
            frame,
            error,
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref error) = self.error {
                ui.colored_label(egui::Color32::RED, error);
                return;
            }

            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.5 {
                self.viewport.on_scroll(scroll as i32, &mut self.frame);
            }

            let origin = ui.min_rect().left_top();
            let painter = ui.painter();
            for &(x, y, glyph) in &self.frame.glyphs {
                if glyph.is_control() {
                    continue;
                }
                painter.text(
                    origin + egui::vec2(x as f32, y as f32),
                    egui::Align2::CENTER_CENTER,
                    glyph,
                    egui::FontId::monospace(14.0),
                    ui.visuals().text_color(),
                );
            }
        });
    }
}

fn main() {
    env_logger::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("https://example.org"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WIDTH as f32, HEIGHT as f32]),
        ..Default::default()
    };

    eframe::run_native(
        "monoview",
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(&url)))),
    )
    .expect("Failed to start monoview");
}
