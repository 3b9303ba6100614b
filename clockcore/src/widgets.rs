//! Custom widgets — black outlines, color swatches

use egui::{Color32, Response, Sense, Stroke, Ui, Widget};

use crate::theme::{contrast_text_color, ClockColors};

/// Action returned by window control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    None,
    Close,
    Minimize,
}

impl WindowAction {
    /// The viewport command carrying out this action, if any.
    pub fn viewport_command(self) -> Option<egui::ViewportCommand> {
        match self {
            WindowAction::None => None,
            WindowAction::Close => Some(egui::ViewportCommand::Close),
            WindowAction::Minimize => Some(egui::ViewportCommand::Minimized(true)),
        }
    }
}

/// Small square button; `draw` paints the glyph inside the given rect.
fn control_box(ui: &mut Ui, draw: impl FnOnce(&egui::Painter, egui::Rect, Stroke)) -> Response {
    let (rect, resp) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::click());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let (fill, ink) = if resp.hovered() {
            (ClockColors::BLACK, ClockColors::WHITE)
        } else {
            (ClockColors::WHITE, ClockColors::BLACK)
        };
        painter.rect_filled(rect, 0.0, fill);
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, ClockColors::BLACK));
        draw(painter, rect.shrink(3.0), Stroke::new(1.0, ink));
    }
    resp
}

/// Close and minimize buttons for the left end of a menu bar.
pub fn window_control_buttons(ui: &mut Ui) -> WindowAction {
    let mut action = WindowAction::None;

    let close = control_box(ui, |painter, r, stroke| {
        painter.line_segment([r.left_top(), r.right_bottom()], stroke);
        painter.line_segment([r.right_top(), r.left_bottom()], stroke);
    });
    if close.clicked() {
        action = WindowAction::Close;
    }

    ui.add_space(2.0);

    let minimize = control_box(ui, |painter, r, stroke| {
        painter.hline(r.x_range(), r.center().y, stroke);
    });
    if minimize.clicked() {
        action = WindowAction::Minimize;
    }

    ui.add_space(4.0);
    ui.separator();

    action
}

/// A button filled with the color it stands for.
///
/// The caption is drawn in whichever of black or white reads better on the
/// fill, so it stays legible for any chosen color.
pub struct ColorSwatch<'a> {
    text: &'a str,
    color: Color32,
    min_width: f32,
}

impl<'a> ColorSwatch<'a> {
    pub fn new(text: &'a str, color: Color32) -> Self {
        Self {
            text,
            color,
            min_width: 120.0,
        }
    }

    pub fn min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width;
        self
    }
}

impl<'a> Widget for ColorSwatch<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let font = egui::TextStyle::Button.resolve(ui.style());
        let text_width = ui.fonts(|f| {
            f.layout_no_wrap(self.text.to_owned(), font.clone(), ClockColors::BLACK)
                .size()
                .x
        });
        let desired = egui::vec2(
            (text_width + 32.0).max(self.min_width),
            ui.spacing().interact_size.y + 4.0,
        );
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, self.color);
            let outline = if response.hovered() { 2.0 } else { 1.0 };
            painter.rect_stroke(rect, 0.0, Stroke::new(outline, ClockColors::BLACK));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.text,
                font,
                contrast_text_color(self.color),
            );
        }

        response
    }
}

/// Status bar: white bg, 1px black border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(ClockColors::WHITE)
        .stroke(Stroke::new(1.0, ClockColors::BLACK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}
