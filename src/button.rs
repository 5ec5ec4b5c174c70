//! Pill-shaped push button drawn from primitive shapes.
//!
//! The button keeps its own visual state between frames. Every transition
//! (hover, leave, disable, relabel) throws away the shape list and rebuilds it
//! from scratch with [`AnimatedButton::render`].

use eframe::egui::{self, CursorIcon, Response, Sense, Ui, Widget};
use eframe::emath::Align2;
use eframe::epaint::{pos2, vec2, Color32, FontId, Rect, Shape, Vec2};

use crate::palette::{SHADOW, TEXT_MUTED};
use crate::shapes;

const SHADOW_OFFSET: f32 = 4.0;

pub type Action = Box<dyn FnMut() + Send>;

pub struct AnimatedButton {
    label: String,
    action: Option<Action>,
    size: Vec2,
    base: Color32,
    hover: Color32,
    text_color: Color32,
    font: FontId,
    disabled: bool,
    hovered: bool,
    current: Color32,
    shapes: Vec<Shape>,
}

impl AnimatedButton {
    pub fn new(
        label: impl Into<String>,
        action: Option<Action>,
        size: Vec2,
        base: Color32,
        hover: Color32,
        text_color: Color32,
        font: FontId,
    ) -> Self {
        let mut button = Self {
            label: label.into(),
            action,
            size,
            base,
            hover,
            text_color,
            font,
            disabled: false,
            hovered: false,
            current: base,
            shapes: Vec::new(),
        };
        button.render(base);
        button
    }

    /// Rebuild the shadow and pill body in `color`, relative to the top-left corner
    pub fn render(&mut self, color: Color32) {
        let (w, h) = (self.size.x, self.size.y);
        let r = h / 2.0;
        self.current = color;
        self.shapes.clear();
        self.shapes.push(shapes::ellipse(
            Rect::from_min_max(
                pos2(SHADOW_OFFSET, SHADOW_OFFSET),
                pos2(w - SHADOW_OFFSET, h + SHADOW_OFFSET),
            ),
            SHADOW,
        ));
        self.shapes.push(Shape::circle_filled(pos2(r, r), r, color));
        self.shapes.push(Shape::circle_filled(pos2(w - r, r), r, color));
        self.shapes.push(Shape::rect_filled(
            Rect::from_min_max(pos2(r, 0.0), pos2(w - r, h)),
            0.0,
            color,
        ));
    }

    pub fn on_enter(&mut self) {
        if !self.disabled {
            self.render(self.hover);
        }
    }

    pub fn on_leave(&mut self) {
        if !self.disabled {
            self.render(self.base);
        }
    }

    /// Runs the bound action. Returns whether it actually ran.
    pub fn on_click(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        match self.action.as_mut() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    pub fn set_disabled(&mut self, disabled: bool, label: Option<&str>) {
        self.disabled = disabled;
        if let Some(label) = label {
            self.label = label.to_owned();
        }
        self.render(self.resting_color());
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.render(self.resting_color());
    }

    /// New base and text colors, picked up by the next render
    pub fn restyle(&mut self, base: Color32, text_color: Color32) {
        self.base = base;
        self.text_color = text_color;
    }

    fn resting_color(&self) -> Color32 {
        if self.disabled {
            TEXT_MUTED
        } else {
            self.base
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn current_color(&self) -> Color32 {
        self.current
    }

    pub fn label_color(&self) -> Color32 {
        if self.disabled {
            TEXT_MUTED
        } else {
            self.text_color
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn paint(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect.expand2(vec2(0.0, SHADOW_OFFSET)));
        let offset = rect.min.to_vec2();
        painter.extend(self.shapes.iter().cloned().map(|mut shape| {
            shape.translate(offset);
            shape
        }));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            &self.label,
            self.font.clone(),
            self.label_color(),
        );
    }
}

impl Widget for &mut AnimatedButton {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        let hovered = response.hovered();
        if hovered != self.hovered {
            self.hovered = hovered;
            if hovered {
                self.on_enter();
            } else {
                self.on_leave();
            }
        }
        if response.clicked() {
            self.on_click();
        }
        if hovered && !self.disabled {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect);
        }
        response
    }
}

impl std::fmt::Debug for AnimatedButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedButton")
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// Default font for button labels
pub fn label_font() -> FontId {
    FontId::new(14.0, egui::FontFamily::Proportional)
}
