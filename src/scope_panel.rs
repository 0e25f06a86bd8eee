use crate::{
    config::Config,
    time_axis::{KeyAction, TimeAxis},
};
use egui::*;
use log::debug;

impl KeyAction {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            // `=` shares the `+` key on most layouts
            Key::Plus | Key::Equals => Some(KeyAction::ZoomInFine),
            Key::Minus => Some(KeyAction::ZoomOutFine),
            Key::R => Some(KeyAction::Reset),
            Key::Q => Some(KeyAction::ZoomInCoarse),
            Key::A => Some(KeyAction::ZoomOutCoarse),
            _ => None,
        }
    }
}

/// The waveform view.
pub struct Scope {
    axis: TimeAxis,

    /// pixels for the current scale
    points: Vec<(i32, i32)>,

    config: Config,
}

impl Scope {
    pub fn new(axis: TimeAxis, config: Config) -> Self {
        let points = axis.points();
        debug!("{} points", points.len());
        Scope {
            axis,
            points,
            config,
        }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// change scale and recompute the points
    pub fn apply(&mut self, action: KeyAction) {
        self.axis.apply(action);
        self.points = self.axis.points();
        debug!("{} points", self.points.len());
    }

    /// main panel
    pub fn ui_content(&mut self, ui: &mut Ui) -> egui::Response {
        let actions: Vec<KeyAction> = ui.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    Event::Key {
                        key, pressed: true, ..
                    } => KeyAction::from_key(*key),
                    _ => None,
                })
                .collect()
        });
        for action in actions {
            self.apply(action);
        }

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());

        let to_screen = emath::RectTransform::from_to(
            Rect::from_min_size(Pos2::ZERO, response.rect.size()),
            response.rect,
        );

        painter.rect_filled(response.rect, Rounding::ZERO, self.config.background);

        // one pixel per point
        let mut mesh = Mesh::default();
        for &(x, y) in &self.points {
            let min = to_screen * pos2(x as f32, y as f32);
            mesh.add_colored_rect(
                Rect::from_min_size(min, Vec2::splat(1.0)),
                self.config.point_color,
            );
        }
        painter.add(Shape::mesh(mesh));

        // scale line and labels
        let width = self.axis.width() as f32;
        let axis_y = self.axis.axis_y() as f32;
        painter.line_segment(
            [
                to_screen * pos2(0.0, axis_y),
                to_screen * pos2(width, axis_y),
            ],
            self.config.stroke_axis,
        );
        painter.text(
            to_screen * pos2(0.0, axis_y),
            Align2::LEFT_TOP,
            "0",
            self.config.label_font.clone(),
            self.config.label_color,
        );
        painter.text(
            to_screen * pos2(width, axis_y),
            Align2::RIGHT_TOP,
            self.axis.end_label(),
            self.config.label_font.clone(),
            self.config.label_color,
        );

        response
    }
}
