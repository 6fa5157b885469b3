use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, vec2};

use super::render::Theme;

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct CanvasView {
    pub(in crate::app) rect: Rect,
    pub(in crate::app) pan: Vec2,
    pub(in crate::app) scale: f32,
    pub(in crate::app) layout_center: Vec2,
}

impl CanvasView {
    pub(in crate::app) fn fit(rect: Rect, layout_size: Vec2, pan: Vec2, zoom: f32) -> Self {
        let fit = (rect.width() / layout_size.x.max(1.0))
            .min(rect.height() / layout_size.y.max(1.0))
            .max(0.01);
        Self {
            rect,
            pan,
            scale: fit * zoom,
            layout_center: layout_size * 0.5,
        }
    }

    pub(in crate::app) fn to_screen(self, world: Vec2) -> Pos2 {
        self.rect.center() + self.pan + (world - self.layout_center) * self.scale
    }

    pub(in crate::app) fn to_world(self, screen: Pos2) -> Vec2 {
        (screen - self.rect.center() - self.pan) / self.scale + self.layout_center
    }
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * amount) as u8;
    Color32::from_rgba_unmultiplied(
        mix(base.r(), overlay.r()),
        mix(base.g(), overlay.g()),
        mix(base.b(), overlay.b()),
        mix(base.a(), overlay.a()),
    )
}

pub(super) fn fade_color(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, view: CanvasView, theme: &Theme) {
    painter.rect_filled(view.rect, 0.0, theme.background);

    let step = (50.0 * view.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = view.to_screen(Vec2::ZERO);
    let stroke = Stroke::new(1.0, theme.grid);

    let mut x = view.rect.left() + (origin.x - view.rect.left()).rem_euclid(step);
    while x < view.rect.right() {
        painter.line_segment(
            [Pos2::new(x, view.rect.top()), Pos2::new(x, view.rect.bottom())],
            stroke,
        );
        x += step;
    }

    let mut y = view.rect.top() + (origin.y - view.rect.top()).rem_euclid(step);
    while y < view.rect.bottom() {
        painter.line_segment(
            [Pos2::new(view.rect.left(), y), Pos2::new(view.rect.right(), y)],
            stroke,
        );
        y += step;
    }
}

pub(super) fn draw_layout_bounds(painter: &Painter, view: CanvasView, theme: &Theme) {
    let top_left = view.to_screen(Vec2::ZERO);
    let bottom_right = view.to_screen(view.layout_center * 2.0);
    painter.rect_stroke(
        Rect::from_two_pos(top_left, bottom_right),
        4.0,
        Stroke::new(1.0, fade_color(theme.link, 0.5)),
        eframe::egui::StrokeKind::Inside,
    );
    let center = view.to_screen(view.layout_center);
    let cross = Stroke::new(1.0, fade_color(theme.link, 0.35));
    painter.line_segment([center - vec2(6.0, 0.0), center + vec2(6.0, 0.0)], cross);
    painter.line_segment([center - vec2(0.0, 6.0), center + vec2(0.0, 6.0)], cross);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_and_world_round_trip_through_pan_and_zoom() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), vec2(1600.0, 900.0));
        let view = CanvasView::fit(rect, vec2(800.0, 600.0), vec2(30.0, -12.0), 1.7);
        let world = vec2(123.0, 456.0);
        let back = view.to_world(view.to_screen(world));
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn layout_center_maps_to_rect_center_without_pan() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0));
        let view = CanvasView::fit(rect, vec2(800.0, 600.0), Vec2::ZERO, 1.0);
        assert_eq!(view.scale, 0.5);
        assert_eq!(view.to_screen(vec2(400.0, 300.0)), rect.center());
    }

    #[test]
    fn blend_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend_color(a, b, 0.0), a);
        assert_eq!(blend_color(a, b, 1.0), b);
    }
}
