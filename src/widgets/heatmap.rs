use iced::{
    Color, Point, Rectangle, Renderer, Size, Theme, mouse,
    widget::canvas::{self, Action, Path, Stroke, Text},
};

use crate::{
    style::Palette,
    trends::{TrendsSummary, WEEKDAYS},
};

// Interaction event to avoid circular dependency on Message
#[derive(Debug, Clone, Copy)]
pub enum Interaction {
    Hovered,
}

/// Weekday x hour availability grid for a loaded trends payload.
pub struct AvailabilityHeatmap<'a> {
    pub summary: &'a TrendsSummary,
    pub palette: Palette,
    pub cache: &'a canvas::Cache,
    pub tooltip_cache: &'a canvas::Cache,
}

impl<'a> canvas::Program<Interaction> for AvailabilityHeatmap<'a> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Interaction>> {
        if let iced::Event::Mouse(mouse::Event::CursorMoved { .. }) = event {
            if cursor.position_in(bounds).is_some() {
                return Some(Action::publish(Interaction::Hovered));
            }
        }
        None
    }

    fn draw(
        &self,
        _: &Self::State,
        renderer: &Renderer,
        _: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let palette = self.palette;
        let pad_left = 34.0;
        let pad_bottom = 20.0;
        let w = bounds.width - pad_left;
        let h = bounds.height - pad_bottom;
        let cell_w = w / 24.0;
        let cell_h = h / 7.0;

        // 1. Draw the Heatmap Grid (Cached)
        let grid_geo = self.cache.draw(renderer, bounds.size(), |frame| {
            for (d_idx, day) in WEEKDAYS.iter().enumerate() {
                frame.fill_text(Text {
                    content: day.to_string(),
                    position: Point::new(0.0, d_idx as f32 * cell_h + cell_h / 2.0),
                    color: palette.text_muted,
                    size: 10.0.into(),
                    align_y: iced::alignment::Vertical::Center,
                    ..Default::default()
                });

                for hour in 0..24u8 {
                    let x = pad_left + hour as f32 * cell_w;
                    let y = d_idx as f32 * cell_h;

                    let cell = self.summary.cell(d_idx as u8, hour);
                    let color = availability_color(&palette, cell.and_then(|c| c.availability));

                    let bg = Path::rounded_rectangle(
                        Point::new(x + 1.0, y + 1.0),
                        Size::new(cell_w - 2.0, cell_h - 2.0),
                        3.0.into(),
                    );
                    frame.fill(&bg, color);

                    if cell.is_some_and(|c| c.restricted) {
                        let inset = Path::rounded_rectangle(
                            Point::new(x + 3.0, y + 3.0),
                            Size::new(cell_w - 6.0, cell_h - 6.0),
                            2.0.into(),
                        );
                        frame.stroke(
                            &inset,
                            Stroke::default()
                                .with_color(palette.bg_dark)
                                .with_width(1.5),
                        );
                    }

                    // Hour Labels (Bottom)
                    if d_idx == 6 && hour % 3 == 0 {
                        frame.fill_text(Text {
                            content: format!("{:02}", hour),
                            position: Point::new(x + cell_w / 2.0, h + 10.0),
                            color: palette.text_muted,
                            size: 10.0.into(),
                            align_x: iced::alignment::Horizontal::Center.into(),
                            align_y: iced::alignment::Vertical::Center,
                            ..Default::default()
                        });
                    }
                }
            }
        });

        // 2. Draw Tooltip (separate cache, cleared every frame)
        self.tooltip_cache.clear();

        let overlay_geo = self.tooltip_cache.draw(renderer, bounds.size(), |frame| {
            let Some(cursor_pos) = cursor.position_in(bounds) else {
                return;
            };
            if cursor_pos.x <= pad_left || cursor_pos.y >= h {
                return;
            }
            let col = ((cursor_pos.x - pad_left) / cell_w).floor() as i64;
            let row = (cursor_pos.y / cell_h).floor() as i64;
            if !(0..24).contains(&col) || !(0..7).contains(&row) {
                return;
            }

            let label = tooltip_label(self.summary, row as u8, col as u8);
            let width = label.len() as f32 * 6.5 + 16.0;
            let pos = Point::new(
                (cursor_pos.x + 10.0).min(bounds.width - width).max(0.0),
                (cursor_pos.y - 28.0).max(0.0),
            );

            let tooltip_bg = Path::rounded_rectangle(pos, Size::new(width, 24.0), 4.0.into());
            frame.fill(&tooltip_bg, palette.bg_card);
            frame.stroke(
                &tooltip_bg,
                Stroke::default()
                    .with_color(palette.stroke_dim)
                    .with_width(1.0),
            );
            frame.fill_text(Text {
                content: label,
                position: Point::new(pos.x + width / 2.0, pos.y + 12.0),
                color: palette.text_bright,
                size: 12.0.into(),
                align_x: iced::alignment::Horizontal::Center.into(),
                align_y: iced::alignment::Vertical::Center,
                ..Default::default()
            });
        });

        vec![grid_geo, overlay_geo]
    }
}

/// e.g. `Mon 08:00 - 25.0% (n=8) - restricted`
fn tooltip_label(summary: &TrendsSummary, dow: u8, hour: u8) -> String {
    let cell = summary.cell(dow, hour);
    let value = match cell.and_then(|c| c.availability) {
        Some(a) => format!("{:.1}%", a * 100.0),
        None => "Unknown".to_string(),
    };
    let mut label = format!(
        "{} {:02}:00 - {} (n={})",
        WEEKDAYS[dow as usize],
        hour,
        value,
        cell.map_or(0, |c| c.n)
    );
    if cell.is_some_and(|c| c.restricted) {
        label.push_str(" - restricted");
    }
    label
}

/// 0 -> red, 0.5 -> yellow, 1 -> green. `None` is the no-data grey.
fn availability_color(palette: &Palette, availability: Option<f64>) -> Color {
    let Some(a) = availability else {
        return palette.avail_unknown;
    };
    let a = a.clamp(0.0, 1.0);
    if a < 0.5 {
        interpolate_color(palette.avail_low, palette.avail_mid, (a / 0.5) as f32)
    } else {
        interpolate_color(palette.avail_mid, palette.avail_high, ((a - 0.5) / 0.5) as f32)
    }
}

fn interpolate_color(c1: Color, c2: Color, factor: f32) -> Color {
    Color::from_rgb(
        c1.r + (c2.r - c1.r) * factor,
        c1.g + (c2.g - c1.g) * factor,
        c1.b + (c2.b - c1.b) * factor,
    )
}
