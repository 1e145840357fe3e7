//! # Measure Indicator Widget
//!
//! One cell per beat of the current measure, with the beat just played lit
//! up. The first cell is the downbeat and lights in a different colour.

use iced::widget::canvas::{self, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme, mouse};

/// Horizontal gap between cells, in pixels.
const CELL_GAP: f32 = 6.0;

const IDLE: Color = Color { r: 0.25, g: 0.25, b: 0.25, a: 1.0 };
const DOWNBEAT: Color = Color { r: 0.89, g: 0.35, b: 0.25, a: 1.0 };
const OFFBEAT: Color = Color { r: 0.20, g: 0.86, b: 0.60, a: 1.0 };

pub struct MeasureIndicator {
    beats_per_measure: u32,
    /// Beat currently shown on the counter, 1-based; 0 before the first beat.
    beat: u32,
    running: bool,
}

impl MeasureIndicator {
    pub fn new(beats_per_measure: u32, beat: u32, running: bool) -> Self {
        Self {
            beats_per_measure,
            beat,
            running,
        }
    }

    pub fn view(self) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(24.0)),
        )
        .into()
    }

    /// Index of the lit cell, if any.
    fn lit_cell(&self) -> Option<u32> {
        (self.running && (1..=self.beats_per_measure).contains(&self.beat)).then(|| self.beat - 1)
    }
}

/// Left edge and width of every cell across `width` pixels.
fn cell_layout(width: f32, cells: u32) -> Vec<(f32, f32)> {
    if cells == 0 {
        return Vec::new();
    }
    let gaps = CELL_GAP * (cells - 1) as f32;
    let cell_width = ((width - gaps) / cells as f32).max(1.0);
    (0..cells)
        .map(|i| (i as f32 * (cell_width + CELL_GAP), cell_width))
        .collect()
}

impl<Message> canvas::Program<Message> for MeasureIndicator {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let lit = self.lit_cell();

        for (i, (x, width)) in cell_layout(bounds.width, self.beats_per_measure)
            .into_iter()
            .enumerate()
        {
            let cell = Path::rectangle(Point::new(x, 0.0), Size::new(width, bounds.height));
            let color = match lit {
                Some(index) if index as usize == i && i == 0 => DOWNBEAT,
                Some(index) if index as usize == i => OFFBEAT,
                _ => IDLE,
            };
            frame.fill(&cell, color);
            if i == 0 {
                frame.stroke(&cell, Stroke::default().with_width(1.0).with_color(DOWNBEAT));
            }
        }

        vec![frame.into_geometry()]
    }
}
