//! Filled shapes for the board canvas
//!
//! ratatui's built-in canvas shapes only draw outlines, so the filled
//! square and disc sample their area at a fixed step and paint every dot
//! a sample lands on.

use ratatui::{
    style::Color,
    widgets::canvas::{Painter, Shape},
};

/// Distance between two samples, in canvas units
pub const SAMPLE_STEP: f64 = 0.5;

/// Sample points covering `[x, x + width] x [y, y + height]`
pub fn sample_area(x: f64, y: f64, width: f64, height: f64) -> impl Iterator<Item = (f64, f64)> {
    let cols = (width / SAMPLE_STEP).floor() as usize;
    let rows = (height / SAMPLE_STEP).floor() as usize;

    (0..=rows).flat_map(move |row| {
        (0..=cols).map(move |col| {
            (
                x + col as f64 * SAMPLE_STEP,
                y + row as f64 * SAMPLE_STEP,
            )
        })
    })
}

/// Axis-aligned square anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledSquare {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Color,
}

impl FilledSquare {
    /// Same centre, each side pulled in by `by`
    pub fn inset(&self, by: f64) -> Self {
        let by = by.min(self.size / 2.0);
        Self {
            x: self.x + by,
            y: self.y + by,
            size: self.size - 2.0 * by,
            color: self.color,
        }
    }

}

impl Shape for FilledSquare {
    fn draw(&self, painter: &mut Painter) {
        for (px, py) in sample_area(self.x, self.y, self.size, self.size) {
            if let Some((cx, cy)) = painter.get_point(px, py) {
                painter.paint(cx, cy, self.color);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledDisc {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
}

impl FilledDisc {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (dx, dy) = (px - self.x, py - self.y);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

impl Shape for FilledDisc {
    fn draw(&self, painter: &mut Painter) {
        let side = self.radius * 2.0;
        let corner = (self.x - self.radius, self.y - self.radius);

        for (px, py) in sample_area(corner.0, corner.1, side, side) {
            if !self.contains(px, py) {
                continue;
            }
            if let Some((cx, cy)) = painter.get_point(px, py) {
                painter.paint(cx, cy, self.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_area_covers_corners() {
        let points: Vec<_> = sample_area(2.0, 3.0, 1.0, 1.0).collect();

        assert_eq!(points.len(), 9);
        assert_eq!(points.first(), Some(&(2.0, 3.0)));
        assert_eq!(points.last(), Some(&(3.0, 4.0)));
    }

    #[test]
    fn test_inset_keeps_centre() {
        let square = FilledSquare {
            x: 0.0,
            y: 0.0,
            size: 18.0,
            color: Color::Green,
        };

        let inner = square.inset(3.0);
        assert_eq!((inner.x, inner.y, inner.size), (3.0, 3.0, 12.0));

        let collapsed = square.inset(100.0);
        assert_eq!((collapsed.x, collapsed.size), (9.0, 0.0));
    }

    #[test]
    fn test_disc_contains() {
        let disc = FilledDisc {
            x: 10.0,
            y: 10.0,
            radius: 8.0,
            color: Color::Red,
        };

        assert!(disc.contains(10.0, 10.0));
        assert!(disc.contains(18.0, 10.0));
        assert!(!disc.contains(17.0, 17.0));
    }
}
