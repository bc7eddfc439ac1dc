use serde::{Deserialize, Serialize};

/// Point in either pixel or data space, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// A size is usable for layout when both dimensions are finite and positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[must_use]
    pub const fn location(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

/// Reserved space on each side of the control.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Rectangle that remains inside `size` after removing this margin.
    #[must_use]
    pub fn inset(self, size: Size) -> Rect {
        Rect::new(
            self.left,
            self.top,
            size.width - self.left - self.right,
            size.height - self.top - self.bottom,
        )
    }
}

/// User-provided draw margin; `None` sides are computed by the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginOverride {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
}

impl MarginOverride {
    #[must_use]
    pub const fn auto() -> Self {
        Self {
            left: None,
            top: None,
            right: None,
            bottom: None,
        }
    }

    #[must_use]
    pub const fn fixed(margin: Margin) -> Self {
        Self {
            left: Some(margin.left),
            top: Some(margin.top),
            right: Some(margin.right),
            bottom: Some(margin.bottom),
        }
    }

    /// Explicit sides win; auto sides take the computed value.
    #[must_use]
    pub fn resolve(self, computed: Margin) -> Margin {
        Margin {
            left: self.left.unwrap_or(computed.left),
            top: self.top.unwrap_or(computed.top),
            right: self.right.unwrap_or(computed.right),
            bottom: self.bottom.unwrap_or(computed.bottom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Margin, MarginOverride, Rect, Size};

    #[test]
    fn override_keeps_explicit_sides_and_fills_auto_ones() {
        let computed = Margin::new(40.0, 10.0, 12.0, 30.0);
        let user = MarginOverride {
            left: Some(5.0),
            bottom: Some(0.0),
            ..MarginOverride::auto()
        };

        assert_eq!(user.resolve(computed), Margin::new(5.0, 10.0, 12.0, 0.0));
    }

    #[test]
    fn inset_can_produce_non_positive_draw_area() {
        let rect = Margin::uniform(60.0).inset(Size::new(100.0, 300.0));
        assert_eq!(rect, Rect::new(60.0, 60.0, -20.0, 180.0));
        assert!(!rect.size().is_valid());
    }
}
