use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const VIEW_BOX: f64 = 100.0;
pub const ARC_START: Point = Point::new(5.0, 50.0);
pub const ARC_END: Point = Point::new(95.0, 50.0);
const ANGLE_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A circular arc in screen coordinates (y grows downwards, angles in radians).
///
/// A positive `sweep` walks the circle clockwise on screen, which is what the SVG sweep flag `1`
/// means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl Default for ArcPath {
    /// The half circle `M 5, 50 a 1,1 0 1,1 90,0`, running over the top of the view box.
    fn default() -> Self {
        Self::half_circle(ARC_START, ARC_END)
    }
}

impl ArcPath {
    pub fn half_circle(start: Point, end: Point) -> Self {
        let center = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
        Self {
            center,
            radius: start.distance(end) / 2.0,
            start_angle: (start.y - center.y).atan2(start.x - center.x),
            sweep: PI,
        }
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    pub fn angle_at(&self, distance: f64) -> f64 {
        if self.radius == 0.0 {
            return self.start_angle;
        }
        self.start_angle + self.sweep.signum() * distance / self.radius
    }

    pub fn point_at(&self, distance: f64) -> Point {
        let angle = self.angle_at(distance);
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Direction of travel at `distance`, i.e. the rotation a glyph sitting on the arc needs.
    pub fn tangent_angle_at(&self, distance: f64) -> f64 {
        self.angle_at(distance) + self.sweep.signum() * PI / 2.0
    }

    pub fn start_point(&self) -> Point {
        self.point_at(0.0)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.length())
    }

    pub fn rotated(&self, angle: f64) -> Self {
        Self {
            start_angle: self.start_angle + angle,
            ..*self
        }
    }

    /// SVG path data for the arc, e.g. `M 5, 50 a 45,45 0 1,1 90,0`.
    pub fn path_data(&self) -> String {
        let (start, end) = (self.start_point(), self.end_point());
        let large_arc = u8::from(self.sweep.abs() >= PI);
        let sweep_flag = u8::from(self.sweep > 0.0);
        format!(
            "M {}, {} a {r},{r} 0 {large_arc},{sweep_flag} {},{}",
            round3(start.x),
            round3(start.y),
            round3(end.x - start.x),
            round3(end.y - start.y),
            r = round3(self.radius),
        )
    }

    /// Maps a screen point back to a distance along the arc. Points further than `band` from the
    /// circle, or outside the swept range, yield `None`.
    pub fn project(&self, point: Point, band: f64) -> Option<f64> {
        if (point.distance(self.center) - self.radius).abs() > band {
            return None;
        }
        let angle = (point.y - self.center.y).atan2(point.x - self.center.x);
        let mut travelled =
            ((angle - self.start_angle) * self.sweep.signum()).rem_euclid(2.0 * PI);
        // a hair before the start wraps around to almost a full turn
        if 2.0 * PI - travelled < ANGLE_SLACK {
            travelled = 0.0;
        }

        (travelled <= self.sweep.abs() + ANGLE_SLACK).then(|| travelled * self.radius)
    }
}

/// Rounds to three decimals and folds `-0` into `0` so emitted markup stays stable.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0 + 0.0
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid start offset '{0}': expected a length like \"4\" or a percentage like \"10%\"")]
pub struct StartOffsetError(String);

/// Where the text path begins along the arc, either absolute or relative to the arc length.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub enum StartOffset {
    Length(f64),
    Percent(f64),
}

impl Default for StartOffset {
    fn default() -> Self {
        Self::Length(0.0)
    }
}

impl StartOffset {
    pub fn resolve(&self, arc_length: f64) -> f64 {
        match *self {
            Self::Length(length) => length,
            Self::Percent(percent) => arc_length * percent / 100.0,
        }
    }
}

impl FromStr for StartOffset {
    type Err = StartOffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| StartOffsetError(s.to_string()))
        };

        match trimmed.strip_suffix('%') {
            Some(percent) => parse(percent).map(Self::Percent),
            None => parse(trimmed).map(Self::Length),
        }
    }
}

impl fmt::Display for StartOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(length) => write!(f, "{length}"),
            Self::Percent(percent) => write!(f, "{percent}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_default_arc_is_top_half_circle() {
        let arc = ArcPath::default();
        assert_eq!(arc.center, Point::new(50.0, 50.0));
        assert!(close(arc.radius, 45.0));
        assert!(close(arc.length(), 45.0 * PI));

        let top = arc.point_at(arc.length() / 2.0);
        assert!(close(top.x, 50.0));
        assert!(close(top.y, 5.0));

        let end = arc.end_point();
        assert!(close(end.x, 95.0));
        assert!(close(end.y, 50.0));
    }

    #[test]
    fn test_path_data_matches_view_box_arc() {
        assert_eq!(ArcPath::default().path_data(), "M 5, 50 a 45,45 0 1,1 90,0");
    }

    #[test]
    fn test_tangent_is_horizontal_at_apex() {
        let arc = ArcPath::default();
        let angle = arc.tangent_angle_at(arc.length() / 2.0).rem_euclid(2.0 * PI);
        assert!(close(angle, 0.0) || close(angle, 2.0 * PI));
    }

    #[test]
    fn test_project_inverts_point_at() {
        let arc = ArcPath::default();
        for distance in [0.0, 10.0, 70.0, arc.length() - 1.0] {
            let projected = arc.project(arc.point_at(distance), 0.5).unwrap();
            assert!((projected - distance).abs() < 1e-6, "{distance} -> {projected}");
        }
    }

    #[test]
    fn test_project_rejects_points_off_the_arc() {
        let arc = ArcPath::default();
        // centre of the circle
        assert_eq!(arc.project(Point::new(50.0, 50.0), 2.0), None);
        // lower half is not swept
        assert_eq!(arc.project(Point::new(50.0, 95.0), 2.0), None);
    }

    #[test]
    fn test_rotation_moves_start() {
        let arc = ArcPath::default().rotated(PI / 2.0);
        let start = arc.start_point();
        assert!(close(start.x, 50.0));
        assert!(close(start.y, 5.0));
    }

    #[test]
    fn test_start_offset_parsing() {
        assert_eq!("0".parse::<StartOffset>(), Ok(StartOffset::Length(0.0)));
        assert_eq!(" 12.5 ".parse::<StartOffset>(), Ok(StartOffset::Length(12.5)));
        assert_eq!("25%".parse::<StartOffset>(), Ok(StartOffset::Percent(25.0)));
        assert!("abc".parse::<StartOffset>().is_err());
        assert!("%".parse::<StartOffset>().is_err());
    }

    #[test]
    fn test_start_offset_resolve_and_display() {
        assert_eq!(StartOffset::Percent(50.0).resolve(200.0), 100.0);
        assert_eq!(StartOffset::Length(3.0).resolve(200.0), 3.0);
        assert_eq!(StartOffset::Percent(10.0).to_string(), "10%");
        assert_eq!(StartOffset::default().to_string(), "0");
    }

    #[test]
    fn test_start_offset_deserialization() {
        let offset: StartOffset = serde_json::from_str("\"5%\"").unwrap();
        assert_eq!(offset, StartOffset::Percent(5.0));
    }
}
