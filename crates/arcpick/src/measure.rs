use crate::geometry::ArcPath;
use crate::label::Label;

/// Average glyph advance as a fraction of the font size, for hosts that cannot measure text.
pub const AVERAGE_GLYPH_RATIO: f64 = 0.55;

/// Text and path measurement supplied by whatever renders the picker.
pub trait Measure {
    fn arc_length(&self) -> f64;
    fn label_width(&self, label: &Label) -> f64;
}

/// Measurement without a rendering backend: the arc is measured exactly, labels are estimated
/// from their character count.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedMetrics {
    arc: ArcPath,
    font_size: f64,
}

impl EstimatedMetrics {
    pub fn new(arc: ArcPath, font_size: f64) -> Self {
        Self { arc, font_size }
    }
}

impl Measure for EstimatedMetrics {
    fn arc_length(&self) -> f64 {
        self.arc.length()
    }

    fn label_width(&self, label: &Label) -> f64 {
        label.char_count() as f64 * self.font_size * AVERAGE_GLYPH_RATIO
    }
}

/// Arc length left for label start positions once the last label's own width is reserved.
/// Never negative: an arc too short for its last label yields `0`.
pub fn available_length<M: Measure + ?Sized>(measure: &M, items: &[Label]) -> f64 {
    let last_width = items.last().map_or(0.0, |label| measure.label_width(label));
    let available = measure.arc_length() - last_width;

    if available.is_nan() || available < 0.0 {
        log::warn!(
            "Arc length {:.2} cannot fit last label ({:.2} wide), clamping to 0",
            measure.arc_length(),
            last_width
        );
        return 0.0;
    }
    available
}
