pub mod model;
pub mod view;

pub use model::{PickerModel, Surface};
pub use view::{CairoMetrics, draw};

pub const FONT_FAMILY: &str = "Sans";
pub const HIT_BAND_FACTOR: f64 = 1.5; // click tolerance around the arc, in font sizes
pub const GUIDE_WIDTH: f64 = 0.25;
