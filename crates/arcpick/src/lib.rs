//! Layout and selection state for a circular label picker: labels spread along an arc, the
//! active one fully opaque and its neighbours fading with distance.

pub mod macros;

pub mod config;
pub mod geometry;
pub mod label;
pub mod layout;
pub mod measure;
pub mod picker;
pub mod svg;
pub mod switch;

pub use geometry::{ArcPath, Point, StartOffset};
pub use label::Label;
pub use measure::{EstimatedMetrics, Measure};
pub use picker::{Picker, PickerError, PickerOptions};
pub use switch::{ChangeEvent, PresentationSink, PresentationVars};
