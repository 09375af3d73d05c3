use super::HIT_BAND_FACTOR;
use arcpick::geometry::VIEW_BOX;
use arcpick::{
    ArcPath, ChangeEvent, Measure, Picker, PickerError, PickerOptions, Point, PresentationVars,
};
use std::cell::Cell;
use std::rc::Rc;

/// Maps the square view box onto the drawing area, uniformly scaled and centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub scale: f64,
    pub offset: Point,
}

impl Surface {
    pub fn fit(width: f64, height: f64) -> Self {
        let scale = width.min(height).max(0.0) / VIEW_BOX;
        Self {
            scale,
            offset: Point::new(
                (width - VIEW_BOX * scale) / 2.0,
                (height - VIEW_BOX * scale) / 2.0,
            ),
        }
    }

    pub fn to_view(&self, point: Point) -> Option<Point> {
        (self.scale > 0.0).then(|| {
            Point::new(
                (point.x - self.offset.x) / self.scale,
                (point.y - self.offset.y) / self.scale,
            )
        })
    }
}

pub struct PickerModel {
    pub picker: Picker,
    pub arc: ArcPath,
    pub follow_active: bool,
    vars: Rc<Cell<PresentationVars>>,
    label_widths: Vec<f64>,
}

impl PickerModel {
    pub fn new(
        options: PickerOptions,
        follow_active: bool,
        on_click: impl FnMut(ChangeEvent) + 'static,
    ) -> Result<Self, PickerError> {
        let vars = Rc::new(Cell::new(PresentationVars::default()));
        let published = vars.clone();
        let picker = Picker::new(options)?
            .with_on_click(on_click)
            .with_sink(move |v: PresentationVars| published.set(v));

        Ok(Self {
            picker,
            arc: ArcPath::default(),
            follow_active,
            vars,
            label_widths: Vec::new(),
        })
    }

    /// Last values the picker published.
    pub fn vars(&self) -> PresentationVars {
        self.vars.get()
    }

    /// The arc as drawn, turned towards the active label when following it.
    pub fn visible_arc(&self) -> ArcPath {
        if self.follow_active {
            self.arc.rotated(self.vars().rotation(self.arc.sweep))
        } else {
            self.arc
        }
    }

    pub fn start_distance(&self) -> f64 {
        self.picker.start_offset().resolve(self.arc.length())
    }

    pub fn measure<M: Measure + ?Sized>(&mut self, metrics: &M) {
        self.picker.measure(metrics);
        self.label_widths = self
            .picker
            .items()
            .iter()
            .map(|label| metrics.label_width(label))
            .collect();
    }

    /// Index of the label drawn under `point` (view box coordinates). Later labels are drawn on
    /// top, so they win where labels overlap.
    pub fn label_at(&self, point: Point) -> Option<usize> {
        let band = self.picker.font_size() * HIT_BAND_FACTOR;
        let distance = self.visible_arc().project(point, band)?;
        let start = self.start_distance();

        self.picker
            .layout()
            .into_iter()
            .rev()
            .find(|label| {
                let begin = start + label.position;
                let width = self.label_widths.get(label.index).copied().unwrap_or(0.0);
                (begin..=begin + width).contains(&distance)
            })
            .map(|label| label.index)
    }

    pub fn click_at(&mut self, point: Point) -> Option<Result<ChangeEvent, PickerError>> {
        let index = self.label_at(point)?;
        Some(self.picker.click(index))
    }

    pub fn reconfigure(
        &mut self,
        options: PickerOptions,
        follow_active: bool,
    ) -> Result<(), PickerError> {
        self.picker.reconfigure(options)?;
        self.follow_active = follow_active;
        self.label_widths.clear();
        Ok(())
    }
}
