use crate::geometry::StartOffset;
use crate::label::Label;
use crate::layout::{self, LabelLayout};
use crate::measure::{self, Measure};
use crate::switch::{ChangeEvent, PickerSwitch, PresentationSink, PresentationVars};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FONT_SIZE: f64 = 2.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PickerError {
    #[error("Index {index} is out of range for {len} items")]
    InvalidIndex { index: usize, len: usize },
    #[error("A picker needs at least one item")]
    EmptyItemSet,
    #[error("Font size must be a positive number, got {0}")]
    InvalidFontSize(f64),
}

fn check_font_size(font_size: f64) -> Result<(), PickerError> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(PickerError::InvalidFontSize(font_size));
    }
    Ok(())
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PickerOptions {
    #[serde(default)]
    pub items: Vec<Label>,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub start_offset: StartOffset,
    #[serde(default)]
    pub default_active: usize,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            start_offset: StartOffset::default(),
            default_active: 0,
        }
    }
}

impl PickerOptions {
    pub fn with_items(items: Vec<Label>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

pub type ClickHandler = Box<dyn FnMut(ChangeEvent)>;

/// Everything a host needs to draw the picker in its current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerSnapshot {
    pub vars: PresentationVars,
    pub current: usize,
    pub previous: Option<usize>,
    pub available_length: f64,
    pub font_size: f64,
    pub start_offset: StartOffset,
    pub labels: Vec<LabelLayout>,
}

pub struct Picker {
    items: Vec<Label>,
    font_size: f64,
    start_offset: StartOffset,
    switch: PickerSwitch,
    available_length: f64,
    on_click: Option<ClickHandler>,
    sink: Option<Box<dyn PresentationSink>>,
}

impl Picker {
    pub fn new(options: PickerOptions) -> Result<Self, PickerError> {
        check_font_size(options.font_size)?;
        let switch = PickerSwitch::new(options.items.len(), options.default_active)?;

        Ok(Self {
            items: options.items,
            font_size: options.font_size,
            start_offset: options.start_offset,
            switch,
            available_length: 0.0,
            on_click: None,
            sink: None,
        })
    }

    pub fn with_on_click(mut self, handler: impl FnMut(ChangeEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Attaches the presentation output port and publishes the current values to it right away.
    pub fn with_sink(mut self, sink: impl PresentationSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self.publish();
        self
    }

    pub fn items(&self) -> &[Label] {
        &self.items
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn start_offset(&self) -> StartOffset {
        self.start_offset
    }

    pub fn current_active(&self) -> usize {
        self.switch.current()
    }

    pub fn previous_active(&self) -> Option<usize> {
        self.switch.previous()
    }

    pub fn available_length(&self) -> f64 {
        self.available_length
    }

    pub fn vars(&self) -> PresentationVars {
        self.switch.vars()
    }

    /// Re-measures the arc against the current last label.
    pub fn measure<M: Measure + ?Sized>(&mut self, metrics: &M) -> f64 {
        self.available_length = measure::available_length(metrics, &self.items);
        self.available_length
    }

    pub fn layout(&self) -> Vec<LabelLayout> {
        layout::compute(&self.items, self.switch.current(), self.available_length)
    }

    pub fn opacities(&self) -> Vec<f64> {
        (0..self.items.len())
            .map(|i| layout::opacity(self.switch.current(), i))
            .collect()
    }

    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            vars: self.vars(),
            current: self.current_active(),
            previous: self.previous_active(),
            available_length: self.available_length,
            font_size: self.font_size,
            start_offset: self.start_offset,
            labels: self.layout(),
        }
    }

    /// Handles a click on label `index`: selects it, republishes the presentation variables and
    /// tells the click handler which label was active before.
    pub fn click(&mut self, index: usize) -> Result<ChangeEvent, PickerError> {
        let event = self.switch.select(index)?;
        log::debug!(
            "Selected '{}' ({} -> {})",
            self.items[event.current],
            event.previous.map_or_else(|| "none".to_string(), |p| p.to_string()),
            event.current
        );

        self.publish();
        if let Some(handler) = self.on_click.as_mut() {
            handler(event);
        }
        Ok(event)
    }

    /// Swaps in new items and text settings. A different item list starts over at
    /// `default_active` with no previous selection; the same list keeps the current selection.
    /// The available length must be measured again afterwards.
    pub fn reconfigure(&mut self, options: PickerOptions) -> Result<(), PickerError> {
        check_font_size(options.font_size)?;
        if options.items.is_empty() {
            return Err(PickerError::EmptyItemSet);
        }
        if options.items != self.items {
            self.switch = PickerSwitch::new(options.items.len(), options.default_active)?;
        }

        self.items = options.items;
        self.font_size = options.font_size;
        self.start_offset = options.start_offset;
        self.available_length = 0.0;
        self.publish();
        Ok(())
    }

    pub fn set_items<M: Measure + ?Sized>(
        &mut self,
        items: Vec<Label>,
        metrics: &M,
    ) -> Result<(), PickerError> {
        let default_active = self
            .switch
            .current()
            .min(items.len().saturating_sub(1));
        self.reconfigure(PickerOptions {
            items,
            font_size: self.font_size,
            start_offset: self.start_offset,
            default_active,
        })?;
        self.measure(metrics);
        Ok(())
    }

    fn publish(&mut self) {
        let vars = self.switch.vars();
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(vars);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ArcPath;
    use crate::label::labels;
    use crate::measure::EstimatedMetrics;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn five() -> PickerOptions {
        PickerOptions::with_items(labels(["A", "B", "C", "D", "E"]))
    }

    #[test]
    fn test_initial_opacities() {
        let picker = Picker::new(five()).unwrap();
        assert_eq!(picker.opacities(), vec![1.0, 0.75, 0.5, 0.25, 0.0]);
        assert_eq!(picker.previous_active(), None);
    }

    #[test]
    fn test_click_notifies_with_previous_active() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let seen = events.clone();
        let mut picker = Picker::new(five())
            .unwrap()
            .with_on_click(move |event| seen.borrow_mut().push(event));

        let event = picker.click(2).unwrap();
        assert_eq!(
            event,
            ChangeEvent {
                current: 2,
                previous: Some(0)
            }
        );
        assert_eq!(picker.opacities(), vec![0.5, 0.75, 1.0, 0.75, 0.5]);
        assert_eq!(*events.borrow(), vec![event]);
    }

    #[test]
    fn test_invalid_click_changes_nothing() {
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let mut picker = Picker::new(five())
            .unwrap()
            .with_on_click(move |_| *counter.borrow_mut() += 1);

        assert_eq!(
            picker.click(10),
            Err(PickerError::InvalidIndex { index: 10, len: 5 })
        );
        assert_eq!(picker.current_active(), 0);
        assert_eq!(picker.previous_active(), None);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_single_item_layout() {
        let mut picker = Picker::new(PickerOptions::with_items(labels(["Only"]))).unwrap();
        picker.measure(&EstimatedMetrics::new(ArcPath::default(), 2.0));

        let layout = picker.layout();
        assert_eq!(layout[0].position, 0.0);
        assert_eq!(layout[0].opacity, 1.0);
    }

    #[test]
    fn test_empty_items_rejected() {
        assert_eq!(
            Picker::new(PickerOptions::default()).err(),
            Some(PickerError::EmptyItemSet)
        );
    }

    #[test]
    fn test_default_active_out_of_range() {
        let options = PickerOptions {
            default_active: 5,
            ..five()
        };
        assert_eq!(
            Picker::new(options).err(),
            Some(PickerError::InvalidIndex { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_sink_sees_every_change() {
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = published.clone();
        let mut picker = Picker::new(five())
            .unwrap()
            .with_sink(move |vars: PresentationVars| sink.borrow_mut().push(vars));

        picker.click(3).unwrap();
        picker
            .set_items(
                labels(["A", "B"]),
                &EstimatedMetrics::new(ArcPath::default(), 2.0),
            )
            .unwrap();

        let actives: Vec<(usize, usize)> = published
            .borrow()
            .iter()
            .map(|v| (v.length, v.active))
            .collect();
        assert_eq!(actives, vec![(4, 0), (4, 3), (1, 1)]);
    }

    #[test]
    fn test_measure_uses_last_label() {
        let mut picker = Picker::new(five()).unwrap();
        let metrics = EstimatedMetrics::new(ArcPath::default(), 2.0);
        let expected = ArcPath::default().length() - 2.0 * crate::measure::AVERAGE_GLYPH_RATIO;

        assert!((picker.measure(&metrics) - expected).abs() < 1e-9);
        let layout = picker.layout();
        assert!((layout[4].position - expected).abs() < 1e-9);
        assert_eq!(layout[0].position, 0.0);
    }

    #[test]
    fn test_font_size_must_be_positive_and_finite() {
        for font_size in [f64::NAN, f64::INFINITY, -2.0, 0.0] {
            let options = PickerOptions {
                font_size,
                ..five()
            };
            assert!(matches!(
                Picker::new(options).err(),
                Some(PickerError::InvalidFontSize(_))
            ));
        }

        let mut picker = Picker::new(five()).unwrap();
        let result = picker.reconfigure(PickerOptions {
            font_size: f64::NAN,
            ..five()
        });
        assert!(matches!(result, Err(PickerError::InvalidFontSize(_))));
        assert_eq!(picker.font_size(), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_reconfigure_with_new_items_uses_default_active() {
        let mut picker = Picker::new(five()).unwrap();
        picker.click(1).unwrap();

        picker
            .reconfigure(PickerOptions {
                default_active: 2,
                ..PickerOptions::with_items(labels(["X", "Y", "Z"]))
            })
            .unwrap();
        assert_eq!(picker.current_active(), 2);
        assert_eq!(picker.previous_active(), None);
        assert_eq!(picker.opacities(), vec![0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_reconfigure_with_same_items_keeps_selection() {
        let mut picker = Picker::new(five()).unwrap();
        picker.click(3).unwrap();

        picker
            .reconfigure(PickerOptions {
                font_size: 4.0,
                default_active: 0,
                ..five()
            })
            .unwrap();
        assert_eq!(picker.current_active(), 3);
        assert_eq!(picker.previous_active(), Some(0));
        assert_eq!(picker.font_size(), 4.0);
    }

    #[test]
    fn test_reconfigure_rejects_out_of_range_default() {
        let mut picker = Picker::new(five()).unwrap();
        let result = picker.reconfigure(PickerOptions {
            default_active: 7,
            ..PickerOptions::with_items(labels(["X", "Y"]))
        });
        assert_eq!(result, Err(PickerError::InvalidIndex { index: 7, len: 2 }));
        assert_eq!(picker.items().len(), 5);
    }

    #[test]
    fn test_reconfigure_rejects_empty_items() {
        let mut picker = Picker::new(five()).unwrap();
        assert_eq!(
            picker.reconfigure(PickerOptions::default()),
            Err(PickerError::EmptyItemSet)
        );
        assert_eq!(picker.items().len(), 5);
    }
}
