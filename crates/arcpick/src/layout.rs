use crate::label::Label;
use serde::Serialize;

/// Opacity lost per index of distance from the active item; beyond `1 / OPACITY_STEP` items are
/// fully transparent.
pub const OPACITY_STEP: f64 = 0.25;

pub fn opacity(current: usize, index: usize) -> f64 {
    (1.0 - OPACITY_STEP * current.abs_diff(index) as f64).max(0.0)
}

/// Fraction of the available length at which label `index` of `len` starts. A single label sits
/// at the start of the arc.
pub fn placement_percent(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return 0.0;
    }
    index as f64 / (len - 1) as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLayout {
    pub index: usize,
    pub label: Label,
    pub percent: f64,
    pub position: f64,
    pub opacity: f64,
    pub active: bool,
}

pub fn compute(items: &[Label], current: usize, available_length: f64) -> Vec<LabelLayout> {
    items
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let percent = placement_percent(index, items.len());
            LabelLayout {
                index,
                label: label.clone(),
                percent,
                position: percent * available_length,
                opacity: opacity(current, index),
                active: index == current,
            }
        })
        .collect()
}
