use crate::picker::PickerError;
use serde::Serialize;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

/// Payload handed to click observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub current: usize,
    pub previous: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum PresentationVar {
    #[strum(serialize = "--length")]
    Length,
    #[strum(serialize = "--active")]
    Active,
}

/// Values published to the host for arc-relative styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PresentationVars {
    /// Item count minus one.
    pub length: usize,
    pub active: usize,
}

impl PresentationVars {
    pub fn get(&self, var: PresentationVar) -> usize {
        match var {
            PresentationVar::Length => self.length,
            PresentationVar::Active => self.active,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PresentationVar, usize)> + '_ {
        PresentationVar::iter().map(move |var| (var, self.get(var)))
    }

    /// Inline CSS declarations, e.g. `--length: 4; --active: 2`.
    pub fn to_style(&self) -> String {
        self.iter()
            .map(|(var, value)| format!("{var}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Rotation that turns the active item's share of an arc spanning `sweep` to the arc's middle.
    pub fn rotation(&self, sweep: f64) -> f64 {
        let fraction = if self.length == 0 {
            0.0
        } else {
            self.active as f64 / self.length as f64
        };
        sweep * (0.5 - fraction)
    }
}

/// Output port for presentation variables.
pub trait PresentationSink {
    fn publish(&mut self, vars: PresentationVars);
}

impl<F: FnMut(PresentationVars)> PresentationSink for F {
    fn publish(&mut self, vars: PresentationVars) {
        self(vars)
    }
}

/// Tracks the active index and the one before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSwitch {
    current: usize,
    previous: Option<usize>,
    len: usize,
}

impl PickerSwitch {
    pub fn new(len: usize, default_active: usize) -> Result<Self, PickerError> {
        if len == 0 {
            return Err(PickerError::EmptyItemSet);
        }
        check_index(default_active, len)?;

        Ok(Self {
            current: default_active,
            previous: None,
            len,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn select(&mut self, index: usize) -> Result<ChangeEvent, PickerError> {
        check_index(index, self.len)?;

        let event = ChangeEvent {
            current: index,
            previous: Some(self.current),
        };
        self.previous = event.previous;
        self.current = index;
        Ok(event)
    }

    pub fn vars(&self) -> PresentationVars {
        PresentationVars {
            length: self.len - 1,
            active: self.current,
        }
    }
}

fn check_index(index: usize, len: usize) -> Result<(), PickerError> {
    if index >= len {
        return Err(PickerError::InvalidIndex { index, len });
    }
    Ok(())
}
