use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Text of a single picker entry. Its position in the item list decides where it sits on the arc.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

impl Label {
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

pub fn labels<I, S>(items: I) -> Vec<Label>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Label::new).collect()
}
