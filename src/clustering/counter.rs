use crate::Label;

/// Next free global stage-2 label.
///
/// Owned by a single refinement run and advanced once per stage-1 group,
/// in ascending group order, which is what makes global ids reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounter(Label);

impl LabelCounter {
    /// The first label the next group will receive.
    pub fn peek(&self) -> Label {
        self.0
    }
    /// Global label for a group-local sub-label.
    pub fn global(&self, local: Label) -> Label {
        self.0 + local
    }
    /// Counter after reserving `k` labels.
    pub fn advance(self, k: usize) -> Self {
        Self(self.0 + k)
    }
}
