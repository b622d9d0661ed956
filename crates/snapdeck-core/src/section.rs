//! Typed section descriptors.
//!
//! A [`Section`] lists the elements its entrance animation touches. The lists
//! are built once when the deck is loaded, so the sequencer never has to
//! inspect markup at navigation time.

use std::collections::HashMap;

/// Identifier of one animatable element, unique across the whole deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Transient visual state of an animated element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// A single element that fades up on its own
#[derive(Debug, Clone, PartialEq)]
pub struct FadeTarget {
    pub element: ElementId,
    /// Extra delay in seconds before this element starts
    pub delay: f64,
}

impl FadeTarget {
    pub fn new(element: ElementId) -> Self {
        Self { element, delay: 0.0 }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Ordered children of a stagger container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaggerGroup {
    pub children: Vec<ElementId>,
}

impl StaggerGroup {
    pub fn new(children: Vec<ElementId>) -> Self {
        Self { children }
    }
}

/// One full-viewport panel of the deck
#[derive(Debug, Clone)]
pub struct Section {
    index: usize,
    singles: Vec<FadeTarget>,
    stagger_groups: Vec<StaggerGroup>,
    states: HashMap<ElementId, RevealState>,
}

impl Section {
    /// Create a section. All animated children start revealed, which is the
    /// default visual state until something hides them.
    pub fn new(index: usize, singles: Vec<FadeTarget>, stagger_groups: Vec<StaggerGroup>) -> Self {
        let states = singles
            .iter()
            .map(|s| s.element)
            .chain(stagger_groups.iter().flat_map(|g| g.children.iter().copied()))
            .map(|id| (id, RevealState::Revealed))
            .collect();

        Self {
            index,
            singles,
            stagger_groups,
            states,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn singles(&self) -> &[FadeTarget] {
        &self.singles
    }

    pub fn stagger_groups(&self) -> &[StaggerGroup] {
        &self.stagger_groups
    }

    /// Every fade target followed by every stagger child, in document order
    pub fn animated_elements(&self) -> Vec<ElementId> {
        self.singles
            .iter()
            .map(|s| s.element)
            .chain(self.stagger_groups.iter().flat_map(|g| g.children.iter().copied()))
            .collect()
    }

    pub fn has_animations(&self) -> bool {
        !self.states.is_empty()
    }

    pub fn state_of(&self, element: ElementId) -> Option<RevealState> {
        self.states.get(&element).copied()
    }

    /// True when no animated child is hidden (vacuously true for a section
    /// without animated children)
    pub fn is_revealed(&self) -> bool {
        self.states.values().all(|s| *s == RevealState::Revealed)
    }

    /// True when every animated child is hidden
    pub fn is_hidden(&self) -> bool {
        self.states.values().all(|s| *s == RevealState::Hidden)
    }

    pub(crate) fn mark_all(&mut self, state: RevealState) {
        for value in self.states.values_mut() {
            *value = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Section {
        Section::new(
            2,
            vec![FadeTarget::new(ElementId(1)).with_delay(0.2)],
            vec![StaggerGroup::new(vec![ElementId(2), ElementId(3)])],
        )
    }

    #[test]
    fn test_animated_elements_order() {
        let section = sample();
        assert_eq!(section.index(), 2);
        assert_eq!(
            section.animated_elements(),
            vec![ElementId(1), ElementId(2), ElementId(3)]
        );
    }

    #[test]
    fn test_mark_all() {
        let mut section = sample();
        assert!(section.is_revealed());

        section.mark_all(RevealState::Hidden);
        assert!(section.is_hidden());
        assert!(!section.is_revealed());
        assert_eq!(section.state_of(ElementId(3)), Some(RevealState::Hidden));
        assert_eq!(section.state_of(ElementId(9)), None);
    }

    #[test]
    fn test_empty_section_counts_as_revealed() {
        let section = Section::new(0, Vec::new(), vec![StaggerGroup::default()]);
        assert!(!section.has_animations());
        assert!(section.is_revealed());
    }
}
