use crate::ports::UiElement;

const PLAY_STATE: &str = "animation-play-state";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Paused,
    Triggered,
}

/// Entrance animations held paused until their element scrolls into view.
/// Each one plays once; there is no way back to `Paused`.
pub struct RevealSet<E> {
    entries: Vec<(E, RevealState)>,
}

impl<E: UiElement> RevealSet<E> {
    pub fn arm(elements: impl IntoIterator<Item = E>) -> Self {
        let entries = elements
            .into_iter()
            .map(|element| {
                element.set_style(PLAY_STATE, "paused");
                (element, RevealState::Paused)
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn state_of(&self, matches: impl Fn(&E) -> bool) -> Option<RevealState> {
        self.entries.iter().find(|(e, _)| matches(e)).map(|(_, s)| *s)
    }

    /// Handles one visibility report. Returns `true` when the element just
    /// started playing, which is the caller's cue to stop watching it.
    pub fn on_visibility(&mut self, is_visible: bool, matches: impl Fn(&E) -> bool) -> bool {
        if !is_visible {
            return false;
        }
        let Some((element, state)) = self.entries.iter_mut().find(|(e, _)| matches(e)) else {
            return false;
        };
        if *state == RevealState::Triggered {
            return false;
        }
        element.set_style(PLAY_STATE, "running");
        *state = RevealState::Triggered;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::fakes::FakeElement;
    use std::rc::Rc;

    fn armed(n: usize) -> (Vec<Rc<FakeElement>>, RevealSet<Rc<FakeElement>>) {
        let elements: Vec<_> = (0..n).map(|_| FakeElement::new()).collect();
        let set = RevealSet::arm(elements.clone());
        (elements, set)
    }

    #[test]
    fn test_arm_pauses_everything() {
        let (elements, set) = armed(3);
        assert_eq!(set.len(), 3);
        for el in &elements {
            assert_eq!(el.style(PLAY_STATE).as_deref(), Some("paused"));
            assert_eq!(set.state_of(|e| Rc::ptr_eq(e, el)), Some(RevealState::Paused));
        }
    }

    #[test]
    fn test_visible_element_plays_once() {
        let (elements, mut set) = armed(2);
        let first = elements[0].clone();

        assert!(set.on_visibility(true, |e| Rc::ptr_eq(e, &first)));
        assert_eq!(first.style(PLAY_STATE).as_deref(), Some("running"));
        assert!(!set.on_visibility(true, |e| Rc::ptr_eq(e, &first)));
        assert_eq!(elements[1].style(PLAY_STATE).as_deref(), Some("paused"));
    }

    #[test]
    fn test_leaving_view_does_not_pause_again() {
        let (elements, mut set) = armed(1);
        let el = elements[0].clone();

        assert!(!set.on_visibility(false, |e| Rc::ptr_eq(e, &el)));
        set.on_visibility(true, |e| Rc::ptr_eq(e, &el));
        set.on_visibility(false, |e| Rc::ptr_eq(e, &el));
        assert_eq!(set.state_of(|e| Rc::ptr_eq(e, &el)), Some(RevealState::Triggered));
        assert_eq!(el.style(PLAY_STATE).as_deref(), Some("running"));
    }

    #[test]
    fn test_unknown_element_is_ignored() {
        let (_, mut set) = armed(1);
        let stranger = FakeElement::new();
        assert!(!set.on_visibility(true, |e| Rc::ptr_eq(e, &stranger)));
    }
}
