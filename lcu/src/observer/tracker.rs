use crate::types::SessionPhase;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ObserverState {
    #[default]
    Disconnected,
    Connected,
    InChampSelect,
    OtherPhase(SessionPhase),
}

/// A change of the gameflow phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    /// `None` for the first phase seen after connecting.
    pub from: Option<SessionPhase>,
    pub to: SessionPhase,
}

impl PhaseTransition {
    pub fn entered_champ_select(&self) -> bool {
        self.to.is_champ_select()
    }

    pub fn left_champ_select(&self) -> bool {
        self.from.as_ref().is_some_and(SessionPhase::is_champ_select) && !self.to.is_champ_select()
    }
}

/// Collapses the channel's message stream into phase transitions. Messages that
/// repeat the last observed phase produce nothing.
#[derive(Debug, Default)]
pub struct PhaseTracker {
    state: ObserverState,
}

impl PhaseTracker {
    pub fn state(&self) -> &ObserverState {
        &self.state
    }

    pub fn connected(&mut self) {
        self.state = ObserverState::Connected;
    }

    pub fn disconnected(&mut self) {
        self.state = ObserverState::Disconnected;
    }

    fn last_phase(&self) -> Option<SessionPhase> {
        match &self.state {
            ObserverState::Disconnected | ObserverState::Connected => None,
            ObserverState::InChampSelect => Some(SessionPhase::champ_select()),
            ObserverState::OtherPhase(phase) => Some(phase.clone()),
        }
    }

    pub fn observe(&mut self, phase: SessionPhase) -> Option<PhaseTransition> {
        let from = self.last_phase();
        if from.as_ref() == Some(&phase) {
            return None;
        }

        self.state = if phase.is_champ_select() {
            ObserverState::InChampSelect
        } else {
            ObserverState::OtherPhase(phase.clone())
        };

        Some(PhaseTransition { from, to: phase })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn phase(kind: &str) -> SessionPhase {
        SessionPhase::new(kind)
    }

    #[test]
    fn duplicate_champ_select_triggers_once() {
        let mut tracker = PhaseTracker::default();
        tracker.connected();

        let entered = [phase("ChampSelect"), phase("ChampSelect")]
            .into_iter()
            .filter_map(|p| tracker.observe(p))
            .filter(PhaseTransition::entered_champ_select)
            .count();

        assert_eq!(entered, 1);
        assert_eq!(tracker.state(), &ObserverState::InChampSelect);
    }

    #[test]
    fn leaving_champ_select_tears_down_once() {
        let mut tracker = PhaseTracker::default();
        tracker.connected();

        let transitions = ["Lobby", "ChampSelect", "InProgress", "InProgress", "EndOfGame"]
            .into_iter()
            .filter_map(|p| tracker.observe(phase(p)))
            .collect::<Vec<_>>();

        assert_eq!(transitions.len(), 4);
        assert_eq!(transitions.iter().filter(|t| t.left_champ_select()).count(), 1);
        assert_eq!(
            transitions[2],
            PhaseTransition {
                from: Some(phase("ChampSelect")),
                to: phase("InProgress"),
            }
        );
        assert_eq!(tracker.state(), &ObserverState::OtherPhase(phase("EndOfGame")));
    }

    #[test]
    fn first_phase_after_connect_is_a_transition() {
        let mut tracker = PhaseTracker::default();
        assert_eq!(tracker.state(), &ObserverState::Disconnected);
        tracker.connected();

        let transition = tracker.observe(phase("None")).unwrap();
        assert_eq!(transition.from, None);
        assert!(!transition.left_champ_select());
        assert!(!transition.entered_champ_select());
    }

    #[test]
    fn reentering_after_another_phase_triggers_again() {
        let mut tracker = PhaseTracker::default();
        tracker.connected();

        let entered = ["ChampSelect", "Lobby", "ChampSelect"]
            .into_iter()
            .filter_map(|p| tracker.observe(phase(p)))
            .filter(PhaseTransition::entered_champ_select)
            .count();

        assert_eq!(entered, 2);
    }
}
