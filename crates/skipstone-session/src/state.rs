use serde::{Deserialize, Serialize};

/// Where a play session is between picking up the stone and the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RockState {
    /// Waiting for the player to point at the stone.
    #[default]
    Start,
    /// Pointer is over the stone.
    Selected,
    /// Pointer held down; vertical drag sets the tilt.
    Configuring,
    /// Stone in flight; frames advance the physics.
    Simulation,
    /// Throw finished; waiting for the auto-reset.
    SimulationDone,
}

impl RockState {
    /// Whether frame ticks should step the physics.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Simulation)
    }

    /// Whether the stone can still be picked or tilted.
    pub fn accepts_gestures(&self) -> bool {
        matches!(self, Self::Start | Self::Selected | Self::Configuring)
    }
}

impl std::fmt::Display for RockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Selected => "selected",
            Self::Configuring => "configuring",
            Self::Simulation => "simulation",
            Self::SimulationDone => "simulation done",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_simulation_runs() {
        assert!(RockState::Simulation.is_running());
        for state in [
            RockState::Start,
            RockState::Selected,
            RockState::Configuring,
            RockState::SimulationDone,
        ] {
            assert!(!state.is_running(), "{state}");
        }
    }

    #[test]
    fn gestures_only_before_the_throw() {
        assert!(RockState::Start.accepts_gestures());
        assert!(RockState::Configuring.accepts_gestures());
        assert!(!RockState::Simulation.accepts_gestures());
        assert!(!RockState::SimulationDone.accepts_gestures());
        assert_eq!(RockState::default(), RockState::Start);
    }
}
