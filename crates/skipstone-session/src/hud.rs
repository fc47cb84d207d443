use skipstone_physics::Stone;

use crate::state::RockState;

/// Prompt shown before the stone has been picked.
pub const START_TEXT: &str = "Point at the stone to pick it up";

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Clamp `value` to `[min, max]`. Unlike `f64::clamp`, a reversed range
/// does not panic: `min` wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Bounce and distance summary, e.g. `"3 bounces and distance: 4.25 m"`.
pub fn result_text(stone: &Stone) -> String {
    format!(
        "{} bounces and distance: {} m",
        stone.bounce_count,
        round_to(stone.distance_traveled, 2)
    )
}

/// Label text for the current session state.
pub fn label_text(state: RockState, stone: &Stone) -> String {
    match state {
        RockState::Start => START_TEXT.to_string(),
        RockState::Selected => "Press and drag up or down to tilt the stone".to_string(),
        RockState::Configuring => format!(
            "Tilt: {} degrees. Release to throw",
            round_to(stone.theta.to_degrees(), 1)
        ),
        RockState::Simulation => result_text(stone),
        RockState::SimulationDone => {
            let verdict = if stone.bounce_count == 0 {
                "Straight to the bottom."
            } else if stone.bounce_count == 1 {
                "One skip, keep practicing."
            } else {
                "Nice throw!"
            };
            format!("{}. {verdict}", result_text(stone))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_places() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.005, 0), 2.0);
        assert_eq!(round_to(-1.25, 1), -1.3);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(0.5, -0.03, 0.03), 0.03);
        assert_eq!(clamp(-0.5, -0.03, 0.03), -0.03);
        assert_eq!(clamp(0.01, -0.03, 0.03), 0.01);
    }

    #[test]
    fn result_text_reports_bounces_and_distance() {
        let mut stone = Stone::default();
        stone.bounce_count = 3;
        stone.distance_traveled = 4.2468;
        assert_eq!(result_text(&stone), "3 bounces and distance: 4.25 m");
    }

    #[test]
    fn labels_follow_state() {
        let mut stone = Stone::default();
        assert_eq!(label_text(RockState::Start, &stone), START_TEXT);
        assert_eq!(
            label_text(RockState::Configuring, &stone),
            "Tilt: 10 degrees. Release to throw"
        );
        assert_eq!(
            label_text(RockState::Simulation, &stone),
            "0 bounces and distance: 0 m"
        );

        assert!(label_text(RockState::SimulationDone, &stone).ends_with("Straight to the bottom."));
        stone.bounce_count = 7;
        stone.distance_traveled = 21.0;
        assert_eq!(
            label_text(RockState::SimulationDone, &stone),
            "7 bounces and distance: 21 m. Nice throw!"
        );
    }
}
