//! Drag on a flat disk moving through air or water.
//!
//! Force magnitude is `rho * A * Cd * |v|^2 / 2`, directed against the
//! velocity. The coefficient combines an empirical flat-plate correlation
//! picked by Reynolds number with a shape factor for the disk's attitude:
//!
//! ```text
//!   Re < 5e5          Cd0 = 1.328 / sqrt(Re)                 (laminar)
//!   5e5 <= Re < 1e7   Cd0 = 0.0742 / Re^0.2 - 1740 / Re      (transitional)
//!   1e7 <= Re < 1e9   Cd0 = 0.455 / log10(Re)^2.58 - 1700 / Re (turbulent)
//!
//!   Cd = Cd0 * (MaxCd - |cos(beta)| * (MaxCd - MinCd))
//!   A  = r^2 * pi * sin(beta)
//! ```
//!
//! `beta` is the angle of attack between the flight path and the face.
//! Regime boundaries are hard thresholds; nothing is blended.

use std::f64::consts::PI;

use skipstone_core::{Medium, Vec3};

use crate::config::PhysicsConfig;
use crate::stone::Stone;

/// Shape factor for a disk presenting its full face to the flow.
pub const MAX_CD: f64 = 1.98;
/// Shape factor for a disk moving edge-first.
pub const MIN_CD: f64 = 0.05;
/// Speed substituted for a zero-length velocity.
pub const MIN_SPEED: f64 = 1e-10;

const LAMINAR_LIMIT: f64 = 5e5;
const TRANSITIONAL_LIMIT: f64 = 1e7;
const TURBULENT_LIMIT: f64 = 1e9;

/// Flow regime selected by Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    pub fn from_reynolds(re: f64) -> Self {
        if re < LAMINAR_LIMIT {
            Self::Laminar
        } else if re < TRANSITIONAL_LIMIT {
            Self::Transitional
        } else if re < TURBULENT_LIMIT {
            Self::Turbulent
        } else {
            // Past the table: reuse the laminar correlation.
            Self::Laminar
        }
    }
}

/// Reynolds number for a body of characteristic length `length`.
pub fn reynolds_number(speed: f64, length: f64, density: f64, viscosity: f64) -> f64 {
    let kinematic = viscosity / density;
    speed * length / kinematic
}

/// Base drag coefficient for the given Reynolds number.
pub fn base_drag_coefficient(re: f64) -> f64 {
    match FlowRegime::from_reynolds(re) {
        FlowRegime::Laminar => 1.328 / re.sqrt(),
        FlowRegime::Transitional => 0.0742 / re.powf(0.2) - 1740.0 / re,
        FlowRegime::Turbulent => 0.455 / re.log10().powf(2.58) - 1700.0 / re,
    }
}

/// Attitude scaling between `max_cd` (broadside) and `min_cd` (edge-on).
pub fn shape_factor(beta: f64, max_cd: f64, min_cd: f64) -> f64 {
    max_cd - beta.cos().abs() * (max_cd - min_cd)
}

/// Angle of attack between the flight path and the stone's face.
///
/// `alpha` is the angle between the velocity and the throw axis. Rising,
/// the path closes on the tilt (`|theta - alpha|`); falling, it opens
/// (`|theta + alpha|`).
pub fn angle_of_attack(stone: &Stone) -> f64 {
    let speed = stone.velocity.length().max(MIN_SPEED);
    let cos_alpha = stone.velocity.dot(&Vec3::HORIZONTAL) / (speed * Vec3::HORIZONTAL.length());
    let alpha = cos_alpha.clamp(-1.0, 1.0).acos();
    if stone.velocity.y >= 0.0 {
        (stone.theta - alpha).abs()
    } else {
        (stone.theta + alpha).abs()
    }
}

/// Drag force on `stone` moving through `medium`. Does not modify the stone.
pub fn drag_force(stone: &Stone, medium: Medium, config: &PhysicsConfig) -> Vec3 {
    let fluid = config.fluids.get(medium);
    let speed = stone.velocity.length().max(MIN_SPEED);
    let beta = angle_of_attack(stone);

    let diameter = 2.0 * stone.radius;
    let re = reynolds_number(speed, diameter, fluid.density, fluid.viscosity);
    let cd = base_drag_coefficient(re) * shape_factor(beta, config.max_cd, config.min_cd);
    let area = stone.radius * stone.radius * PI * beta.sin();

    let magnitude = fluid.density * area * cd * speed * speed / 2.0;
    -(stone.velocity / speed) * magnitude
}

/// Drag in air with the default fluid table.
pub fn air_drag(stone: &Stone) -> Vec3 {
    drag_force(stone, Medium::Air, &PhysicsConfig::default())
}

/// Drag in water with the default fluid table.
pub fn water_drag(stone: &Stone) -> Vec3 {
    drag_force(stone, Medium::Water, &PhysicsConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_close;
    use skipstone_core::FluidTable;

    #[test]
    fn water_drag_on_default_stone() {
        let stone = Stone::default();
        let before = stone.clone();
        let force = water_drag(&stone);

        assert_close(force.x, -0.004450037693489743, 1e-15);
        assert_eq!(force.y.abs(), 0.0);
        assert_eq!(force.z.abs(), 0.0);
        assert_eq!(stone, before, "drag must not touch the stone");
    }

    #[test]
    fn air_drag_on_default_stone() {
        let stone = Stone::default();
        let before = stone.clone();
        let force = air_drag(&stone);

        assert_close(force.x, -0.000015997359486306445, 1e-18);
        assert_eq!(force.y.abs(), 0.0);
        assert_eq!(stone, before, "drag must not touch the stone");
    }

    #[test]
    fn default_stone_regimes() {
        // 6 m/s over a 10 cm disk
        let fluids = FluidTable::default();
        let re_air = reynolds_number(6.0, 0.1, fluids.air.density, fluids.air.viscosity);
        let re_water = reynolds_number(6.0, 0.1, fluids.water.density, fluids.water.viscosity);
        assert_eq!(FlowRegime::from_reynolds(re_air), FlowRegime::Laminar);
        assert_eq!(
            FlowRegime::from_reynolds(re_water),
            FlowRegime::Transitional
        );
        assert_close(re_water, 6e5, 1e-6);
    }

    #[test]
    fn regime_boundaries_are_hard() {
        assert_eq!(FlowRegime::from_reynolds(4.99e5), FlowRegime::Laminar);
        assert_eq!(FlowRegime::from_reynolds(5e5), FlowRegime::Transitional);
        assert_eq!(FlowRegime::from_reynolds(1e7), FlowRegime::Turbulent);
        assert_eq!(FlowRegime::from_reynolds(1e9), FlowRegime::Laminar);

        assert_close(base_drag_coefficient(1e4), 1.328 / 100.0, 1e-15);
        assert_close(
            base_drag_coefficient(1e8),
            0.455 / 8f64.powf(2.58) - 1700.0 / 1e8,
            1e-15,
        );
    }

    #[test]
    fn shape_factor_spans_min_to_max() {
        assert_close(shape_factor(0.0, MAX_CD, MIN_CD), MIN_CD, 1e-15);
        assert_close(shape_factor(PI / 2.0, MAX_CD, MIN_CD), MAX_CD, 1e-12);
        assert_close(shape_factor(PI, MAX_CD, MIN_CD), MIN_CD, 1e-12);
    }

    #[test]
    fn angle_of_attack_depends_on_climb_direction() {
        let mut stone = Stone::default();
        stone.theta = 0.2;
        // 45 degrees up
        stone.velocity = Vec3::new(1.0, 1.0, 0.0);
        assert_close(angle_of_attack(&stone), PI / 4.0 - 0.2, 1e-12);
        // 45 degrees down
        stone.velocity = Vec3::new(1.0, -1.0, 0.0);
        assert_close(angle_of_attack(&stone), PI / 4.0 + 0.2, 1e-12);
    }

    #[test]
    fn zero_velocity_gives_finite_force() {
        let mut stone = Stone::default();
        stone.velocity = Vec3::ZERO;
        for medium in [Medium::Air, Medium::Water] {
            let force = drag_force(&stone, medium, &PhysicsConfig::default());
            assert!(force.is_finite(), "{medium}: {force:?}");
            assert_eq!(force.length(), 0.0);
        }
    }

    #[test]
    fn drag_opposes_velocity() {
        let mut stone = Stone::default();
        stone.velocity = Vec3::new(4.0, -2.0, 0.5);
        let force = air_drag(&stone);
        assert!(force.dot(&stone.velocity) < 0.0);
        let cross_track = force.normalized() + stone.velocity.normalized();
        assert!(cross_track.length() < 1e-9);
    }

    #[test]
    fn water_drags_harder_than_air() {
        let stone = Stone::default();
        assert!(water_drag(&stone).length() > air_drag(&stone).length());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn drag_at(speed: f64, medium: Medium) -> f64 {
            let mut stone = Stone::default();
            stone.velocity = Vec3::new(speed, 0.0, 0.0);
            drag_force(&stone, medium, &PhysicsConfig::default()).length()
        }

        proptest! {
            #[test]
            fn air_drag_grows_with_speed(a in 0.1f64..60.0, b in 0.1f64..60.0) {
                let (slow, fast) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(drag_at(slow, Medium::Air) <= drag_at(fast, Medium::Air));
            }

            #[test]
            fn transitional_water_drag_grows_with_speed(a in 5.5f64..90.0, b in 5.5f64..90.0) {
                let (slow, fast) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(drag_at(slow, Medium::Water) <= drag_at(fast, Medium::Water));
            }

            #[test]
            fn drag_is_always_finite(
                vx in -30.0f64..30.0,
                vy in -30.0f64..30.0,
                vz in -5.0f64..5.0,
                theta in -0.5f64..1.2,
            ) {
                let mut stone = Stone::default();
                stone.velocity = Vec3::new(vx, vy, vz);
                stone.theta = theta;
                for medium in [Medium::Air, Medium::Water] {
                    let force = drag_force(&stone, medium, &PhysicsConfig::default());
                    prop_assert!(force.is_finite());
                }
            }
        }
    }
}
