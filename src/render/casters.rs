//! Stepped ray marching with a halving refinement pass.
use crate::core::maze::Map;
use crate::core::player::{Vec2, wrap360};
use crate::tuning::CasterTuning;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance perpendicular to the viewer's facing (fisheye corrected).
    pub distance: f64,
    /// Raw distance marched along the ray.
    pub traveled: f64,
    /// False when the ray ran out at `max_distance`.
    pub hit: bool,
}

pub struct RayCaster<'a> {
    map: &'a Map,
    tuning: CasterTuning,
}

impl<'a> RayCaster<'a> {
    pub fn new(map: &'a Map, tuning: CasterTuning) -> Self {
        Self { map, tuning }
    }

    /// Perpendicular distance to the first wall along `angle`, in `[0, max_distance]`.
    #[inline]
    pub fn cast(&self, origin: Vec2, facing: f64, angle: f64) -> f64 {
        self.trace(origin, facing, angle).distance
    }

    pub fn trace(&self, origin: Vec2, facing: f64, angle: f64) -> RayHit {
        let CasterTuning {
            step,
            max_distance,
            refinement_steps,
        } = self.tuning;
        let dir = Vec2::from_heading(angle);
        let mut ray = origin;
        let mut traveled = 0.0;

        while traveled < max_distance {
            if self.map.is_wall_at(ray) {
                let mut division = 2.0;
                for _ in 0..refinement_steps {
                    let nudge = step / division;
                    if self.map.is_wall_at(ray) {
                        ray = ray - dir * nudge;
                        traveled -= nudge;
                    } else {
                        ray += dir * nudge;
                        traveled += nudge;
                    }
                    division *= 2.0;
                }

                let distance = traveled * angle_offset(angle, facing).to_radians().cos();
                return RayHit {
                    distance: distance.clamp(0.0, max_distance),
                    traveled,
                    hit: true,
                };
            }
            traveled += step;
            ray += dir * step;
        }

        RayHit {
            distance: max_distance,
            traveled: max_distance,
            hit: false,
        }
    }
}

/// Unsigned angle between two headings, in `[0, 180]`.
#[inline]
pub fn angle_offset(a: f64, b: f64) -> f64 {
    let diff = wrap360(a - b);
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    use super::*;

    fn reference_cast(origin: (f64, f64), facing: f64, angle: f64) -> RayHit {
        let map = Map::reference();
        RayCaster::new(&map, CasterTuning::default()).trace(Vec2::new(origin.0, origin.1), facing, angle)
    }

    #[test]
    fn spawn_ray_hits_the_far_border() {
        let tuning = CasterTuning::default();
        let hit = reference_cast((2.0, 8.0), 0.0, 0.0);
        assert!(hit.hit);
        assert_abs_diff_eq!(hit.distance, 7.0, epsilon = tuning.tolerance() + 1e-9);
    }

    #[rstest]
    #[case::east((2.0, 8.0), 90.0, 2.0)]
    #[case::south((12.5, 12.5), 180.0, 4.5)]
    #[case::west((8.5, 12.5), 270.0, 3.5)]
    #[case::short((8.5, 8.5), 270.0, 0.5)]
    fn axis_aligned_hits(#[case] origin: (f64, f64), #[case] angle: f64, #[case] expected: f64) {
        let tuning = CasterTuning::default();
        let hit = reference_cast(origin, angle, angle);
        assert_abs_diff_eq!(hit.distance, expected, epsilon = tuning.tolerance() + 1e-9);
    }

    #[test]
    fn center_ray_needs_no_correction() {
        let hit = reference_cast((2.0, 8.0), 0.0, 0.0);
        assert_eq!(hit.distance, hit.traveled);
    }

    #[rstest]
    #[case::right_edge(30.0)]
    #[case::left_edge(330.0)]
    fn edge_rays_are_shorter_than_radial(#[case] angle: f64) {
        let hit = reference_cast((2.0, 8.0), 0.0, angle);
        assert!(hit.hit);
        assert!(hit.distance < hit.traveled);
        assert_abs_diff_eq!(hit.distance, hit.traveled * 30f64.to_radians().cos(), epsilon = 1e-12);
    }

    #[test]
    fn correction_ignores_unnormalized_facing() {
        let wrapped = reference_cast((2.0, 8.0), 0.0, 30.0);
        let spun = reference_cast((2.0, 8.0), 720.0, 30.0);
        assert_abs_diff_eq!(wrapped.distance, spun.distance, epsilon = 1e-9);
    }

    #[test]
    fn miss_saturates_at_max_distance() {
        let map = Map::reference();
        let tuning = CasterTuning {
            max_distance: 0.5,
            ..CasterTuning::default()
        };
        let hit = RayCaster::new(&map, tuning).trace(Vec2::new(2.0, 8.0), 0.0, 0.0);
        assert!(!hit.hit);
        assert_eq!(hit.distance, 0.5);
    }

    #[test]
    fn casts_stay_in_range_from_anywhere_inside() {
        let map = Map::reference();
        let tuning = CasterTuning::default();
        let caster = RayCaster::new(&map, tuning);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..5_000 {
            let origin = Vec2::new(rng.gen_range(1.0..15.0), rng.gen_range(1.0..15.0));
            let angle = rng.gen_range(-720.0..720.0);
            let facing = angle + rng.gen_range(-30.0..30.0);
            let d = caster.cast(origin, facing, angle);
            assert!((0.0..=tuning.max_distance).contains(&d), "{d} from {origin:?} at {angle}");
        }
    }

    #[rstest]
    #[case(0.0, 30.0, 30.0)]
    #[case(350.0, 10.0, 20.0)]
    #[case(-10.0, 710.0, 0.0)]
    #[case(0.0, 180.0, 180.0)]
    fn angle_offset_is_symmetric_and_wrapped(#[case] a: f64, #[case] b: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(angle_offset(a, b), expected, epsilon = 1e-9);
        assert_abs_diff_eq!(angle_offset(b, a), expected, epsilon = 1e-9);
    }
}
