//! Camera state and its once-per-frame update.
use std::f32::consts::TAU;

use crate::core::terrain::Terrain;

/// Per-frame movement signals, usually -1, 0 or +1 each.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntents {
    pub turn: f32,    // +1 turns left
    pub look: f32,    // +1 raises the view (horizon moves down)
    pub advance: f32, // along (sin yaw, cos yaw); the view faces the opposite way
    pub climb: f32,
    pub reach: f32,   // widens (+) or narrows (-) the view distance
}

/// Rates applied per frame to the intents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTuning {
    pub turn_rate: f32,
    pub look_rate: f32,
    pub speed: f32,
    pub climb_rate: f32,
    pub clearance: f32,
    pub distance_step: f32,
    pub min_distance: u32,
    pub max_distance: u32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            turn_rate: 0.04,
            look_rate: 5.0,
            speed: 1.5,
            climb_rate: 0.8,
            clearance: 5.0,
            distance_step: 4.0,
            min_distance: 16,
            max_distance: 400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub elevation: f32,
    pub yaw: f32,
    pub horizon: f32,
    pub scale: f32,
    pub view_distance: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 512.0,
            y: 512.0,
            elevation: 40.0,
            yaw: 0.0,
            horizon: 40.0,
            scale: 1.0,
            view_distance: 80,
        }
    }
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

impl Camera {
    pub fn with_horizon(mut self, horizon: f32) -> Self {
        self.horizon = horizon;
        self
    }

    /// Lowest elevation allowed at the current position.
    pub fn ground_floor(&self, terrain: &Terrain, tuning: &CameraTuning) -> f32 {
        terrain.height_at(self.x, self.y) as f32 + tuning.clearance
    }

    pub fn update(&mut self, intents: &MovementIntents, tuning: &CameraTuning, terrain: &Terrain) {
        let turn = finite_or_zero(intents.turn);
        let look = finite_or_zero(intents.look);
        let advance = finite_or_zero(intents.advance);
        let climb = finite_or_zero(intents.climb);
        let reach = finite_or_zero(intents.reach);

        self.yaw = (self.yaw + tuning.turn_rate * turn).rem_euclid(TAU);
        self.horizon += tuning.look_rate * look;

        let step = advance * self.scale * tuning.speed;
        self.x += step * self.yaw.sin();
        self.y += step * self.yaw.cos();

        self.elevation += tuning.climb_rate * climb;

        // collision with the ground only ever lifts the camera
        let ground = self.ground_floor(terrain, tuning);
        if ground > self.elevation || self.elevation.is_nan() {
            self.elevation = ground;
        }

        if reach != 0.0 {
            let (lo, hi) = (tuning.min_distance as f32, tuning.max_distance.max(tuning.min_distance) as f32);
            let next = (self.view_distance as f32 + reach * tuning.distance_step).round().clamp(lo, hi);
            if next as u32 != self.view_distance {
                log::debug!("view distance {} -> {}", self.view_distance, next);
                self.view_distance = next as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(h: u8) -> Terrain {
        Terrain::uniform(16, h, 0)
    }

    #[test]
    fn turning_accumulates_turn_rate() {
        let tuning = CameraTuning::default();
        let terrain = flat(0);
        let mut cam = Camera::default();
        let left = MovementIntents { turn: 1.0, ..Default::default() };
        for _ in 0..25 {
            cam.update(&left, &tuning, &terrain);
        }
        assert!((cam.yaw - 25.0 * tuning.turn_rate).abs() < 1e-4);

        cam.update(&MovementIntents { look: -1.0, ..Default::default() }, &tuning, &terrain);
        assert_eq!(cam.horizon, 40.0 - tuning.look_rate);
    }

    #[test]
    fn yaw_is_normalized_into_one_turn() {
        let tuning = CameraTuning::default();
        let terrain = flat(0);
        let mut cam = Camera::default();
        let right = MovementIntents { turn: -1.0, ..Default::default() };
        cam.update(&right, &tuning, &terrain);
        assert!(cam.yaw >= 0.0 && cam.yaw < TAU);
        assert!((cam.yaw - (TAU - tuning.turn_rate)).abs() < 1e-4);
    }

    #[test]
    fn advance_moves_along_yaw_vector() {
        let tuning = CameraTuning::default();
        let terrain = flat(0);
        let mut cam = Camera::default();
        cam.update(&MovementIntents { advance: 1.0, ..Default::default() }, &tuning, &terrain);
        assert!((cam.x - 512.0).abs() < 1e-4);
        assert!((cam.y - (512.0 + tuning.speed)).abs() < 1e-4);

        let mut cam = Camera { scale: 2.0, yaw: std::f32::consts::FRAC_PI_2, ..Camera::default() };
        cam.update(&MovementIntents { advance: -1.0, ..Default::default() }, &tuning, &terrain);
        assert!((cam.x - (512.0 - 2.0 * tuning.speed)).abs() < 1e-3);
        assert!((cam.y - 512.0).abs() < 1e-3);
    }

    #[test]
    fn collision_lifts_but_never_lowers() {
        let tuning = CameraTuning::default();
        let terrain = flat(100);

        let mut low = Camera { elevation: -50.0, ..Camera::default() };
        low.update(&MovementIntents::default(), &tuning, &terrain);
        assert_eq!(low.elevation, 105.0);

        let mut high = Camera { elevation: 300.0, ..Camera::default() };
        high.update(&MovementIntents { climb: 1.0, ..Default::default() }, &tuning, &terrain);
        assert!((high.elevation - 300.8).abs() < 1e-4);
    }

    #[test]
    fn descending_stops_at_clearance() {
        let tuning = CameraTuning::default();
        let terrain = flat(20);
        let mut cam = Camera { elevation: 26.0, ..Camera::default() };
        let down = MovementIntents { climb: -1.0, ..Default::default() };
        for _ in 0..10 {
            cam.update(&down, &tuning, &terrain);
            assert!(cam.elevation >= 25.0);
        }
        assert_eq!(cam.elevation, 25.0);
    }

    #[test]
    fn view_distance_is_clamped() {
        let tuning = CameraTuning::default();
        let terrain = flat(0);
        let mut cam = Camera::default();
        let wider = MovementIntents { reach: 1.0, ..Default::default() };
        cam.update(&wider, &tuning, &terrain);
        assert_eq!(cam.view_distance, 84);
        for _ in 0..200 {
            cam.update(&wider, &tuning, &terrain);
        }
        assert_eq!(cam.view_distance, tuning.max_distance);

        let narrower = MovementIntents { reach: -1.0, ..Default::default() };
        for _ in 0..200 {
            cam.update(&narrower, &tuning, &terrain);
        }
        assert_eq!(cam.view_distance, tuning.min_distance);
    }

    #[test]
    fn non_finite_intents_are_ignored() {
        let tuning = CameraTuning::default();
        let terrain = flat(0);
        let mut cam = Camera::default();
        let junk = MovementIntents { turn: f32::NAN, advance: f32::INFINITY, ..Default::default() };
        cam.update(&junk, &tuning, &terrain);
        assert_eq!(cam, Camera::default());
    }
}
