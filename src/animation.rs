/// Interpolation curve applied to normalised time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A scalar animated between two values, advanced by sampling at a timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub start_time: f64,
    pub duration: f64,
    pub start_value: f32,
    pub end_value: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(
        start_time: f64,
        duration: f64,
        start_value: f32,
        end_value: f32,
        easing: Easing,
    ) -> Self {
        Self {
            start_time,
            duration,
            start_value,
            end_value,
            easing,
        }
    }

    /// A tween that is already finished at `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(0.0, 0.0, value, value, Easing::Linear)
    }

    pub fn fraction(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn value_at(&self, now: f64) -> f32 {
        let eased = self.easing.apply(self.fraction(now));
        // Weighted form lands exactly on both endpoints
        self.start_value * (1.0 - eased) + self.end_value * eased
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.fraction(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_hits_both_endpoints() {
        let tween = Tween::new(100.0, 500.0, 0.5, -1.0, Easing::EaseOutCubic);
        assert_eq!(tween.value_at(0.0), 0.5);
        assert_eq!(tween.value_at(100.0), 0.5);
        assert_eq!(tween.value_at(600.0), -1.0);
        assert_eq!(tween.value_at(10_000.0), -1.0);
        assert!(!tween.is_complete(599.0));
        assert!(tween.is_complete(600.0));
    }

    #[test]
    fn ease_out_cubic_front_loads_motion() {
        let tween = Tween::new(0.0, 100.0, 0.0, 1.0, Easing::EaseOutCubic);
        assert!((tween.value_at(50.0) - 0.875).abs() < 1e-6);
        let linear = Tween::new(0.0, 100.0, 0.0, 1.0, Easing::Linear);
        assert!((linear.value_at(50.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn settled_tween_is_constant() {
        let tween = Tween::settled(2.0);
        assert!(tween.is_complete(0.0));
        assert_eq!(tween.value_at(-5.0), 2.0);
    }
}
