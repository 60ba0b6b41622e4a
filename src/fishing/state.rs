use rand::Rng;

use super::config::FishingConfig;
use super::species::{FishCatalog, FishSpecies};
use crate::inventory::Inventory;

#[derive(Clone, Debug, PartialEq)]
pub enum FishingPhase {
    Idle,
    /// Line in the water, waiting for the bite deadline.
    Cast,
    Biting {
        species: FishSpecies,
        progress: f64,
        catchable: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum FishingOutcome {
    Caught(FishSpecies),
    /// Struck before anything bit.
    Missed,
    Escaped(FishSpecies),
    Timeout,
    ManualRetrieve,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FishingEvent {
    Bite(FishSpecies),
    Resolved(FishingOutcome),
}

/// Pending deadlines in milliseconds. `None` means not armed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Timers {
    bite_at: Option<f64>,
    next_tick: Option<f64>,
    timeout_at: Option<f64>,
}

impl Timers {
    fn clear(&mut self) {
        *self = Timers::default();
    }

    fn is_clear(&self) -> bool {
        *self == Timers::default()
    }
}

/// One fishing session at a time, driven by explicit timestamps in milliseconds.
#[derive(Clone, Debug)]
pub struct FishingStateMachine {
    config: FishingConfig,
    phase: FishingPhase,
    timers: Timers,
}

impl FishingStateMachine {
    pub fn new(config: FishingConfig) -> Self {
        Self {
            config,
            phase: FishingPhase::Idle,
            timers: Timers::default(),
        }
    }

    pub fn phase(&self) -> &FishingPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, FishingPhase::Idle)
    }

    pub fn is_biting(&self) -> bool {
        matches!(self.phase, FishingPhase::Biting { .. })
    }

    /// Progress and catchable flag while a fish is on the line.
    pub fn bar(&self) -> Option<(f64, bool)> {
        match &self.phase {
            FishingPhase::Biting {
                progress,
                catchable,
                ..
            } => Some((*progress, *catchable)),
            _ => None,
        }
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_clear()
    }

    pub fn progress_at(&self, now: f64, difficulty: f64) -> f64 {
        50.0 + (now * self.config.oscillation_speed).sin()
            * difficulty
            * self.config.oscillation_amplitude
    }

    /// Idle -> Cast. Returns false when a session is already running.
    pub fn cast<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> bool {
        if self.is_active() {
            return false;
        }

        let (min, max) = (self.config.bite_delay_min_ms, self.config.bite_delay_max_ms);
        let delay = if max > min { rng.gen_range(min..max) } else { min };
        self.timers.clear();
        self.timers.bite_at = Some(now + delay);
        self.phase = FishingPhase::Cast;
        true
    }

    /// Fires every deadline that is due at `now`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        catalog: &FishCatalog,
        rng: &mut R,
    ) -> Option<FishingEvent> {
        match self.phase {
            FishingPhase::Idle => None,
            FishingPhase::Cast => {
                let bite_at = self.timers.bite_at?;
                if now < bite_at {
                    return None;
                }
                let Some(species) = catalog.choose(rng).cloned() else {
                    return Some(FishingEvent::Resolved(self.resolve(FishingOutcome::Timeout)));
                };

                self.timers.bite_at = None;
                self.timers.timeout_at = Some(now + self.config.session_timeout_ms);
                self.timers.next_tick = Some(now);
                self.phase = FishingPhase::Biting {
                    species: species.clone(),
                    progress: 50.0,
                    catchable: true,
                };
                self.tick(now);
                Some(FishingEvent::Bite(species))
            }
            FishingPhase::Biting { .. } => {
                if self.timed_out(now) {
                    return Some(FishingEvent::Resolved(self.resolve(FishingOutcome::Timeout)));
                }
                self.tick(now);
                None
            }
        }
    }

    /// Catch attempt. Succeeds only while the bar sits inside the species' window.
    pub fn catch(&mut self, now: f64, inventory: &mut Inventory) -> Option<FishingOutcome> {
        match self.phase {
            FishingPhase::Idle => None,
            FishingPhase::Cast => Some(self.resolve(FishingOutcome::Missed)),
            FishingPhase::Biting { .. } => {
                if self.timed_out(now) {
                    return Some(self.resolve(FishingOutcome::Timeout));
                }
                self.tick(now);

                let FishingPhase::Biting {
                    species, catchable, ..
                } = &self.phase
                else {
                    return None;
                };
                let (species, catchable) = (species.clone(), *catchable);
                if catchable {
                    inventory.record_catch(&species);
                    Some(self.resolve(FishingOutcome::Caught(species)))
                } else {
                    Some(self.resolve(FishingOutcome::Escaped(species)))
                }
            }
        }
    }

    /// Pulls the line in from Cast or Biting.
    pub fn retrieve(&mut self) -> Option<FishingOutcome> {
        if self.is_active() {
            Some(self.resolve(FishingOutcome::ManualRetrieve))
        } else {
            None
        }
    }

    fn timed_out(&self, now: f64) -> bool {
        self.timers.timeout_at.is_some_and(|deadline| now >= deadline)
    }

    fn tick(&mut self, now: f64) {
        let Some(next_tick) = self.timers.next_tick else {
            return;
        };
        if now < next_tick {
            return;
        }

        let FishingPhase::Biting { species, .. } = &self.phase else {
            return;
        };
        let value = self.progress_at(now, species.difficulty);
        let window = species.catch_window;
        if let FishingPhase::Biting {
            progress,
            catchable,
            ..
        } = &mut self.phase
        {
            *progress = value;
            *catchable = (value - 50.0).abs() <= window;
        }
        self.timers.next_tick = Some(now + self.config.tick_period_ms);
    }

    /// Every exit from Cast or Biting goes through here.
    fn resolve(&mut self, outcome: FishingOutcome) -> FishingOutcome {
        self.timers.clear();
        self.phase = FishingPhase::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    const SPEED: f64 = 0.003;

    fn test_catalog() -> FishCatalog {
        FishCatalog::new(vec![FishSpecies {
            name: "Atum",
            difficulty: 1.0,
            catch_window: 15.0,
            points: 20,
            price: 120,
            glyph: "🐠",
            color: 0x4169E1,
        }])
    }

    /// Time at which `sin(t * 0.003)` is zero, past any possible bite.
    fn centred_time() -> f64 {
        3.0 * PI / SPEED
    }

    /// Time at which `sin(t * 0.003)` is one, past any possible bite.
    fn peak_time() -> f64 {
        (3.0 * PI + PI / 2.0) / SPEED
    }

    fn biting_machine(rng: &mut StdRng, catalog: &FishCatalog) -> FishingStateMachine {
        let mut machine = FishingStateMachine::new(FishingConfig::default());
        assert!(machine.cast(0.0, rng));
        let event = machine.update(3000.0, catalog, rng);
        assert!(matches!(event, Some(FishingEvent::Bite(_))));
        machine
    }

    #[test]
    fn bite_waits_for_the_random_delay() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(11);
        let mut machine = FishingStateMachine::new(FishingConfig::default());
        machine.cast(0.0, &mut rng);

        assert_eq!(machine.update(999.0, &catalog, &mut rng), None);
        assert_eq!(machine.phase(), &FishingPhase::Cast);
        assert!(matches!(
            machine.update(3000.0, &catalog, &mut rng),
            Some(FishingEvent::Bite(_))
        ));
        assert!(machine.is_biting());
    }

    #[test]
    fn second_cast_is_ignored_while_active() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut machine = FishingStateMachine::new(FishingConfig::default());
        assert!(machine.cast(0.0, &mut rng));
        assert!(!machine.cast(10.0, &mut rng));
    }

    #[test]
    fn catch_at_centre_of_bar_is_caught() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(5);
        let mut machine = biting_machine(&mut rng, &catalog);
        let mut inventory = Inventory::default();

        let now = centred_time();
        machine.update(now, &catalog, &mut rng);
        let (progress, catchable) = machine.bar().unwrap_or_default();
        assert!((progress - 50.0).abs() < 1e-6);
        assert!(catchable);

        let outcome = machine.catch(now, &mut inventory);
        assert!(matches!(outcome, Some(FishingOutcome::Caught(ref s)) if s.name == "Atum"));
        assert_eq!(inventory.count("Atum"), 1);
        assert_eq!(inventory.total_points(), 20);
        assert_eq!(inventory.fish_count(), 1);
        assert_eq!(machine.phase(), &FishingPhase::Idle);
        assert!(!machine.has_pending_timers());
    }

    #[test]
    fn catch_at_bar_extreme_escapes() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(6);
        let mut machine = biting_machine(&mut rng, &catalog);
        let mut inventory = Inventory::default();

        let now = peak_time();
        machine.update(now, &catalog, &mut rng);
        assert_eq!(machine.bar().map(|(_, c)| c), Some(false));

        let outcome = machine.catch(now, &mut inventory);
        assert!(matches!(outcome, Some(FishingOutcome::Escaped(_))));
        assert_eq!(inventory, Inventory::default());
        assert!(!machine.is_active());
    }

    #[test]
    fn catch_uses_progress_at_the_moment_of_the_action() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(6);
        let mut machine = biting_machine(&mut rng, &catalog);
        let mut inventory = Inventory::default();

        // Last tick saw the bar at its extreme; the strike lands at the centre
        machine.update(peak_time(), &catalog, &mut rng);
        assert_eq!(machine.bar().map(|(_, c)| c), Some(false));
        let outcome = machine.catch(4.0 * PI / SPEED, &mut inventory);
        assert!(matches!(outcome, Some(FishingOutcome::Caught(_))));
    }

    #[test]
    fn session_times_out_and_clears_timers() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let mut machine = biting_machine(&mut rng, &catalog);

        assert_eq!(machine.update(22_999.0, &catalog, &mut rng), None);
        assert_eq!(
            machine.update(23_000.0, &catalog, &mut rng),
            Some(FishingEvent::Resolved(FishingOutcome::Timeout))
        );
        assert!(!machine.has_pending_timers());
        assert_eq!(machine.update(40_000.0, &catalog, &mut rng), None);

        // A fresh cast runs on its own timers
        assert!(machine.cast(40_000.0, &mut rng));
        assert_eq!(machine.update(40_500.0, &catalog, &mut rng), None);
        assert_eq!(machine.phase(), &FishingPhase::Cast);
    }

    #[test]
    fn late_catch_after_deadline_is_a_timeout() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(8);
        let mut machine = biting_machine(&mut rng, &catalog);
        let mut inventory = Inventory::default();
        assert_eq!(
            machine.catch(30_000.0, &mut inventory),
            Some(FishingOutcome::Timeout)
        );
        assert_eq!(inventory.fish_count(), 0);
    }

    #[test]
    fn retrieve_during_wait_cancels_the_bite() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let mut machine = FishingStateMachine::new(FishingConfig::default());
        machine.cast(0.0, &mut rng);

        assert_eq!(machine.retrieve(), Some(FishingOutcome::ManualRetrieve));
        assert!(!machine.has_pending_timers());
        assert_eq!(machine.update(5000.0, &catalog, &mut rng), None);
        assert_eq!(machine.phase(), &FishingPhase::Idle);
    }

    #[test]
    fn retrieve_while_biting_resolves_without_catch() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(10);
        let mut machine = biting_machine(&mut rng, &catalog);
        assert_eq!(machine.retrieve(), Some(FishingOutcome::ManualRetrieve));
        assert_eq!(machine.retrieve(), None);
        assert_eq!(machine.update(30_000.0, &catalog, &mut rng), None);
    }

    #[test]
    fn actions_outside_their_state_are_no_ops() {
        let mut machine = FishingStateMachine::new(FishingConfig::default());
        let mut inventory = Inventory::default();
        assert_eq!(machine.catch(100.0, &mut inventory), None);
        assert_eq!(machine.retrieve(), None);
        assert_eq!(machine.bar(), None);
    }

    #[test]
    fn striking_before_the_bite_is_a_miss() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut machine = FishingStateMachine::new(FishingConfig::default());
        let mut inventory = Inventory::default();
        machine.cast(0.0, &mut rng);
        assert_eq!(machine.catch(200.0, &mut inventory), Some(FishingOutcome::Missed));
        assert!(!machine.has_pending_timers());
    }

    #[test]
    fn ticks_follow_the_configured_period() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(13);
        let mut machine = biting_machine(&mut rng, &catalog);
        let first = machine.bar();
        machine.update(3010.0, &catalog, &mut rng);
        assert_eq!(machine.bar(), first);
        machine.update(3016.0, &catalog, &mut rng);
        assert_ne!(machine.bar(), first);
    }

    #[test]
    fn progress_stays_in_difficulty_band() {
        let machine = FishingStateMachine::new(FishingConfig::default());
        for i in 0..1000 {
            let p = machine.progress_at(i as f64 * 7.0, 1.5);
            assert!((50.0 - 37.5..=50.0 + 37.5).contains(&p));
        }
    }

    #[test]
    fn empty_catalog_ends_the_session() {
        let catalog = FishCatalog::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(14);
        let mut machine = FishingStateMachine::new(FishingConfig::default());
        machine.cast(0.0, &mut rng);
        assert_eq!(
            machine.update(3000.0, &catalog, &mut rng),
            Some(FishingEvent::Resolved(FishingOutcome::Timeout))
        );
        assert!(!machine.is_active());
    }

    #[test]
    fn end_to_end_cast_bite_catch() {
        let catalog = FishCatalog::default();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut machine = FishingStateMachine::new(FishingConfig::default());
        let mut inventory = Inventory::default();

        assert!(machine.cast(0.0, &mut rng));
        let mut bitten = None;
        let mut now = 0.0;
        while now <= 3100.0 {
            if let Some(FishingEvent::Bite(species)) = machine.update(now, &catalog, &mut rng) {
                bitten = Some(species);
                break;
            }
            now += 16.0;
        }
        let species = bitten.expect("a fish bites within the delay range");

        let strike = centred_time();
        machine.update(strike, &catalog, &mut rng);
        let outcome = machine.catch(strike, &mut inventory);
        assert_eq!(outcome, Some(FishingOutcome::Caught(species.clone())));
        assert_eq!(inventory.count(species.name), 1);
        assert_eq!(inventory.total_points(), species.points);
        assert_eq!(machine.phase(), &FishingPhase::Idle);
    }
}
