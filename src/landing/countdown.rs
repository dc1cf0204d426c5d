use log::debug;

use crate::ports::UiElement;

const HOUR_MS: i64 = 60 * 60 * 1000;
const MINUTE_MS: i64 = 60 * 1000;
const SECOND_MS: i64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Remaining {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Whole hours, minutes and seconds. Hours are not capped at 24.
    pub fn from_millis(distance: i64) -> Self {
        Self {
            hours: distance / HOUR_MS,
            minutes: (distance % HOUR_MS) / MINUTE_MS,
            seconds: (distance % MINUTE_MS) / SECOND_MS,
        }
    }

    pub fn digits(&self) -> [String; 3] {
        [
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Render(Remaining),
    /// Ran past the end; a fresh countdown starts and nothing is drawn
    /// this tick.
    Restarted,
}

/// Always running. Each tick either shows the time left or, once past the
/// end, starts over from the full duration.
#[derive(Clone, Debug)]
pub struct Countdown {
    duration_ms: i64,
    end_time: i64,
}

impl Countdown {
    pub fn start(now: i64, duration_ms: u64) -> Self {
        let duration_ms = duration_ms as i64;
        Self {
            duration_ms,
            end_time: now + duration_ms,
        }
    }

    pub fn tick(&mut self, now: i64) -> Tick {
        let distance = self.end_time - now;
        if distance < 0 {
            self.end_time = now + self.duration_ms;
            debug!("Countdown finished, restarting");
            return Tick::Restarted;
        }
        Tick::Render(Remaining::from_millis(distance))
    }
}

/// The three digit boxes. Any of them may be missing from the page.
pub struct CountdownDisplay<E> {
    pub hours: Option<E>,
    pub minutes: Option<E>,
    pub seconds: Option<E>,
}

impl<E: UiElement> CountdownDisplay<E> {
    pub fn show(&self, tick: Tick) {
        let Tick::Render(remaining) = tick else {
            return;
        };
        let [h, m, s] = remaining.digits();
        for (slot, text) in [(&self.hours, h), (&self.minutes, m), (&self.seconds, s)] {
            if let Some(el) = slot {
                el.set_text(&text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountdownConfig;
    use crate::ports::fakes::FakeElement;
    use std::rc::Rc;

    fn render(tick: Tick) -> String {
        match tick {
            Tick::Render(r) => r.digits().join(":"),
            Tick::Restarted => "restart".to_string(),
        }
    }

    #[test]
    fn test_first_render_shows_full_duration() {
        let config = CountdownConfig { hours: 5, minutes: 15, seconds: 25 };
        let mut countdown = Countdown::start(1_000, config.duration_millis());
        assert_eq!(render(countdown.tick(1_000)), "05:15:25");
    }

    #[test]
    fn test_partial_seconds_round_down() {
        let mut countdown = Countdown::start(0, 3_000);
        assert_eq!(render(countdown.tick(1)), "00:00:02");
        assert_eq!(render(countdown.tick(2_999)), "00:00:00");
    }

    #[test]
    fn test_hours_are_not_wrapped_into_days() {
        let mut countdown = Countdown::start(0, 30 * HOUR_MS as u64);
        assert_eq!(render(countdown.tick(0)), "30:00:00");
    }

    #[test]
    fn test_three_second_countdown_restarts_after_zero() {
        let mut countdown = Countdown::start(0, 3_000);
        let shown: Vec<_> = (0..=4).map(|i| render(countdown.tick(i * 1_000))).collect();
        assert_eq!(shown, vec!["00:00:03", "00:00:02", "00:00:01", "00:00:00", "restart"]);

        // restarted at 4s, so 7s is the new end
        assert_eq!(render(countdown.tick(5_000)), "00:00:02");
        assert_eq!(render(countdown.tick(7_000)), "00:00:00");
        assert_eq!(render(countdown.tick(7_001)), "restart");
    }

    #[test]
    fn test_never_shows_negative_time() {
        let mut countdown = Countdown::start(0, 2_000);
        let mut restarts = 0;
        for now in (0..20_000).step_by(250) {
            match countdown.tick(now) {
                Tick::Render(r) => {
                    let total = r.hours * 3600 + r.minutes * 60 + r.seconds;
                    assert!((0..=2).contains(&total), "showed {} at {}", total, now);
                }
                Tick::Restarted => restarts += 1,
            }
        }
        assert!(restarts > 0);
    }

    #[test]
    fn test_display_skips_restart_ticks() {
        let seconds = FakeElement::new();
        let display = CountdownDisplay {
            hours: None::<Rc<FakeElement>>,
            minutes: None,
            seconds: Some(seconds.clone()),
        };
        let mut countdown = Countdown::start(0, 1_000);

        display.show(countdown.tick(0));
        assert_eq!(seconds.text(), "01");
        display.show(countdown.tick(1_000));
        assert_eq!(seconds.text(), "00");
        display.show(countdown.tick(2_000));
        assert_eq!(seconds.text(), "00");
    }
}
