//! Displayed-balance animation.
//!
//! The animator never touches the ledger. It only turns a sequence of
//! authoritative balance changes into a displayed value that moves linearly
//! toward the latest target, one frame at a time.

use std::time::Duration;

use crate::domain::Money;
use crate::ticker::Ticker;

/// Reference animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub displayed: Money,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    from: Money,
    to: Money,
    started_at: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct BalanceAnimator {
    duration: Duration,
    displayed: Money,
    run: Option<Run>,
}

impl BalanceAnimator {
    pub fn new(initial: Money, duration: Duration) -> Self {
        Self {
            duration,
            displayed: initial,
            run: None,
        }
    }

    pub fn displayed(&self) -> Money {
        self.displayed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    /// Starts an animation toward `to`, superseding any animation in flight.
    ///
    /// A superseded animation hands over its current displayed value as the
    /// new starting point, so the display never jumps back to `from`.
    pub fn start(&mut self, from: Money, to: Money) {
        let from = if self.is_animating() {
            self.displayed
        } else {
            from
        };
        self.displayed = from;
        self.run = Some(Run {
            from,
            to,
            started_at: None,
        });
    }

    /// Advances to the frame at `now`. The first frame after `start` fixes the
    /// start time.
    pub fn on_frame(&mut self, now: Duration) -> Frame {
        let Some(run) = self.run.as_mut() else {
            return Frame {
                displayed: self.displayed,
                finished: true,
            };
        };

        let started_at = *run.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);

        if self.duration.is_zero() || elapsed >= self.duration {
            self.displayed = run.to;
            self.run = None;
            return Frame {
                displayed: self.displayed,
                finished: true,
            };
        }

        self.displayed = interpolate(run.from, run.to, elapsed, self.duration);
        Frame {
            displayed: self.displayed,
            finished: false,
        }
    }
}

/// `floor(from + (to - from) * elapsed / duration)` for `elapsed < duration`.
///
/// Exact whenever `|to - from| * duration` fits in an `i128` (any i64 pair
/// over roughly 290 years). Beyond that both times are scaled down by the
/// same power of two; the shift depends only on the run, so successive frames
/// still move monotonically.
fn interpolate(from: Money, to: Money, elapsed: Duration, duration: Duration) -> Money {
    let delta = i128::from(to.0) - i128::from(from.0);
    let magnitude = delta.unsigned_abs();
    let mut elapsed = elapsed.as_nanos();
    let mut duration = duration.as_nanos();

    while magnitude
        .checked_mul(duration)
        .is_none_or(|p| p > i128::MAX as u128)
    {
        elapsed >>= 1;
        duration >>= 1;
    }

    // magnitude * elapsed <= magnitude * duration, so this fits.
    let step = (delta * elapsed as i128).div_euclid(duration as i128);
    Money((i128::from(from.0) + step) as i64)
}

/// Pulls frames from `ticker` until the current animation settles, handing
/// each one to `on_frame`. Returns immediately if nothing is animating.
pub async fn drive<T, F>(animator: &mut BalanceAnimator, ticker: &mut T, mut on_frame: F) -> Money
where
    T: Ticker,
    F: FnMut(Frame),
{
    while animator.is_animating() {
        let now = ticker.next_frame().await;
        on_frame(animator.on_frame(now));
    }
    animator.displayed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::ManualTicker;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn idle_animator_reports_settled_value() {
        let mut animator = BalanceAnimator::new(Money(42), DEFAULT_DURATION);
        assert!(!animator.is_animating());
        let frame = animator.on_frame(ms(10));
        assert_eq!(frame.displayed, Money(42));
        assert!(frame.finished);
    }

    #[test]
    fn linear_decrease_reaches_target_exactly() {
        let mut animator = BalanceAnimator::new(Money(1000), ms(500));
        animator.start(Money(1000), Money(0));

        let mut last = animator.displayed();
        for t in (0..=600).step_by(7) {
            let frame = animator.on_frame(ms(t));
            assert!(frame.displayed <= last, "displayed rose at {t}ms");
            last = frame.displayed;
            if t >= 500 {
                assert_eq!(frame.displayed, Money(0));
                assert!(frame.finished);
                break;
            }
        }
        assert_eq!(animator.displayed(), Money(0));
        assert!(!animator.is_animating());
    }

    #[test]
    fn start_time_latches_on_first_frame() {
        let mut animator = BalanceAnimator::new(Money(1000), ms(500));
        animator.start(Money(1000), Money(0));

        assert_eq!(animator.on_frame(ms(10_000)).displayed, Money(1000));
        assert_eq!(animator.on_frame(ms(10_250)).displayed, Money(500));
        let done = animator.on_frame(ms(10_500));
        assert_eq!(done.displayed, Money(0));
        assert!(done.finished);
    }

    #[test]
    fn interpolation_floors() {
        let mut animator = BalanceAnimator::new(Money(0), ms(3));
        animator.start(Money(0), Money(10));
        animator.on_frame(ms(0));
        // 10 * 1/3 = 3.33
        assert_eq!(animator.on_frame(ms(1)).displayed, Money(3));

        let mut animator = BalanceAnimator::new(Money(10), ms(3));
        animator.start(Money(10), Money(0));
        animator.on_frame(ms(0));
        // 10 - 3.33 = 6.67
        assert_eq!(animator.on_frame(ms(1)).displayed, Money(6));
    }

    #[test]
    fn restart_continues_from_displayed_value() {
        let mut animator = BalanceAnimator::new(Money(1000), ms(500));
        animator.start(Money(1000), Money(0));
        animator.on_frame(ms(0));
        assert_eq!(animator.on_frame(ms(250)).displayed, Money(500));

        animator.start(Money(0), Money(2000));
        assert_eq!(animator.displayed(), Money(500));

        animator.on_frame(ms(300));
        assert_eq!(animator.on_frame(ms(550)).displayed, Money(1250));
        let done = animator.on_frame(ms(800));
        assert_eq!(done.displayed, Money(2000));
        assert!(done.finished);
    }

    #[test]
    fn zero_duration_completes_on_first_frame() {
        let mut animator = BalanceAnimator::new(Money(1000), Duration::ZERO);
        animator.start(Money(1000), Money(10));
        let frame = animator.on_frame(ms(0));
        assert_eq!(frame.displayed, Money(10));
        assert!(frame.finished);
    }

    #[test]
    fn huge_swings_do_not_overflow() {
        let mut animator = BalanceAnimator::new(Money(i64::MAX), ms(500));
        animator.start(Money(i64::MAX), Money(i64::MIN));
        animator.on_frame(ms(0));
        let mid = animator.on_frame(ms(250)).displayed;
        assert!(mid.0 > i64::MIN && mid.0 < i64::MAX);
    }

    #[test]
    fn very_long_durations_do_not_overflow() {
        let mut animator = BalanceAnimator::new(Money(i64::MAX), Duration::MAX);
        animator.start(Money(i64::MAX), Money(i64::MIN));
        animator.on_frame(Duration::ZERO);

        let mut last = animator.displayed();
        for secs in [1u64 << 20, 1 << 30, 1 << 40, 1 << 50, 1 << 62] {
            let frame = animator.on_frame(Duration::from_secs(secs));
            assert!(!frame.finished);
            assert!(frame.displayed <= last);
            last = frame.displayed;
        }
        assert!(last < Money(i64::MAX));

        let done = animator.on_frame(Duration::MAX);
        assert_eq!(done.displayed, Money(i64::MIN));
        assert!(done.finished);
    }

    #[tokio::test]
    async fn drive_runs_until_settled() {
        let mut animator = BalanceAnimator::new(Money(1000), ms(500));
        let mut ticker = ManualTicker::new(ms(100));
        animator.start(Money(1000), Money(0));

        let mut frames = Vec::new();
        let settled = drive(&mut animator, &mut ticker, |f| frames.push(f.displayed.0)).await;

        assert_eq!(settled, Money(0));
        assert_eq!(frames, vec![1000, 800, 600, 400, 200, 0]);
    }
}
