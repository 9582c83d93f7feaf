//! Animator that reports each turn on the terminal in real time.

use cubeturn_core::TurnDelta;
use cubeturn_notation::Move;
use cubeturn_view::{AnimationPreferences, Animator, Completion, TurnAnimation};
use web_time::Duration;

const FRAME_DURATION: Duration = Duration::from_millis(16);

pub struct TerminalAnimator {
    prefs: AnimationPreferences,
    /// Maximum number of turns in the queue (reset when the queue is empty).
    queue_max: usize,
}
impl TerminalAnimator {
    pub fn new(prefs: AnimationPreferences) -> Self {
        Self {
            prefs,
            queue_max: 0,
        }
    }
}
impl Animator for TerminalAnimator {
    fn animate(&mut self, delta: &TurnDelta, pending: usize, done: Completion) {
        self.queue_max = std::cmp::max(self.queue_max, pending + 1);
        let duration = self.prefs.duration_for_queue(self.queue_max);
        if pending == 0 {
            self.queue_max = 0;
        }

        let name = match Move::from_layer_turn(delta.axis, delta.layer) {
            Some(m) => m.to_string(),
            None => format!("{} slice", delta.axis),
        };
        eprintln!("{name:>8}  {} ({} more)", delta.turn, pending);

        let anim = TurnAnimation::new(*delta, self.prefs.twist_interpolation);
        std::thread::spawn(move || {
            let frames = (duration.as_secs_f32() / FRAME_DURATION.as_secs_f32()).ceil() as u32;
            for frame in 1..=frames {
                std::thread::sleep(FRAME_DURATION.min(duration));
                let t = frame as f32 / frames as f32;
                let rot = anim.rotation(t);
                log::trace!("{name} t={t:.2} rotation={rot:?}");
            }
            done.finish();
        });
    }
}
