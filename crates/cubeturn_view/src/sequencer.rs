//! Move sequencer that plays moves one at a time, waiting for each animation
//! to finish before starting the next.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread::JoinHandle;

use cubeturn_core::{
    CubeError, CubeSnapshot, CubeState, CubieId, Facelets, Result, SignedAxis, TurnDelta,
    apply_turn, turn_layer,
};
use cubeturn_notation::{Move, MoveSequence};
use parking_lot::{Condvar, Mutex, RwLock};
use rand::Rng;
use web_time::Instant;

/// Number of moves in a scramble if no length is given.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 10;

/// Renders committed turns.
///
/// The sequencer calls [`Animator::animate()`] once per committed turn, in
/// order, and does not commit the next turn until `done` is finished or
/// dropped.
pub trait Animator: Send + 'static {
    /// Starts animating a turn that has already been committed. `pending` is
    /// the number of moves queued after this one.
    fn animate(&mut self, delta: &TurnDelta, pending: usize, done: Completion);
}

/// Animator that finishes every turn immediately.
#[derive(Debug, Default, Copy, Clone)]
pub struct InstantAnimator;
impl Animator for InstantAnimator {
    fn animate(&mut self, _delta: &TurnDelta, _pending: usize, done: Completion) {
        done.finish();
    }
}

/// Signal that a turn animation has finished. Dropping it also counts as
/// finished.
#[derive(Debug)]
pub struct Completion(mpsc::Sender<()>);
impl Completion {
    fn new() -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel();
        (Self(tx), rx)
    }

    /// Marks the animation as finished.
    pub fn finish(self) {
        // ignore channel error
        let _ = self.0.send(());
    }
}

/// Whether a request was accepted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Submission {
    /// The request was queued.
    Accepted,
    /// The request was dropped because another sequence was playing, or
    /// because it contained nothing to do.
    Ignored,
}

#[derive(Debug)]
enum Command {
    Play { moves: MoveSequence },
    Turn { cubie: CubieId, axis: SignedAxis },
    /// Undoes layer turns, given in the order they were played.
    Undo { turns: Vec<LayerTurn> },
}

/// Signed axis and the coordinate of the turned layer along it.
type LayerTurn = (SignedAxis, i8);

/// Turns committed since the last solve.
#[derive(Debug, Default)]
struct History {
    /// Every layer turn, including middle slices.
    turns: Vec<LayerTurn>,
    /// Notation for the outer-layer turns.
    shuffle_code: MoveSequence,
}
impl History {
    fn record(&mut self, delta: &TurnDelta) {
        self.turns.push((delta.axis, delta.layer));
        match Move::from_layer_turn(delta.axis, delta.layer) {
            Some(m) => self.shuffle_code.push(m),
            None => log::trace!("middle slice turn around {} has no notation", delta.axis),
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    state: RwLock<CubeState>,
    history: Mutex<History>,
    /// Whether a sequence has been accepted and has not finished yet.
    animating: AtomicBool,
    idle_lock: Mutex<()>,
    idle: Condvar,
    /// Fatal error that stopped the sequencer.
    failure: Mutex<Option<CubeError>>,
}
impl Shared {
    fn finish_sequence(&self) {
        {
            let _guard = self.idle_lock.lock();
            self.animating.store(false, Ordering::Release);
        }
        self.idle.notify_all();
    }
}

/// Owner of a cube that accepts moves from keyboard, buttons, or a picker and
/// plays them in order on a worker thread.
///
/// Only one sequence plays at a time. Requests made while a sequence is
/// playing are ignored.
#[derive(Debug)]
pub struct Sequencer {
    shared: Arc<Shared>,
    tx: Option<mpsc::Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl Drop for Sequencer {
    fn drop(&mut self) {
        // Close the channel so the worker exits after the current sequence.
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("sequencer worker panicked");
            }
        }
    }
}

impl Sequencer {
    /// Constructs a sequencer with a solved cube.
    pub fn new(animator: impl Animator) -> Self {
        Self::with_state(CubeState::new_solved(), animator)
    }

    /// Constructs a sequencer that owns an existing cube.
    pub fn with_state(state: CubeState, animator: impl Animator) -> Self {
        let shared = Arc::new(Shared {
            state: RwLock::new(state),
            ..Default::default()
        });
        let (tx, rx) = mpsc::channel();
        let worker = std::thread::spawn({
            let shared = Arc::clone(&shared);
            move || run_worker(&shared, rx, animator)
        });
        Self {
            shared,
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Plays a sequence of moves and appends them to the shuffle code.
    pub fn play(&self, moves: MoveSequence) -> Result<Submission> {
        self.check_poisoned()?;
        if moves.is_empty() {
            return Ok(Submission::Ignored);
        }
        if !self.try_begin("play") {
            return Ok(Submission::Ignored);
        }
        self.send(Command::Play { moves })
    }
    /// Parses a move string leniently and plays it. Unknown characters are
    /// skipped.
    pub fn play_str(&self, moves: &str) -> Result<Submission> {
        self.play(MoveSequence::parse_lenient(moves))
    }
    /// Plays a single move.
    pub fn push_move(&self, m: Move) -> Result<Submission> {
        self.play(MoveSequence(vec![m]))
    }

    /// Turns the slice containing `cubie` around `axis`, as requested by a
    /// picker. Outer-layer turns are appended to the shuffle code. Middle
    /// slice turns have no notation but are still undone by
    /// [`Sequencer::solve()`].
    pub fn manual_turn(&self, cubie: CubieId, axis: SignedAxis) -> Result<Submission> {
        self.check_poisoned()?;
        if !self.try_begin("manual turn") {
            return Ok(Submission::Ignored);
        }
        self.send(Command::Turn { cubie, axis })
    }

    /// Plays `count` random moves and returns them, or returns `None` if
    /// another sequence is playing.
    pub fn scramble(&self, count: usize) -> Result<Option<MoveSequence>> {
        self.scramble_with_rng(&mut rand::rng(), count)
    }
    /// Plays `count` moves generated from a seed and returns them, or returns
    /// `None` if another sequence is playing.
    pub fn scramble_seeded(&self, seed: u64, count: usize) -> Result<Option<MoveSequence>> {
        self.scramble_moves(|| MoveSequence::seeded(seed, count))
    }
    /// Plays `count` moves drawn from `rng` and returns them, or returns `None`
    /// if another sequence is playing.
    pub fn scramble_with_rng(
        &self,
        rng: &mut impl Rng,
        count: usize,
    ) -> Result<Option<MoveSequence>> {
        self.scramble_moves(|| MoveSequence::random(rng, count))
    }
    fn scramble_moves(
        &self,
        generate: impl FnOnce() -> MoveSequence,
    ) -> Result<Option<MoveSequence>> {
        self.check_poisoned()?;
        if !self.try_begin("scramble") {
            return Ok(None);
        }
        let moves = generate();
        log::info!("scrambling with {moves}");
        if moves.is_empty() {
            self.shared.finish_sequence();
            return Ok(Some(moves));
        }
        self.send(Command::Play {
            moves: moves.clone(),
        })?;
        Ok(Some(moves))
    }

    /// Undoes every turn since the last solve, in reverse order, and clears
    /// the shuffle code. Does nothing if no turns have been made.
    ///
    /// Without middle slice turns, this plays the inverse of the shuffle
    /// code.
    pub fn solve(&self) -> Result<Submission> {
        self.check_poisoned()?;
        if !self.try_begin("solve") {
            return Ok(Submission::Ignored);
        }
        let history = std::mem::take(&mut *self.shared.history.lock());
        if history.turns.is_empty() {
            log::debug!("nothing to solve");
            self.shared.finish_sequence();
            return Ok(Submission::Accepted);
        }
        log::info!(
            "solving {} turns with {}",
            history.turns.len(),
            history.shuffle_code.inverse(),
        );
        self.send(Command::Undo {
            turns: history.turns,
        })
    }

    /// Blocks until the current sequence finishes, then returns the error
    /// that stopped the sequencer, if any.
    pub fn wait_idle(&self) -> Result<()> {
        let mut guard = self.shared.idle_lock.lock();
        while self.shared.animating.load(Ordering::Acquire) {
            self.shared.idle.wait(&mut guard);
        }
        drop(guard);
        self.check_poisoned()
    }

    /// Returns whether a sequence is playing.
    pub fn is_animating(&self) -> bool {
        self.shared.animating.load(Ordering::Acquire)
    }

    /// Returns a copy of every cubie's position and orientation.
    pub fn snapshot(&self) -> CubeSnapshot {
        self.shared.state.read().snapshot()
    }
    /// Returns the sticker colors of the cube.
    pub fn facelets(&self) -> Facelets {
        self.shared.state.read().facelets()
    }
    /// Returns whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        self.shared.state.read().is_solved()
    }
    /// Returns a copy of the moves played since the last solve.
    pub fn shuffle_code(&self) -> MoveSequence {
        self.shared.history.lock().shuffle_code.clone()
    }

    fn check_poisoned(&self) -> Result<()> {
        match &*self.shared.failure.lock() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn try_begin(&self, what: &str) -> bool {
        let accepted = self
            .shared
            .animating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if !accepted {
            log::debug!("ignoring {what} while animating");
        }
        accepted
    }

    fn send(&self, command: Command) -> Result<Submission> {
        let sent = self.tx.as_ref().is_some_and(|tx| tx.send(command).is_ok());
        if sent {
            Ok(Submission::Accepted)
        } else {
            self.shared.finish_sequence();
            Err(CubeError::InvariantViolation(
                "sequencer worker has stopped".to_string(),
            ))
        }
    }
}

fn run_worker(shared: &Shared, rx: mpsc::Receiver<Command>, mut animator: impl Animator) {
    for command in rx {
        let result = match command {
            Command::Play { moves } => play_moves(shared, &mut animator, &moves),
            Command::Turn { cubie, axis } => turn_cubie(shared, &mut animator, cubie, axis),
            Command::Undo { turns } => undo_turns(shared, &mut animator, &turns),
        };
        if let Err(e) = result {
            log::error!("stopping sequencer: {e}");
            *shared.failure.lock() = Some(e);
        }
        shared.finish_sequence();
    }
}

fn play_moves(
    shared: &Shared,
    animator: &mut impl Animator,
    moves: &MoveSequence,
) -> Result<()> {
    let start = Instant::now();
    for (i, &m) in moves.iter().enumerate() {
        let delta = m.apply(&mut shared.state.write())?;
        shared.history.lock().record(&delta);
        animate_and_wait(animator, &delta, moves.len() - i - 1);
    }
    log::debug!("played {} moves in {:?}", moves.len(), start.elapsed());
    Ok(())
}

fn turn_cubie(
    shared: &Shared,
    animator: &mut impl Animator,
    cubie: CubieId,
    axis: SignedAxis,
) -> Result<()> {
    let delta = match apply_turn(&mut shared.state.write(), cubie, axis) {
        Ok(delta) => delta,
        Err(e) if !e.is_fatal() => {
            log::warn!("ignoring manual turn: {e}");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    shared.history.lock().record(&delta);
    animate_and_wait(animator, &delta, 0);
    Ok(())
}

fn undo_turns(shared: &Shared, animator: &mut impl Animator, turns: &[LayerTurn]) -> Result<()> {
    let start = Instant::now();
    for (i, &(axis, layer)) in turns.iter().rev().enumerate() {
        let delta = turn_layer(&mut shared.state.write(), -axis, layer)?;
        animate_and_wait(animator, &delta, turns.len() - i - 1);
    }
    log::debug!("undid {} turns in {:?}", turns.len(), start.elapsed());
    Ok(())
}

fn animate_and_wait(animator: &mut impl Animator, delta: &TurnDelta, pending: usize) {
    let (done, rx) = Completion::new();
    animator.animate(delta, pending, done);
    // A dropped `Completion` also ends the wait.
    let _ = rx.recv();
}
