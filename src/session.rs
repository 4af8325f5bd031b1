//! Async driver gluing the scheduler to its collaborators: a frame-rate
//! tokio interval polls the tick gate, a command channel carries the
//! session-level calls, and observers get every committed state.
//!
//! Everything runs on one task, so the tick callback and the session-level
//! commands never execute concurrently; closing the command channel ends
//! the loop and guarantees no further engine steps.

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, interval};

use crate::defaults::FRAME_INTERVAL_MS;
use crate::engine::{Direction, GameMode, GameStatus};
use crate::log;
use crate::observers::{AuthProbe, Leaderboard, StateObserver};
use crate::scheduler::GameScheduler;

#[derive(Clone, Debug)]
pub enum SessionCommand {
    Start,
    PauseToggle,
    Reset,
    ChangeMode(GameMode),
    Turn(Direction),
    Key { key: String, from_text_input: bool },
}

pub struct GameSession;

impl GameSession {
    /// Runs a session until the command channel closes. The final state is
    /// returned so callers can show a last frame after teardown.
    pub async fn run<O, A, L>(
        mut scheduler: GameScheduler,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        observer: O,
        auth: A,
        leaderboard: L,
    ) -> crate::engine::GameState
    where
        O: StateObserver,
        A: AuthProbe,
        L: Leaderboard,
    {
        let started = Instant::now();
        let mut frames = interval(Duration::from_millis(FRAME_INTERVAL_MS));
        let mut prev_status = scheduler.state().status;

        observer.state_changed(scheduler.state().clone()).await;

        loop {
            tokio::select! {
                _ = frames.tick() => {
                    let now_ms = started.elapsed().as_millis() as u64;
                    if scheduler.advance(now_ms) {
                        observer.state_changed(scheduler.state().clone()).await;

                        let status = scheduler.state().status;
                        if status == GameStatus::GameOver && prev_status != GameStatus::GameOver {
                            report_game_over(&scheduler, &auth, &leaderboard).await;
                        }
                        prev_status = status;
                    }
                }
                command = commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    Self::apply(&mut scheduler, command);
                    prev_status = scheduler.state().status;
                    observer.state_changed(scheduler.state().clone()).await;
                }
            }
        }

        scheduler.state().clone()
    }

    fn apply(scheduler: &mut GameScheduler, command: SessionCommand) {
        match command {
            SessionCommand::Start => {
                scheduler.start();
            }
            SessionCommand::PauseToggle => {
                scheduler.toggle_pause();
            }
            SessionCommand::Reset => {
                scheduler.reset();
            }
            SessionCommand::ChangeMode(mode) => {
                scheduler.change_mode(mode);
            }
            SessionCommand::Turn(direction) => scheduler.enqueue_direction(direction),
            SessionCommand::Key {
                key,
                from_text_input,
            } => scheduler.handle_key(&key, from_text_input),
        }
    }
}

/// Once per game: submit the final score if there is one and the auth
/// collaborator allows it. Submission failures never touch gameplay.
async fn report_game_over<A, L>(scheduler: &GameScheduler, auth: &A, leaderboard: &L)
where
    A: AuthProbe,
    L: Leaderboard,
{
    let state = scheduler.state();
    log!(
        "Game over after {} ticks, score {}",
        scheduler.tick(),
        state.score
    );

    if state.score == 0 || !auth.can_submit_score() {
        return;
    }

    if let Err(e) = leaderboard.submit_score(state.score, state.mode).await {
        log!("Score submission failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::engine::{GameState, Point};
    use crate::session_rng::SessionRng;

    #[derive(Clone, Default)]
    struct RecordingObserver {
        states: Arc<Mutex<Vec<GameState>>>,
    }

    impl StateObserver for RecordingObserver {
        async fn state_changed(&self, state: GameState) {
            self.states.lock().unwrap().push(state);
        }
    }

    struct AllowAll;

    impl AuthProbe for AllowAll {
        fn can_submit_score(&self) -> bool {
            true
        }
    }

    struct DenyAll;

    impl AuthProbe for DenyAll {
        fn can_submit_score(&self) -> bool {
            false
        }
    }

    #[derive(Clone, Default)]
    struct RecordingLeaderboard {
        submissions: Arc<Mutex<Vec<(u32, GameMode)>>>,
    }

    impl Leaderboard for RecordingLeaderboard {
        async fn submit_score(&self, score: u32, mode: GameMode) -> Result<(), String> {
            self.submissions.lock().unwrap().push((score, mode));
            Ok(())
        }
    }

    fn walls_scheduler() -> GameScheduler {
        GameScheduler::new(GameMode::Walls, SessionRng::new(42))
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_publishes_initial_state_and_stops_on_channel_close() {
        let observer = RecordingObserver::default();
        let states = observer.states.clone();
        let (tx, rx) = mpsc::unbounded_channel();

        drop(tx);
        let final_state =
            GameSession::run(walls_scheduler(), rx, observer, AllowAll, RecordingLeaderboard::default())
                .await;

        assert_eq!(final_state.status, GameStatus::Idle);
        assert_eq!(states.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ticks_and_submits_score_once_on_game_over() {
        let observer = RecordingObserver::default();
        let states = observer.states.clone();
        let leaderboard = RecordingLeaderboard::default();
        let submissions = leaderboard.submissions.clone();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut scheduler = walls_scheduler();
        scheduler.start();
        // Food directly ahead, then a straight run into the right wall.
        scheduler_state_mut(&mut scheduler).food = Point::new(11, 10);

        let session = tokio::spawn(GameSession::run(
            scheduler,
            rx,
            observer,
            AllowAll,
            leaderboard,
        ));

        // 9 in-range ticks plus the fatal one at ~150 ms each; with the
        // paused tokio clock this all elapses instantly.
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(tx);
        let final_state = session.await.unwrap();

        assert_eq!(final_state.status, GameStatus::GameOver);
        // At least the forced first food was eaten; regenerated food may or
        // may not land on the remaining straight run to the wall.
        assert!(final_state.score >= 10);

        let submissions = submissions.lock().unwrap();
        assert_eq!(*submissions, vec![(final_state.score, GameMode::Walls)]);
        assert!(states.lock().unwrap().len() > 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_submission_when_auth_denies() {
        let leaderboard = RecordingLeaderboard::default();
        let submissions = leaderboard.submissions.clone();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut scheduler = walls_scheduler();
        scheduler.start();
        scheduler_state_mut(&mut scheduler).food = Point::new(11, 10);

        let session = tokio::spawn(GameSession::run(
            scheduler,
            rx,
            RecordingObserver::default(),
            DenyAll,
            leaderboard,
        ));

        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(tx);
        let final_state = session.await.unwrap();

        assert_eq!(final_state.status, GameStatus::GameOver);
        assert!(submissions.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_drive_lifecycle() {
        let observer = RecordingObserver::default();
        let (tx, rx) = mpsc::unbounded_channel();

        let session = tokio::spawn(GameSession::run(
            walls_scheduler(),
            rx,
            observer,
            AllowAll,
            RecordingLeaderboard::default(),
        ));

        tx.send(SessionCommand::ChangeMode(GameMode::PassThrough)).unwrap();
        tx.send(SessionCommand::Start).unwrap();
        tx.send(SessionCommand::Turn(Direction::Up)).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        tx.send(SessionCommand::PauseToggle).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(tx);

        let final_state = session.await.unwrap();
        assert_eq!(final_state.mode, GameMode::PassThrough);
        assert_eq!(final_state.status, GameStatus::Paused);
        assert_eq!(final_state.direction, Direction::Up);
    }

    /// Test-only backdoor for pinning food; production code never mutates
    /// state from outside the scheduler.
    fn scheduler_state_mut(scheduler: &mut GameScheduler) -> &mut GameState {
        scheduler.state_mut_for_tests()
    }
}
