//! Client-side session for one day's puzzle.
//!
//! `AssignmentBoard` owns the view state (`Loading | LoadError | Ready`), the
//! assignment table, the in-progress drag gesture and the scoring sub-state.
//! Network calls are split into `begin_*` / `finish_*` halves carrying a
//! ticket, so a response that arrives after teardown, after a newer load, or
//! after the assignment changed is dropped instead of overwriting newer state.

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::client::{ClientError, PuzzleApi};
use crate::domain::{metrics_for_puzzle, Assignment, DailyPuzzle, DropTarget, Metric, PuzzleObject, ScoreResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreState {
    Idle,
    Checking,
    Done(ScoreResult),
    Error(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { object_id: String },
}

#[derive(Clone, Debug)]
pub struct ReadyBoard {
    pub puzzle: DailyPuzzle,
    pub metrics: Vec<Metric>,
    pub assignment: Assignment,
    pub drag: DragState,
    pub score: ScoreState,
}

#[derive(Clone, Debug)]
pub enum BoardState {
    Loading,
    LoadError(String),
    Ready(ReadyBoard),
}

/// One metric slot as rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotView<'a> {
    pub metric: &'a Metric,
    pub placed: Option<&'a PuzzleObject>,
    /// Correctness marker, only while a score result is shown.
    pub mark: Option<bool>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct SubmitTicket {
    epoch: u64,
    pub assignment: Assignment,
}

#[derive(Debug)]
pub struct AssignmentBoard {
    state: BoardState,
    load_epoch: u64,
    submit_epoch: u64,
    torn_down: bool,
}

impl Default for AssignmentBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentBoard {
    pub fn new() -> Self {
        Self { state: BoardState::Loading, load_epoch: 0, submit_epoch: 0, torn_down: false }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn ready(&self) -> Option<&ReadyBoard> {
        match &self.state {
            BoardState::Ready(r) => Some(r),
            _ => None,
        }
    }

    fn ready_mut(&mut self) -> Option<&mut ReadyBoard> {
        match &mut self.state {
            BoardState::Ready(r) => Some(r),
            _ => None,
        }
    }

    /// Enter `Loading`. Any earlier load or submit still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_epoch += 1;
        self.submit_epoch += 1;
        self.state = BoardState::Loading;
        LoadTicket(self.load_epoch)
    }

    /// Apply a fetch outcome. Returns false when the ticket is stale.
    #[instrument(level = "debug", skip(self, result))]
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<DailyPuzzle, ClientError>) -> bool {
        if self.torn_down || ticket.0 != self.load_epoch {
            debug!(target: "mostle_backend", "Discarding stale puzzle load");
            return false;
        }
        self.state = match result {
            Ok(puzzle) => {
                info!(target: "puzzle", id = %puzzle.id, date = %puzzle.date, "Board ready");
                BoardState::Ready(ReadyBoard {
                    metrics: metrics_for_puzzle(&puzzle),
                    puzzle,
                    assignment: Assignment::empty(),
                    drag: DragState::Idle,
                    score: ScoreState::Idle,
                })
            }
            Err(e) => {
                warn!(target: "puzzle", error = %e, "Failed to load daily puzzle");
                BoardState::LoadError(e.to_string())
            }
        };
        true
    }

    /// Record the object under the pointer. Unknown ids are ignored.
    pub fn drag_start(&mut self, object_id: &str) -> bool {
        let Some(r) = self.ready_mut() else { return false };
        if !r.puzzle.contains_object(object_id) {
            return false;
        }
        r.drag = DragState::Dragging { object_id: object_id.to_string() };
        true
    }

    pub fn drag_cancel(&mut self) {
        if let Some(r) = self.ready_mut() {
            r.drag = DragState::Idle;
        }
    }

    /// Finish the gesture. `None` means released outside any target.
    pub fn drag_end(&mut self, target: Option<DropTarget>) -> bool {
        let Some(r) = self.ready_mut() else { return false };
        let DragState::Dragging { object_id } = std::mem::take(&mut r.drag) else { return false };
        match target {
            Some(target) => self.drop_object(&object_id, target),
            None => false,
        }
    }

    /// Drop `object_id` on `target`. A change resets scoring to `Idle`.
    pub fn drop_object(&mut self, object_id: &str, target: DropTarget) -> bool {
        let Some(r) = self.ready_mut() else { return false };
        if !r.puzzle.contains_object(object_id) {
            return false;
        }
        if !r.assignment.apply_drop(object_id, target) {
            return false;
        }
        debug!(target: "puzzle", %object_id, ?target, "Assignment changed");
        self.invalidate_score();
        true
    }

    /// Clear every slot and scoring state.
    pub fn reset(&mut self) {
        if let Some(r) = self.ready_mut() {
            r.assignment.clear();
            r.drag = DragState::Idle;
        }
        self.invalidate_score();
    }

    fn invalidate_score(&mut self) {
        self.submit_epoch += 1;
        if let Some(r) = self.ready_mut() {
            r.score = ScoreState::Idle;
        }
    }

    pub fn is_filled(&self) -> bool {
        self.ready().is_some_and(|r| r.assignment.is_filled())
    }

    pub fn can_submit(&self) -> bool {
        self.ready().is_some_and(|r| r.assignment.is_filled() && r.score != ScoreState::Checking)
    }

    /// Enter `Checking` and hand out the assignment to send, if submitting is allowed.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.torn_down || !self.can_submit() {
            return None;
        }
        self.submit_epoch += 1;
        let epoch = self.submit_epoch;
        let r = self.ready_mut()?;
        r.score = ScoreState::Checking;
        Some(SubmitTicket { epoch, assignment: r.assignment.clone() })
    }

    /// Apply a scoring outcome. Returns false when the ticket is stale.
    #[instrument(level = "debug", skip(self, ticket, result))]
    pub fn finish_submit(&mut self, ticket: SubmitTicket, result: Result<ScoreResult, ClientError>) -> bool {
        if self.torn_down || ticket.epoch != self.submit_epoch {
            debug!(target: "mostle_backend", "Discarding stale score result");
            return false;
        }
        let Some(r) = self.ready_mut() else { return false };
        r.score = match result {
            Ok(res) => {
                info!(target: "puzzle", all_correct = res.all_correct, "Score received");
                ScoreState::Done(res)
            }
            Err(e) => ScoreState::Error(e.to_string()),
        };
        true
    }

    /// End of session: later responses are ignored.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Unassigned objects, in puzzle order.
    pub fn pool_objects(&self) -> Vec<&PuzzleObject> {
        match self.ready() {
            Some(r) => r.puzzle.objects.iter().filter(|o| !r.assignment.is_assigned(&o.id)).collect(),
            None => Vec::new(),
        }
    }

    pub fn slots(&self) -> Vec<SlotView<'_>> {
        let Some(r) = self.ready() else { return Vec::new() };
        r.metrics
            .iter()
            .map(|metric| SlotView {
                metric,
                placed: r.assignment.get(metric.key).and_then(|id| r.puzzle.object(id)),
                mark: match &r.score {
                    ScoreState::Done(res) => res.is_correct(metric.key),
                    _ => None,
                },
            })
            .collect()
    }

    pub fn label_for_object(&self, object_id: &str) -> Option<&str> {
        self.ready()?.puzzle.object(object_id).map(|o| o.name.as_str())
    }

    /// Name of the object being dragged, for the drag overlay.
    pub fn active_drag_label(&self) -> Option<&str> {
        match &self.ready()?.drag {
            DragState::Dragging { object_id } => self.label_for_object(object_id),
            DragState::Idle => None,
        }
    }
}

/// Fetch today's puzzle into the board. The lock is not held across the request.
pub async fn load_board<A: PuzzleApi>(board: &Mutex<AssignmentBoard>, api: &A) -> bool {
    let ticket = board.lock().await.begin_load();
    let result = api.fetch_daily().await;
    board.lock().await.finish_load(ticket, result)
}

/// Submit the current assignment. No-op unless the board allows submitting.
pub async fn submit_board<A: PuzzleApi>(board: &Mutex<AssignmentBoard>, api: &A) -> bool {
    let Some(ticket) = board.lock().await.begin_submit() else { return false };
    let result = api.check(&ticket.assignment).await;
    board.lock().await.finish_submit(ticket, result)
}
