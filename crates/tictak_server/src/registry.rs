//! Session registry: one game per conversation, locked per conversation.
//!
//! The map from identifier to slot is locked only long enough to find,
//! insert or remove a slot. Game logic runs under the slot's own lock,
//! so moves in unrelated conversations never wait on each other.

use crate::error::SessionError;
use crate::session::{Action, BoardView, Event, EventOutcome, MoveOutcome, Session, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use tictak_board::Position;
use tracing::{debug, info, instrument, warn};

/// Independently lockable cell holding at most one session.
type Slot = Arc<Mutex<Option<Session>>>;

/// Locks a mutex, recovering the value if a previous holder panicked.
///
/// Operations never leave a half-applied move behind, so the value
/// behind a poisoned lock is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns every active session.
///
/// Cloning yields another handle to the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    slots: Arc<Mutex<HashMap<SessionId, Slot>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session registry");
        Self::default()
    }

    /// Starts a game for `session_id`.
    ///
    /// Fails with [`SessionError::AlreadyInProgress`] while a game is
    /// running there. The new game has an empty board and X to move.
    #[instrument(skip(self))]
    pub fn start_game(&self, session_id: &str) -> Result<BoardView, SessionError> {
        let slot = self.slot_or_insert(session_id);
        self.with_slot(session_id, slot, |entry| {
            if entry.is_some() {
                warn!(session_id, "Game already in progress");
                return Err(SessionError::AlreadyInProgress(session_id.to_string()));
            }

            let session = Session::new(session_id.to_string());
            let view = session.view();
            *entry = Some(session);
            info!(session_id, "Started new game");
            Ok(view)
        })
    }

    /// Plays cell `index` (0-8) for whoever is to move in `session_id`.
    ///
    /// A winning or drawing move removes the session in the same step
    /// that reports the outcome.
    #[instrument(skip(self))]
    pub fn apply_move(&self, session_id: &str, index: usize) -> Result<MoveOutcome, SessionError> {
        let position = Position::from_index(index).ok_or_else(|| {
            warn!(session_id, index, "Cell index out of range");
            SessionError::InvalidIndex(index)
        })?;

        let slot = self
            .existing_slot(session_id)
            .ok_or_else(|| no_active_game(session_id))?;

        self.with_slot(session_id, slot, |entry| {
            let session = entry.as_mut().ok_or_else(|| no_active_game(session_id))?;

            let outcome = session.play(position).map_err(|e| {
                warn!(session_id, %position, error = %e, "Move rejected");
                SessionError::from(e)
            })?;

            match outcome {
                MoveOutcome::Win { player, .. } => {
                    info!(session_id, winner = %player, "Game won, closing session");
                    *entry = None;
                }
                MoveOutcome::Draw { .. } => {
                    info!(session_id, "Game drawn, closing session");
                    *entry = None;
                }
                MoveOutcome::Continue { next_player, .. } => {
                    debug!(session_id, %position, %next_player, "Move applied");
                }
            }

            Ok(outcome)
        })
    }

    /// Routes an inbound event to [`start_game`](Self::start_game) or
    /// [`apply_move`](Self::apply_move).
    #[instrument(skip(self))]
    pub fn handle(&self, event: &Event) -> Result<EventOutcome, SessionError> {
        match *event.action() {
            Action::StartGame => self.start_game(event.session_id()).map(EventOutcome::Started),
            Action::Move(index) => self
                .apply_move(event.session_id(), index)
                .map(EventOutcome::Moved),
        }
    }

    /// Snapshot of the game in `session_id`, if one is running.
    #[instrument(skip(self))]
    pub fn view(&self, session_id: &str) -> Option<BoardView> {
        let slot = self.existing_slot(session_id)?;
        let view = self.with_slot(session_id, slot, |entry| entry.as_ref().map(Session::view));
        if view.is_none() {
            debug!(session_id, "Session not found");
        }
        view
    }

    /// Whether a game is running in `session_id`.
    pub fn is_active(&self, session_id: &str) -> bool {
        self.view(session_id).is_some()
    }

    /// Identifiers with a running game, sorted.
    #[instrument(skip(self))]
    pub fn active_sessions(&self) -> Vec<SessionId> {
        let slots: Vec<(SessionId, Slot)> = lock(&self.slots)
            .iter()
            .map(|(id, slot)| (id.clone(), Arc::clone(slot)))
            .collect();

        let mut ids: Vec<SessionId> = slots
            .into_iter()
            .filter(|(_, slot)| lock(slot).is_some())
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }

    fn slot_or_insert(&self, session_id: &str) -> Slot {
        let mut slots = lock(&self.slots);
        Arc::clone(slots.entry(session_id.to_string()).or_default())
    }

    fn existing_slot(&self, session_id: &str) -> Option<Slot> {
        lock(&self.slots).get(session_id).map(Arc::clone)
    }

    /// Runs `f` under the slot's lock, then drops the slot if it ended up
    /// empty. The slot lock is released before the map lock is taken.
    fn with_slot<T>(
        &self,
        session_id: &str,
        slot: Slot,
        f: impl FnOnce(&mut Option<Session>) -> T,
    ) -> T {
        let result = {
            let mut entry = lock(&slot);
            f(&mut entry)
        };
        self.prune(session_id, slot);
        result
    }

    /// Removes an empty slot from the map.
    ///
    /// Handles are only cloned under the map lock, so if the map and
    /// `slot` hold the only two, no other operation can reach the slot.
    fn prune(&self, session_id: &str, slot: Slot) {
        let mut slots = lock(&self.slots);

        let is_mapped = slots
            .get(session_id)
            .is_some_and(|mapped| Arc::ptr_eq(mapped, &slot));
        if !is_mapped || Arc::strong_count(&slot) != 2 {
            return;
        }

        let is_vacant = match slot.try_lock() {
            Ok(entry) => entry.is_none(),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().is_none(),
            Err(TryLockError::WouldBlock) => false,
        };
        if is_vacant {
            slots.remove(session_id);
            debug!(session_id, "Removed empty session slot");
        }
    }
}

fn no_active_game(session_id: &str) -> SessionError {
    warn!(session_id, "No game in progress");
    SessionError::NoActiveGame(session_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictak_board::{Cell, Player};

    #[test]
    fn test_start_game_twice_rejected() {
        let registry = SessionRegistry::new();
        let view = registry.start_game("c1").expect("first start");
        assert_eq!(*view.current_player(), Player::X);
        assert_eq!(
            registry.start_game("c1"),
            Err(SessionError::AlreadyInProgress("c1".to_string()))
        );
    }

    #[test]
    fn test_move_without_game() {
        let registry = SessionRegistry::new();
        assert_eq!(
            registry.apply_move("c1", 4),
            Err(SessionError::NoActiveGame("c1".to_string()))
        );
        assert!(lock(&registry.slots).is_empty());
    }

    #[test]
    fn test_invalid_index_checked_first() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.apply_move("c1", 9), Err(SessionError::InvalidIndex(9)));
        registry.start_game("c1").expect("start");
        assert_eq!(registry.apply_move("c1", 42), Err(SessionError::InvalidIndex(42)));
        assert_eq!(registry.view("c1").map(|v| *v.board()), Some(Default::default()));
    }

    #[test]
    fn test_terminal_move_removes_slot() {
        let registry = SessionRegistry::new();
        registry.start_game("c1").expect("start");
        for index in [0, 3, 1, 4] {
            registry.apply_move("c1", index).expect("continue");
        }
        let outcome = registry.apply_move("c1", 2).expect("win");
        assert_eq!(
            outcome,
            MoveOutcome::Win {
                board: *outcome.board(),
                player: Player::X
            }
        );
        assert_eq!(outcome.board().get(Position::TopRight), Cell::Occupied(Player::X));
        assert!(lock(&registry.slots).is_empty());
        assert!(!registry.is_active("c1"));
    }

    #[test]
    fn test_rejected_start_keeps_slot() {
        let registry = SessionRegistry::new();
        registry.start_game("c1").expect("start");
        let _ = registry.start_game("c1");
        assert_eq!(registry.active_sessions(), vec!["c1".to_string()]);
    }

    #[test]
    fn test_poisoned_slot_is_recovered() {
        let registry = SessionRegistry::new();
        registry.start_game("c1").expect("start");
        let slot = registry.existing_slot("c1").expect("slot");

        let poisoner = Arc::clone(&slot);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().expect("unpoisoned");
            panic!("poison the slot");
        })
        .join();
        drop(slot);

        assert!(registry.apply_move("c1", 0).is_ok());
    }
}
