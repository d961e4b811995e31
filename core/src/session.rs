use alloc::collections::VecDeque;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Ready,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Notification for the presentation layer, drained with [`GameSession::drain_events`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    CellsRevealed { origin: Position, count: CellCount },
    MineHit { position: Position },
    FlagToggled { position: Position, flagged: bool },
    Ticked { elapsed_seconds: u32 },
    Ended { state: GameState },
}

/// Result of a primary activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateOutcome {
    pub state: GameState,
    pub cells_revealed: CellCount,
    pub hit_mine: bool,
}

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagToggle {
    pub flagged: bool,
    pub flags_remaining: i32,
}

/// Everything a renderer needs to redraw the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub flags_remaining: i32,
    pub uncovered_remaining: CellCount,
    pub elapsed_seconds: u32,
    pub triggered_mine: Option<Position>,
    pub cells: Array2<CellSnapshot>,
}

/// One game from first input to win or loss.
///
/// The field is fully populated before the session exists, so every input goes straight to
/// the board. Terminal sessions ignore further input; start a new session for a new game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    field: MineField,
    state: GameState,
    uncovered_remaining: CellCount,
    flags_remaining: i32,
    elapsed_seconds: u32,
    triggered_mine: Option<Position>,
    events: VecDeque<GameEvent>,
}

/// Validates the parameters and starts a session on a randomly mined board.
pub fn new_game<R: Rng>(
    rows: u16,
    columns: u16,
    mine_count: CellCount,
    rng: &mut R,
) -> Result<GameSession> {
    let config = GameConfig::new(rows, columns, mine_count)?;
    let mut field = MineField::new(config.rows, config.columns);
    field.place_mines(config.mines, rng)?;
    GameSession::new(field)
}

impl GameSession {
    pub fn new(field: MineField) -> Result<Self> {
        if !field.is_placed() {
            return Err(GameError::MinesNotPlaced);
        }
        // counters start from a fully covered, unflagged board
        if field.cells().iter().any(|cell| cell.is_uncovered() || cell.is_flagged()) {
            return Err(GameError::FieldAlreadyPlayed);
        }

        Ok(Self {
            uncovered_remaining: field.safe_cell_count(),
            flags_remaining: field.mine_count().into(),
            field,
            state: GameState::Ready,
            elapsed_seconds: 0,
            triggered_mine: None,
            events: VecDeque::new(),
        })
    }

    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        Self::new(generator.generate(config)?)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn flags_remaining(&self) -> i32 {
        self.flags_remaining
    }

    pub fn uncovered_remaining(&self) -> CellCount {
        self.uncovered_remaining
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }

    pub fn size(&self) -> (Coord, Coord) {
        self.field.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.field.mine_count()
    }

    pub fn field(&self) -> &MineField {
        &self.field
    }

    pub fn cell(&self, pos: Position) -> Result<CellSnapshot> {
        self.field.cell(pos).map(CellSnapshot::from)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            flags_remaining: self.flags_remaining,
            uncovered_remaining: self.uncovered_remaining,
            elapsed_seconds: self.elapsed_seconds,
            triggered_mine: self.triggered_mine,
            cells: self.field.cells().mapv(CellSnapshot::from),
        }
    }

    /// Takes every event queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Reveals `pos`; flagged cells and finished games are left untouched.
    pub fn primary_activate(&mut self, pos: Position) -> Result<ActivateOutcome> {
        let pos = self.field.grid().validate(pos)?;

        if self.state.is_finished() {
            return Ok(self.outcome(0, false));
        }

        match self.field.reveal(pos)? {
            RevealOutcome::NoChange => Ok(self.outcome(0, false)),
            RevealOutcome::HitMine => {
                self.triggered_mine = Some(pos);
                self.events.push_back(GameEvent::MineHit { position: pos });
                self.end_game(false);
                Ok(self.outcome(0, true))
            }
            RevealOutcome::Revealed(count) => {
                self.mark_started();
                self.uncovered_remaining = self.uncovered_remaining.saturating_sub(count);
                self.events.push_back(GameEvent::CellsRevealed { origin: pos, count });

                if self.uncovered_remaining == 0 {
                    self.end_game(true);
                }
                Ok(self.outcome(count, false))
            }
        }
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagToggle> {
        let pos = self.field.grid().validate(pos)?;

        if self.state.is_finished() {
            return Ok(self.flag_toggle(pos));
        }

        let outcome = self.field.toggle_flag(pos)?;
        if outcome.has_update() {
            self.flags_remaining += outcome.flag_delta();
            self.events.push_back(GameEvent::FlagToggled {
                position: pos,
                flagged: matches!(outcome, FlagOutcome::Flagged),
            });
        }
        Ok(self.flag_toggle(pos))
    }

    /// Advances the clock by one second, only while the game is in progress.
    ///
    /// The state is checked on every call, so a tick that arrives after the game ended is
    /// dropped even if the external timer has not stopped yet.
    pub fn tick(&mut self) -> bool {
        if !matches!(self.state, GameState::InProgress) {
            return false;
        }

        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        self.events.push_back(GameEvent::Ticked {
            elapsed_seconds: self.elapsed_seconds,
        });
        true
    }

    fn outcome(&self, cells_revealed: CellCount, hit_mine: bool) -> ActivateOutcome {
        ActivateOutcome {
            state: self.state,
            cells_revealed,
            hit_mine,
        }
    }

    fn flag_toggle(&self, pos: Position) -> FlagToggle {
        FlagToggle {
            flagged: self.field[pos].is_flagged(),
            flags_remaining: self.flags_remaining,
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            log::debug!("Game started");
            self.state = GameState::InProgress;
            self.events.push_back(GameEvent::Started);
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        if won {
            self.state = GameState::Won;
            let auto_flagged = self.field.flag_mines();
            self.flags_remaining -= i32::from(auto_flagged);
        } else {
            self.state = GameState::Lost;
            self.field.uncover_mines();
        }
        log::debug!(
            "Game ended: {:?} after {} seconds",
            self.state,
            self.elapsed_seconds
        );
        self.events.push_back(GameEvent::Ended { state: self.state });
    }
}
