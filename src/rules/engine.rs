//! The referee: phase state machine, action validation and win detection.
//!
//! `Game` owns the board and both players. Callers submit one action at a
//! time; the engine checks it against the current phase and rules, applies
//! it through the `BoardManager`, then advances phase and turn.
//!
//! ## Phases
//!
//! - `Placing`: while either player holds stones
//! - `MovingOrFlying`: adjacent moves, or any empty point with three stones
//! - `RemovalPending`: the player who just closed a mill must capture
//! - `GameOver`: terminal, every action is rejected
//!
//! Every call either applies completely or returns an error with the game
//! untouched.

use im::Vector;
use tracing::{debug, info, instrument, warn};

use super::draw::{DrawDetector, NoDraw, TurnSummary};
use super::mills::{capturable_stones, completed_mills_through, removal_rejection};
use super::setup::Setup;
use crate::board::{BoardManager, Position};
use crate::core::action::{Action, ActionKind, ActionRecord};
use crate::core::config::GameConfig;
use crate::core::error::{EngineError, MoveRejection};
use crate::core::player::{Player, PlayerId, PlayerKind, PlayerMap};
use crate::core::state::{ActionOutcome, GamePhase, GameResult, GameSnapshot};

/// What an accepted action did, before the snapshot is attached.
struct Applied {
    mill_formed: bool,
    captured: Option<Position>,
}

/// A game of Nine Men's Morris in progress.
///
/// Generic over the draw rule; the default `NoDraw` plays the base rules.
#[derive(Clone, Debug)]
pub struct Game<D = NoDraw> {
    board: BoardManager,
    players: PlayerMap<Player>,
    current: PlayerId,
    phase: GamePhase,
    turn: u32,
    sequence: u32,
    history: Vector<ActionRecord>,
    draw: D,
}

/// Start a default game: player 1 (human) against player 2 of `player2_kind`.
///
/// ```
/// use morris_engine::core::{GamePhase, PlayerId, PlayerKind};
/// use morris_engine::rules::new_game;
///
/// let game = new_game("Ada", "Bot", PlayerKind::Ai).unwrap();
/// assert_eq!(game.phase(), GamePhase::Placing);
/// assert_eq!(game.current_player(), PlayerId::FIRST);
/// ```
pub fn new_game(
    player1_name: impl Into<String>,
    player2_name: impl Into<String>,
    player2_kind: PlayerKind,
) -> Result<Game, EngineError> {
    let config = GameConfig::default()
        .with_name(PlayerId::FIRST, player1_name)
        .with_name(PlayerId::SECOND, player2_name)
        .with_kind(PlayerId::SECOND, player2_kind);

    GameBuilder::new().config(config).build()
}

/// Builder for creating a `Game`.
#[derive(Clone, Debug)]
pub struct GameBuilder<D = NoDraw> {
    config: GameConfig,
    setup: Option<Setup>,
    draw: D,
}

impl Default for GameBuilder<NoDraw> {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            setup: None,
            draw: NoDraw,
        }
    }
}

impl GameBuilder<NoDraw> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: DrawDetector> GameBuilder<D> {
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a custom position instead of an empty board.
    pub fn setup(mut self, setup: Setup) -> Self {
        self.setup = Some(setup);
        self
    }

    /// Use a different draw rule.
    pub fn draw_detector<E: DrawDetector>(self, draw: E) -> GameBuilder<E> {
        GameBuilder {
            config: self.config,
            setup: self.setup,
            draw,
        }
    }

    /// Build the game.
    #[instrument(skip(self))]
    pub fn build(self) -> Result<Game<D>, EngineError> {
        self.config.validate()?;

        let (board, players, current) = match &self.setup {
            Some(setup) => {
                let (board, players) = setup.realize(&self.config)?;
                (board, players, setup.to_move())
            }
            None => (
                BoardManager::new(),
                PlayerMap::new(|p| self.config.players[p].to_player()),
                self.config.first_player,
            ),
        };

        let mut game = Game {
            board,
            players,
            current,
            phase: GamePhase::Placing,
            turn: 1,
            sequence: 0,
            history: Vector::new(),
            draw: self.draw,
        };

        if !game.placing_in_progress() {
            game.phase = GamePhase::MovingOrFlying;
            if let Some(result) = game.elimination_result() {
                game.finish(result);
            } else if !game.has_legal_move(game.current) {
                game.finish(GameResult::Winner(game.current.opponent()));
            }
        }

        info!(
            first = %game.players[PlayerId::FIRST].name,
            second = %game.players[PlayerId::SECOND].name,
            phase = ?game.phase,
            "game created"
        );
        Ok(game)
    }
}

impl<D: DrawDetector> Game<D> {
    // === Queries ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.phase.result()
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Player to act.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Both players.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Board occupancy.
    #[must_use]
    pub fn board(&self) -> &BoardManager {
        &self.board
    }

    /// Turn number (starts at 1).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every accepted action, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// The draw rule in use.
    #[must_use]
    pub fn draw_detector(&self) -> &D {
        &self.draw
    }

    /// Copy of everything a renderer needs.
    #[must_use]
    pub fn query_state(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            players: self.players.clone(),
            current_player: self.current,
            phase: self.phase,
            turn: self.turn,
        }
    }

    /// Check if `player` may fly right now.
    #[must_use]
    pub fn can_fly(&self, player: PlayerId) -> bool {
        self.players[player].can_fly()
    }

    /// Check if `player` has at least one legal move on the current board.
    #[must_use]
    pub fn has_legal_move(&self, player: PlayerId) -> bool {
        if self.can_fly(player) {
            return self.board.empty_positions().next().is_some();
        }
        self.board
            .positions_of(player)
            .any(|from| !self.board.empty_neighbors(from).is_empty())
    }

    /// Every move `player` could make on the current board, ignoring turn.
    #[must_use]
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Action> {
        let flying = self.can_fly(player);
        let mut moves = Vec::new();

        for from in self.board.positions_of(player) {
            if flying {
                moves.extend(
                    self.board
                        .empty_positions()
                        .map(|to| Action::move_stone(from, to)),
                );
            } else {
                moves.extend(
                    self.board
                        .empty_neighbors(from)
                        .into_iter()
                        .map(|to| Action::move_stone(from, to)),
                );
            }
        }

        moves
    }

    /// Every empty point, as place actions.
    #[must_use]
    pub fn legal_placements(&self) -> Vec<Action> {
        self.board.empty_positions().map(Action::place).collect()
    }

    /// Every stone the player to act may capture, as remove actions.
    #[must_use]
    pub fn legal_removals(&self) -> Vec<Action> {
        capturable_stones(&self.board, self.current.opponent())
            .into_iter()
            .map(Action::remove)
            .collect()
    }

    /// Exactly the actions `submit_action` would accept right now.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.phase {
            GamePhase::Placing => self.legal_placements(),
            GamePhase::MovingOrFlying => self.legal_moves(self.current),
            GamePhase::RemovalPending => self.legal_removals(),
            GamePhase::GameOver(_) => Vec::new(),
        }
    }

    // === Actions ===

    /// Validate and apply one action for the player to act.
    #[instrument(skip(self), fields(player = %self.current, phase = ?self.phase))]
    pub fn submit_action(&mut self, action: Action) -> Result<ActionOutcome, EngineError> {
        let player = self.current;

        let applied = self.dispatch(action).map_err(|err| {
            warn!(%action, error = %err, "action rejected");
            err
        })?;

        debug!(%action, phase = ?self.phase, turn = self.turn, "action applied");
        Ok(ActionOutcome {
            player,
            action,
            mill_formed: applied.mill_formed,
            captured: applied.captured,
            result: self.phase.result(),
            snapshot: self.query_state(),
        })
    }

    fn dispatch(&mut self, action: Action) -> Result<Applied, EngineError> {
        let expected = match self.phase {
            GamePhase::GameOver(result) => return Err(EngineError::GameAlreadyOver { result }),
            phase => phase
                .expected_action()
                .ok_or_else(|| EngineError::invariant("live phase without an action kind"))?,
        };

        match (expected, action) {
            (ActionKind::Place, Action::Place { position }) => self.apply_place(position),
            (ActionKind::Move, Action::Move { from, to }) => self.apply_move(from, to),
            (ActionKind::Remove, Action::Remove { position }) => self.apply_remove(position),
            (expected, action) => Err(EngineError::WrongActionForPhase {
                expected,
                got: action.kind(),
            }),
        }
    }

    fn apply_place(&mut self, position: Position) -> Result<Applied, EngineError> {
        let player = self.current;

        if !self.board.is_empty(position) {
            return Err(EngineError::Occupied { position });
        }
        if self.players[player].stones_in_hand() == 0 {
            return Err(EngineError::invariant(format!(
                "{} is placing with an empty hand",
                player
            )));
        }

        self.board.place(position, player)?;
        self.players[player].decrement_in_hand()?;
        self.players[player].increment_on_board()?;
        self.record(player, Action::place(position));

        Ok(self.after_stone_landed(position))
    }

    fn apply_move(&mut self, from: Position, to: Position) -> Result<Applied, EngineError> {
        let player = self.current;

        let rejection = if !self.board.is_owned_by(from, player) {
            Some(MoveRejection::NotYourStone)
        } else if !self.board.is_empty(to) {
            Some(MoveRejection::DestinationOccupied)
        } else if !self.can_fly(player) && !from.is_adjacent(to) {
            Some(MoveRejection::NotAdjacent)
        } else {
            None
        };
        if let Some(reason) = rejection {
            return Err(EngineError::IllegalMove { from, to, reason });
        }

        self.board.move_stone(from, to)?;
        self.record(player, Action::move_stone(from, to));

        Ok(self.after_stone_landed(to))
    }

    fn apply_remove(&mut self, position: Position) -> Result<Applied, EngineError> {
        let player = self.current;
        let victim = player.opponent();

        if let Some(reason) = removal_rejection(&self.board, player, position) {
            return Err(EngineError::IllegalRemoval { position, reason });
        }
        if self.players[victim].stones_on_board() == 0 {
            return Err(EngineError::invariant(format!(
                "{} has a stone at {} but none counted on board",
                victim, position
            )));
        }

        self.board.remove(position)?;
        self.players[victim].decrement_on_board()?;
        self.record(player, Action::remove(position));
        info!(%player, %position, left = self.players[victim].stones_on_board(), "stone captured");

        self.end_turn(true);
        Ok(Applied {
            mill_formed: false,
            captured: Some(position),
        })
    }

    /// Mill check after a place or move onto `position`.
    fn after_stone_landed(&mut self, position: Position) -> Applied {
        let mills = completed_mills_through(&self.board, position);
        let mill_formed = !mills.is_empty();
        let victim = self.current.opponent();

        if mill_formed {
            info!(player = %self.current, %position, mills = mills.len(), "mill formed");
        }

        // A mill with nothing to capture owes no removal.
        if mill_formed && self.board.count_on_board(victim) > 0 {
            self.phase = GamePhase::RemovalPending;
            return Applied {
                mill_formed,
                captured: None,
            };
        }

        self.end_turn(false);
        Applied {
            mill_formed,
            captured: None,
        }
    }

    /// Pass the move, then settle phase, elimination, stalemate and draw.
    fn end_turn(&mut self, captured: bool) {
        let moving_turn = self.turn_opened_by_move();

        if !self.placing_in_progress() {
            if let Some(result) = self.elimination_result() {
                self.finish(result);
                return;
            }
        }

        self.current = self.current.opponent();
        self.turn += 1;
        self.sequence = 0;

        if self.placing_in_progress() {
            self.phase = GamePhase::Placing;
            return;
        }

        if self.phase != GamePhase::MovingOrFlying && !moving_turn {
            info!(turn = self.turn, "all stones placed");
        }
        self.phase = GamePhase::MovingOrFlying;

        // A blocked player loses even if the draw rule would fire.
        if !self.has_legal_move(self.current) {
            info!(player = %self.current, "no legal moves");
            self.finish(GameResult::Winner(self.current.opponent()));
            return;
        }

        if moving_turn {
            let summary = TurnSummary {
                board: &self.board,
                to_move: self.current,
                captured,
            };
            if self.draw.observe(&summary) {
                self.finish(GameResult::Draw);
            }
        }
    }

    fn finish(&mut self, result: GameResult) {
        info!(%result, turn = self.turn, "game over");
        self.phase = GamePhase::GameOver(result);
    }

    fn record(&mut self, player: PlayerId, action: Action) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn, sequence));
    }

    /// Whether the current turn began with a move (not a placement).
    fn turn_opened_by_move(&self) -> bool {
        self.history
            .iter()
            .rev()
            .take_while(|record| record.turn == self.turn)
            .last()
            .is_some_and(|record| record.action.kind() == ActionKind::Move)
    }

    fn placing_in_progress(&self) -> bool {
        self.players.values().any(|p| p.stones_in_hand() > 0)
    }

    /// Outcome if a player is down to fewer than three stones.
    fn elimination_result(&self) -> Option<GameResult> {
        let first = self.players[PlayerId::FIRST].is_eliminated();
        let second = self.players[PlayerId::SECOND].is_eliminated();

        match (first, second) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerId::SECOND)),
            (false, true) => Some(GameResult::Winner(PlayerId::FIRST)),
            (false, false) => None,
        }
    }
}
