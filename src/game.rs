//! One in-memory game: turn order, outcome, restart and advisor integration
//!
//! The session owns the live board. Every operation runs inside the span the
//! session was built with, so callers decide where its log lines go.

use thiserror::Error;
use tracing::{debug, info, warn, Span};

use crate::advisor::{AdvisorError, ChatAdvisor, ChatHistory, MoveAdvisor, MoveRequest};
use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::engine::{AIEngine, Difficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Stone),
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Who decided a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Player,
    Engine,
    Advisor,
}

/// Outcome of one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// `None` when no legal move was left
    pub pos: Option<Pos>,
    pub stone: Stone,
    pub source: MoveSource,
    pub status: GameStatus,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    #[error("Game is already over: {0:?}")]
    GameOver(GameStatus),
    #[error("Illegal move at ({row}, {col})")]
    IllegalMove { row: usize, col: usize },
}

/// A single game between two sides, Black first.
pub struct GameSession {
    board: Board,
    engine: AIEngine,
    /// Medium tier whose pick is handed to advisors as a hint
    suggester: AIEngine,
    to_move: Stone,
    status: GameStatus,
    chat: ChatHistory,
    span: Span,
}

impl GameSession {
    /// New game for a validated configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.board_size` is outside the supported range.
    pub fn new(config: &EngineConfig, span: Span) -> Self {
        Self {
            board: Board::new(config.board_size),
            engine: AIEngine::from_config(config),
            suggester: AIEngine::with_search(config.board_size, Difficulty::Medium, config.search),
            to_move: Stone::Black,
            status: GameStatus::InProgress,
            chat: ChatHistory::default(),
            span,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }

    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn chat_history(&self) -> &ChatHistory {
        &self.chat
    }

    /// Place a stone for the side to move at `(row, col)`.
    pub fn play(&mut self, row: usize, col: usize) -> Result<TurnReport, PlayError> {
        let span = self.span.clone();
        let _enter = span.enter();

        self.ensure_in_progress()?;
        if !self.board.place(row, col, self.to_move) {
            return Err(PlayError::IllegalMove { row, col });
        }
        Ok(self.apply(Pos::new(row as u8, col as u8), MoveSource::Player))
    }

    /// Let the session's own engine move for the side to move.
    pub fn engine_move(&mut self) -> Result<TurnReport, PlayError> {
        let span = self.span.clone();
        let _enter = span.enter();

        self.ensure_in_progress()?;
        self.engine_turn()
    }

    /// Ask `advisor` for a move; fall back to the engine when it fails or
    /// proposes an illegal cell.
    pub fn advised_move(&mut self, advisor: &mut dyn MoveAdvisor) -> Result<TurnReport, PlayError> {
        let span = self.span.clone();
        let _enter = span.enter();

        self.ensure_in_progress()?;
        let player = self.to_move;
        let suggestion = self.suggester.select_move(&self.board, player);
        let request = MoveRequest {
            board: &self.board,
            player,
            history: self.board.history(),
            suggestion,
            instruction: self.chat.latest_move_instruction(),
        };

        let outcome = advisor.propose_move(&request).and_then(|proposal| {
            if self.board.contains(proposal.row, proposal.col)
                && self.board.is_empty(Pos::new(proposal.row as u8, proposal.col as u8))
            {
                Ok(proposal)
            } else {
                Err(AdvisorError::InvalidPosition { row: proposal.row, col: proposal.col })
            }
        });

        match outcome {
            Ok(proposal) => {
                debug!(
                    advisor = advisor.name(),
                    row = proposal.row,
                    col = proposal.col,
                    reasoning = proposal.reasoning.as_deref().unwrap_or(""),
                    "advisor move accepted"
                );
                if self.board.place(proposal.row, proposal.col, player) {
                    let pos = Pos::new(proposal.row as u8, proposal.col as u8);
                    return Ok(self.apply(pos, MoveSource::Advisor));
                }
                Err(PlayError::IllegalMove { row: proposal.row, col: proposal.col })
            }
            Err(err) => {
                warn!(advisor = advisor.name(), error = %err, "advisor failed, engine takes the move");
                self.engine_turn()
            }
        }
    }

    /// Send a chat message and return the reply shown to the user. Advisor
    /// failures become the reply text rather than an error.
    pub fn send_chat(&mut self, advisor: Option<&mut dyn ChatAdvisor>, message: &str) -> String {
        let span = self.span.clone();
        let _enter = span.enter();

        let history = self.chat.messages();
        self.chat.push_user(message);

        let reply = match advisor {
            None => "Chat advisor is not configured".to_string(),
            Some(advisor) => match advisor.reply(message, &history, &self.board) {
                Ok(reply) => reply,
                Err(err) => {
                    warn!(error = %err, "chat advisor failed");
                    format!("Chat failed: {err}")
                }
            },
        };
        self.chat.push_assistant(reply.clone());
        reply
    }

    /// Clear the board and chat history and give Black the move.
    pub fn reset(&mut self) {
        let span = self.span.clone();
        let _enter = span.enter();

        self.board.reset();
        self.chat.clear();
        self.to_move = Stone::Black;
        self.status = GameStatus::InProgress;
        info!("game reset");
    }

    fn ensure_in_progress(&self) -> Result<(), PlayError> {
        if self.status.is_over() {
            return Err(PlayError::GameOver(self.status));
        }
        Ok(())
    }

    fn engine_turn(&mut self) -> Result<TurnReport, PlayError> {
        let player = self.to_move;
        let Some(pos) = self.engine.select_move(&self.board, player) else {
            self.status = GameStatus::Draw;
            info!(?player, "no legal move left, game drawn");
            return Ok(TurnReport {
                pos: None,
                stone: player,
                source: MoveSource::Engine,
                status: self.status,
            });
        };
        if !self.board.place_stone(pos, player) {
            return Err(PlayError::IllegalMove {
                row: usize::from(pos.row),
                col: usize::from(pos.col),
            });
        }
        Ok(self.apply(pos, MoveSource::Engine))
    }

    /// Record the outcome of the stone just placed at `pos`.
    fn apply(&mut self, pos: Pos, source: MoveSource) -> TurnReport {
        let stone = self.to_move;
        self.status = if self.board.check_win(pos) {
            GameStatus::Won(stone)
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };

        match self.status {
            GameStatus::Won(winner) => info!(?winner, %pos, moves = self.board.stone_count(), "game won"),
            GameStatus::Draw => info!(moves = self.board.stone_count(), "board full, game drawn"),
            GameStatus::InProgress => {
                debug!(?stone, %pos, ?source, "stone placed");
                self.to_move = stone.opponent();
            }
        }

        TurnReport { pos: Some(pos), stone, source, status: self.status }
    }
}
