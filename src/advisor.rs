//! Pluggable move and chat providers
//!
//! An advisor proposes moves (and optionally chats) on behalf of one side.
//! Proposals are untrusted: the session validates them through the board's
//! placement contract and falls back to its own engine on any failure.

use std::collections::VecDeque;

use thiserror::Error;

use crate::board::{Board, MoveRecord, Pos, Stone};
use crate::engine::AIEngine;

/// Messages kept by default in a [`ChatHistory`]
pub const DEFAULT_CHAT_HISTORY: usize = 10;

/// Recent user messages searched for a move instruction
const INSTRUCTION_WINDOW: usize = 3;

/// Words that mark a user message as a move instruction
const MOVE_KEYWORDS: [&str; 8] = ["下在", "走", "下", "落", "放", "move", "play", "place"];

/// Why an advisor could not produce a usable answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("Advisor proposed an invalid position ({row}, {col})")]
    InvalidPosition { row: usize, col: usize },
    #[error("Failed to parse advisor response: {0}")]
    Parse(String),
    #[error("Advisor service error: {0}")]
    Api(String),
    #[error("Advisor timed out")]
    Timeout,
}

/// Everything an advisor may consult when choosing a move.
#[derive(Debug, Clone, Copy)]
pub struct MoveRequest<'a> {
    pub board: &'a Board,
    pub player: Stone,
    pub history: &'a [MoveRecord],
    /// The medium tier's pick for the same position
    pub suggestion: Option<Pos>,
    /// Latest user chat message that reads like a move instruction
    pub instruction: Option<&'a str>,
}

/// A move proposed by an advisor, in raw board coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub row: usize,
    pub col: usize,
    pub reasoning: Option<String>,
}

impl Proposal {
    pub fn at(pos: Pos) -> Self {
        Self {
            row: usize::from(pos.row),
            col: usize::from(pos.col),
            reasoning: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

/// Produces a move for the side to move.
pub trait MoveAdvisor {
    fn name(&self) -> &str;

    fn propose_move(&mut self, request: &MoveRequest<'_>) -> Result<Proposal, AdvisorError>;

    /// Cheap reachability check before a game starts.
    fn check_connection(&self) -> Result<(), AdvisorError> {
        Ok(())
    }
}

/// Produces a chat reply given the conversation so far.
pub trait ChatAdvisor {
    fn reply(
        &mut self,
        message: &str,
        history: &[ChatMessage],
        board: &Board,
    ) -> Result<String, AdvisorError>;
}

/// In-process advisor backed by an engine tier.
#[derive(Debug, Clone)]
pub struct EngineAdvisor {
    name: String,
    engine: AIEngine,
}

impl EngineAdvisor {
    pub fn new(engine: AIEngine) -> Self {
        Self {
            name: format!("engine-{}", engine.difficulty()),
            engine,
        }
    }
}

impl MoveAdvisor for EngineAdvisor {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose_move(&mut self, request: &MoveRequest<'_>) -> Result<Proposal, AdvisorError> {
        if request.board.size() != self.engine.board_size() {
            return Err(AdvisorError::Api(format!(
                "engine plays {0}x{0}, board is {1}x{1}",
                self.engine.board_size(),
                request.board.size()
            )));
        }
        let result = self.engine.select_move_with_stats(request.board, request.player);
        let reasoning = format!("{:?}, score {}", result.search_type, result.score);
        result
            .best_move
            .map(|pos| Proposal::at(pos).with_reasoning(reasoning))
            .ok_or_else(|| AdvisorError::Api("no legal move left".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Bounded conversation log; the oldest message is dropped first.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    max_len: usize,
    messages: VecDeque<ChatMessage>,
}

impl ChatHistory {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
            messages: VecDeque::with_capacity(max_len),
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ChatRole::User, content.into());
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ChatRole::Assistant, content.into());
    }

    fn push(&mut self, role: ChatRole, content: String) {
        self.messages.push_back(ChatMessage { role, content });
        while self.messages.len() > self.max_len {
            self.messages.pop_front();
        }
    }

    /// The last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }

    /// All retained messages, oldest first.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Most recent user message among the last three that mentions a move.
    pub fn latest_move_instruction(&self) -> Option<&str> {
        let skip = self.messages.len().saturating_sub(INSTRUCTION_WINDOW);
        self.messages
            .iter()
            .skip(skip)
            .rev()
            .filter(|m| m.role == ChatRole::User)
            .find(|m| {
                let lower = m.content.to_lowercase();
                MOVE_KEYWORDS.iter().any(|kw| lower.contains(kw))
            })
            .map(|m| m.content.as_str())
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CHAT_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Difficulty;

    #[test]
    fn test_chat_history_bounded() {
        let mut chat = ChatHistory::new(3);
        for i in 0..5 {
            chat.push_user(format!("msg {i}"));
        }
        assert_eq!(chat.len(), 3);
        let contents: Vec<String> = chat.messages().into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn test_recent_returns_tail() {
        let mut chat = ChatHistory::default();
        chat.push_user("hi");
        chat.push_assistant("hello");
        chat.push_user("good game");

        let recent = chat.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].role, ChatRole::Assistant);
        assert_eq!(recent[1].content, "good game");
        assert_eq!(chat.recent(10).len(), 3);
    }

    #[test]
    fn test_latest_move_instruction() {
        let mut chat = ChatHistory::default();
        chat.push_user("Please PLAY near the center");
        chat.push_assistant("Sure, I will move there");
        assert_eq!(chat.latest_move_instruction(), Some("Please PLAY near the center"));

        chat.push_user("nice");
        chat.push_user("what a game");
        // The instruction has slid out of the three-message window
        assert_eq!(chat.latest_move_instruction(), None);

        chat.clear();
        assert!(chat.is_empty());
        assert_eq!(chat.latest_move_instruction(), None);
    }

    #[test]
    fn test_chinese_move_instruction() {
        let mut chat = ChatHistory::default();
        chat.push_user("你好");
        assert_eq!(chat.latest_move_instruction(), None);

        chat.push_user("下在天元");
        chat.push_assistant("好的");
        assert_eq!(chat.latest_move_instruction(), Some("下在天元"));

        chat.push_user("落在左边");
        assert_eq!(chat.latest_move_instruction(), Some("落在左边"));
    }

    #[test]
    fn test_engine_advisor_proposes_engine_move() {
        let mut board = Board::new(15);
        for i in 0..4 {
            board.place_stone(Pos::new(5, i), Stone::White);
        }
        let mut advisor = EngineAdvisor::new(AIEngine::new(15, Difficulty::Easy));
        assert_eq!(advisor.name(), "engine-easy");
        assert!(advisor.check_connection().is_ok());

        let request = MoveRequest {
            board: &board,
            player: Stone::White,
            history: board.history(),
            suggestion: None,
            instruction: None,
        };
        let proposal = advisor.propose_move(&request).unwrap();
        assert_eq!((proposal.row, proposal.col), (5, 4));
        assert!(proposal.reasoning.is_some());
    }

    #[test]
    fn test_engine_advisor_size_mismatch_is_error() {
        let board = Board::new(9);
        let mut advisor = EngineAdvisor::new(AIEngine::new(15, Difficulty::Medium));
        let request = MoveRequest {
            board: &board,
            player: Stone::Black,
            history: board.history(),
            suggestion: None,
            instruction: None,
        };
        assert!(matches!(advisor.propose_move(&request), Err(AdvisorError::Api(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = AdvisorError::InvalidPosition { row: 3, col: 20 };
        assert_eq!(err.to_string(), "Advisor proposed an invalid position (3, 20)");
        assert_eq!(AdvisorError::Timeout.to_string(), "Advisor timed out");
    }
}
