//! Seats, computer players and move routing for one game.

use log::{info, warn};
use web_time::Instant;

use crate::ai::agent::{AgentEvent, AiAgent};
use crate::config::GameConfig;
use crate::error::MoveError;
use crate::game::GameSession;
use crate::types::{Cell, Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    BlackVsComputer,
    WhiteVsComputer,
    TwoPlayer,
    WeirdTwoPlayer,
    /// Computer against computer.
    Demo,
}

impl GameMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::BlackVsComputer),
            1 => Some(Self::WhiteVsComputer),
            2 => Some(Self::TwoPlayer),
            3 => Some(Self::WeirdTwoPlayer),
            4 => Some(Self::Demo),
            _ => None,
        }
    }

    /// The single human color, if there is one.
    pub fn human_color(self) -> Option<Cell> {
        match self {
            Self::BlackVsComputer => Some(Cell::Black),
            Self::WhiteVsComputer => Some(Cell::White),
            Self::TwoPlayer | Self::WeirdTwoPlayer | Self::Demo => None,
        }
    }

    pub fn human_may_play(self, turn: Cell) -> bool {
        match self {
            Self::TwoPlayer | Self::WeirdTwoPlayer => true,
            Self::BlackVsComputer | Self::WhiteVsComputer => self.human_color() == Some(turn),
            Self::Demo => false,
        }
    }

    pub fn computer_colors(self) -> &'static [Cell] {
        match self {
            Self::BlackVsComputer => &[Cell::White],
            Self::WhiteVsComputer => &[Cell::Black],
            Self::TwoPlayer | Self::WeirdTwoPlayer => &[],
            Self::Demo => &[Cell::White, Cell::Black],
        }
    }

    pub fn is_weird(self) -> bool {
        self == Self::WeirdTwoPlayer
    }
}

/// The game as the host sees it: the authoritative session plus the
/// computer players. Every accepted move is broadcast to every agent.
#[derive(Debug, Clone)]
pub struct Match {
    mode: GameMode,
    session: GameSession,
    agents: Vec<AiAgent>,
}

impl Match {
    pub fn new(mode: GameMode, config: &GameConfig) -> Self {
        Self::start_at(mode, config, Instant::now())
    }

    /// Sets up a fresh game. When black is not a human seat the agents
    /// are woken right away so the computer opens.
    pub fn start_at(mode: GameMode, config: &GameConfig, now: Instant) -> Self {
        let config = GameConfig {
            weird: config.weird || mode.is_weird(),
            ..config.clone()
        };
        let agents = mode
            .computer_colors()
            .iter()
            .map(|&color| AiAgent::new(color, &config))
            .collect();

        let mut game = Self {
            mode,
            session: GameSession::with_config(&config),
            agents,
        };
        info!("new {mode:?} game (weird: {})", config.weird);

        if mode.human_color() != Some(Cell::Black) {
            game.broadcast(0, now);
        }
        game
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn status(&self) -> String {
        self.session.status_message(self.mode.human_color())
    }

    /// Accepted placements for the side to move, as board indices.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.session
            .rules()
            .legal_moves(self.session.current_turn())
            .into_iter()
            .map(GameSession::coord_to_ui)
            .collect()
    }

    pub fn human_move(&mut self, index: usize) -> Result<(), MoveError> {
        self.human_move_at(index, Instant::now())
    }

    pub fn human_move_at(&mut self, index: usize, now: Instant) -> Result<(), MoveError> {
        let turn = self.session.current_turn();
        if !turn.is_stone() {
            return Err(MoveError::GameOver);
        }
        if !self.mode.human_may_play(turn) {
            return Err(MoveError::NotYourTurn(turn));
        }

        self.session.try_submit_move(index, None)?;
        self.broadcast(index, now);
        Ok(())
    }

    /// Earliest instant at which `tick_at` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.agents.iter().filter_map(AiAgent::deadline).min()
    }

    pub fn tick(&mut self) -> Vec<AgentEvent> {
        self.tick_at(Instant::now())
    }

    /// Lets every due agent act, then plays and broadcasts the moves they
    /// chose. Nothing is broadcast until all agents have polled.
    pub fn tick_at(&mut self, now: Instant) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        for agent in &mut self.agents {
            agent.poll_at(now, &mut events);
        }

        for event in &events {
            if let AgentEvent::MoveChosen { color, index } = *event {
                self.play_agent_move(color, index, now);
            }
        }
        events
    }

    fn play_agent_move(&mut self, color: Cell, index: usize, now: Instant) {
        let turn = self.session.current_turn();
        if color != turn {
            warn!(
                "{} agent moved on {}'s turn, ignored",
                color.name(),
                turn.name()
            );
            return;
        }

        match self.session.try_submit_move(index, Some(color)) {
            Ok(()) => self.broadcast(index, now),
            Err(err) => warn!(
                "{} agent move at {} rejected: {err}",
                color.name(),
                Coord::from_index(index)
            ),
        }
    }

    fn broadcast(&mut self, index: usize, now: Instant) {
        for agent in &mut self.agents {
            agent.notify_opponent_move_at(index, now);
        }
    }
}
