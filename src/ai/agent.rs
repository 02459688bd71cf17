use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use web_time::{Instant, SystemTime};

use crate::ai::search::choose_move_with_depth;
use crate::config::GameConfig;
use crate::game::GameSession;
use crate::rules::Rules;
use crate::timer::Debouncer;
use crate::types::{Cell, Coord};

/// What an agent reports after handling a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AgentEvent {
    MoveChosen { color: Cell, index: usize },
    NoLegalMoveForEitherSide { color: Cell },
}

pub trait AgentListener {
    fn on_move_chosen(&mut self, color: Cell, index: usize);
    fn on_no_legal_move_for_either_side(&mut self, color: Cell);
}

impl AgentListener for Vec<AgentEvent> {
    fn on_move_chosen(&mut self, color: Cell, index: usize) {
        self.push(AgentEvent::MoveChosen { color, index });
    }

    fn on_no_legal_move_for_either_side(&mut self, color: Cell) {
        self.push(AgentEvent::NoLegalMoveForEitherSide { color });
    }
}

/// Computer player for one color.
///
/// Keeps its own copy of the game, replays the opponent's moves into it
/// and answers once the opponent has been quiet for the debounce delay.
#[derive(Debug, Clone)]
pub struct AiAgent {
    color: Cell,
    opponent: Cell,
    session: GameSession,
    mirror: Rules,
    pending: Debouncer<usize>,
    rng: SmallRng,
    depth: u32,
}

impl AiAgent {
    pub fn new(color: Cell, config: &GameConfig) -> Self {
        Self::from_session(color, GameSession::with_config(config), config)
    }

    /// Starts from an existing position instead of the opening.
    pub fn from_session(color: Cell, session: GameSession, config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(time_seed) ^ u64::from(color.to_u8());
        Self {
            color,
            opponent: color.opponent(),
            mirror: *session.rules(),
            session,
            pending: Debouncer::new(config.debounce()),
            rng: SmallRng::seed_from_u64(seed),
            depth: config.lookahead_depth,
        }
    }

    pub fn color(&self) -> Cell {
        self.color
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    pub fn notify_opponent_move(&mut self, index: usize) {
        self.notify_opponent_move_at(index, Instant::now());
    }

    /// Replays `index` for the opponent right away, then restarts the
    /// reply delay. Moves that do not apply to this agent's session (its
    /// own moves echoed back, the start-up kick) only restart the delay.
    pub fn notify_opponent_move_at(&mut self, index: usize, now: Instant) {
        if self.session.current_turn() == self.opponent
            && self.session.submit_move(index, Some(self.opponent))
        {
            self.replay(index, self.opponent);
        }

        if let Some(earlier) = self.pending.schedule(index, now) {
            debug!(
                "{} agent: reply to {earlier} postponed by {index}",
                self.color.name()
            );
        }
    }

    pub fn poll(&mut self, listener: &mut dyn AgentListener) -> bool {
        self.poll_at(Instant::now(), listener)
    }

    /// Replies once the delay since the last notification has elapsed.
    /// Returns whether anything was processed.
    pub fn poll_at(&mut self, now: Instant, listener: &mut dyn AgentListener) -> bool {
        if self.pending.take_due(now).is_none() {
            return false;
        }
        self.reply(listener);
        true
    }

    fn reply(&mut self, listener: &mut dyn AgentListener) {
        if self.session.current_turn() == self.color {
            let chosen =
                choose_move_with_depth(&self.mirror, self.color, self.depth, &mut self.rng);
            let mut index = GameSession::coord_to_ui(chosen);

            if !self.session.submit_move(index, Some(self.color)) {
                let Some(&fallback) = self.mirror.legal_moves(self.color).first() else {
                    warn!("{} agent: to move but nothing is legal", self.color.name());
                    return;
                };
                info!(
                    "{} agent: {chosen} rejected, playing {fallback} instead",
                    self.color.name()
                );
                index = GameSession::coord_to_ui(fallback);
                if !self.session.submit_move(index, Some(self.color)) {
                    warn!("{} agent: fallback {fallback} rejected", self.color.name());
                    return;
                }
            }

            self.replay(index, self.color);
            listener.on_move_chosen(self.color, index);
        }

        if self.session.current_turn() == Cell::Blank {
            listener.on_no_legal_move_for_either_side(self.color);
        }
    }

    fn replay(&mut self, index: usize, color: Cell) {
        let at = Coord::from_index(index);
        if let Err(err) = self.mirror.place_and_flip(at, color) {
            warn!("{} agent: mirror rejected {at}: {err}", self.color.name());
        }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use web_time::Duration;

    const DELAY: Duration = Duration::from_millis(600);

    fn config(weird: bool) -> GameConfig {
        GameConfig {
            seed: Some(7),
            ..GameConfig::weird(weird)
        }
    }

    fn idx(x: usize, y: usize) -> usize {
        y * 8 + x
    }

    #[test]
    fn waits_for_the_debounce_delay() {
        let start = Instant::now();
        let mut agent = AiAgent::new(Cell::White, &config(true));
        let mut events = Vec::new();

        agent.notify_opponent_move_at(idx(3, 5), start);

        assert!(agent.is_waiting());
        assert_eq!(agent.session().piece_at(idx(3, 5)), Cell::Black);
        assert_eq!(agent.session().current_turn(), Cell::White);
        let early = start + Duration::from_millis(599);
        assert!(!agent.poll_at(early, &mut events));
        assert!(events.is_empty());
        assert!(agent.poll_at(start + DELAY, &mut events));
        assert!(!agent.is_waiting());

        let [AgentEvent::MoveChosen { color, index }] = events[..] else {
            panic!("expected one move, got {events:?}");
        };
        assert_eq!(color, Cell::White);
        assert_eq!(agent.session().piece_at(idx(3, 5)), Cell::Black);
        assert_eq!(agent.session().piece_at(index), Cell::White);
        assert_eq!(agent.session().last_changes()[0], Cell::White.to_u8());
        assert_eq!(&agent.mirror, agent.session().rules());
    }

    #[test]
    fn quick_successive_moves_are_all_replayed() {
        // Strict rules: white cannot answer (3,5), and black's (5,3) then
        // takes the last white stone.
        let start = Instant::now();
        let mut agent = AiAgent::new(Cell::White, &config(false));
        let mut events = Vec::new();

        agent.notify_opponent_move_at(idx(3, 5), start);
        let later = start + Duration::from_millis(100);
        agent.notify_opponent_move_at(idx(5, 3), later);

        assert_eq!(agent.session().piece_at(idx(3, 5)), Cell::Black);
        assert_eq!(agent.session().piece_at(idx(5, 3)), Cell::Black);
        assert!(agent.session().is_game_over());
        assert_eq!(&agent.mirror, agent.session().rules());

        assert!(!agent.poll_at(start + DELAY, &mut events));
        assert!(agent.poll_at(later + DELAY, &mut events));
        assert_eq!(
            events,
            vec![AgentEvent::NoLegalMoveForEitherSide { color: Cell::White }]
        );
    }

    #[test]
    fn own_turn_trigger_plays_without_replaying() {
        let start = Instant::now();
        let mut agent = AiAgent::new(Cell::Black, &config(false));
        let mut events = Vec::new();

        // Index 0 is not a legal black move; it only wakes the agent.
        agent.notify_opponent_move_at(0, start);
        assert!(agent.poll_at(start + DELAY, &mut events));

        let [AgentEvent::MoveChosen { color, index }] = events[..] else {
            panic!("expected one move, got {events:?}");
        };
        assert_eq!(color, Cell::Black);
        assert!(
            Rules::default()
                .legal_moves(Cell::Black)
                .contains(&GameSession::ui_to_coord(index))
        );
        assert_eq!(&agent.mirror, agent.session().rules());
    }

    #[test]
    fn rejected_choice_falls_back_to_first_legal_move() {
        // The corner ranks first but touches the open run at (0,1); (4,4)
        // is the only move strict rules accept.
        let rules = Rules::from_board(
            Board::from_rows([
                ". W B . . . . .",
                "W . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . B W . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
            ]),
            false,
        );
        let session = GameSession::from_rules(rules, Cell::Black);
        let mut agent = AiAgent::from_session(Cell::Black, session, &config(false));
        let start = Instant::now();
        let mut events = Vec::new();

        agent.notify_opponent_move_at(0, start);
        agent.poll_at(start + DELAY, &mut events);

        assert_eq!(
            events,
            vec![AgentEvent::MoveChosen {
                color: Cell::Black,
                index: idx(4, 4),
            }]
        );
        assert_eq!(agent.session().piece_at(idx(3, 4)), Cell::Black);
        assert_eq!(&agent.mirror, agent.session().rules());
    }

    #[test]
    fn reports_when_nobody_can_move() {
        let rules = Rules::from_board(
            Board::from_rows([
                ". W B B B B B B",
                "B B B B B B B B",
                "B B B B B B B B",
                "B B B B B B B B",
                "B B B B B B B B",
                "B B B B B B B B",
                "B B B B B B B B",
                "B B B B B B B B",
            ]),
            false,
        );
        let session = GameSession::from_rules(rules, Cell::Black);
        let mut agent = AiAgent::from_session(Cell::White, session, &config(false));
        let start = Instant::now();
        let mut events = Vec::new();

        agent.notify_opponent_move_at(0, start);
        agent.poll_at(start + DELAY, &mut events);

        assert_eq!(
            events,
            vec![AgentEvent::NoLegalMoveForEitherSide { color: Cell::White }]
        );
        assert!(agent.session().is_game_over());
        assert_eq!(agent.mirror.score_of(Cell::Black), 64);
    }

    #[test]
    fn illegal_opponent_move_is_ignored() {
        let start = Instant::now();
        let mut agent = AiAgent::new(Cell::White, &config(true));
        let mut events = Vec::new();

        agent.notify_opponent_move_at(idx(0, 0), start);
        agent.poll_at(start + DELAY, &mut events);

        assert!(events.is_empty());
        assert_eq!(agent.session(), &GameSession::new(true));
    }

    #[test]
    fn events_serialize_with_a_kind_tag() {
        let json = serde_json::to_string(&AgentEvent::MoveChosen {
            color: Cell::White,
            index: 19,
        })
        .unwrap();

        assert_eq!(json, r#"{"kind":"moveChosen","color":"white","index":19}"#);
    }
}
