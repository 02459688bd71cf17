use log::{debug, trace};
use rand::{Rng, RngCore};

use crate::ai::eval::{enumerate_candidates, positional_score, turned_stones};
use crate::rules::Rules;
use crate::types::{Cell, Coord};

/// Plies of reply/counter-reply explored below each root candidate.
pub const LOOKAHEAD_DEPTH: u32 = 2;

// Only the best-ordered fraction of each candidate list is searched.
const ROOT_BREADTH_DIVISOR: usize = 3;
const REPLY_BREADTH_DIVISOR: usize = 5;
const COUNTER_BREADTH_DIVISOR: usize = 4;

/// Returned when `color` has no candidate at all.
pub const FALLBACK_MOVE: Coord = Coord::new(0, 0);

/// Picks a move for `color` with the default lookahead depth.
/// Caller contract: `color` should have at least one candidate.
pub fn choose_move(rules: &Rules, color: Cell, rng: &mut dyn RngCore) -> Coord {
    choose_move_with_depth(rules, color, LOOKAHEAD_DEPTH, rng)
}

pub fn choose_move_with_depth(
    rules: &Rules,
    color: Cell,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Coord {
    let mut moves = enumerate_candidates(rules, color);
    sort_by_score_descending(rules, &mut moves, color);

    let Some(&first) = moves.first() else {
        debug!(
            "no candidates for {}, falling back to {FALLBACK_MOVE}",
            color.name()
        );
        return FALLBACK_MOVE;
    };

    let mut best_move = first;
    let mut best_score = lookahead(rules, color, first, depth);

    for &mv in moves
        .iter()
        .take(moves.len() / ROOT_BREADTH_DIVISOR)
        .skip(1)
    {
        let score = lookahead(rules, color, mv, depth);
        trace!("candidate {mv} scored {score}");
        if replaces_best(score, best_score, rng) {
            best_move = mv;
            best_score = score;
        }
    }

    debug!(
        "{} plays {best_move} (score {best_score}, {} candidates, {} stones left open)",
        color.name(),
        moves.len(),
        turned_stones(rules, color, best_move)
    );
    best_move
}

/// Higher wins; an equal score wins half of the time.
fn replaces_best(score: i32, best_score: i32, rng: &mut dyn RngCore) -> bool {
    score > best_score || (score == best_score && rng.random::<f64>() > 0.5)
}

/// Score of `mv` for `color`, raised by the best counter line found among
/// the opponent's top replies.
pub fn lookahead(rules: &Rules, color: Cell, mv: Coord, depth: u32) -> i32 {
    let enemy = color.opponent();
    let mut score = positional_score(rules, color, mv);

    let mut next = *rules;
    let _ = next.place_and_flip(mv, color);

    if depth > 0 {
        let mut replies = enumerate_candidates(&next, enemy);
        sort_by_score_descending(&next, &mut replies, enemy);

        for &reply in replies.iter().take(replies.len() / REPLY_BREADTH_DIVISOR) {
            score = score.max(counter_lookahead(&next, color, reply, depth - 1));
        }
    }

    score
}

/// Plays the opponent's `reply`, then returns the best `lookahead` among
/// `color`'s top answers, or 0 when none are searched.
pub fn counter_lookahead(rules: &Rules, color: Cell, reply: Coord, depth: u32) -> i32 {
    let mut next = *rules;
    let _ = next.place_and_flip(reply, color.opponent());

    let mut moves = enumerate_candidates(&next, color);
    sort_by_score_descending(&next, &mut moves, color);

    moves
        .iter()
        .take(moves.len() / COUNTER_BREADTH_DIVISOR)
        .map(|&mv| lookahead(&next, color, mv, depth))
        .max()
        .unwrap_or(0)
}

/// Stable insertion sort, best `positional_score` first. Equal scores
/// keep their relative order.
pub fn sort_by_score_descending(rules: &Rules, moves: &mut [Coord], color: Cell) {
    let mut scored: Vec<(Coord, i32)> = moves
        .iter()
        .map(|&mv| (mv, positional_score(rules, color, mv)))
        .collect();

    for i in 1..scored.len() {
        let current = scored[i];
        let mut j = i;
        while j > 0 && scored[j - 1].1 < current.1 {
            scored[j] = scored[j - 1];
            j -= 1;
        }
        scored[j] = current;
    }

    for (slot, (mv, _)) in moves.iter_mut().zip(scored) {
        *slot = mv;
    }
}
