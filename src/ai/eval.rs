//! Static move heuristics: candidate generation, edge bonuses, liberties
//! and mobility.

use crate::rules::Rules;
use crate::types::{BOARD_SIZE, Cell, Coord, DIRECTIONS, NUM_SQUARES};

const LAST: i32 = BOARD_SIZE as i32 - 1;

/// Edge cell joined to a corner by the mover's own stones.
pub const STABLE_EDGE_SCORE: i32 = 40;
/// Edge cell next to an opponent run anchored at a corner.
pub const TRAPPED_EDGE_SCORE: i32 = -20;
/// Any other edge cell.
pub const EDGE_SCORE: i32 = 20;

/// Blank cells reachable from one of `color`'s stones over a run of
/// opponent stones.
///
/// Stones are visited column by column (x outer, y inner) and each one
/// yields at most one candidate per direction. A square reached along
/// several paths is listed once per path.
pub fn enumerate_candidates(rules: &Rules, color: Cell) -> Vec<Coord> {
    if !color.is_stone() {
        return Vec::new();
    }
    let enemy = color.opponent();
    let mut moves = Vec::new();

    for x in 0..BOARD_SIZE as i32 {
        for y in 0..BOARD_SIZE as i32 {
            let origin = Coord::new(x, y);
            if rules.stone_at(origin) != color {
                continue;
            }

            for (dx, dy) in DIRECTIONS {
                let mut check = origin.offset(dx, dy);
                if rules.stone_at(check) != enemy {
                    continue;
                }
                while rules.stone_at(check) == enemy {
                    check = check.offset(dx, dy);
                }
                if check.in_bounds() && rules.stone_at(check) == Cell::Blank {
                    moves.push(check);
                }
            }
        }
    }

    moves
}

/// Move-ordering score of playing `color` at `at`: edge bonus, minus the
/// mover's liberties afterwards, plus the mobility difference afterwards.
pub fn positional_score(rules: &Rules, color: Cell, at: Coord) -> i32 {
    let mut after = *rules;
    // A rejected placement leaves the copy as it was.
    let _ = after.place_and_flip(at, color);

    let own_moves = enumerate_candidates(&after, color).len() as i32;
    let enemy_moves = enumerate_candidates(&after, color.opponent()).len() as i32;

    evaluate_location(rules, at, color) - liberties(&after, color) as i32 + own_moves - enemy_moves
}

/// Positional bonus for edge cells; interior cells score 0.
///
/// Edges are tried in the order top, bottom, left, right, so a corner is
/// scored along its row.
pub fn evaluate_location(rules: &Rules, at: Coord, color: Cell) -> i32 {
    if at.y == 0 {
        edge_line_score(|i| rules.stone_at(Coord::new(i, 0)), at.x, color, LAST)
    } else if at.y == LAST {
        // The bottom row's right-to-left enemy scan starts one cell past the
        // edge and therefore never reaches the target.
        let row = |i| rules.stone_at(Coord::new(i, LAST));
        edge_line_score(row, at.x, color, LAST + 1)
    } else if at.x == 0 {
        edge_line_score(|i| rules.stone_at(Coord::new(0, i)), at.y, color, LAST)
    } else if at.x == LAST {
        edge_line_score(|i| rules.stone_at(Coord::new(LAST, i)), at.y, color, LAST)
    } else {
        0
    }
}

/// Scores position `target` on an edge line read through `line`.
fn edge_line_score(
    line: impl Fn(i32) -> Cell,
    target: i32,
    color: Cell,
    enemy_scan_start: i32,
) -> i32 {
    let enemy = color.opponent();

    if run_from_low_end(&line, target, color) == target
        || run_from_high_end(&line, LAST, target, color) == target
    {
        return STABLE_EDGE_SCORE;
    }

    let i = run_from_low_end(&line, target, enemy);
    if i == target && line(i - 1) == enemy {
        return TRAPPED_EDGE_SCORE;
    }
    let i = run_from_high_end(&line, enemy_scan_start, target, enemy);
    if i == target && line(i + 1) == enemy {
        return TRAPPED_EDGE_SCORE;
    }

    EDGE_SCORE
}

/// First index in `0..target` that does not hold `color`, or `target`.
fn run_from_low_end(line: &impl Fn(i32) -> Cell, target: i32, color: Cell) -> i32 {
    let mut i = 0;
    while i < target && line(i) == color {
        i += 1;
    }
    i
}

/// Walks down from `start` while above `target` and holding `color`.
fn run_from_high_end(line: &impl Fn(i32) -> Cell, start: i32, target: i32, color: Cell) -> i32 {
    let mut i = start;
    while i > target && line(i) == color {
        i -= 1;
    }
    i
}

/// Blank cells with at least one neighbor holding `color`.
pub fn liberties(rules: &Rules, color: Cell) -> u32 {
    (0..NUM_SQUARES)
        .map(Coord::from_index)
        .filter(|&at| {
            rules.stone_at(at) == Cell::Blank
                && DIRECTIONS
                    .iter()
                    .any(|&(dx, dy)| rules.stone_at(at.offset(dx, dy)) == color)
        })
        .count() as u32
}

/// Opponent stones in runs next to `at` that end on an empty (or
/// off-board) cell, i.e. runs `color` would leave exposed.
pub fn turned_stones(rules: &Rules, color: Cell, at: Coord) -> u32 {
    let enemy = color.opponent();
    let mut total = 0;

    for (dx, dy) in DIRECTIONS {
        let mut check = at.offset(dx, dy);
        if rules.stone_at(check) != enemy {
            continue;
        }
        let mut run = 0;
        while rules.stone_at(check) == enemy {
            run += 1;
            check = check.offset(dx, dy);
        }
        if rules.stone_at(check) == Cell::Blank {
            total += run;
        }
    }

    total
}
