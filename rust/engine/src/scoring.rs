//! Board evaluation, fouling, and the head-to-head zero-sum scorer.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Row};
use crate::errors::GameError;
use crate::hand::{compare, evaluate_row, HandEvaluation};
use crate::royalties::BoardRoyalties;

/// Bonus for winning all three lines.
pub const SCOOP_BONUS: i32 = 3;

/// Evaluations of the three rows of a complete board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEvaluation {
    pub top: HandEvaluation,
    pub middle: HandEvaluation,
    pub bottom: HandEvaluation,
}

impl BoardEvaluation {
    pub fn get(&self, row: Row) -> &HandEvaluation {
        match row {
            Row::Top => &self.top,
            Row::Middle => &self.middle,
            Row::Bottom => &self.bottom,
        }
    }

    /// Fouled when bottom < middle or middle < top.
    pub fn is_fouled(&self) -> bool {
        compare(&self.bottom, &self.middle) < 0 || compare(&self.middle, &self.top) < 0
    }
}

/// Evaluates the three rows of a complete board.
///
/// # Errors
///
/// - [`GameError::BoardIncomplete`] - the board is not 3/5/5
/// - [`GameError::DuplicateCard`] - a card appears twice on the board
pub fn evaluate_board(board: &Board) -> Result<BoardEvaluation, GameError> {
    board.ensure_complete("board")?;
    let mut seen = HashSet::new();
    if let Some(repeated) = board.cards().find(|c| !seen.insert(**c)) {
        return Err(GameError::DuplicateCard(*repeated));
    }
    let eval = |row: Row| {
        evaluate_row(board.row(row)).ok_or_else(|| {
            GameError::BoardIncomplete(format!("{} row cannot be evaluated", row))
        })
    };
    Ok(BoardEvaluation {
        top: eval(Row::Top)?,
        middle: eval(Row::Middle)?,
        bottom: eval(Row::Bottom)?,
    })
}

/// One row of a finished board with its royalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowResult {
    pub evaluation: HandEvaluation,
    pub royalty: u32,
}

/// Final verdict on a single board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardResult {
    pub fouled: bool,
    pub top: RowResult,
    pub middle: RowResult,
    pub bottom: RowResult,
    /// Sum of row royalties; 0 when fouled
    pub total: u32,
}

impl BoardResult {
    pub fn row(&self, row: Row) -> &RowResult {
        match row {
            Row::Top => &self.top,
            Row::Middle => &self.middle,
            Row::Bottom => &self.bottom,
        }
    }
}

/// Evaluates a complete board: fouling and royalties (zeroed when fouled).
pub fn evaluate_final_result(board: &Board) -> Result<BoardResult, GameError> {
    let evals = evaluate_board(board)?;
    let fouled = evals.is_fouled();
    let royalties = if fouled {
        BoardRoyalties::default()
    } else {
        BoardRoyalties::from_evaluations(&evals.top, &evals.middle, &evals.bottom)
    };
    let BoardEvaluation { top, middle, bottom } = evals;
    Ok(BoardResult {
        fouled,
        top: RowResult {
            evaluation: top,
            royalty: royalties.top,
        },
        middle: RowResult {
            evaluation: middle,
            royalty: royalties.middle,
        },
        bottom: RowResult {
            evaluation: bottom,
            royalty: royalties.bottom,
        },
        total: royalties.total(),
    })
}

/// Per-line outcome from side A's perspective: -1, 0 or +1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOutcomes {
    pub top: i8,
    pub middle: i8,
    pub bottom: i8,
}

impl LineOutcomes {
    fn uniform(v: i8) -> Self {
        Self {
            top: v,
            middle: v,
            bottom: v,
        }
    }

    pub fn get(&self, row: Row) -> i8 {
        match row {
            Row::Top => self.top,
            Row::Middle => self.middle,
            Row::Bottom => self.bottom,
        }
    }

    pub fn sum(&self) -> i32 {
        i32::from(self.top) + i32::from(self.middle) + i32::from(self.bottom)
    }

    fn flipped(&self) -> Self {
        Self {
            top: -self.top,
            middle: -self.middle,
            bottom: -self.bottom,
        }
    }

    fn scoop(&self) -> i32 {
        if self.top == 1 && self.middle == 1 && self.bottom == 1 {
            SCOOP_BONUS
        } else if self.top == -1 && self.middle == -1 && self.bottom == -1 {
            -SCOOP_BONUS
        } else {
            0
        }
    }
}

/// Head-to-head outcome of two finished boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub fouled_a: bool,
    pub fouled_b: bool,
    pub lines: LineOutcomes,
    /// +3 when A scoops, -3 when B scoops, else 0
    pub scoop_bonus: i32,
    pub royalties_a: u32,
    pub royalties_b: u32,
    pub points_a: i32,
    pub points_b: i32,
}

/// Scores board A against board B.
///
/// # Errors
///
/// - [`GameError::BoardIncomplete`] - either board is not 3/5/5
/// - [`GameError::OverlappingBoards`] - a card appears on both boards
/// - [`GameError::DuplicateCard`] - a card appears twice on one board
///
/// # Panics
///
/// Panics if the computed totals are not zero-sum; that can only be a defect
/// in this function.
///
/// # Examples
///
/// ```
/// use ofc_engine::board::Board;
/// use ofc_engine::scoring::score_hand;
///
/// let a = Board::parse("As 9h 4c / Ks Kh 8c 5d 2s / Qs Qh Jc Jd 2h").unwrap();
/// let b = Board::parse("Kd 9d 3c / Ah Ad 7c 7d 3s / 6s 7h 8d 9s Ts").unwrap();
/// let score = score_hand(&a, &b).unwrap();
/// assert_eq!(score.points_a + score.points_b, 0);
/// ```
pub fn score_hand(board_a: &Board, board_b: &Board) -> Result<ScoreResult, GameError> {
    board_a.ensure_complete("boardA")?;
    board_b.ensure_complete("boardB")?;
    let seen: HashSet<_> = board_a.cards().copied().collect();
    if let Some(shared) = board_b.cards().find(|c| seen.contains(c)) {
        return Err(GameError::OverlappingBoards(*shared));
    }

    let eval_a = evaluate_board(board_a)?;
    let eval_b = evaluate_board(board_b)?;
    let fouled_a = eval_a.is_fouled();
    let fouled_b = eval_b.is_fouled();

    let (lines, royalties_a, royalties_b) = match (fouled_a, fouled_b) {
        (true, true) => (LineOutcomes::default(), 0, 0),
        (true, false) => (LineOutcomes::uniform(-1), 0, 0),
        (false, true) => (LineOutcomes::uniform(1), 0, 0),
        (false, false) => {
            let lines = LineOutcomes {
                top: compare(&eval_a.top, &eval_b.top),
                middle: compare(&eval_a.middle, &eval_b.middle),
                bottom: compare(&eval_a.bottom, &eval_b.bottom),
            };
            let ra = BoardRoyalties::from_evaluations(&eval_a.top, &eval_a.middle, &eval_a.bottom);
            let rb = BoardRoyalties::from_evaluations(&eval_b.top, &eval_b.middle, &eval_b.bottom);
            (lines, ra.total(), rb.total())
        }
    };

    // A fouled side forfeits the lines but no scoop is paid on top of that.
    let valid_both = !fouled_a && !fouled_b;
    let scoop_bonus = if valid_both { lines.scoop() } else { 0 };
    let points_a = side_points(&lines, valid_both, royalties_a, royalties_b);
    let points_b = side_points(&lines.flipped(), valid_both, royalties_b, royalties_a);

    assert_eq!(
        points_a, -points_b,
        "scoring invariant violated: pointsA must equal -pointsB"
    );

    debug!(
        fouled_a,
        fouled_b, points_a, royalties_a, royalties_b, "scored head-to-head"
    );

    Ok(ScoreResult {
        fouled_a,
        fouled_b,
        lines,
        scoop_bonus,
        royalties_a,
        royalties_b,
        points_a,
        points_b,
    })
}

fn side_points(lines: &LineOutcomes, scoop_applies: bool, own: u32, other: u32) -> i32 {
    let scoop = if scoop_applies { lines.scoop() } else { 0 };
    // Royalty totals are bounded well under i32::MAX (max 22 + 30 + 15).
    lines.sum() + scoop + own as i32 - other as i32
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "foulA={} foulB={}", self.fouled_a, self.fouled_b)?;
        writeln!(
            f,
            "lines: top={:+} middle={:+} bottom={:+}",
            self.lines.top, self.lines.middle, self.lines.bottom
        )?;
        writeln!(f, "scoop={:+}", self.scoop_bonus)?;
        writeln!(
            f,
            "royaltiesA={} royaltiesB={}",
            self.royalties_a, self.royalties_b
        )?;
        write!(f, "pointsA={} pointsB={}", self.points_a, self.points_b)
    }
}
