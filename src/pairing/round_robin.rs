//! Circle-method round robin.
//!
//! # Algorithm
//!
//! Place the teams on a circle of even size `m` (adding a bye marker when
//! the team count is odd). Position 0 is fixed; every round pairs position
//! `i` with position `m - 1 - i`, then positions `1..m` rotate one step.
//! After `m - 1` rounds every pair has met exactly once and no team
//! appears twice in a round.
//!
//! # Reference
//! Kirkman (1847); the "polygon" construction in de Werra (1981),
//! "Scheduling in sports".

/// One round: pairs of team indices as `(home, away)`.
pub type Round = Vec<(usize, usize)>;

/// Generates round-robin rounds over `n` teams (indices `0..n`).
///
/// Returns `n - 1` rounds for even `n`, `n` rounds for odd `n` (one team
/// sits out each round). Fewer than two teams yields no rounds.
pub fn circle_rounds(n: usize) -> Vec<Round> {
    if n < 2 {
        return Vec::new();
    }

    // `None` marks the bye position.
    let mut circle: Vec<Option<usize>> = (0..n).map(Some).collect();
    if n % 2 == 1 {
        circle.push(None);
    }
    let m = circle.len();

    let mut rounds = Vec::with_capacity(m - 1);
    for r in 0..m - 1 {
        let mut round = Vec::with_capacity(m / 2);
        for i in 0..m / 2 {
            let (a, b) = match (circle[i], circle[m - 1 - i]) {
                (Some(a), Some(b)) => (a, b),
                _ => continue, // bye
            };
            // Alternate orientation by round so venue roles stay balanced.
            let pair = if r % 2 == 0 { (a, b) } else { (b, a) };
            round.push(pair);
        }
        rounds.push(round);
        circle[1..].rotate_right(1);
    }
    rounds
}
