//! Team assignment on join and single-step rebalancing on leave.

use haxbot_core::{Player, PlayerId, Team, TeamCounts};

/// A player to move from one team to the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub player: PlayerId,
    pub name: String,
    pub from: Team,
    pub to: Team,
}

/// Team for a newly joined player: the smaller of red and blue, red on ties.
pub fn assign_on_join(roster: &[Player]) -> Team {
    let counts = TeamCounts::of(roster);
    if counts.blue < counts.red {
        Team::Blue
    } else {
        Team::Red
    }
}

/// Transfer that restores balance after `departed` left.
///
/// `roster` must no longer contain the departed player. Only a gap of
/// exactly two triggers a move, and the first player on the larger team in
/// roster order is the one moved.
pub fn rebalance_on_leave(departed: &Player, roster: &[Player]) -> Option<Transfer> {
    let gone = departed.team;
    let other = gone.opponent()?;
    let counts = TeamCounts::of(roster);
    if counts.get(gone) + 2 != counts.get(other) {
        return None;
    }
    roster.iter().find(|p| p.team == other).map(|p| Transfer {
        player: p.id,
        name: p.name.clone(),
        from: other,
        to: gone,
    })
}
