use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::North),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::South),
            3 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Seat that acts after this one. Play runs counter-clockwise: N, W, S, E.
    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::West,
            PlayerPosition::East => PlayerPosition::North,
            PlayerPosition::South => PlayerPosition::East,
            PlayerPosition::West => PlayerPosition::South,
        }
    }

    pub const fn previous(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
        }
    }

    pub const fn partner(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::South,
            PlayerPosition::East => PlayerPosition::West,
            PlayerPosition::South => PlayerPosition::North,
            PlayerPosition::West => PlayerPosition::East,
        }
    }

    /// Seat reached after `steps` turns in play order.
    pub const fn advance(self, steps: usize) -> PlayerPosition {
        let index = (self.index() + 4 - steps % 4) % 4;
        match PlayerPosition::from_index(index) {
            Some(seat) => seat,
            None => self,
        }
    }

    /// Number of turns from `leader` until this seat acts.
    pub const fn turns_after(self, leader: PlayerPosition) -> usize {
        (leader.index() + 4 - self.index()) % 4
    }

    pub const fn team(self) -> Team {
        match self {
            PlayerPosition::North | PlayerPosition::South => Team::NorthSouth,
            PlayerPosition::East | PlayerPosition::West => Team::EastWest,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    NorthSouth = 0,
    EastWest = 1,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::NorthSouth, Team::EastWest];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Team::NorthSouth),
            1 => Some(Team::EastWest),
            _ => None,
        }
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }

    pub const fn members(self) -> [PlayerPosition; 2] {
        match self {
            Team::NorthSouth => [PlayerPosition::North, PlayerPosition::South],
            Team::EastWest => [PlayerPosition::East, PlayerPosition::West],
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::NorthSouth => f.write_str("North/South"),
            Team::EastWest => f.write_str("East/West"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerPosition, Team};

    #[test]
    fn next_runs_counter_clockwise() {
        assert_eq!(PlayerPosition::North.next(), PlayerPosition::West);
        assert_eq!(PlayerPosition::East.next(), PlayerPosition::North);
        assert_eq!(PlayerPosition::West.next().next(), PlayerPosition::East);
    }

    #[test]
    fn previous_undoes_next() {
        for seat in PlayerPosition::LOOP {
            assert_eq!(seat.next().previous(), seat);
        }
    }

    #[test]
    fn partner_is_opposite_seat() {
        assert_eq!(PlayerPosition::North.partner(), PlayerPosition::South);
        assert_eq!(PlayerPosition::West.partner(), PlayerPosition::East);
    }

    #[test]
    fn advance_matches_repeated_next() {
        for seat in PlayerPosition::LOOP {
            let mut expected = seat;
            for steps in 0..8 {
                assert_eq!(seat.advance(steps), expected);
                assert_eq!(expected.turns_after(seat), steps % 4);
                expected = expected.next();
            }
        }
    }

    #[test]
    fn teams_pair_partners() {
        for seat in PlayerPosition::LOOP {
            assert_eq!(seat.team(), seat.partner().team());
            assert_ne!(seat.team(), seat.next().team());
        }
        assert_eq!(Team::EastWest.members(), [PlayerPosition::East, PlayerPosition::West]);
        assert_eq!(Team::NorthSouth.opponent(), Team::EastWest);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in PlayerPosition::LOOP.iter().enumerate() {
            assert_eq!(PlayerPosition::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
