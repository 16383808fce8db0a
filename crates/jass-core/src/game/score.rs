use crate::model::player::Team;

/// Running team totals across the rounds of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [i32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn add_points(&mut self, team: Team, points: i32) {
        self.totals[team.index()] += points;
    }

    pub fn set_totals(&mut self, totals: [i32; 2]) {
        self.totals = totals;
    }

    pub fn score(&self, team: Team) -> i32 {
        self.totals[team.index()]
    }

    pub fn standings(&self) -> &[i32; 2] {
        &self.totals
    }

    pub fn apply_round(&mut self, points: [i32; 2]) {
        for team in Team::BOTH {
            self.add_points(team, points[team.index()]);
        }
    }

    /// Team ahead on points; `None` while level.
    pub fn leading_team(&self) -> Option<Team> {
        let [north_south, east_west] = self.totals;
        match north_south.cmp(&east_west) {
            core::cmp::Ordering::Greater => Some(Team::NorthSouth),
            core::cmp::Ordering::Less => Some(Team::EastWest),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// Team that reached `target`. If both did in the same round the higher
    /// total wins.
    pub fn team_reaching(&self, target: i32) -> Option<Team> {
        let reached: Vec<Team> = Team::BOTH
            .into_iter()
            .filter(|team| self.score(*team) >= target)
            .collect();
        match reached.as_slice() {
            [] => None,
            [team] => Some(*team),
            _ => self.leading_team(),
        }
    }
}
