use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use super::types::{BootstrapLineup, LineupSnapshot};

/// One team's reconstructed history: the seeded starting state plus a
/// snapshot per substitution, in event order.
#[derive(Debug, Clone)]
pub struct TeamTimeline {
    pub bootstrap: BootstrapLineup,
    pub snapshots: Vec<LineupSnapshot>,
}

impl TeamTimeline {
    /// On-floor set as of `ordinal`: the latest snapshot at or before it,
    /// falling back to the bootstrap state before any snapshot exists.
    pub fn lineup_as_of(&self, ordinal: usize) -> &BTreeSet<i64> {
        let idx = self
            .snapshots
            .partition_point(|s| s.event_ordinal <= ordinal);
        if idx == 0 {
            &self.bootstrap.players
        } else {
            &self.snapshots[idx - 1].players
        }
    }
}

/// Reconstructed lineup history for every team seen in a game's feed.
#[derive(Debug, Clone, Default)]
pub struct LineupTimeline {
    teams: BTreeMap<i64, TeamTimeline>,
}

impl LineupTimeline {
    pub fn insert_team(&mut self, team_id: i64, timeline: TeamTimeline) {
        self.teams.insert(team_id, timeline);
    }

    pub fn team(&self, team_id: i64) -> Option<&TeamTimeline> {
        self.teams.get(&team_id)
    }

    pub fn team_ids(&self) -> Vec<i64> {
        self.teams.keys().copied().collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, i64, TeamTimeline> {
        self.teams.iter()
    }

    pub fn lineup_as_of(&self, team_id: i64, ordinal: usize) -> Option<&BTreeSet<i64>> {
        self.teams.get(&team_id).map(|t| t.lineup_as_of(ordinal))
    }

    pub fn snapshot_count(&self) -> usize {
        self.teams.values().map(|t| t.snapshots.len()).sum()
    }
}
