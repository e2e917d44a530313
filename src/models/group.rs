//! Group and Grouping produced by balanced team generation.

use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// Players assigned to the same team for a scrimmage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub members: Vec<Player>,
}

impl Group {
    /// Exact sum of member skills.
    pub fn total_skill(&self) -> f64 {
        self.members.iter().map(|p| p.skill).sum()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Display view with the total precomputed (for API responses).
    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            members: self.members.clone(),
            total_skill: self.total_skill(),
        }
    }
}

/// Group plus its skill total, for API / display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub members: Vec<Player>,
    pub total_skill: f64,
}

/// One full assignment of eligible players into groups. Empty when nothing was generated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    pub groups: Vec<Group>,
}

impl Grouping {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn totals(&self) -> Vec<f64> {
        self.groups.iter().map(Group::total_skill).collect()
    }

    /// Every assigned player, in group order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.groups.iter().flat_map(|g| g.members.iter())
    }

    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.groups.iter().map(Group::summary).collect()
    }
}
