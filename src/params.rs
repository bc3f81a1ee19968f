//! Id layout and run configuration.
//!
//! Two disjoint numeric ranges distinguish the pools: ids in the left range belong
//! to the left side of the bipartite graph, ids in the right range to the right
//! side. The synthetic source and sink get ids above both ranges so they can never
//! collide with a real person.

use std::ops::RangeInclusive;

pub const MIN_LEFT_ID: u32 = 1000;
pub const MAX_LEFT_ID: u32 = 1999;
pub const MIN_RIGHT_ID: u32 = 2000;
pub const MAX_RIGHT_ID: u32 = 2999;

pub const FRIEND_ID: u32 = 1009;

pub const SOURCE_ID: u32 = 3000;
pub const SINK_ID: u32 = 3001;

pub const MAX_NUM_IDS: usize = 2000;
pub const MAX_NUM_TEAMS: usize = 10000;

/// Which part of the flow network a vertex belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Sink,
    Left,
    Right,
}

impl Side {
    pub fn is_special(self) -> bool {
        matches!(self, Side::Source | Side::Sink)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub left_ids: RangeInclusive<u32>,
    pub right_ids: RangeInclusive<u32>,
    pub friend_id: u32,
    pub max_teams: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            left_ids: MIN_LEFT_ID..=MAX_LEFT_ID,
            right_ids: MIN_RIGHT_ID..=MAX_RIGHT_ID,
            friend_id: FRIEND_ID,
            max_teams: MAX_NUM_TEAMS,
        }
    }
}

impl Params {
    pub fn with_friend(friend_id: u32) -> Self {
        Params {
            friend_id,
            ..Default::default()
        }
    }

    /// Returns the pool `id` belongs to, or `None` if it is in neither range.
    pub fn side_of(&self, id: u32) -> Option<Side> {
        if self.left_ids.contains(&id) {
            Some(Side::Left)
        } else if self.right_ids.contains(&id) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
