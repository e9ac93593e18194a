use serde::Serialize;

/// A player and its tribe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tribe {
    pub owner: u16,
    pub username: String,
    pub autoplay: bool,
    pub score: u16,
    pub currency: u16,
    pub tech: Vec<u16>,
    pub tribe_id: u16,
    pub killer_id: u16,
    pub kills: u16,
    pub tasks: Vec<Task>,
    pub built_unique_improvements: Vec<u16>,
    pub known_players: Vec<u16>,
    pub relations: Vec<RelationSlot>,
    pub killed_turn: u16,
    pub resigned_turn: u16,
}

/// Progress of a started task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Task {
    pub started: u8,
    pub completed: u8,
    /// Only kept while it is below the current turn
    pub turns: Option<u8>,
}

impl Task {
    /// Build from raw task bytes, dropping tasks that were never started
    pub fn from_raw(started: u8, completed: u8, turns: u8, current_turn: u16) -> Option<Self> {
        if started != 1 {
            return None;
        }
        Some(Self {
            started,
            completed,
            turns: ((turns as u16) < current_turn).then_some(turns),
        })
    }
}

/// Diplomatic state towards one other tribe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub state: bool,
    pub last_attack_turn: u16,
    pub embassy_level: u16,
    pub last_peace_broken_turn: u16,
    pub first_meet: u16,
    pub embassy_build_turn: u16,
    pub previous_attack_turn: u16,
}

/// One decoded slot of the relations table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationSlot {
    /// Owner id of the other tribe
    pub key: u8,
    pub relation: Relation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_requires_started() {
        assert_eq!(Task::from_raw(0, 0, 3, 10), None);
        assert_eq!(Task::from_raw(2, 1, 3, 10), None);
        assert!(Task::from_raw(1, 0, 3, 10).is_some());
    }

    #[test]
    fn test_task_turns_below_current_turn() {
        let task = Task::from_raw(1, 1, 3, 10).unwrap();
        assert_eq!(task.turns, Some(3));

        let task = Task::from_raw(1, 0, 10, 10).unwrap();
        assert_eq!(task.turns, None);

        let task = Task::from_raw(1, 0, 200, 5).unwrap();
        assert_eq!(task.turns, None);
    }
}
