use crate::error::EnvError;

/// Number of discrete actions the environment accepts
pub const NUM_ACTIONS: usize = 4;

/// Action the agent can take, one fixed-size step in a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
}

impl Action {
    /// All actions in index order
    pub const ALL: [Action; NUM_ACTIONS] = [Action::Left, Action::Right, Action::Up, Action::Down];

    /// Map a discrete action index to an action
    ///
    /// - 0 → Left
    /// - 1 → Right
    /// - 2 → Up
    /// - 3 → Down
    /// - other → None
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// The discrete index of this action
    pub fn index(&self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Up => 2,
            Action::Down => 3,
        }
    }

    /// Returns the unit delta (dx, dy) for this action; y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Up => (0, -1),
            Action::Down => (0, 1),
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = EnvError;

    fn try_from(idx: usize) -> Result<Self, Self::Error> {
        Self::from_index(idx).ok_or(EnvError::InvalidAction {
            action: idx,
            max: NUM_ACTIONS - 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mapping() {
        assert_eq!(Action::from_index(0), Some(Action::Left));
        assert_eq!(Action::from_index(1), Some(Action::Right));
        assert_eq!(Action::from_index(2), Some(Action::Up));
        assert_eq!(Action::from_index(3), Some(Action::Down));
        assert_eq!(Action::from_index(4), None);
        assert_eq!(Action::from_index(99), None);

        for action in Action::ALL {
            assert_eq!(Action::from_index(action.index()), Some(action));
        }
    }

    #[test]
    fn test_action_delta() {
        assert_eq!(Action::Up.delta(), (0, -1));
        assert_eq!(Action::Down.delta(), (0, 1));
        assert_eq!(Action::Left.delta(), (-1, 0));
        assert_eq!(Action::Right.delta(), (1, 0));
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(Action::try_from(2).unwrap(), Action::Up);

        let err = Action::try_from(7).unwrap_err();
        assert!(matches!(err, EnvError::InvalidAction { action: 7, max: 3 }));
    }
}
