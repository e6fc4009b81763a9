use shared_resources::direction::Direction;

/// Which call buttons are currently lit, one entry per floor and direction.
#[derive(serde::Serialize, Debug, Clone)]
pub struct FloorRequestRegistry {
    requests: Vec<Vec<bool>>,
    num_floors: u8,
}

impl FloorRequestRegistry {
    pub fn new(num_floors: u8) -> Self {
        FloorRequestRegistry {
            requests: vec![vec![false; Direction::num_directions()]; num_floors as usize],
            num_floors,
        }
    }

    fn index(&self, floor: u8) -> usize {
        assert!(
            floor >= 1 && floor <= self.num_floors,
            "floor {} outside registry of {} floors",
            floor,
            self.num_floors
        );
        (floor - 1) as usize
    }

    /// Lights the button. Returns false if it was already lit.
    pub fn submit(&mut self, floor: u8, direction: Direction) -> bool {
        let index = self.index(floor);
        let flag = &mut self.requests[index][direction.as_index()];
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    /// Turns the button off. Returns whether it was lit.
    pub fn clear(&mut self, floor: u8, direction: Direction) -> bool {
        let index = self.index(floor);
        std::mem::replace(&mut self.requests[index][direction.as_index()], false)
    }

    pub fn is_active(&self, floor: u8, direction: Direction) -> bool {
        self.requests[self.index(floor)][direction.as_index()]
    }

    pub fn active_requests(&self) -> Vec<(u8, Direction)> {
        let mut active = Vec::new();
        for floor in 1..=self.num_floors {
            for direction in Direction::iter() {
                if self.is_active(floor, direction) {
                    active.push((floor, direction));
                }
            }
        }
        active
    }
}
