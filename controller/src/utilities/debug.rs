use std::collections::BTreeMap;
use std::io::{stdout, Stdout, Write};

use crossterm::{cursor, terminal, ExecutableCommand, Result};

use shared_resources::direction::Direction;
use shared_resources::notification::{DoorState, LiftId, Notification};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftView {
    pub floor: u8,
    pub doors: DoorState,
    pub busy: bool,
}

impl Default for LiftView {
    fn default() -> Self {
        LiftView {
            floor: 1,
            doors: DoorState::Closed,
            busy: false,
        }
    }
}

/// Terminal rendering of what the notifications say about the building.
pub struct Debug {
    stdout: Stdout,
    num_floors: u8,
    lifts: BTreeMap<LiftId, LiftView>,
    buttons: Vec<[bool; 2]>,
    printed_lines: u16,
}

impl Debug {
    pub fn new(num_floors: u8, num_lifts: u8) -> Self {
        Debug {
            stdout: stdout(),
            num_floors,
            lifts: (1..=num_lifts).map(|id| (id, LiftView::default())).collect(),
            buttons: vec![[false; 2]; num_floors as usize],
            printed_lines: 0,
        }
    }

    /// Forgets everything shown so far and starts over with a new building.
    pub fn rebuild(&mut self, num_floors: u8, num_lifts: u8) {
        self.num_floors = num_floors;
        self.lifts = (1..=num_lifts).map(|id| (id, LiftView::default())).collect();
        self.buttons = vec![[false; 2]; num_floors as usize];
    }

    pub fn apply(&mut self, notification: &Notification) {
        match *notification {
            Notification::LiftPositionChanged { lift_id, floor, .. } => {
                self.lifts.entry(lift_id).or_default().floor = floor;
            }
            Notification::LiftDoorStateChanged { lift_id, state } => {
                self.lifts.entry(lift_id).or_default().doors = state;
            }
            Notification::LiftBusyChanged { lift_id, busy } => {
                self.lifts.entry(lift_id).or_default().busy = busy;
            }
            Notification::FloorRequestStateChanged { floor, direction, active } => {
                if let Some(buttons) = self.buttons.get_mut((floor as usize).wrapping_sub(1)) {
                    buttons[direction.as_index()] = active;
                }
            }
        }
    }

    pub fn lift(&self, lift_id: LiftId) -> Option<&LiftView> {
        self.lifts.get(&lift_id)
    }

    pub fn button(&self, floor: u8, direction: Direction) -> bool {
        self.buttons
            .get((floor as usize).wrapping_sub(1))
            .map_or(false, |buttons| buttons[direction.as_index()])
    }

    pub fn printstatus(&mut self) -> Result<()> {
        if self.printed_lines > 0 {
            self.stdout.execute(cursor::MoveUp(self.printed_lines))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        let mut lines: u16 = 0;

        writeln!(self.stdout, "+--------------------------------------+")?;
        writeln!(self.stdout, "| FLOOR REQUESTS                       |")?;
        writeln!(self.stdout, "+------------+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} | {2:<10} |", "FLOOR", "UP", "DOWN")?;
        lines += 4;
        for floor in (1..=self.num_floors).rev() {
            writeln!(self.stdout, "+------------+------------+------------+")?;
            writeln!(
                self.stdout,
                "| {0:<10} | {1:<10} | {2:<10} |",
                floor,
                self.button(floor, Direction::Up),
                self.button(floor, Direction::Down)
            )?;
            lines += 2;
        }
        writeln!(self.stdout, "+------------+------------+------------+\n")?;
        lines += 2;

        writeln!(self.stdout, "+---------------------------------------------------+")?;
        writeln!(self.stdout, "| LIFTS                                             |")?;
        writeln!(self.stdout, "+------------+------------+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} | {2:<10} | {3:<10} |", "LIFT", "FLOOR", "DOORS", "BUSY")?;
        writeln!(self.stdout, "+------------+------------+------------+------------+")?;
        lines += 5;
        for (id, lift) in &self.lifts {
            writeln!(
                self.stdout,
                "| {0:<10} | {1:<10} | {2:<10} | {3:<10} |",
                id,
                lift.floor,
                lift.doors.as_str(),
                lift.busy
            )?;
            writeln!(self.stdout, "+------------+------------+------------+------------+")?;
            lines += 2;
        }
        self.stdout.flush()?;

        self.printed_lines = lines;
        Ok(())
    }
}
