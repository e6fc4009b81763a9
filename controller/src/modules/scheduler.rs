/// ----- SCHEDULER MODULE -----
/// Owns the dispatcher and is the only place commands reach it. Waits for
/// either the next operator command or the next lift phase deadline, keeps
/// the dispatcher's virtual clock in step with the wall clock (scaled by the
/// configured speed), and rebuilds the simulation on `reset`.

use std::time::{Duration, Instant};

use crossbeam_channel::{after, never, select, Receiver, Sender};
use tracing::{info, warn};

use shared_resources::config::SimulationConfig;
use shared_resources::notification::Notification;
use shared_resources::request::FloorRequest;

use crate::modules::dispatcher::Dispatcher;
use crate::utilities::command::Command;
use crate::utilities::notifier::Notifier;

/// Maps wall-clock time since the simulation started onto simulated time.
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    started: Instant,
    speed: f64,
}

impl SimulationClock {
    pub fn new(speed: f64) -> Self {
        SimulationClock {
            started: Instant::now(),
            speed,
        }
    }

    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    pub fn now(&self) -> Duration {
        self.to_simulated(self.started.elapsed())
    }

    pub fn to_simulated(&self, real: Duration) -> Duration {
        real.mul_f64(self.speed)
    }

    pub fn to_real(&self, simulated: Duration) -> Duration {
        simulated.div_f64(self.speed)
    }
}

pub fn main(
    config: SimulationConfig,
    command_rx: Receiver<Command>,
    notification_tx: Sender<Notification>,
    building_tx: Sender<(u8, u8)>,
) {
    let mut dispatcher = Dispatcher::new(config, Notifier::new(notification_tx));
    let mut clock = SimulationClock::new(config.speed());

    loop {
        let deadline = dispatcher.next_deadline();
        let wakeup = match deadline {
            Some(deadline) => after(clock.to_real(deadline.saturating_sub(clock.now()))),
            None => never(),
        };

        select! {
            recv(command_rx) -> msg => {
                dispatcher.advance_to(clock.now());
                let command = match msg {
                    Ok(command) => command,
                    Err(_) => return,
                };
                match command {
                    Command::Request { floor, direction } => {
                        match FloorRequest::new(floor, direction, dispatcher.config().floors()) {
                            Ok(request) => {
                                if !dispatcher.handle_floor_request(request.floor, request.direction) {
                                    info!(floor, %direction, "button already lit");
                                }
                            },
                            Err(e) => warn!("request rejected: {}", e),
                        }
                    },
                    Command::Reset { floors, lifts } => {
                        match dispatcher.config().with_building(floors, lifts) {
                            Ok(new_config) => {
                                dispatcher.reset(new_config);
                                clock.restart();
                                if building_tx.send((floors, lifts)).is_err() {
                                    warn!("display is gone, building change not shown");
                                }
                            },
                            Err(e) => warn!("reset rejected: {}", e),
                        }
                    },
                    Command::Status => match serde_json::to_string(&dispatcher.snapshot()) {
                        Ok(snapshot) => info!(%snapshot, "status"),
                        Err(e) => warn!("could not serialize status: {}", e),
                    },
                    Command::Quit => {
                        info!("stopping simulation");
                        return;
                    },
                }
            },
            recv(wakeup) -> _ => {
                // rounding can leave the clock a hair short of the deadline
                let now = clock.now();
                dispatcher.advance_to(deadline.map_or(now, |deadline| now.max(deadline)));
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use shared_resources::config::TimingConfig;
    use shared_resources::direction::Direction;

    #[test]
    fn speed_scales_between_real_and_simulated_time() {
        let clock = SimulationClock::new(4.0);
        assert_eq!(clock.to_simulated(Duration::from_millis(500)), Duration::from_millis(2000));
        assert_eq!(clock.to_real(Duration::from_millis(2000)), Duration::from_millis(500));
    }

    #[test]
    fn clock_converts_the_longest_trip_at_both_speed_limits() {
        use shared_resources::config::{MAX_FLOORS, MAX_PHASE_MS, MAX_SPEED, MIN_SPEED};
        let longest = Duration::from_millis(MAX_FLOORS as u64 * MAX_PHASE_MS);
        for speed in [MIN_SPEED, MAX_SPEED] {
            let clock = SimulationClock::new(speed);
            let real = clock.to_real(longest);
            assert!(real > Duration::ZERO);
            assert!(clock.to_simulated(real) > Duration::ZERO);
        }
    }

    #[test]
    fn runs_a_request_to_completion_and_quits() {
        let timing = TimingConfig {
            travel_ms_per_floor: 5,
            door_open_ms: 5,
            door_hold_ms: 5,
            door_close_ms: 5,
        };
        let config = SimulationConfig::new(4, 1, 1.0, timing).unwrap();
        let (command_tx, command_rx) = unbounded();
        let (notification_tx, notification_rx) = unbounded();
        let (building_tx, _building_rx) = unbounded();

        let handle = std::thread::spawn(move || main(config, command_rx, notification_tx, building_tx));
        command_tx.send(Command::Request { floor: 3, direction: Direction::Down }).unwrap();

        let cleared = Notification::FloorRequestStateChanged { floor: 3, direction: Direction::Down, active: false };
        let timeout = Duration::from_secs(5);
        loop {
            match notification_rx.recv_timeout(timeout) {
                Ok(notification) if notification == cleared => break,
                Ok(_) => continue,
                Err(e) => panic!("request was never served: {}", e),
            }
        }
        command_tx.send(Command::Quit).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn invalid_commands_do_not_reach_the_dispatcher() {
        let config = SimulationConfig::new(4, 1, 1.0, TimingConfig::default()).unwrap();
        let (command_tx, command_rx) = unbounded();
        let (notification_tx, notification_rx) = unbounded();
        let (building_tx, building_rx) = unbounded();

        command_tx.send(Command::Request { floor: 4, direction: Direction::Up }).unwrap();
        command_tx.send(Command::Request { floor: 12, direction: Direction::Down }).unwrap();
        command_tx.send(Command::Reset { floors: 20, lifts: 1 }).unwrap();
        command_tx.send(Command::Reset { floors: 6, lifts: 2 }).unwrap();
        command_tx.send(Command::Quit).unwrap();
        main(config, command_rx, notification_tx, building_tx);

        assert_eq!(notification_rx.try_iter().count(), 0);
        assert_eq!(building_rx.try_iter().collect::<Vec<_>>(), vec![(6, 2)]);
    }
}
