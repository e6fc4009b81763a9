use std::str::FromStr;

use shared_resources::direction::Direction;
use shared_resources::error::RequestError;

/// One line of input from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Request { floor: u8, direction: Direction },
    Reset { floors: u8, lifts: u8 },
    Status,
    Quit,
}

fn parse_number(word: &str, line: &str) -> Result<u8, RequestError> {
    word.parse::<u8>().map_err(|_| RequestError::Malformed(line.to_string()))
}

impl FromStr for Command {
    type Err = RequestError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["quit"] | ["exit"] | ["q"] => Ok(Command::Quit),
            ["status"] | ["s"] => Ok(Command::Status),
            ["reset", floors, lifts] => Ok(Command::Reset {
                floors: parse_number(floors, line)?,
                lifts: parse_number(lifts, line)?,
            }),
            [floor, direction] => Ok(Command::Request {
                floor: parse_number(floor, line)?,
                direction: direction.parse()?,
            }),
            _ => Err(RequestError::Malformed(line.to_string())),
        }
    }
}
