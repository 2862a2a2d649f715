//! Touch script parser
//!
//! One command per line, whitespace separated:
//!
//! ```text
//! down <id> <x> <y>
//! move <id> <x> <y> [<id> <x> <y> ...]
//! up <id> <x> <y>
//! resize <width> <height>
//! quit
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::str::SplitWhitespace;

use thiserror::Error;

use bluedot_core::session::Task;
use bluedot_hal::{PointerId, TouchInput, TouchPoint};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{0}' is missing arguments")]
    MissingArgument(&'static str),

    #[error("'{0}' has too many arguments")]
    TrailingArgument(&'static str),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// Parse one script line into the tasks it produces
///
/// A multi-finger `move` yields one task per finger, in line order.
pub fn parse_line(line: &str) -> Result<Vec<Task>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Vec::new());
    }

    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Vec::new());
    };

    match command {
        "down" => single(&mut words, "down").map(|p| vec![Task::Touch(TouchInput::Down(p))]),
        "up" => single(&mut words, "up").map(|p| vec![Task::Touch(TouchInput::Up(p))]),
        "move" => {
            let mut tasks = vec![Task::Touch(TouchInput::Move(point(&mut words, "move")?))];
            while let Some(p) = next_point(&mut words, "move")? {
                tasks.push(Task::Touch(TouchInput::Move(p)));
            }
            Ok(tasks)
        }
        "resize" => {
            let width = number(words.next(), "resize")?;
            let height = number(words.next(), "resize")?;
            end(&mut words, "resize")?;
            Ok(vec![Task::Resize { width, height }])
        }
        "quit" => {
            end(&mut words, "quit")?;
            Ok(vec![Task::Shutdown])
        }
        other => Err(ScriptError::UnknownCommand(other.to_owned())),
    }
}

fn single(
    words: &mut SplitWhitespace<'_>,
    command: &'static str,
) -> Result<TouchPoint, ScriptError> {
    let p = point(words, command)?;
    end(words, command)?;
    Ok(p)
}

fn point(
    words: &mut SplitWhitespace<'_>,
    command: &'static str,
) -> Result<TouchPoint, ScriptError> {
    next_point(words, command)?.ok_or(ScriptError::MissingArgument(command))
}

/// Next `<id> <x> <y>` triple, or `None` at end of line
fn next_point(
    words: &mut SplitWhitespace<'_>,
    command: &'static str,
) -> Result<Option<TouchPoint>, ScriptError> {
    let Some(id) = words.next() else {
        return Ok(None);
    };
    let id: PointerId = number(Some(id), command)?;
    let x: f32 = number(words.next(), command)?;
    let y: f32 = number(words.next(), command)?;
    Ok(Some(TouchPoint::new(id, x, y)))
}

fn number<N: std::str::FromStr>(
    word: Option<&str>,
    command: &'static str,
) -> Result<N, ScriptError> {
    let word = word.ok_or(ScriptError::MissingArgument(command))?;
    word.parse()
        .map_err(|_| ScriptError::InvalidNumber(word.to_owned()))
}

fn end(words: &mut SplitWhitespace<'_>, command: &'static str) -> Result<(), ScriptError> {
    match words.next() {
        Some(_) => Err(ScriptError::TrailingArgument(command)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(tasks: &[Task]) -> Vec<TouchInput> {
        tasks
            .iter()
            .map(|t| match t {
                Task::Touch(input) => *input,
                other => panic!("not a touch: {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_down_and_up() {
        let tasks = parse_line("down 0 100 200.5").unwrap();
        assert_eq!(
            touch(&tasks),
            vec![TouchInput::Down(TouchPoint::new(0, 100.0, 200.5))]
        );
        let tasks = parse_line("  up 3 1 2  ").unwrap();
        assert_eq!(touch(&tasks), vec![TouchInput::Up(TouchPoint::new(3, 1.0, 2.0))]);
    }

    #[test]
    fn test_batched_move() {
        let tasks = parse_line("move 0 10 10 1 20 20").unwrap();
        assert_eq!(
            touch(&tasks),
            vec![
                TouchInput::Move(TouchPoint::new(0, 10.0, 10.0)),
                TouchInput::Move(TouchPoint::new(1, 20.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_control_commands() {
        assert_eq!(
            parse_line("resize 800 600").unwrap(),
            vec![Task::Resize {
                width: 800,
                height: 600
            }]
        );
        assert_eq!(parse_line("quit").unwrap(), vec![Task::Shutdown]);
        assert!(parse_line("").unwrap().is_empty());
        assert!(parse_line("# comment").unwrap().is_empty());
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_line("tap 0 1 1"),
            Err(ScriptError::UnknownCommand("tap".into()))
        );
        assert_eq!(parse_line("down 0 1"), Err(ScriptError::MissingArgument("down")));
        assert_eq!(parse_line("move"), Err(ScriptError::MissingArgument("move")));
        assert_eq!(parse_line("move 0 1 1 2 3"), Err(ScriptError::MissingArgument("move")));
        assert_eq!(
            parse_line("down -1 0 0"),
            Err(ScriptError::InvalidNumber("-1".into()))
        );
        assert_eq!(
            parse_line("up 0 1 1 9"),
            Err(ScriptError::TrailingArgument("up"))
        );
        assert_eq!(
            parse_line("resize 10 ten"),
            Err(ScriptError::InvalidNumber("ten".into()))
        );
    }
}
