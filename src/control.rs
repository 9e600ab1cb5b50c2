use lazy_static::lazy_static;
use model::Side;
use std::collections::HashMap;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Swipe(Side),
    Restart,
    Quit,
}

lazy_static! {
    static ref KEY_BINDINGS: HashMap<&'static str, Command> = {
        let mut m = HashMap::new();
        for (keys, command) in [
            (&["left", "a", "h"][..], Command::Swipe(Side::Left)),
            (&["right", "d", "l"][..], Command::Swipe(Side::Right)),
            (&["up", "w", "k"][..], Command::Swipe(Side::Up)),
            (&["down", "s", "j"][..], Command::Swipe(Side::Down)),
            (&["restart", "r"][..], Command::Restart),
            (&["quit", "q", "exit"][..], Command::Quit),
        ]
        .iter()
        {
            for key in keys.iter() {
                m.insert(*key, *command);
            }
        }
        m
    };
}

pub const HELP: &str = "w/a/s/d, h/j/k/l or up/left/down/right to move, r to restart, q to quit";

/// Maps one line of input to a command. Unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let key = line.trim().to_ascii_lowercase();
    KEY_BINDINGS.get(key.as_str()).copied()
}

#[test]
fn parse_directions() {
    assert_eq!(parse_command("a"), Some(Command::Swipe(Side::Left)));
    assert_eq!(parse_command("D\n"), Some(Command::Swipe(Side::Right)));
    assert_eq!(parse_command("  up "), Some(Command::Swipe(Side::Up)));
    assert_eq!(parse_command("j"), Some(Command::Swipe(Side::Down)));
}

#[test]
fn parse_restart_and_quit() {
    assert_eq!(parse_command("r"), Some(Command::Restart));
    assert_eq!(parse_command("Restart"), Some(Command::Restart));
    assert_eq!(parse_command("q"), Some(Command::Quit));
}

#[test]
fn unknown_input_is_ignored() {
    assert_eq!(parse_command(""), None);
    assert_eq!(parse_command("x"), None);
    assert_eq!(parse_command("left left"), None);
}
