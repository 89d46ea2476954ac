//! CUI player mode for running scene scripts
//!
//! Dialogue and choices are shown in the terminal. Minigames are not
//! implemented here: when the script mounts one, the player is asked to type
//! the result it would have reported.

use crate::{
    director::Director,
    runtime::debug::DebugConfig,
    session::{Presentation, SceneSession},
    types::{ResultCategory, Script, State},
};
use std::io::{self, BufRead, Write};

/// What the player typed at a prompt
enum Input {
    Quit,
    Back,
    Text(String),
}

/// Run the player mode
pub fn run_play(script: Script, debug: bool) -> anyhow::Result<()> {
    let debug_config = if debug {
        DebugConfig::verbose()
    } else {
        DebugConfig::default()
    };
    let mut session = SceneSession::from_director(Director::new(script).with_debug(debug_config));

    println!("=== scene-director player ===");
    println!();
    println!("Controls:");
    println!("  Enter: next");
    println!("  1-9:   select choice");
    println!("  b:     back");
    println!("  q:     quit");
    println!();

    play_loop(&mut session, &mut io::stdin().lock(), debug)
}

/// Drive the session from `input` until the end, `q`, or end of input
fn play_loop(
    session: &mut SceneSession,
    input: &mut impl BufRead,
    debug: bool,
) -> anyhow::Result<()> {
    // Jumps and game markers are followed without asking the player; a
    // cycle of them would never reach a prompt.
    let jump_limit = session.director().script().len() + 1;
    let mut unattended = 0usize;

    let mut presentation = session.present()?;

    loop {
        if debug {
            display_debug_info(session.state());
        }

        if matches!(
            presentation,
            Presentation::Jump { .. } | Presentation::MountGame { .. }
        ) {
            unattended += 1;
            if unattended > jump_limit {
                anyhow::bail!(
                    "goto steps keep jumping without reaching a line to show (step {})",
                    session.state().position
                );
            }
        } else {
            unattended = 0;
        }

        let line = match &presentation {
            Presentation::Ended => {
                println!();
                println!("== THE END ==");
                return Ok(());
            }
            Presentation::Jump { .. } => {
                presentation = session.proceed()?;
                continue;
            }
            Presentation::Dialogue { speaker, text } => {
                println!("{}:", speaker);
                println!("{}", text);
                println!();
                read_input(input, "")?
            }
            Presentation::Choice { prompt, options } => {
                println!("--- {} ---", prompt);
                for (i, option) in options.iter().enumerate() {
                    println!("{}. {}", i + 1, option.label);
                }
                println!();
                read_input(input, "Select (1-9):")?
            }
            Presentation::MountGame { game } => {
                println!("[Minigame: {}]", game);
                presentation = session.proceed()?;
                continue;
            }
            Presentation::AwaitingResult { .. } => {
                read_input(input, "Result (win/lose/draw/completed):")?
            }
        };

        let next = match line {
            Input::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            Input::Back => match session.undo() {
                Some(restored) => {
                    println!("(back)");
                    println!();
                    restored
                }
                None => {
                    println!("[Cannot undo]");
                    continue;
                }
            },
            Input::Text(text) => match respond(session, &presentation, &text) {
                Some(result) => result,
                None => continue,
            },
        };

        match next {
            Ok(next) => presentation = next,
            Err(err) => println!("{}", err),
        }
    }
}

/// Turn typed text into a session operation; `None` means ask again
fn respond(
    session: &mut SceneSession,
    presentation: &Presentation,
    text: &str,
) -> Option<Result<Presentation, crate::session::SessionError>> {
    match presentation {
        Presentation::Dialogue { .. } => {
            if text.is_empty() {
                Some(session.proceed())
            } else {
                println!("Press Enter to continue, 'b' to go back, or 'q' to quit.");
                None
            }
        }
        Presentation::Choice { .. } => match text.parse::<usize>() {
            Ok(choice) if (1..=9).contains(&choice) => Some(session.choose(choice - 1)),
            _ => {
                println!("Invalid input. Enter a number, 'b', or 'q'.");
                None
            }
        },
        Presentation::AwaitingResult { .. } => match text.parse::<ResultCategory>() {
            Ok(result) => Some(session.report_result(result)),
            Err(err) => {
                println!("{}", err);
                None
            }
        },
        _ => None,
    }
}

/// Display debug information (only when --debug is set)
fn display_debug_info(state: &State) {
    println!("[debug]");
    println!("position={}", state.position);
    let vars = serde_json::to_string(&state.variables).unwrap_or_else(|_| "{}".to_string());
    println!("vars={}", vars);
    println!();
}

/// Read one line with an optional prompt
fn read_input(input: &mut impl BufRead, prompt: &str) -> io::Result<Input> {
    if !prompt.is_empty() {
        print!("{} ", prompt);
        io::stdout().flush()?;
    }

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        // stdin closed
        return Ok(Input::Quit);
    }

    Ok(match line.trim() {
        "q" => Input::Quit,
        "b" => Input::Back,
        other => Input::Text(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionError;
    use crate::types::script::{ChoiceOption, GameId, Speaker, Step, Variable};
    use std::io::Cursor;

    fn round_script() -> Script {
        Script::new(vec![
            Step::say(Speaker::Ivan, "Pick a game."),
            Step::Choice {
                prompt: "Choose:".to_string(),
                options: vec![ChoiceOption::new("Dice", 2), ChoiceOption::new("Leave", 4)],
            },
            Step::StartGame { game: GameId::Dice },
            Step::AwaitGameResult {
                to_var: Variable::LastResult,
            },
            Step::End,
        ])
    }

    #[test]
    fn goto_cycle_stops_with_error() {
        let script = Script::new(vec![Step::Goto { next: 1 }, Step::Goto { next: 0 }]);
        let mut session = SceneSession::new(script);

        let err = play_loop(&mut session, &mut Cursor::new(""), false).unwrap_err();
        assert!(err.to_string().contains("keep jumping"), "error was: {}", err);
    }

    #[test]
    fn long_goto_chain_still_reaches_prompt() {
        let script = Script::new(vec![
            Step::Goto { next: 1 },
            Step::Goto { next: 2 },
            Step::Goto { next: 3 },
            Step::say(Speaker::Narrator, "Landed."),
        ]);
        let mut session = SceneSession::new(script);

        play_loop(&mut session, &mut Cursor::new("q\n"), false).unwrap();
        assert_eq!(session.state().position, 3);
    }

    #[test]
    fn scripted_input_plays_to_the_end() {
        let mut session = SceneSession::new(round_script());

        play_loop(&mut session, &mut Cursor::new("\n1\nwin\n"), false).unwrap();
        assert!(session.is_ended());
        assert_eq!(
            session.state().last_result(),
            Some(crate::types::ResultCategory::Win)
        );
    }

    #[test]
    fn end_of_input_quits() {
        let mut session = SceneSession::new(round_script());

        play_loop(&mut session, &mut Cursor::new(""), false).unwrap();
        assert_eq!(session.state().position, 0);
    }

    #[test]
    fn dialogue_needs_plain_enter() {
        let mut session = SceneSession::new(round_script());
        let presentation = session.present().unwrap();

        assert!(respond(&mut session, &presentation, "next").is_none());
        assert_eq!(session.state().position, 0);

        let moved = respond(&mut session, &presentation, "").unwrap().unwrap();
        assert!(matches!(moved, Presentation::Choice { .. }));
    }

    #[test]
    fn choice_accepts_one_to_nine() {
        let mut session = SceneSession::new(round_script());
        session.proceed().unwrap();
        let presentation = session.present().unwrap();

        assert!(respond(&mut session, &presentation, "0").is_none());
        assert!(respond(&mut session, &presentation, "10").is_none());
        assert!(respond(&mut session, &presentation, "two").is_none());

        // In range for the prompt, out of range for this choice.
        assert_eq!(
            respond(&mut session, &presentation, "3"),
            Some(Err(SessionError::ChoiceOutOfRange {
                position: 1,
                index: 2,
                available: 2,
            }))
        );

        let picked = respond(&mut session, &presentation, "2").unwrap().unwrap();
        assert_eq!(picked, Presentation::Ended);
    }

    #[test]
    fn awaiting_result_parses_category() {
        let mut session = SceneSession::new(round_script());
        session.proceed().unwrap();
        session.choose(0).unwrap();
        let presentation = session.proceed().unwrap();

        assert!(respond(&mut session, &presentation, "forfeit").is_none());
        assert_eq!(session.state().last_result(), None);

        let done = respond(&mut session, &presentation, "Lose").unwrap().unwrap();
        assert_eq!(done, Presentation::Ended);
        assert_eq!(
            session.state().last_result(),
            Some(crate::types::ResultCategory::Lose)
        );
    }
}
