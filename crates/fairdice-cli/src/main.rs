//! Fairdice CLI
//!
//! Interactive console front end for the provably fair dice game. Dice are
//! supplied as positional arguments; the game loop runs on stdin/stdout and
//! diagnostics go to stderr.

use clap::{Arg, Command};
use fairdice_core::{
    parse_dice, Die, DrawOutcome, EntropyError, EntropySource, GameSession, OsEntropy, Winner,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod input;
mod table;

use input::{AnswerInput, NumericInput};

/// Errors that abort a running game.
#[derive(Debug, Error)]
enum RunError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

/// Outcome of a prompt: a validated value, or the user leaving the game.
enum Prompted<T> {
    Value(T),
    Quit,
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let matches = Command::new("fairdice")
        .about("Provably fair dice game: the house commits to every draw before you move.")
        .arg(
            Arg::new("dice")
                .value_name("FACES")
                .num_args(1..)
                .required(true)
                .help("Dice configurations, each a comma-separated list of positive integers, e.g. 2,2,4,4,9,9"),
        )
        .get_matches();
    let args: Vec<String> = matches
        .get_many::<String>("dice")
        .expect("argument is required")
        .cloned()
        .collect();

    let dice = match parse_dice(&args) {
        Ok(dice) => dice,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let mut session = match GameSession::new(dice, OsEntropy) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };
    info!(dice = args.len(), "session started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_game(&mut session, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Drive a full game session over the given console streams. Returns `Ok`
/// on any graceful end: explicit quit, negative continue answer, or EOF.
fn run_game<E, R, W>(
    session: &mut GameSession<E>,
    input: &mut R,
    out: &mut W,
) -> Result<(), RunError>
where
    E: EntropySource,
    R: BufRead,
    W: Write,
{
    let help = table::render(session.dice());

    // Who picks a die first is decided by a committed 2-valued draw the
    // user tries to guess.
    writeln!(out, "Let's decide who picks a die first.")?;
    let draw = session.begin_draw(2)?;
    writeln!(out, "I committed to my number. HMAC-SHA256: {}", draw.digest())?;
    let guess = match prompt_value(
        input,
        out,
        "Guess my number: 0 or 1 (X = exit, ? = help): ",
        &help,
        |v| {
            if v < 2 {
                Ok(v)
            } else {
                Err("enter 0 or 1".to_string())
            }
        },
    )? {
        Prompted::Value(v) => v,
        Prompted::Quit => return Ok(()),
    };
    let flip = session.finish_draw(draw, guess);
    report_reveal(out, &flip)?;
    let user_first = flip.user_value == flip.house_value;
    if user_first {
        writeln!(out, "You guessed correctly, so you pick a die first.")?;
    } else {
        writeln!(out, "You guessed wrong, so I pick a die first.")?;
    }

    // Die selection happens once; the rounds below reuse the same dice.
    let (user_die, house_die) = if user_first {
        let picked = match prompt_die(input, out, session.dice(), None, &help)? {
            Prompted::Value(v) => v,
            Prompted::Quit => return Ok(()),
        };
        let house = session.house_die_choice(Some(picked));
        writeln!(out, "I take die #{house} [{}].", session.dice()[house])?;
        (picked, house)
    } else {
        let house = session.house_die_choice(None);
        writeln!(out, "I take die #{house} [{}].", session.dice()[house])?;
        let picked = match prompt_die(input, out, session.dice(), Some(house), &help)? {
            Prompted::Value(v) => v,
            Prompted::Quit => return Ok(()),
        };
        (picked, house)
    };

    loop {
        let (user_roll, house_roll) = if user_first {
            let user = match roll(session, input, out, user_die, "your", &help)? {
                Prompted::Value(v) => v,
                Prompted::Quit => return Ok(()),
            };
            let house = match roll(session, input, out, house_die, "my", &help)? {
                Prompted::Value(v) => v,
                Prompted::Quit => return Ok(()),
            };
            (user, house)
        } else {
            let house = match roll(session, input, out, house_die, "my", &help)? {
                Prompted::Value(v) => v,
                Prompted::Quit => return Ok(()),
            };
            let user = match roll(session, input, out, user_die, "your", &help)? {
                Prompted::Value(v) => v,
                Prompted::Quit => return Ok(()),
            };
            (user, house)
        };

        let (user_face, user_ok) = user_roll;
        let (house_face, house_ok) = house_roll;
        let result = session.resolve(user_face, house_face, user_ok && house_ok);
        match result.winner {
            Winner::User => writeln!(
                out,
                "Your {} beats my {}. You win the round.",
                result.user_face, result.house_face
            )?,
            Winner::House => writeln!(
                out,
                "My {} beats your {}. I win the round.",
                result.house_face, result.user_face
            )?,
            Winner::Tie => writeln!(out, "Both dice landed on {}. The round is a tie.", result.user_face)?,
        }
        if !result.verified {
            writeln!(
                out,
                "WARNING: a commitment in this round failed verification; the result is unverified."
            )?;
        }
        writeln!(out, "Score: {}.", session.scores())?;

        match prompt_answer(
            input,
            out,
            "Play another round? Y or N (X = exit, ? = help): ",
            &help,
        )? {
            Prompted::Value(true) => continue,
            Prompted::Value(false) | Prompted::Quit => return Ok(()),
        }
    }
}

/// One committed roll of the given die: commit, collect the user's additive
/// number, reveal and verify. Returns the face value and whether the
/// commitment verified.
fn roll<E, R, W>(
    session: &mut GameSession<E>,
    input: &mut R,
    out: &mut W,
    die_index: usize,
    whose: &str,
    help: &str,
) -> Result<Prompted<(u32, bool)>, RunError>
where
    E: EntropySource,
    R: BufRead,
    W: Write,
{
    let sides = session.dice()[die_index].sides();
    writeln!(out, "Time for {whose} roll of die #{die_index} [{}].", session.dice()[die_index])?;
    let draw = session.begin_draw(sides)?;
    writeln!(out, "I committed to my number. HMAC-SHA256: {}", draw.digest())?;
    let text = format!(
        "Add your number modulo {sides}: 0..{} (X = exit, ? = help): ",
        sides - 1
    );
    let user = match prompt_value(input, out, &text, help, |v| {
        if v < sides {
            Ok(v)
        } else {
            Err(format!("enter a number between 0 and {}", sides - 1))
        }
    })? {
        Prompted::Value(v) => v,
        Prompted::Quit => return Ok(Prompted::Quit),
    };
    let outcome = session.finish_draw(draw, user);
    report_reveal(out, &outcome)?;
    let face = session.dice()[die_index].face(outcome.combined);
    writeln!(
        out,
        "({} + {}) % {} = {}, so {whose} roll is {}.",
        outcome.house_value, outcome.user_value, sides, outcome.combined, face
    )?;
    Ok(Prompted::Value((face, outcome.verified)))
}

/// Reveal the secret behind a finished draw and report the verification
/// verdict. A failed verification is a fairness-breach diagnostic, not a
/// crash.
fn report_reveal<W: Write>(out: &mut W, outcome: &DrawOutcome) -> io::Result<()> {
    writeln!(
        out,
        "My number was {} (secret: {}).",
        outcome.house_value, outcome.secret
    )?;
    if outcome.verified {
        writeln!(
            out,
            "Commitment verified: HMAC-SHA256(key, secret) matches {}.",
            outcome.digest
        )?;
    } else {
        warn!(digest = %outcome.digest, "commitment verification failed");
        writeln!(
            out,
            "FAIRNESS BREACH: the revealed secret does not reproduce the published digest!"
        )?;
    }
    Ok(())
}

/// Re-prompt until the user supplies a valid number, asks to quit, or the
/// input stream ends. Help prints the probability table and re-prompts
/// without consuming anything.
fn prompt_value<R, W, F>(
    input: &mut R,
    out: &mut W,
    text: &str,
    help: &str,
    validate: F,
) -> Result<Prompted<u32>, RunError>
where
    R: BufRead,
    W: Write,
    F: Fn(u32) -> Result<u32, String>,
{
    loop {
        write!(out, "{text}")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Prompted::Quit);
        }
        match input::parse_numeric(&line) {
            Ok(NumericInput::Quit) => return Ok(Prompted::Quit),
            Ok(NumericInput::Help) => writeln!(out, "{help}")?,
            Ok(NumericInput::Value(v)) => match validate(v) {
                Ok(v) => return Ok(Prompted::Value(v)),
                Err(msg) => writeln!(out, "{msg}")?,
            },
            Err(msg) => writeln!(out, "{msg}")?,
        }
    }
}

/// Die-selection prompt: lists the available dice and validates the index.
fn prompt_die<R, W>(
    input: &mut R,
    out: &mut W,
    dice: &[Die],
    taken: Option<usize>,
    help: &str,
) -> Result<Prompted<usize>, RunError>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Available dice:")?;
    for (i, die) in dice.iter().enumerate() {
        if Some(i) != taken {
            writeln!(out, "  {i}: [{die}]")?;
        }
    }
    let len = dice.len();
    let picked = prompt_value(
        input,
        out,
        "Pick your die by index (X = exit, ? = help): ",
        help,
        move |v| {
            let i = v as usize;
            if i >= len {
                Err(format!("no die with index {i}; pick one of the listed indexes"))
            } else if Some(i) == taken && len > 1 {
                Err(format!("die #{i} is already taken; pick another"))
            } else {
                Ok(v)
            }
        },
    )?;
    Ok(match picked {
        Prompted::Value(v) => Prompted::Value(v as usize),
        Prompted::Quit => Prompted::Quit,
    })
}

/// Yes/no prompt with the same help and quit handling as numeric prompts.
fn prompt_answer<R, W>(
    input: &mut R,
    out: &mut W,
    text: &str,
    help: &str,
) -> Result<Prompted<bool>, RunError>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "{text}")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Prompted::Quit);
        }
        match input::parse_answer(&line) {
            Ok(AnswerInput::Quit) => return Ok(Prompted::Quit),
            Ok(AnswerInput::Help) => writeln!(out, "{help}")?,
            Ok(AnswerInput::Yes) => return Ok(Prompted::Value(true)),
            Ok(AnswerInput::No) => return Ok(Prompted::Value(false)),
            Err(msg) => writeln!(out, "{msg}")?,
        }
    }
}
