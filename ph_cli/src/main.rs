//! Compare two five-card poker hands.
//!
//! Each hand is five space-separated card codes, so each one needs to
//! be quoted on the command line. The outcome is printed from the first
//! hand's point of view.

use anyhow::{Error, bail};
use log::info;
use pico_args::Arguments;
use poker_hands::{CompareSettings, Outcome, compare_with, evaluate};

const HELP: &str = "\
Compare two five-card poker hands

USAGE:
  ph_cli [OPTIONS] HAND1 HAND2

ARGS:
  HAND1, HAND2          Five card codes each, e.g. \"AS AH 2H AD AC\"

FLAGS:
  --strict              Rank full houses with the same three by their pair
  --code                Print the result code (1 win, 2 loss, 3 tie)
  -h, --help            Print help information
";

struct Args {
    code: bool,
    settings: CompareSettings,
    hands: Vec<String>,
}

fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = Args {
        code: pargs.contains("--code"),
        settings: CompareSettings::new(pargs.contains("--strict")),
        hands: pargs
            .finish()
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect(),
    };

    let [ours, theirs] = args.hands.as_slice() else {
        bail!("expected 2 hands, got {}", args.hands.len());
    };

    env_logger::builder().format_target(false).init();
    info!("comparing {ours:?} with {theirs:?}");
    let ours = evaluate(ours)?;
    let theirs = evaluate(theirs)?;
    let outcome: Outcome = compare_with(&ours, &theirs, &args.settings);

    println!("hand 1: {ours}");
    println!("hand 2: {theirs}");
    if args.code {
        println!("{}", u8::from(outcome));
    } else {
        println!("{outcome}");
    }

    Ok(())
}
