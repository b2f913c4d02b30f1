//! Hamming code simulator
//!
//! Encodes a bit string, injects 1, 2 or 3 bit errors, and shows what the
//! decoder makes of the received word:
//! - `encode` prints the codeword and its layout
//! - `syndrome` checks a received word typed by the user
//! - `simulate` / `preset` run the whole encode → corrupt → correct cycle
//! - `flip` corrupts one chosen position

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use hamming_sim::ecc::hamming::{is_parity_position, parity_checks_covering};
use hamming_sim::ecc::{position_from_syndrome, syndrome, Codeword, ErrorMode};
use hamming_sim::{Preset, Result, Simulator, SimulatorConfig};
use std::process::ExitCode;

fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .short('m')
        .help("Number of errors to inject: single, double or triple")
        .default_value("single")
        .value_parser(|mode: &str| mode.parse::<ErrorMode>().map_err(|e| e.to_string()))
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .help("Seed for error positions, for reproducible runs")
        .value_parser(value_parser!(u64))
}

fn bits_arg() -> Arg {
    Arg::new("bits")
        .help("Source bits, e.g. 1011")
        .required(true)
}

fn cli() -> Command {
    Command::new("hamming-sim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hamming code encoder, error injector and decoder")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("max-bits")
                .long("max-bits")
                .help("Longest accepted source bit string")
                .value_parser(value_parser!(usize))
                .global(true),
        )
        .subcommand(
            Command::new("encode")
                .about("Encode source bits and show the codeword layout")
                .arg(bits_arg()),
        )
        .subcommand(
            Command::new("syndrome")
                .about("Compute the syndrome of a received word")
                .arg(Arg::new("word").help("Received word").required(true)),
        )
        .subcommand(
            Command::new("simulate")
                .about("Encode, inject random errors, then correct")
                .arg(bits_arg())
                .arg(mode_arg())
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("flip")
                .about("Encode, flip one chosen position, then correct")
                .arg(bits_arg())
                .arg(
                    Arg::new("position")
                        .help("1-indexed position to flip")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("preset")
                .about("Run `simulate` on a sample input: basic, intermediate or advanced")
                .arg(
                    Arg::new("name")
                        .required(true)
                        .value_parser(|name: &str| name.parse::<Preset>().map_err(|e| e.to_string())),
                )
                .arg(mode_arg())
                .arg(seed_arg()),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Prints the word with each position labelled as parity (P1, P2, ...) or data.
fn print_layout(label: &str, word: &Codeword) {
    println!("{:<12} {}", label, word);
    for (position, bit) in word.positions() {
        let role = if is_parity_position(position) {
            format!("P{}", position.trailing_zeros() + 1)
        } else {
            let checks: Vec<String> = parity_checks_covering(position)
                .into_iter()
                .map(|p| format!("P{}", p))
                .collect();
            format!("data, checked by {}", checks.join(" "))
        };
        println!("  {:>3}: {}  {}", position, u8::from(bit), role);
    }
}

fn print_run(sim: &mut Simulator) -> Result<()> {
    if let Some(encoded) = sim.encoded() {
        println!("{:<12} {}", "encoded", encoded);
    }
    if let Some(transmitted) = sim.transmitted() {
        println!("{:<12} {}", "received", transmitted);
    }
    let info = sim.error_info();
    println!("{:<12} {} {:?}", "injected", info.description(), info.positions);

    let syndrome = sim.detect()?;
    println!(
        "{:<12} {} (points at position {})",
        "syndrome",
        syndrome,
        syndrome.position()
    );

    let outcome = sim.correct()?;
    if let Some(corrected) = sim.corrected() {
        println!("{:<12} {}", "corrected", corrected);
    }
    println!("{}", outcome);
    Ok(())
}

/// Builds the session from a subcommand's flags; global flags propagate into
/// every subcommand, `--mode` and `--seed` only exist on some.
fn simulator_for(matches: &ArgMatches) -> Simulator {
    let mut config = SimulatorConfig::default();
    if let Ok(Some(&max)) = matches.try_get_one::<usize>("max-bits") {
        config = config.with_max_data_bits(max);
    }
    if let Ok(Some(&mode)) = matches.try_get_one::<ErrorMode>("mode") {
        config = config.with_mode(mode);
    }
    if let Ok(Some(&seed)) = matches.try_get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    Simulator::new(config)
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("encode", sub)) => {
            let bits = sub.get_one::<String>("bits").map(String::as_str).unwrap_or_default();
            let mut sim = simulator_for(sub);
            let info = sim.encode(bits)?;
            if let Some(encoded) = sim.encoded() {
                print_layout("codeword", encoded);
            }
            println!("{}", info);
        }
        Some(("syndrome", sub)) => {
            let word: Codeword = sub
                .get_one::<String>("word")
                .map(String::as_str)
                .unwrap_or_default()
                .parse()?;
            let syndrome = syndrome(&word);
            let position = position_from_syndrome(&syndrome);
            println!("{:<12} {}", "syndrome", syndrome);
            if position == 0 {
                println!("no error detected");
            } else if position > word.len() {
                println!(
                    "syndrome points at position {}, past the end of a {} bit word",
                    position,
                    word.len()
                );
            } else {
                println!("single error at position {} (if only one bit flipped)", position);
            }
        }
        Some(("simulate", sub)) => {
            let bits = sub.get_one::<String>("bits").map(String::as_str).unwrap_or_default();
            let mut sim = simulator_for(sub);
            sim.encode(bits)?;
            sim.simulate()?;
            print_run(&mut sim)?;
        }
        Some(("flip", sub)) => {
            let bits = sub.get_one::<String>("bits").map(String::as_str).unwrap_or_default();
            let position = sub.get_one::<usize>("position").copied().unwrap_or_default();
            let mut sim = simulator_for(sub);
            sim.encode(bits)?;
            sim.toggle_bit(position)?;
            print_run(&mut sim)?;
        }
        Some(("preset", sub)) => {
            let preset = sub.get_one::<Preset>("name").copied().unwrap_or(Preset::Basic);
            let mut sim = simulator_for(sub);
            println!("{:<12} {} ({})", "preset", preset, preset.bits());
            sim.encode(preset.bits())?;
            sim.simulate()?;
            print_run(&mut sim)?;
        }
        _ => unreachable!("subcommand_required is set"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    let verbosity = matches
        .subcommand()
        .map_or(0, |(_, sub)| sub.get_count("verbose"));
    init_logging(verbosity);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
