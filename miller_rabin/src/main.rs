use clap::Parser;
use dh_core::logging::init_logging;
use dh_core::{DEFAULT_PRIME_BITS, DEFAULT_ROUNDS, SearchConfig, confidence, generate_prime};
use num_bigint::BigUint;
use rand::rngs::OsRng;
use tracing::info;

/// Primzahlgenerierung: Erzeugt eine zufällige Primzahl mit dem Miller-Rabin Test
#[derive(Parser, Debug)]
#[command(name = "miller_rabin")]
#[command(about = "Generiert eine zufällige Primzahl mit dem Miller-Rabin Primzahltest")]
#[command(version = "1.0")]
struct Args {
    /// Bitlänge der zu erzeugenden Primzahl
    #[arg(short = 'l', long = "length", default_value_t = DEFAULT_PRIME_BITS)]
    length: u64,

    /// Anzahl der Basen, die pro Kandidat getestet werden
    #[arg(short = 'k', long = "num-tries", default_value_t = DEFAULT_ROUNDS)]
    num_tries: usize,

    /// Log-Filter, falls RUST_LOG nicht gesetzt ist
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
}

/// Baut die Ausgabe: Primzahl und Konfidenz 100 * (1 - 0.25^k) in Prozent
/// Debug-Format, damit 100.0 nicht zu 100 verkürzt wird
fn format_report(prime: &BigUint, rounds: usize) -> String {
    format!("Prime: {}\nwith confidence: {:?}%", prime, confidence(rounds))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args.log_level);

    // Generiere Primzahl mit gewünschter Bitlänge und Rundenzahl
    info!(bits = args.length, rounds = args.num_tries, "generating prime");
    let prime = generate_prime(args.length, &SearchConfig::new(args.num_tries), &mut OsRng)?;

    // Ausgabe: Primzahl und Konfidenz
    println!("{}", format_report(&prime, args.num_tries));

    Ok(())
}
