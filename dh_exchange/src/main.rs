use clap::Parser;
use dh_core::logging::init_logging;
use dh_core::{
    DEFAULT_DH_BITS, DEFAULT_ROUNDS, ExchangeOutcome, SearchConfig, exchange,
    find_domain_parameters,
};
use rand::rngs::OsRng;
use tracing::info;

/// DH-Schlüsselaustausch: Einigt sich auf eine sichere Primzahlgruppe und führt einen Austausch durch
#[derive(Parser, Debug)]
#[command(name = "dh_exchange")]
#[command(about = "Führt Diffie-Hellman Schlüsselaustausch zwischen Alice und Bob durch")]
#[command(version = "1.0")]
struct Args {
    /// Bitlänge von q; der Modulus p = 2q + 1 hat ein Bit mehr
    #[arg(short = 'b', long = "bits", default_value_t = DEFAULT_DH_BITS)]
    bits: u64,

    /// Anzahl der Miller-Rabin Runden für q und p
    #[arg(short = 'r', long = "rounds", default_value_t = DEFAULT_ROUNDS)]
    rounds: usize,

    /// Abbruch nach so vielen verworfenen Kandidaten statt endloser Suche (mindestens 1)
    #[arg(long = "max-attempts", value_parser = clap::value_parser!(u64).range(1..))]
    max_attempts: Option<u64>,

    /// Log-Filter, falls RUST_LOG nicht gesetzt ist
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        let config = SearchConfig::new(self.rounds);
        match self.max_attempts {
            Some(max) => config.with_max_attempts(max),
            None => config,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args.log_level);

    // Schritt 1: Alice und Bob einigen sich auf Modulus p und Generator g
    info!(bits = args.bits, "searching domain parameters");
    let params = find_domain_parameters(args.bits, &args.search_config(), &mut OsRng)?;

    // Schritt 2-5: Private Schlüssel wählen, öffentliche austauschen, Geheimnis berechnen
    match exchange(&params.p, &params.g, &mut OsRng)? {
        ExchangeOutcome::Matched(key) => {
            println!("Keys Match!");
            println!("Key: {}", key);
        }
        ExchangeOutcome::Mismatched { alice, bob } => {
            println!("Keys do not match");
            println!("Alice's Key: {}", alice);
            println!("Bob's Key: {}", bob);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_required() {
        let args = Args::try_parse_from(["dh_exchange"]).unwrap();
        assert_eq!(args.bits, 1024);
        assert_eq!(args.rounds, 40);
        assert_eq!(args.search_config(), SearchConfig::default());
    }

    #[test]
    fn test_bounded_search_config() {
        let args = Args::try_parse_from([
            "dh_exchange",
            "--bits",
            "128",
            "-r",
            "20",
            "--max-attempts",
            "1000",
        ])
        .unwrap();
        assert_eq!(args.bits, 128);
        assert_eq!(args.search_config(), SearchConfig::new(20).with_max_attempts(1000));
    }

    #[test]
    fn test_rejects_zero_attempt_budget() {
        // Ein Budget von 0 könnte nie einen Kandidaten testen
        assert!(Args::try_parse_from(["dh_exchange", "--max-attempts", "0"]).is_err());
        assert!(Args::try_parse_from(["dh_exchange", "--max-attempts", "1"]).is_ok());
    }
}
