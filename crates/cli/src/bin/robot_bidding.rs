use bidding_cli::bidding_utils::*;
use bidding_engine::table::MAX_CALLS;
use bidding_engine::{
    load_system, BiddingTable, EngineError, Mode, RandomChoice, Step, TableConfig,
};
use bridge_types::RandomDealer;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Deals random boards and bids them out with a bidding system.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bidding system file (.yaml, .yml or .json)
    #[arg(long, env = "ROBOT_BIDDING_SYSTEM")]
    system: PathBuf,

    /// Table configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of boards to bid
    #[arg(short = 'n', long, default_value_t = 1)]
    boards: u32,

    /// Seed for dealing and choosing between candidate bids
    #[arg(short, long)]
    seed: Option<u64>,

    /// Show what each bid means
    #[arg(long)]
    meanings: bool,

    /// Show the bids each seat could have made
    #[arg(long)]
    possible: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── setup ──

fn table_config(args: &Args) -> Result<TableConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => TableConfig::load(path)?,
        None => TableConfig::automatic(),
    };
    if config.mode == Mode::Practice {
        tracing::warn!("practice mode needs a person at the table, bidding automatically");
        config.mode = Mode::Automatic;
    }
    config.display_meaning_of_bids |= args.meanings;
    config.display_meaning_of_possible_bids |= args.possible;
    Ok(config)
}

// ── bidding ──

fn bid_board(
    table: &mut BiddingTable<RandomDealer<StdRng>>,
    strategy: &mut RandomChoice<StdRng>,
) -> Result<(), EngineError> {
    let state = table.state();
    println!("Board: {}", state.board_number());
    println!("Dealer: {:?}", state.dealer());
    println!("Vulnerability: {:?}", state.vulnerability());
    println!("\nHands:");
    print!("{}", format_hands_table(&state.deal().hands));
    println!();
    print!("{}", format_table_header());

    let show_meaning = table.config().display_meaning_of_bids;
    let show_possible = table.config().display_meaning_of_possible_bids;
    loop {
        if table.state().sequence().len() >= MAX_CALLS {
            return Err(EngineError::RunawayAuction(MAX_CALLS));
        }
        let seat = table.state().seat_to_call();
        let possible = (show_possible && !table.config().is_silent(seat))
            .then(|| format_possible_bids(&table.candidates(seat), show_meaning));

        match table.step(strategy) {
            Step::PassedOut => break,
            Step::AwaitingHuman { seat, .. } => return Err(EngineError::HumanToCall(seat)),
            Step::Called { .. } => {
                let sequence = table.state().sequence();
                if let Some(recorded) = sequence.last() {
                    println!(
                        "{}",
                        format_call(sequence.len(), recorded, table.tree(), show_meaning)
                    );
                }
                if let Some(line) = possible {
                    println!("{}", line);
                }
            }
        }
    }

    println!("\nContract: {}\n", table.final_contract()?);
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let tree = load_system(&args.system)?;
    let config = table_config(args)?;
    let (deal_rng, mut strategy) = match args.seed {
        Some(seed) => (StdRng::seed_from_u64(seed), RandomChoice::seeded(seed)),
        None => (StdRng::from_entropy(), RandomChoice::from_entropy()),
    };

    let mut table = BiddingTable::new(tree, config, RandomDealer::new(deal_rng));
    for board in 0..args.boards {
        if board > 0 {
            table.start_new_board();
        }
        bid_board(&mut table, &mut strategy)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
