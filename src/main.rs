use bilateral::{generate, parse_cover, parse_input, ParseError, Params};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "bilateral", version, about = "Minimum vertex cover of two-person teams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fewest people whose exclusion breaks up every team
    Solve {
        /// Team list; read from stdin when absent
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Person to prefer when two covers tie
        #[arg(short, long, default_value_t = bilateral::params::FRIEND_ID)]
        friend: u32,
    },
    /// Write a random team list
    Generate {
        #[arg(short, long)]
        teams: usize,
        /// Number of distinct left-pool ids to draw from
        #[arg(long, default_value_t = 1000)]
        left_span: u32,
        /// Number of distinct right-pool ids to draw from
        #[arg(long, default_value_t = 1000)]
        right_span: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check that a cover breaks up every team
    Check {
        #[arg(short, long)]
        teams: PathBuf,
        #[arg(short, long)]
        cover: PathBuf,
    },
}

fn open(path: Option<&Path>) -> Result<Box<dyn BufRead>, ParseError> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    })
}

fn solve(input: Option<&Path>, friend: u32) -> Result<(), ParseError> {
    let params = Params::with_friend(friend);
    let problem = parse_input(open(input)?, &params)?;
    info!(
        "read {} teams, {} left and {} right ids",
        problem.teams.len(),
        problem.left.len(),
        problem.right.len()
    );
    let solution = problem.solve(&params);
    if !solution.is_consistent() {
        warn!("solution reported {} inconsistencies", solution.diagnostics.len());
    }
    print!("{}", solution.cover.format());
    Ok(())
}

fn generate_teams(teams: usize, left_span: u32, right_span: u32, seed: Option<u64>) {
    let params = Params::default();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let left_start = *params.left_ids.start();
    let right_start = *params.right_ids.start();
    let left_span = left_span.min(params.left_ids.end() - left_start + 1);
    let right_span = right_span.min(params.right_ids.end() - right_start + 1);
    let teams = generate::random_teams(
        &mut rng,
        teams.min(params.max_teams),
        left_start..left_start + left_span,
        right_start..right_start + right_span,
    );
    print!("{}", generate::format_teams(&teams));
}

fn check(teams: &Path, cover: &Path) -> Result<bool, ParseError> {
    let problem = parse_input(open(Some(teams))?, &Params::default())?;
    let cover = parse_cover(open(Some(cover))?)?;
    match cover.uncovered(&problem.teams) {
        Some((a, b)) => {
            eprintln!("team ({a}, {b}) not covered");
            Ok(false)
        }
        None => {
            println!("all {} teams covered by {} people", problem.teams.len(), cover.len());
            Ok(true)
        }
    }
}

fn main() {
    let _ = env_logger::try_init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Solve { input, friend } => solve(input.as_deref(), friend),
        Commands::Generate {
            teams,
            left_span,
            right_span,
            seed,
        } => {
            generate_teams(teams, left_span, right_span, seed);
            Ok(())
        }
        Commands::Check { teams, cover } => match check(&teams, &cover) {
            Ok(true) => Ok(()),
            Ok(false) => process::exit(2),
            Err(e) => Err(e),
        },
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
