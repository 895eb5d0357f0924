use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::error;
use mimalloc::MiMalloc;

use course_planner::{index::DEFAULT_CAPACITY, logger, shell, shell::Session};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Look up ABCU course records", long_about = None)]
struct Args {
    /// Comma-delimited course file: id,title,prerequisites
    #[arg(
        short,
        long,
        env = "COURSE_FILE",
        default_value = "CS 300 ABCU_Advising_Program_Input"
    )]
    file: PathBuf,

    /// Number of hash table slots, fixed for the life of the program
    #[arg(
        short,
        long,
        env = "COURSE_CAPACITY",
        default_value_t = DEFAULT_CAPACITY,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    capacity: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    logger::initialize_logger(logger::level_for(args.verbose));

    let mut session = Session::new(args.file, args.capacity);
    if let Err(err) = session.load() {
        error!("startup load of {} failed: {}", session.source().display(), err);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell::run(&mut session, stdin.lock(), &mut stdout)
}
