//! Wordle ABC - CLI
//!
//! Interactive solver for five-letter word games, with sampled and exhaustive
//! guess scoring.

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use wordle_abc::{
    commands::{
        SolveConfig, analyze_word, precompute_book, run_benchmark, run_interactive, solve_word,
    },
    core::{CandidatePool, Word},
    output::{
        print_analysis_result, print_benchmark_result, print_precompute_result, print_solve_result,
    },
    session::GameSession,
    solver::{SolverConfig, Variant},
    wordlists::{self, loader},
};

#[derive(Parser)]
#[command(
    name = "wordle_abc",
    about = "Interactive Wordle solver: sampled or exhaustive guess scoring over a candidate pool",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Scoring variant: sampled (default) or exhaustive
    #[arg(long, global = true, default_value = "sampled")]
    variant: String,

    /// Vocabulary for the sampled variant, one word per line
    #[arg(long, global = true, default_value = "vocab.txt")]
    vocab: PathBuf,

    /// Word frequencies for the sampled variant, `word,count` CSV with header
    #[arg(long, global = true, default_value = "word_frequencies.csv")]
    frequencies: PathBuf,

    /// Answer list for the exhaustive variant
    #[arg(long, global = true, default_value = "answers.txt")]
    answers: PathBuf,

    /// Extra answers added to the exhaustive pool
    #[arg(long, global = true)]
    extra_answers: Option<PathBuf>,

    /// Allowed guesses for the exhaustive variant
    #[arg(long, global = true, default_value = "allowed.txt")]
    allowed: PathBuf,

    /// Opening book file (opener plus second-turn replies)
    #[arg(long, global = true)]
    book: Option<PathBuf>,

    /// Sampled answers per guess
    #[arg(long, global = true, default_value_t = 32)]
    samples: usize,

    /// Larger pools are down-sampled to this many draws before a search
    #[arg(long, global = true, default_value_t = 128)]
    clip: usize,

    /// Play the most likely candidate once its probability exceeds this
    #[arg(long, global = true, default_value_t = 0.8)]
    confidence: f64,

    /// Cost multiplier for a simulated split that leaves no candidates
    #[arg(long, global = true, default_value_t = 1.0)]
    penalty: f64,

    /// Fixed random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the first guess
    #[arg(long, global = true)]
    opener: Option<String>,

    /// Hide progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode (default)
    Play,

    /// Solve a specific target word
    Solve {
        /// The target word to solve
        word: String,

        /// Show candidate counts and scores per turn
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score a word as a first guess
    Analyze {
        /// Word to analyze
        word: String,
    },

    /// Solve many targets and report the guess distribution
    Benchmark {
        /// Number of targets, most likely first (default: all)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Guesses allowed per target
        #[arg(short, long, default_value_t = 6)]
        max_guesses: usize,
    },

    /// Build the second-turn opening book for the exhaustive variant
    Precompute {
        /// Where to write the book
        #[arg(short, long, default_value = "opening_book.txt")]
        output: PathBuf,
    },
}

impl Cli {
    fn config(&self, variant: Variant) -> Result<SolverConfig> {
        let mut config = SolverConfig::new(variant);
        config.num_samples = self.samples;
        config.posterior_clip = self.clip;
        config.confidence_threshold = self.confidence;
        config.empty_split_penalty = self.penalty;
        config.seed = self.seed;
        config.book_path.clone_from(&self.book);
        config.show_progress = !self.no_progress;
        config.opener = self
            .opener
            .as_deref()
            .map(Word::new)
            .transpose()
            .context("invalid --opener")?;

        ensure!(config.num_samples > 0, "--samples must be positive");
        ensure!(config.posterior_clip > 0, "--clip must be positive");
        ensure!(
            (0.0..=1.0).contains(&config.confidence_threshold),
            "--confidence must be between 0 and 1"
        );
        ensure!(
            config.empty_split_penalty.is_finite() && config.empty_split_penalty > 0.0,
            "--penalty must be positive"
        );
        Ok(config)
    }

    fn variant(&self) -> Result<Variant> {
        match Variant::from_name(&self.variant) {
            Some(variant) => Ok(variant),
            None => bail!(
                "unknown variant '{}', expected 'sampled' or 'exhaustive'",
                self.variant
            ),
        }
    }
}

/// Load the guess vocabulary and the initial candidate pool
///
/// - sampled: the vocabulary weighted by word frequency
/// - exhaustive: the answer list (plus extras), uniform, guessed from the
///   allowed list
fn load_wordlists(cli: &Cli, variant: Variant) -> Result<(Vec<Word>, CandidatePool)> {
    let (vocabulary, pool) = match variant {
        Variant::Sampled => {
            let vocab = read_words(&cli.vocab)?;
            let frequencies = loader::load_frequencies(&cli.frequencies)
                .with_context(|| format!("loading frequencies {}", cli.frequencies.display()))?;
            let pool = wordlists::frequency_pool(&vocab, &frequencies);
            (vocab, pool)
        }
        Variant::Exhaustive => {
            let answers = read_words(&cli.answers)?;
            let extra = match &cli.extra_answers {
                Some(path) => read_words(path)?,
                None => Vec::new(),
            };
            let pool = wordlists::union_pool(&answers, &extra);
            let allowed = read_words(&cli.allowed)?;
            (wordlists::union_vocabulary(&allowed, &pool), pool)
        }
    };

    ensure!(!pool.is_empty(), "no candidate answers loaded");
    Ok((vocabulary, pool))
}

fn read_words(path: &Path) -> Result<Vec<Word>> {
    loader::load_words(path).with_context(|| format!("loading word list {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.as_ref().unwrap_or(&Commands::Play);

    match command {
        Commands::Play => run_play_command(&cli),
        Commands::Solve { word, verbose } => run_solve_command(&cli, word, *verbose),
        Commands::Analyze { word } => run_analyze_command(&cli, word),
        Commands::Benchmark { count, max_guesses } => {
            run_benchmark_command(&cli, *count, *max_guesses)
        }
        Commands::Precompute { output } => run_precompute_command(&cli, output),
    }
}

fn run_play_command(cli: &Cli) -> Result<()> {
    let variant = cli.variant()?;
    let config = cli.config(variant)?;
    let (vocabulary, pool) = load_wordlists(cli, variant)?;
    let optimizer = config.optimizer().context("building the solver")?;

    println!(
        "Loaded {} guesses, {} candidate answers ({} scoring)",
        vocabulary.len(),
        pool.len(),
        variant.name()
    );

    let mut session = GameSession::new(optimizer, &vocabulary, pool);
    run_interactive(&mut session, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn run_solve_command(cli: &Cli, word: &str, verbose: bool) -> Result<()> {
    let variant = cli.variant()?;
    let mut config = cli.config(variant)?;
    config.show_progress = false;
    let (vocabulary, pool) = load_wordlists(cli, variant)?;
    let target = Word::new(word).context("invalid target word")?;

    let mut session = GameSession::new(config.optimizer()?, &vocabulary, pool);
    let result = solve_word(&SolveConfig::new(target), &mut session)?;

    print_solve_result(&result, verbose);
    Ok(())
}

fn run_analyze_command(cli: &Cli, word: &str) -> Result<()> {
    let variant = cli.variant()?;
    let config = cli.config(variant)?;
    let (vocabulary, pool) = load_wordlists(cli, variant)?;
    let word = Word::new(word).context("invalid word")?;

    let mut optimizer = config.optimizer()?;
    let result = analyze_word(word, &mut optimizer, &vocabulary, &pool)?;

    print_analysis_result(&result);
    Ok(())
}

fn run_benchmark_command(cli: &Cli, count: Option<usize>, max_guesses: usize) -> Result<()> {
    let variant = cli.variant()?;
    let mut config = cli.config(variant)?;
    let show_progress = config.show_progress;
    config.show_progress = false;
    let (vocabulary, pool) = load_wordlists(cli, variant)?;

    let targets: Vec<Word> = pool
        .ranked()
        .into_iter()
        .map(|(word, _)| word)
        .take(count.unwrap_or(usize::MAX))
        .collect();
    println!(
        "Running benchmark on {} targets ({} scoring)...",
        targets.len(),
        variant.name()
    );

    let mut session = GameSession::new(config.optimizer()?, &vocabulary, pool);
    let result = run_benchmark(&mut session, &targets, max_guesses, show_progress)?;

    print_benchmark_result(&result);
    Ok(())
}

fn run_precompute_command(cli: &Cli, output: &Path) -> Result<()> {
    let mut config = cli.config(Variant::Exhaustive)?;
    let show_progress = config.show_progress;
    config.show_progress = false;
    let (vocabulary, pool) = load_wordlists(cli, Variant::Exhaustive)?;
    let mut optimizer = config.optimizer()?;
    let opener = optimizer.book().opener();

    println!(
        "Precomputing second guesses for {} over {} answers...",
        opener.text().to_uppercase(),
        pool.len()
    );

    let result = precompute_book(
        &mut optimizer,
        &vocabulary,
        &pool,
        opener,
        Some(output),
        show_progress,
    )?;

    print_precompute_result(&result);
    println!("\nWritten to {}", output.display());
    Ok(())
}
