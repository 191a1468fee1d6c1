//! Guess optimizer
//!
//! Applies the shortcut rules, then scores the whole vocabulary in parallel
//! with the configured strategy and picks the winner.

use super::book::OpeningBook;
use super::error::SolverError;
use super::score::ScoreMap;
use super::scoring::ScoringStrategy;
use crate::core::{CandidatePool, Pattern, Word};
use crate::output::formatters::progress_bar;
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};

/// Where the start of a turn stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    /// 1-based turn number
    pub turn: usize,
    /// Guess and feedback of the previous turn, if any
    pub previous: Option<(Word, Pattern)>,
}

impl TurnContext {
    /// Context of the first turn of a game
    #[must_use]
    pub const fn opening() -> Self {
        Self {
            turn: 1,
            previous: None,
        }
    }

    #[must_use]
    pub const fn new(turn: usize, previous: Option<(Word, Pattern)>) -> Self {
        Self { turn, previous }
    }
}

/// How a proposal was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalSource {
    /// Book opener on turn 1
    OpeningBook,
    /// Book reply to the opener's feedback on turn 2
    SecondTurnBook,
    /// The strategy judged the answer obvious
    EarlyExit,
    /// Full parallel search over the vocabulary
    Search,
}

/// A chosen guess and, when a search ran, the scores behind it
#[derive(Debug, Clone)]
pub struct Proposal {
    pub guess: Word,
    pub scores: Option<ScoreMap>,
    pub source: ProposalSource,
}

impl Proposal {
    const fn shortcut(guess: Word, source: ProposalSource) -> Self {
        Self {
            guess,
            scores: None,
            source,
        }
    }
}

/// Chooses the most informative guess for a candidate pool
///
/// Scoring tasks run on the rayon pool, one per vocabulary word, sharing the
/// pool read-only. Each task owns an rng seeded from the optimizer's base
/// seed, the search round and the word's index, so a fixed base seed makes
/// every proposal reproducible.
pub struct GuessOptimizer<S: ScoringStrategy> {
    strategy: S,
    book: OpeningBook,
    seed: u64,
    round: u64,
    show_progress: bool,
}

impl<S: ScoringStrategy> GuessOptimizer<S> {
    /// Optimizer with the strategy's default opening book and a random seed
    pub fn new(strategy: S) -> Self {
        let book = strategy.default_book();
        Self {
            strategy,
            book,
            seed: rand::random(),
            round: 0,
            show_progress: false,
        }
    }

    /// Replace the opening book
    #[must_use]
    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }

    /// Fix the base seed for reproducible sampling
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Show a progress bar while scoring
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    pub const fn book(&self) -> &OpeningBook {
        &self.book
    }

    /// Propose the next guess
    ///
    /// Rules, in order: opening book on turn 1, book reply on turn 2 after
    /// the opener, the strategy's own shortcut, then a full search. A
    /// shortcut word missing from `vocabulary` is never played; the search
    /// runs instead.
    ///
    /// # Errors
    /// Returns `SolverError` if the pool or vocabulary is empty, or if the
    /// search is aborted.
    pub fn propose(
        &mut self,
        vocabulary: &[Word],
        pool: &CandidatePool,
        ctx: &TurnContext,
    ) -> Result<Proposal, SolverError> {
        if pool.is_empty() {
            return Err(SolverError::EmptyPool);
        }
        if vocabulary.is_empty() {
            return Err(SolverError::EmptyVocabulary);
        }

        let opener = self.book.opener();
        if ctx.turn <= 1 && vocabulary.contains(&opener) {
            return Ok(Proposal::shortcut(opener, ProposalSource::OpeningBook));
        }

        if ctx.turn == 2
            && self.strategy.uses_second_turn_book()
            && let Some((previous, pattern)) = ctx.previous
            && previous == opener
            && let Some(reply) = self.book.reply(pattern)
            && vocabulary.contains(&reply)
        {
            return Ok(Proposal::shortcut(reply, ProposalSource::SecondTurnBook));
        }

        if let Some(guess) = self.strategy.shortcut(pool)
            && vocabulary.contains(&guess)
        {
            return Ok(Proposal::shortcut(guess, ProposalSource::EarlyExit));
        }

        self.search(vocabulary, pool)
    }

    /// Full search, skipping every shortcut
    ///
    /// Lets the strategy prepare (e.g. down-sample) the pool, scores every
    /// vocabulary word and returns the winner with the full score map.
    ///
    /// # Errors
    /// Returns `SolverError` if the pool or vocabulary is empty, or if any
    /// scoring task fails.
    pub fn search(
        &mut self,
        vocabulary: &[Word],
        pool: &CandidatePool,
    ) -> Result<Proposal, SolverError> {
        if pool.is_empty() {
            return Err(SolverError::EmptyPool);
        }

        let mut rng = StdRng::seed_from_u64(self.next_round_seed());
        let prepared = self.strategy.prepare_pool(pool, &mut rng)?;
        let scores = self.score_all(vocabulary, &prepared)?;
        let guess = scores.best().ok_or(SolverError::EmptyVocabulary)?;

        Ok(Proposal {
            guess,
            scores: Some(scores),
            source: ProposalSource::Search,
        })
    }

    /// Score every vocabulary word against `pool` in parallel
    ///
    /// Results are collected only once every task has finished. A task error
    /// or a worker panic aborts the whole pass, so the map is never missing a
    /// word.
    ///
    /// # Errors
    /// Returns `SolverError::ScoringFailed` or `SolverError::WorkerPanicked`
    /// when a task fails, and `EmptyPool`/`EmptyVocabulary` for empty inputs.
    pub fn score_all(
        &mut self,
        vocabulary: &[Word],
        pool: &CandidatePool,
    ) -> Result<ScoreMap, SolverError> {
        if vocabulary.is_empty() {
            return Err(SolverError::EmptyVocabulary);
        }
        if pool.is_empty() {
            return Err(SolverError::EmptyPool);
        }

        let round_seed = self.next_round_seed();
        let progress = self.scoring_bar(vocabulary.len());
        let strategy = &self.strategy;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            vocabulary
                .par_iter()
                .enumerate()
                .map(|(index, guess)| {
                    let mut rng = StdRng::seed_from_u64(round_seed.wrapping_add(index as u64));
                    let record = strategy.score(guess, pool, &mut rng).map_err(|e| {
                        SolverError::ScoringFailed {
                            guess: *guess,
                            reason: e.to_string(),
                        }
                    });
                    progress.inc(1);
                    record.map(|record| (*guess, record))
                })
                .collect::<Result<Vec<_>, SolverError>>()
        }));
        progress.finish_and_clear();

        let entries = outcome.map_err(|_| SolverError::WorkerPanicked)??;
        Ok(ScoreMap::from_entries(entries))
    }

    /// Seed for the next search round
    fn next_round_seed(&mut self) -> u64 {
        self.round += 1;
        self.seed ^ self.round.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    fn scoring_bar(&self, len: usize) -> ProgressBar {
        let pb = progress_bar(len, self.show_progress);
        pb.set_message(format!("scoring ({})", self.strategy.name()));
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::filter::refine;
    use crate::solver::{ExhaustiveScorer, SampledScorer, ScoreRecord};
    use std::borrow::Cow;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| word(w)).collect()
    }

    const SMALL: [&str; 4] = ["crane", "plant", "slant", "grant"];

    fn exhaustive() -> GuessOptimizer<ExhaustiveScorer> {
        GuessOptimizer::new(ExhaustiveScorer::default()).with_seed(11)
    }

    #[test]
    fn search_picks_best_split_with_lexical_tiebreak() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::uniform(vocabulary.clone());
        let ctx = TurnContext::new(3, None);

        let proposal = exhaustive().propose(&vocabulary, &pool, &ctx).unwrap();

        // PLANT and SLANT tie on both metrics
        assert_eq!(proposal.guess, word("plant"));
        assert_eq!(proposal.source, ProposalSource::Search);
        let scores = proposal.scores.unwrap();
        assert_eq!(scores.len(), 4);
        assert_eq!(scores.get(&word("slant")), Some(ScoreRecord::new(-4.0, 14.0)));
    }

    #[test]
    fn informative_guess_shrinks_the_pool() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::uniform(vocabulary.clone());
        let guess = exhaustive()
            .propose(&vocabulary, &pool, &TurnContext::new(2, None))
            .unwrap()
            .guess;

        for answer in pool.words() {
            let refined = refine(&guess, Pattern::calculate(&guess, answer), &pool);
            assert!(refined.contains(answer));
            assert!(refined.len() < pool.len());
        }
    }

    #[test]
    fn tie_break_is_stable_across_runs() {
        // Neither guess shares a letter with the pool: identical scores
        let vocabulary = words(&["bbbbb", "aaaaa"]);
        let pool = CandidatePool::uniform(words(&["vivid", "funny", "dizzy"]));

        for _ in 0..10 {
            let proposal = exhaustive()
                .propose(&vocabulary, &pool, &TurnContext::new(2, None))
                .unwrap();
            assert_eq!(proposal.guess, word("aaaaa"));
        }
    }

    #[test]
    fn opening_book_on_first_turn() {
        let vocabulary = words(&["salet", "crane", "plant"]);
        let pool = CandidatePool::uniform(words(&SMALL));

        let proposal = exhaustive()
            .propose(&vocabulary, &pool, &TurnContext::opening())
            .unwrap();
        assert_eq!(proposal.guess, word("salet"));
        assert_eq!(proposal.source, ProposalSource::OpeningBook);
        assert!(proposal.scores.is_none());
    }

    #[test]
    fn missing_opener_falls_back_to_search() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::uniform(vocabulary.clone());

        let proposal = exhaustive()
            .propose(&vocabulary, &pool, &TurnContext::opening())
            .unwrap();
        assert_eq!(proposal.source, ProposalSource::Search);
        assert!(proposal.scores.is_some());
    }

    #[test]
    fn second_turn_book_after_opener() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::uniform(words(&["plant", "slant"]));
        let pattern = Pattern::parse("xxggg").unwrap();
        let book = OpeningBook::new(word("grant")).with_reply(pattern, word("slant"));
        let mut optimizer = exhaustive().with_book(book);

        let after_opener = TurnContext::new(2, Some((word("grant"), pattern)));
        let proposal = optimizer.propose(&vocabulary, &pool, &after_opener).unwrap();
        assert_eq!(proposal.guess, word("slant"));
        assert_eq!(proposal.source, ProposalSource::SecondTurnBook);

        // A different first guess means the table does not apply
        let after_other = TurnContext::new(2, Some((word("crane"), pattern)));
        let proposal = optimizer.propose(&vocabulary, &pool, &after_other).unwrap();
        assert_eq!(proposal.source, ProposalSource::Search);
    }

    #[test]
    fn sampled_early_exit() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::weighted([(word("plant"), 0.9), (word("slant"), 0.1)]);
        let mut optimizer = GuessOptimizer::new(SampledScorer::default()).with_seed(5);

        let proposal = optimizer
            .propose(&vocabulary, &pool, &TurnContext::new(4, None))
            .unwrap();
        assert_eq!(proposal.guess, word("plant"));
        assert_eq!(proposal.source, ProposalSource::EarlyExit);
        assert!(proposal.scores.is_none());
    }

    #[test]
    fn early_exit_needs_a_playable_word() {
        let vocabulary = words(&["crane", "slant", "grant"]);
        let pool = CandidatePool::weighted([(word("plant"), 0.9), (word("slant"), 0.1)]);
        let mut optimizer = GuessOptimizer::new(SampledScorer::default()).with_seed(5);

        let proposal = optimizer
            .propose(&vocabulary, &pool, &TurnContext::new(4, None))
            .unwrap();
        assert_ne!(proposal.guess, word("plant"));
        assert_eq!(proposal.source, ProposalSource::Search);
    }

    #[test]
    fn sampled_ignores_second_turn_replies() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::uniform(words(&["crane", "plant", "slant"]));
        let pattern = Pattern::parse("xxggx").unwrap();
        let book = OpeningBook::new(word("grant")).with_reply(pattern, word("slant"));
        let mut optimizer = GuessOptimizer::new(SampledScorer::default())
            .with_seed(5)
            .with_book(book);

        let after_opener = TurnContext::new(2, Some((word("grant"), pattern)));
        let proposal = optimizer.propose(&vocabulary, &pool, &after_opener).unwrap();
        assert_eq!(proposal.source, ProposalSource::Search);
    }

    #[test]
    fn sampled_search_is_reproducible_with_seed() {
        let vocabulary = words(&["crane", "plant", "slant", "grant", "brine", "stone"]);
        let pool = CandidatePool::uniform(words(&[
            "crane", "plant", "slant", "grant", "brine", "stone", "store", "adore",
        ]));
        let ctx = TurnContext::new(3, None);

        let mut a = GuessOptimizer::new(SampledScorer::default()).with_seed(99);
        let mut b = GuessOptimizer::new(SampledScorer::default()).with_seed(99);
        let pa = a.propose(&vocabulary, &pool, &ctx).unwrap();
        let pb = b.propose(&vocabulary, &pool, &ctx).unwrap();

        assert_eq!(pa.guess, pb.guess);
        let (sa, sb) = (pa.scores.unwrap(), pb.scores.unwrap());
        for guess in &vocabulary {
            assert_eq!(sa.get(guess), sb.get(guess));
        }
    }

    #[test]
    fn empty_inputs_are_errors() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::uniform(vocabulary.clone());
        let ctx = TurnContext::new(2, None);

        assert_eq!(
            exhaustive()
                .propose(&vocabulary, &CandidatePool::default(), &ctx)
                .unwrap_err(),
            SolverError::EmptyPool
        );
        assert_eq!(
            exhaustive().propose(&[], &pool, &ctx).unwrap_err(),
            SolverError::EmptyVocabulary
        );
    }

    /// Fails or panics on one word, scores everything else as zero
    struct Faulty {
        bad: Word,
        panic: bool,
    }

    impl ScoringStrategy for Faulty {
        fn name(&self) -> &'static str {
            "faulty"
        }

        fn score(
            &self,
            guess: &Word,
            _pool: &CandidatePool,
            _rng: &mut StdRng,
        ) -> Result<ScoreRecord, SolverError> {
            if *guess == self.bad {
                assert!(!self.panic, "worker crashed");
                return Err(SolverError::InvalidWeights("boom".to_string()));
            }
            Ok(ScoreRecord::new(0.0, 0.0))
        }

        fn prepare_pool<'p>(
            &self,
            pool: &'p CandidatePool,
            _rng: &mut StdRng,
        ) -> Result<Cow<'p, CandidatePool>, SolverError> {
            Ok(Cow::Borrowed(pool))
        }

        fn default_book(&self) -> OpeningBook {
            OpeningBook::new(word("zzzzz"))
        }
    }

    #[test]
    fn failed_task_aborts_the_search() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::uniform(vocabulary.clone());
        let mut optimizer = GuessOptimizer::new(Faulty {
            bad: word("slant"),
            panic: false,
        });

        let err = optimizer.score_all(&vocabulary, &pool).unwrap_err();
        assert!(matches!(err, SolverError::ScoringFailed { guess, .. } if guess == word("slant")));
    }

    #[test]
    fn panicking_task_aborts_the_search() {
        let vocabulary = words(&SMALL);
        let pool = CandidatePool::uniform(vocabulary.clone());
        let mut optimizer = GuessOptimizer::new(Faulty {
            bad: word("grant"),
            panic: true,
        });

        let err = optimizer
            .propose(&vocabulary, &pool, &TurnContext::new(2, None))
            .unwrap_err();
        assert_eq!(err, SolverError::WorkerPanicked);
    }
}
