use smallvec::SmallVec;

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Produces the puzzle for the next round.
pub trait PuzzleGenerator {
    fn generate(&mut self, level: Level) -> PuzzleContext;
}

impl<G: PuzzleGenerator + ?Sized> PuzzleGenerator for &mut G {
    fn generate(&mut self, level: Level) -> PuzzleContext {
        (**self).generate(level)
    }
}

/// Attempts the generator makes before giving up on a [`SolvabilityCheck`].
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// Generation strategy that draws a pattern kind among the ones unlocked at the current
/// difficulty, then samples the target and every cell independently. Nothing guarantees a
/// solution exists unless a [`SolvabilityCheck`] other than [`AcceptAll`] is plugged in.
#[derive(Clone, Debug)]
pub struct StandardGenerator<S, C = AcceptAll> {
    source: S,
    shape: Coord2,
    check: C,
    max_attempts: u32,
    next_id: PuzzleId,
}

impl<S: RandomSource> StandardGenerator<S> {
    pub fn new(source: S, shape: Coord2) -> Result<Self> {
        let total = mult(shape.0, shape.1);
        if total == 0 || total > MAX_CELLS {
            return Err(GameError::InvalidGridShape);
        }
        Ok(Self {
            source,
            shape,
            check: AcceptAll,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            next_id: PuzzleId::default(),
        })
    }
}

impl<S, C> StandardGenerator<S, C> {
    pub fn with_check<D: SolvabilityCheck>(self, check: D) -> StandardGenerator<S, D> {
        StandardGenerator {
            source: self.source,
            shape: self.shape,
            check,
            max_attempts: self.max_attempts,
            next_id: self.next_id,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn shape(&self) -> Coord2 {
        self.shape
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: RandomSource, C> StandardGenerator<S, C> {
    fn draw(&mut self, level: Level) -> PuzzleContext {
        let difficulty = difficulty(level);

        let pool: SmallVec<[PatternKind; 6]> = PatternKind::unlocked(difficulty).collect();
        let pick = self.source.next_in(0..=pool.len() as Value - 1) as usize;
        let kind = pool[pick.min(pool.len() - 1)];

        let policy = kind.policy(difficulty);
        let target = match policy.target {
            TargetRule::Fixed(target) => target,
            TargetRule::Between(range) => self.source.next_in(range),
            TargetRule::OneOf(choices) => {
                let pick = self.source.next_in(0..=choices.len() as Value - 1) as usize;
                choices[pick.min(choices.len() - 1)]
            }
        };

        let total = usize::from(mult(self.shape.0, self.shape.1));
        let values: SmallVec<[Value; 16]> = (0..total)
            .map(|_| self.source.next_in(policy.cells.clone()))
            .collect();

        let id = self.next_id;
        self.next_id = id.next();

        log::debug!("Generated puzzle {id:?} at level {level}: {kind:?} target {target}");
        PuzzleContext::new(id, kind, target, self.shape, &values)
            .expect("shape should be validated on construction")
    }
}

impl<S: RandomSource, C: SolvabilityCheck> PuzzleGenerator for StandardGenerator<S, C> {
    fn generate(&mut self, level: Level) -> PuzzleContext {
        let mut attempts = 1;
        loop {
            let puzzle = self.draw(level);
            if self.check.accepts(&puzzle) {
                return puzzle;
            }
            if attempts >= self.max_attempts {
                log::warn!(
                    "No acceptable puzzle after {attempts} attempts at level {level}, keeping {:?}",
                    puzzle.id()
                );
                return puzzle;
            }
            attempts += 1;
        }
    }
}
