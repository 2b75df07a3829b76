//! Randomised character substitution and the per-tick reveal state machine.

use crate::constants::*;
use crate::error::ConfigError;
use crate::reveal::{reveal_step, RevealDirection, RevealSet};
use rand::seq::SliceRandom;
use rand::Rng;
use std::str::FromStr;
use std::time::Duration;

/// Where substitute characters come from.
#[derive(Clone, Debug, PartialEq)]
pub enum Substitution {
    /// Each hidden position draws independently from this alphabet.
    Alphabet(Vec<char>),
    /// Hidden positions are a shuffle of the hidden source characters, so a
    /// frame is always an anagram of what it hides.
    OriginalOnly,
}

impl Default for Substitution {
    fn default() -> Self {
        Substitution::Alphabet(DEFAULT_SCRAMBLE_CHARACTERS.chars().collect())
    }
}

/// What starts the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Trigger {
    #[default]
    Hover,
    /// First time the element scrolls into view, once per mount.
    View,
    Both,
}

impl Trigger {
    pub fn on_hover(self) -> bool {
        matches!(self, Trigger::Hover | Trigger::Both)
    }

    pub fn on_view(self) -> bool {
        matches!(self, Trigger::View | Trigger::Both)
    }
}

impl FromStr for Trigger {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hover" => Ok(Trigger::Hover),
            "view" => Ok(Trigger::View),
            "both" => Ok(Trigger::Both),
            _ => Err(ConfigError::UnknownValue {
                option: "animate_on",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrambleConfig {
    /// Tick period.
    pub speed: Duration,
    /// Ticks before the text snaps back in iteration-bounded mode.
    pub max_iterations: u32,
    /// Reveal one position per tick instead of scrambling for a fixed count.
    pub sequential: bool,
    pub direction: RevealDirection,
    pub substitution: Substitution,
    pub trigger: Trigger,
    /// Fixed RNG seed; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SCRAMBLE_SPEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            sequential: false,
            direction: RevealDirection::Start,
            substitution: Substitution::default(),
            trigger: Trigger::Hover,
            seed: None,
        }
    }
}

impl ScrambleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed.is_zero() {
            return Err(ConfigError::Zero { option: "speed" });
        }
        Ok(())
    }
}

#[inline]
fn is_space(c: char) -> bool {
    c == ' '
}

/// Render one scrambled frame of `source`. Revealed positions and spaces show
/// their true character; everything else is substituted.
pub fn scramble_frame<R: Rng + ?Sized>(
    source: &[char],
    revealed: &RevealSet,
    substitution: &Substitution,
    rng: &mut R,
) -> Vec<char> {
    let hidden = |i: usize, c: char| !is_space(c) && !revealed.contains(i);
    match substitution {
        Substitution::OriginalOnly => {
            let mut pool: Vec<char> = source
                .iter()
                .enumerate()
                .filter(|(i, c)| hidden(*i, **c))
                .map(|(_, c)| *c)
                .collect();
            pool.shuffle(rng);
            let mut pool = pool.into_iter();
            source
                .iter()
                .enumerate()
                .map(|(i, &c)| {
                    if hidden(i, c) {
                        pool.next().unwrap_or(c)
                    } else {
                        c
                    }
                })
                .collect()
        }
        Substitution::Alphabet(alphabet) => source
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if hidden(i, c) {
                    alphabet.choose(rng).copied().unwrap_or(c)
                } else {
                    c
                }
            })
            .collect(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The run is over; the caller should stop its timer.
    Finished,
}

/// One rendered character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// Still showing a substitute (styled differently by the renderer).
    pub encrypted: bool,
}

/// Scramble/reveal state for one piece of text.
pub struct ScrambleText<R> {
    source: Vec<char>,
    display: Vec<char>,
    revealed: RevealSet,
    iteration: u32,
    scrambling: bool,
    rng: R,
}

impl<R: Rng> ScrambleText<R> {
    pub fn new(text: &str, rng: R) -> Self {
        let source: Vec<char> = text.chars().collect();
        Self {
            display: source.clone(),
            source,
            revealed: RevealSet::new(),
            iteration: 0,
            scrambling: false,
            rng,
        }
    }

    /// Begin a fresh run. Ticks do nothing until this is called.
    pub fn start(&mut self) {
        self.scrambling = true;
        self.revealed = RevealSet::new();
        self.iteration = 0;
    }

    /// Advance one timer tick.
    pub fn tick(&mut self, config: &ScrambleConfig) -> TickOutcome {
        if !self.scrambling {
            return TickOutcome::Finished;
        }
        if self.source.is_empty() {
            self.scrambling = false;
            return TickOutcome::Finished;
        }
        if config.sequential {
            match reveal_step(config.direction, self.source.len(), &self.revealed) {
                Some(next) => {
                    self.revealed = next;
                    self.display = scramble_frame(
                        &self.source,
                        &self.revealed,
                        &config.substitution,
                        &mut self.rng,
                    );
                    if self.revealed.len() < self.source.len() {
                        return TickOutcome::Continue;
                    }
                }
                None => self.display = self.source.clone(),
            }
            self.scrambling = false;
            return TickOutcome::Finished;
        }

        self.display = scramble_frame(
            &self.source,
            &self.revealed,
            &config.substitution,
            &mut self.rng,
        );
        self.iteration += 1;
        if self.iteration >= config.max_iterations {
            self.scrambling = false;
            self.display = self.source.clone();
            return TickOutcome::Finished;
        }
        TickOutcome::Continue
    }

    /// Abandon the run and show the untouched text.
    pub fn stop(&mut self) {
        self.display = self.source.clone();
        self.revealed = RevealSet::new();
        self.iteration = 0;
        self.scrambling = false;
    }

    pub fn display_text(&self) -> String {
        self.display.iter().collect()
    }

    pub fn glyphs(&self) -> Vec<Glyph> {
        self.display
            .iter()
            .enumerate()
            .map(|(i, &ch)| Glyph {
                ch,
                encrypted: self.scrambling && !self.revealed.contains(i),
            })
            .collect()
    }

    pub fn revealed(&self) -> &RevealSet {
        &self.revealed
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn is_scrambling(&self) -> bool {
        self.scrambling
    }

    pub fn source(&self) -> String {
        self.source.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}
