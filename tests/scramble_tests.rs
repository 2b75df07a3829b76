// Host-side tests for character substitution and the tick state machine.
// A fixed seed keeps every frame reproducible.

use fx_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn text(s: &str) -> ScrambleText<StdRng> {
    ScrambleText::new(s, StdRng::seed_from_u64(42))
}

fn sequential(direction: RevealDirection) -> ScrambleConfig {
    ScrambleConfig {
        sequential: true,
        direction,
        ..ScrambleConfig::default()
    }
}

fn multiset(chars: impl Iterator<Item = char>) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in chars {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

#[test]
fn sequential_hello_completes_in_five_ticks() {
    let config = sequential(RevealDirection::Start);
    let mut t = text("HELLO");
    t.start();
    for tick in 1..=5 {
        let before = t.revealed().clone();
        let outcome = t.tick(&config);
        assert_eq!(t.revealed().len(), tick);
        assert_eq!(t.revealed().len(), before.len() + 1, "re-revealed an index");
        let expected = if tick < 5 {
            TickOutcome::Continue
        } else {
            TickOutcome::Finished
        };
        assert_eq!(outcome, expected, "tick {tick}");
    }
    assert_eq!(t.revealed().sorted(), vec![0, 1, 2, 3, 4]);
    assert_eq!(t.display_text(), "HELLO");
    assert!(!t.is_scrambling());
    // Further ticks are inert.
    assert_eq!(t.tick(&config), TickOutcome::Finished);
    assert_eq!(t.display_text(), "HELLO");
}

#[test]
fn revealed_positions_show_their_true_character() {
    let config = sequential(RevealDirection::End);
    let mut t = text("SECRET");
    let source: Vec<char> = "SECRET".chars().collect();
    t.start();
    while t.tick(&config) == TickOutcome::Continue {
        let shown: Vec<char> = t.display_text().chars().collect();
        for i in t.revealed().sorted() {
            assert_eq!(shown[i], source[i]);
        }
        for (i, g) in t.glyphs().iter().enumerate() {
            assert_eq!(g.encrypted, !t.revealed().contains(i));
        }
    }
}

#[test]
fn spaces_survive_every_frame() {
    for config in [ScrambleConfig::default(), sequential(RevealDirection::Center)] {
        let mut t = text("AB CD");
        t.start();
        loop {
            let outcome = t.tick(&config);
            assert_eq!(t.display_text().chars().nth(2), Some(' '));
            if outcome == TickOutcome::Finished {
                break;
            }
        }
        assert_eq!(t.display_text(), "AB CD");
    }
}

#[test]
fn original_chars_frame_is_an_anagram_of_hidden_positions() {
    let config = ScrambleConfig {
        substitution: Substitution::OriginalOnly,
        ..sequential(RevealDirection::Center)
    };
    let source: Vec<char> = "DECRYPT ME NOW".chars().collect();
    let mut t = text("DECRYPT ME NOW");
    t.start();
    loop {
        let outcome = t.tick(&config);
        let shown: Vec<char> = t.display_text().chars().collect();
        assert_eq!(shown.len(), source.len());
        let hidden: Vec<usize> = (0..source.len())
            .filter(|i| !t.revealed().contains(*i) && source[*i] != ' ')
            .collect();
        assert_eq!(
            multiset(hidden.iter().map(|i| shown[*i])),
            multiset(hidden.iter().map(|i| source[*i])),
        );
        if outcome == TickOutcome::Finished {
            break;
        }
    }
}

#[test]
fn scramble_frame_with_original_chars_never_invents_characters() {
    let source: Vec<char> = "aab c".chars().collect();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let frame = scramble_frame(
            &source,
            &RevealSet::new(),
            &Substitution::OriginalOnly,
            &mut rng,
        );
        assert_eq!(frame[3], ' ');
        assert_eq!(
            multiset(frame.iter().copied()),
            multiset(source.iter().copied())
        );
    }
}

#[test]
fn alphabet_substitutes_come_from_the_alphabet() {
    let alphabet = vec!['x', 'y'];
    let source: Vec<char> = "hello world".chars().collect();
    let revealed = RevealSet::new().with(0);
    let mut rng = StdRng::seed_from_u64(3);
    let frame = scramble_frame(
        &source,
        &revealed,
        &Substitution::Alphabet(alphabet.clone()),
        &mut rng,
    );
    assert_eq!(frame[0], 'h');
    assert_eq!(frame[5], ' ');
    for (i, c) in frame.iter().enumerate() {
        if i != 0 && i != 5 {
            assert!(alphabet.contains(c), "{c} not from alphabet");
        }
    }
    // An empty alphabet leaves the text as-is.
    let frame = scramble_frame(
        &source,
        &RevealSet::new(),
        &Substitution::Alphabet(Vec::new()),
        &mut rng,
    );
    assert_eq!(frame, source);
}

#[test]
fn iteration_bound_restores_text_after_max_iterations() {
    let config = ScrambleConfig {
        max_iterations: 10,
        ..ScrambleConfig::default()
    };
    let mut t = text("Decrypt");
    t.start();
    for i in 1..10 {
        assert_eq!(t.tick(&config), TickOutcome::Continue, "tick {i}");
        assert!(t.revealed().is_empty());
        assert_eq!(t.iteration(), i);
    }
    assert_eq!(t.tick(&config), TickOutcome::Finished);
    assert_eq!(t.display_text(), "Decrypt");
    assert!(!t.is_scrambling());
    assert!(t.glyphs().iter().all(|g| !g.encrypted));
}

#[test]
fn zero_max_iterations_finishes_on_first_tick() {
    let config = ScrambleConfig {
        max_iterations: 0,
        ..ScrambleConfig::default()
    };
    let mut t = text("abc");
    t.start();
    assert_eq!(t.tick(&config), TickOutcome::Finished);
    assert_eq!(t.display_text(), "abc");
}

#[test]
fn empty_text_finishes_immediately() {
    for config in [ScrambleConfig::default(), sequential(RevealDirection::Center)] {
        let mut t = text("");
        assert!(t.is_empty());
        t.start();
        assert_eq!(t.tick(&config), TickOutcome::Finished);
        assert_eq!(t.display_text(), "");
        assert!(t.glyphs().is_empty());
    }
}

#[test]
fn tick_before_start_is_inert() {
    let mut t = text("idle");
    assert_eq!(t.tick(&ScrambleConfig::default()), TickOutcome::Finished);
    assert_eq!(t.display_text(), "idle");
    assert_eq!(t.iteration(), 0);
}

#[test]
fn stop_restores_source_and_clears_progress() {
    let config = sequential(RevealDirection::Start);
    let mut t = text("restore");
    t.start();
    t.tick(&config);
    t.tick(&config);
    assert_eq!(t.revealed().len(), 2);
    t.stop();
    assert_eq!(t.display_text(), "restore");
    assert!(t.revealed().is_empty());
    assert!(!t.is_scrambling());

    // A new run starts from scratch.
    t.start();
    t.tick(&config);
    assert_eq!(t.revealed().sorted(), vec![0]);
}

#[test]
fn multibyte_text_is_indexed_by_character() {
    let config = sequential(RevealDirection::Start);
    let mut t = text("héllo");
    assert_eq!(t.len(), 5);
    t.start();
    while t.tick(&config) == TickOutcome::Continue {}
    assert_eq!(t.display_text(), "héllo");
}

#[test]
fn trigger_parsing_and_flags() {
    use std::str::FromStr;
    assert_eq!(Trigger::from_str("view"), Ok(Trigger::View));
    assert_eq!(Trigger::from_str("BOTH"), Ok(Trigger::Both));
    assert!(Trigger::from_str("scroll").is_err());
    assert!(Trigger::Hover.on_hover() && !Trigger::Hover.on_view());
    assert!(!Trigger::View.on_hover() && Trigger::View.on_view());
    assert!(Trigger::Both.on_hover() && Trigger::Both.on_view());
}

#[test]
fn zero_speed_is_rejected() {
    let config = ScrambleConfig {
        speed: std::time::Duration::ZERO,
        ..ScrambleConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::Zero { option: "speed" }));
    assert_eq!(ScrambleConfig::default().validate(), Ok(()));
}
