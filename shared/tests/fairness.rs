use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::selection::{resolve_winner, SelectionEngine};

const SAMPLES_PER_SLICE: usize = 2_000;

#[test]
fn every_entry_wins_about_one_in_n() {
    for count in 2..=40usize {
        let entries: Vec<String> = (0..count).map(|i| format!("entry {}", i)).collect();
        let mut engine = SelectionEngine::new(StdRng::seed_from_u64(count as u64), 6, 12).unwrap();
        let mut wins = vec![0usize; count];

        let samples = SAMPLES_PER_SLICE * count;
        let mut rotation = 0.0;
        for _ in 0..samples {
            rotation = engine.generate_target_rotation(rotation);
            wins[resolve_winner(rotation, &entries).unwrap().index] += 1;
        }

        // ~5 standard deviations of a binomial around the expected count
        let expected = samples as f64 / count as f64;
        let p = 1.0 / count as f64;
        let tolerance = 5.0 * (samples as f64 * p * (1.0 - p)).sqrt();
        for (index, &won) in wins.iter().enumerate() {
            assert!(
                (won as f64 - expected).abs() < tolerance,
                "{} entries: slice {} won {} times, expected {:.0} ± {:.0}",
                count,
                index,
                won,
                expected,
                tolerance
            );
        }
    }
}

#[test]
fn winners_are_memoryless() {
    // the winner of one spin says nothing about the next
    let entries = ["A", "B"];
    let mut engine = SelectionEngine::new(StdRng::seed_from_u64(2024), 6, 12).unwrap();
    let mut rotation = 0.0;
    let mut previous = None;
    let mut repeats = 0usize;
    let mut pairs = 0usize;
    for _ in 0..20_000 {
        rotation = engine.generate_target_rotation(rotation);
        let index = resolve_winner(rotation, &entries).unwrap().index;
        if let Some(prev) = previous {
            pairs += 1;
            if prev == index {
                repeats += 1;
            }
        }
        previous = Some(index);
    }
    let ratio = repeats as f64 / pairs as f64;
    assert!((ratio - 0.5).abs() < 0.02, "repeat ratio {}", ratio);
}

#[test]
fn cumulative_rotation_is_strictly_increasing() {
    let mut engine = SelectionEngine::new(StdRng::seed_from_u64(77), 1, 1).unwrap();
    let mut rotation = 0.0;
    for _ in 0..10_000 {
        let next = engine.generate_target_rotation(rotation);
        assert!(next > rotation);
        rotation = next;
    }
}
