use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lowball_dice::{
    GameSettings, LowballState,
    entities::{Color, Die, Player, PlayerId, PlayerName},
    functional::{argmin, resolve_round, score},
    game::{GameStateManagement, PhaseDependentPlayerManagement},
};

/// Helper to create a game state with N players mid-round
fn setup_game_with_players(n_players: usize) -> LowballState {
    let settings = GameSettings::new(50, 1000, 6);
    let mut game = LowballState::from(settings);

    for i in 0..n_players {
        game.new_player(&format!("player{i}"), None, None).unwrap();
    }

    game.init_start().unwrap();

    // Step through states until the table is rolling
    // Lobby -> CollectAnte -> Roll
    for _ in 0..4 {
        let new_game = game.step();
        game = new_game;
    }

    game
}

/// Helper to build a seated player with fixed dice
fn player_with_hand(id: usize, faces: [u8; 5]) -> Player {
    let mut player = Player::new(
        PlayerId(id),
        PlayerName::new(&format!("player{id}")),
        Color::palette(id),
        1000,
    );
    player.dice = faces.map(|value| Die { value, held: false });
    player
}

/// Benchmark scoring a fresh hand
fn bench_score_fresh_hand(c: &mut Criterion) {
    let dice = [Die::new(); 5];

    c.bench_function("score_fresh_hand", |b| {
        b.iter(|| score(&dice));
    });
}

/// Benchmark scoring a hand with threes and holds mixed in
fn bench_score_mixed_hand(c: &mut Criterion) {
    let dice = [
        Die {
            value: 3,
            held: true,
        },
        Die {
            value: 1,
            held: true,
        },
        Die {
            value: 6,
            held: false,
        },
        Die {
            value: 3,
            held: false,
        },
        Die {
            value: 4,
            held: false,
        },
    ];

    c.bench_function("score_mixed_hand", |b| {
        b.iter(|| score(&dice));
    });
}

/// Benchmark scoring 100 hands in a row
fn bench_score_100_hands(c: &mut Criterion) {
    // Create 100 different hands with cycling faces
    let mut all_hands = Vec::new();
    for i in 0..100 {
        let hand: Vec<Die> = (0..5)
            .map(|k| Die {
                value: ((i + k) % 6) as u8 + 1,
                held: false,
            })
            .collect();
        all_hands.push(hand);
    }

    c.bench_function("score_100_hands", |b| {
        b.iter(|| all_hands.iter().map(|hand| score(hand)).collect::<Vec<_>>());
    });
}

/// Benchmark winner selection (argmin) over a full table of scores
fn bench_winner_selection(c: &mut Criterion) {
    let scores: Vec<u32> = vec![14, 7, 22, 7, 30, 9];

    c.bench_function("winner_selection_6_scores", |b| {
        b.iter(|| argmin(&scores));
    });
}

/// Benchmark resolving a complete round from fixed hands
fn bench_resolve_round(c: &mut Criterion) {
    let players = vec![
        player_with_hand(0, [1, 1, 3, 3, 3]),
        player_with_hand(1, [2, 2, 2, 2, 2]),
        player_with_hand(2, [6, 6, 6, 6, 6]),
        player_with_hand(3, [3, 3, 3, 3, 3]),
        player_with_hand(4, [4, 5, 6, 1, 2]),
        player_with_hand(5, [1, 2, 3, 1, 2]),
    ];

    c.bench_function("resolve_round_6_players", |b| {
        b.iter(|| resolve_round(&players, 300));
    });
}

/// Benchmark view generation with different player counts
fn bench_view_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_generation");

    for n_players in [2, 4, 6].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_players", n_players)),
            n_players,
            |b, &n| {
                let game = setup_game_with_players(n);
                b.iter(|| game.get_view());
            },
        );
    }

    group.finish();
}

/// Benchmark full game state step with different player counts
fn bench_game_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_step");

    for n_players in [2, 6].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_players", n_players)),
            n_players,
            |b, &n| {
                b.iter_batched(
                    || setup_game_with_players(n),
                    |game| {
                        // Take one step in the game (consumes game, returns new game)
                        game.step()
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark a whole round: everyone rolls once, then the pot settles
fn bench_full_round(c: &mut Criterion) {
    c.bench_function("full_round_6_players", |b| {
        b.iter_batched(
            || setup_game_with_players(6),
            |mut game| {
                let ids: Vec<_> = game.get_view().players.iter().map(|p| p.id).collect();
                for id in ids {
                    game.roll_dice(id).unwrap();
                }
                game.init_end_round().unwrap();
                game = game.step();
                game.step()
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark event draining (common operation)
fn bench_drain_events(c: &mut Criterion) {
    c.bench_function("drain_events", |b| {
        b.iter_batched(
            || setup_game_with_players(5),
            |mut g| {
                g.drain_events();
                g
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    scoring,
    bench_score_fresh_hand,
    bench_score_mixed_hand,
    bench_score_100_hands,
    bench_winner_selection,
    bench_resolve_round,
);

criterion_group!(
    game_operations,
    bench_view_generation,
    bench_game_step,
    bench_full_round,
    bench_drain_events,
);

criterion_main!(scoring, game_operations);
