//! Block Blast entry point
//!
//! The browser build starts from `web::start`. Natively this plays a seeded
//! game headlessly, always taking the first piece that fits, and reports the
//! result.

/// Stop a demo that keeps clearing lines forever
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_PLACEMENTS: u32 = 10_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_blast::consts::CLEAR_DELAY_MS;
    use block_blast::sim::{self, GameState, Position};
    use block_blast::{Leaderboard, consts::GRID_SIZE};

    env_logger::init();
    log::info!("Block Blast (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    let mut state = GameState::new(seed);
    let mut placements = 0u32;
    let mut lines = 0usize;

    while !state.is_game_over() && placements < MAX_DEMO_PLACEMENTS {
        let size = GRID_SIZE as i32;
        let next = state.tray.entries().find_map(|(slot, shape)| {
            (0..size)
                .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
                .find(|&anchor| state.can_place(shape, anchor))
                .map(|anchor| (slot, shape, anchor))
        });
        let Some((slot, shape, anchor)) = next else {
            break;
        };
        if !sim::place_block(&mut state, slot, shape, anchor) {
            break;
        }
        placements += 1;
        sim::tick(&mut state, CLEAR_DELAY_MS);

        for event in state.drain_events() {
            if let sim::GameEvent::LinesCleared { rows, cols, .. } = event {
                lines += rows.len() + cols.len();
            }
        }
    }

    let mut leaderboard = Leaderboard::load();
    let rank = if leaderboard.qualifies(state.score) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or_default();
        let rank = leaderboard.add_score("demo", state.score, now);
        leaderboard.save();
        rank
    } else {
        None
    };

    println!("Seed:       {}", seed);
    println!("Placements: {}", placements);
    println!("Lines:      {}", lines);
    println!("Score:      {}", state.score);
    if let Some(rank) = rank {
        println!("Rank:       #{}", rank);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
