//! Player health exposed through a read-only stat, with a HUD listening to it.
//!
//! Run with `RUST_LOG=statcell=trace cargo run --example player_health` to
//! see the library's trace events.

use statcell::{OnChanged, OnChangedNoArgs, ReadOnlyStat, Stat};
use tracing_subscriber::EnvFilter;

struct Player {
    name: String,
    health: Stat<i32>,
}

impl Player {
    fn new(name: &str, max_health: i32) -> Self {
        Self {
            name: name.to_string(),
            health: Stat::new(max_health),
        }
    }

    /// Outside code can watch health but only the player changes it.
    fn health(&self) -> ReadOnlyStat<'_, i32> {
        self.health.as_read_only()
    }

    fn take_damage(&self, amount: i32) {
        self.health.update(|hp| (hp - amount).max(0));
    }

    fn heal(&self, amount: i32) {
        let max = *self.health.initial();
        self.health.update(|hp| (hp + amount).min(max));
    }

    fn respawn(&self) {
        self.health.reset();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Player Health ===\n");

    let player = Player::new("ferris", 100);

    // HUD listens through the read-only view
    let hud = OnChanged::new(|old: &i32, new: &i32| {
        let delta = new - old;
        println!("   [HUD] health {old} -> {new} ({delta:+})");
    });
    let redraw = OnChangedNoArgs::new(|| println!("   [HUD] redraw"));

    player.health().listen(&hud);
    player.health().listen(&redraw);
    // Listening twice keeps a single registration
    player.health().listen(&hud);

    println!("1. {} takes 30 damage", player.name);
    player.take_damage(30);

    println!("\n2. {} heals 50 (capped at max)", player.name);
    player.heal(50);

    println!("\n3. {} takes 150 damage", player.name);
    player.take_damage(150);
    if player.health().get() == 0 {
        println!("   {} is down", player.name);
    }

    println!("\n4. HUD stops redrawing, {} respawns", player.name);
    player.health().stop_listen(&redraw);
    player.respawn();

    println!(
        "\nFinal health: {} / {}",
        player.health().get(),
        player.health().initial()
    );
}
