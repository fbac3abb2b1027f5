use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{SecondsFormat, Utc};
use clap::Parser;
use maze_raider::constants::{get_level_config, MELEE_RADIUS, TICK_RATE, TICK_SECONDS};
use maze_raider::engine::GameEngine;
use maze_raider::rng::Rng;
use maze_raider::types::{Difficulty, GameStatus, GameSummary, InputState, LevelConfig, Snapshot};
use rand::distr::Alphanumeric;
use rand::Rng as _;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    difficulty: Option<String>,
    #[arg(long)]
    seed: Option<u32>,
    #[arg(long)]
    seconds: Option<f32>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    run_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct RunResultLine {
    #[serde(rename = "runId")]
    run_id: String,
    difficulty: Option<Difficulty>,
    seed: u32,
    #[serde(flatten)]
    summary: GameSummary,
    #[serde(rename = "fogRevealedTiles")]
    fog_revealed_tiles: usize,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    timestamp: String,
    level: String,
    event: String,
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

// Scripted intent source standing in for the input collaborator: wanders,
// swings when a monster is on top of it, shoots when one lines up.
struct IntentBot {
    rng: Rng,
    dir_timer: f32,
    current: InputState,
}

impl IntentBot {
    fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed ^ 0x9e37_79b9),
            dir_timer: 0.0,
            current: InputState::default(),
        }
    }

    fn think(&mut self, snapshot: &Snapshot, dt: f32) -> InputState {
        self.dir_timer -= dt;
        if self.dir_timer <= 0.0 {
            self.dir_timer = self.rng.f32_range(0.4, 1.5);
            self.current = InputState {
                up: self.rng.bool(0.4),
                down: self.rng.bool(0.4),
                left: self.rng.bool(0.4),
                right: self.rng.bool(0.4),
                ..InputState::default()
            };
        }

        let player = &snapshot.player;
        let player_cx = player.x + player.width / 2.0;
        let player_cy = player.y + player.height / 2.0;

        let mut input = self.current;
        input.melee = false;
        input.shoot = false;
        for monster in &snapshot.monsters {
            let dx = monster.x + monster.width / 2.0 - player_cx;
            let dy = monster.y + monster.height / 2.0 - player_cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < MELEE_RADIUS {
                input.melee = true;
                break;
            }
            if dist < 350.0 && dy.abs() < 40.0 {
                input.shoot = true;
                input.left = dx < 0.0;
                input.right = dx >= 0.0;
            }
        }
        input
    }
}

fn main() {
    let cli = Cli::parse();
    let run_id = cli.run_id.clone().unwrap_or_else(random_run_id);
    let seed = cli.seed.unwrap_or_else(|| now_ms() as u32);
    let seconds = cli.seconds.unwrap_or(120.0).max(1.0);

    let difficulty = match cli.difficulty.as_deref() {
        Some(value) => match Difficulty::parse(value) {
            Some(parsed) => Some(parsed),
            None => {
                emit_log(
                    "error",
                    "bad_difficulty",
                    &run_id,
                    None,
                    json!({ "value": value }),
                );
                std::process::exit(2);
            }
        },
        None => None,
    };

    let config = match cli.config.as_ref() {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(error) => {
                emit_log(
                    "error",
                    "config_load_failed",
                    &run_id,
                    None,
                    json!({
                        "path": path.to_string_lossy(),
                        "error": error.to_string(),
                    }),
                );
                std::process::exit(2);
            }
        },
        None => get_level_config(difficulty.unwrap_or(Difficulty::Easy)),
    };

    let mut engine = GameEngine::new(config, seed);
    let world = engine.get_world_view();
    emit_log(
        "info",
        "run_started",
        &run_id,
        None,
        json!({
            "seed": seed,
            "difficulty": difficulty,
            "rows": world.rows,
            "cols": world.cols,
            "monsters": engine.monster_count(),
            "seconds": seconds,
        }),
    );

    let mut bot = IntentBot::new(seed);
    let max_ticks = (seconds * TICK_RATE as f32).ceil() as u64;
    for tick in 1..=max_ticks {
        let snapshot = engine.build_snapshot(false);
        let input = bot.think(&snapshot, TICK_SECONDS);
        engine.step(&input, TICK_SECONDS);

        if tick % TICK_RATE as u64 == 0 {
            let progress = engine.build_snapshot(false);
            emit_log(
                "info",
                "progress",
                &run_id,
                Some(tick),
                json!({
                    "hp": progress.player.hp,
                    "x": progress.player.x,
                    "y": progress.player.y,
                    "monsters": progress.monsters.len(),
                    "projectiles": progress.projectiles.len(),
                }),
            );
        }

        if engine.is_ended() {
            break;
        }
    }

    let summary = engine.build_summary();
    let result = RunResultLine {
        run_id: run_id.clone(),
        difficulty,
        seed,
        summary: summary.clone(),
        fog_revealed_tiles: engine.fog().revealed_count(),
    };
    println!(
        "{}",
        serde_json::to_string(&result).expect("run result should serialize")
    );

    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &result) {
            emit_log(
                "error",
                "summary_write_failed",
                &run_id,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
    }

    emit_log(
        "info",
        "run_finished",
        &run_id,
        Some(summary.ticks),
        json!({
            "status": summary.status,
            "kills": summary.kills,
            "damageTaken": summary.damage_taken,
            "timedOut": summary.status == GameStatus::Playing,
        }),
    );
}

fn load_config(path: &Path) -> io::Result<LevelConfig> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(io::Error::other)
}

fn write_summary(path: &Path, result: &RunResultLine) -> io::Result<()> {
    let text = serde_json::to_string_pretty(result).expect("run result should serialize");
    let mut file = fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.write_all(b"\n")
}

fn emit_log(level: &str, event: &str, run_id: &str, tick: Option<u64>, details: Value) {
    let log_line = StructuredLogLine {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        level: level.to_string(),
        event: event.to_string(),
        run_id: run_id.to_string(),
        tick,
        details,
    };
    eprintln!(
        "{}",
        serde_json::to_string(&log_line).expect("structured log should serialize")
    );
}

fn random_run_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
