use crate::types::{Difficulty, LevelConfig};

pub const TICK_RATE: u32 = 20;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;
pub const TICK_SECONDS: f32 = 1.0 / TICK_RATE as f32;

pub const TILE_SIZE: f32 = 32.0;
pub const COLLISION_EPSILON: f32 = 0.01;

pub const PLAYER_WIDTH: f32 = 35.0;
pub const PLAYER_HEIGHT: f32 = 30.0;
pub const PLAYER_SPEED: f32 = 120.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;

pub const DAMAGE_COOLDOWN: f32 = 1.0;

pub const MELEE_RADIUS: f32 = 50.0;
pub const MELEE_FRAME_COUNT: u32 = 4;
pub const MELEE_FRAME_DURATION: f32 = 0.2;
pub const SHOOT_FRAME_COUNT: u32 = 4;
pub const SHOOT_FRAME_DURATION: f32 = 0.15;

pub const PROJECTILE_WIDTH: f32 = 35.0;
pub const PROJECTILE_HEIGHT: f32 = 30.0;
pub const PROJECTILE_SPEED: f32 = 300.0;
pub const PROJECTILE_RANGE: f32 = 500.0;
pub const RANGED_DAMAGE: i32 = 10;

pub const ROAM_INTERVAL_MIN: f32 = 2.0;
pub const ROAM_INTERVAL_MAX: f32 = 5.0;

pub const GOBLIN_CHASE_RADIUS: f32 = 250.0;
pub const GOBLIN_CHASE_SPEED_MULTIPLIER: f32 = 1.5;
pub const GOBLIN_ROAM_SPEED_FACTOR: f32 = 0.5;
pub const MIN_LEADER_DISTANCE: f32 = 50.0;
pub const GOBLIN_GROUP_FOLLOWERS: i32 = 4;
pub const GOBLIN_GROUP_SPREAD: f32 = 10.0;

pub const SLIME_SIZE: f32 = 64.0;
pub const SLIME_BASE_HEALTH: i32 = 30;
pub const SLIME_CHASE_RADIUS: f32 = 150.0;
pub const SLIME_CHASE_SPEED_MULTIPLIER: f32 = 1.5;
pub const SLIME_MAX_LEVEL: i32 = 3;
pub const SLIME_SPLIT_SCALE: f32 = 0.7;
pub const SLIME_SPLIT_CHILDREN: usize = 2;

pub const GHOST_DIR_INTERVAL_MAX: f32 = 2.0;
pub const GHOST_HOMING_CHANCE: f32 = 0.03;

pub const SPAWN_MAX_TRIES: u32 = 500;

pub const CAMERA_MARGIN_RATIO: f32 = 0.4;
pub const FOG_REVEAL_RADIUS: f32 = 96.0;

#[derive(Clone, Copy, Debug)]
pub struct MonsterStats {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub max_health: i32,
    pub damage: i32,
}

pub fn goblin_stats(leader: bool) -> MonsterStats {
    if leader {
        MonsterStats {
            width: 28.0,
            height: 28.0,
            speed: 60.0,
            max_health: 80,
            damage: 15,
        }
    } else {
        MonsterStats {
            width: 24.0,
            height: 24.0,
            speed: 50.0,
            max_health: 50,
            damage: 10,
        }
    }
}

pub fn slime_stats(level: i32, size: f32) -> MonsterStats {
    MonsterStats {
        width: size,
        height: size,
        speed: 20.0,
        max_health: SLIME_BASE_HEALTH * level.max(1),
        damage: 2,
    }
}

pub fn ghost_stats() -> MonsterStats {
    MonsterStats {
        width: 30.0,
        height: 30.0,
        speed: 40.0,
        max_health: 40,
        damage: 4,
    }
}

pub fn get_level_config(difficulty: Difficulty) -> LevelConfig {
    match difficulty {
        Difficulty::Easy => LevelConfig {
            cell_rows: 20,
            cell_cols: 20,
            corridor_width: 4,
            wall_width: 1,
            view_width: 800.0,
            view_height: 600.0,
            melee_damage: 20,
            goblin_group_count: 30,
            slime_count: 30,
            ghost_count: 10,
        },
        Difficulty::Medium => LevelConfig {
            cell_rows: 40,
            cell_cols: 40,
            corridor_width: 4,
            wall_width: 1,
            view_width: 800.0,
            view_height: 600.0,
            melee_damage: 10,
            goblin_group_count: 65,
            slime_count: 65,
            ghost_count: 20,
        },
        Difficulty::Hard => LevelConfig {
            cell_rows: 55,
            cell_cols: 55,
            corridor_width: 4,
            wall_width: 1,
            view_width: 800.0,
            view_height: 600.0,
            melee_damage: 5,
            goblin_group_count: 100,
            slime_count: 100,
            ghost_count: 30,
        },
    }
}
