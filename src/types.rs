use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterKind {
    Goblin,
    Slime,
    Ghost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterState {
    Roam,
    Chase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMotion {
    Idle,
    Walking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Melee,
    Shoot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// Logical intent for one tick, supplied by the input collaborator.
// The core never sees raw device events.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub melee: bool,
    pub shoot: bool,
}

// Level parameters supplied by the asset/config collaborator at level init.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(rename = "cellRows")]
    pub cell_rows: i32,
    #[serde(rename = "cellCols")]
    pub cell_cols: i32,
    #[serde(rename = "corridorWidth")]
    pub corridor_width: i32,
    #[serde(rename = "wallWidth")]
    pub wall_width: i32,
    #[serde(rename = "viewWidth")]
    pub view_width: f32,
    #[serde(rename = "viewHeight")]
    pub view_height: f32,
    #[serde(rename = "meleeDamage")]
    pub melee_damage: i32,
    #[serde(rename = "goblinGroupCount")]
    pub goblin_group_count: i32,
    #[serde(rename = "slimeCount")]
    pub slime_count: i32,
    #[serde(rename = "ghostCount")]
    pub ghost_count: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub motion: PlayerMotion,
    pub attack: Option<AttackKind>,
    pub frame: u32,
    pub hp: i32,
    #[serde(rename = "maxHp")]
    pub max_hp: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct MonsterView {
    pub id: String,
    pub kind: MonsterKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub state: MonsterState,
    pub frame: u32,
    pub hp: i32,
    #[serde(rename = "maxHp")]
    pub max_hp: i32,
    pub level: i32,
    pub leader: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProjectileView {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub frame: u32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct CameraView {
    pub x: i32,
    pub y: i32,
}

// Sent once per level, like a world-init message; per-tick state goes in Snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct WorldView {
    pub rows: i32,
    pub cols: i32,
    #[serde(rename = "tileSize")]
    pub tile_size: f32,
    pub tiles: Vec<String>,
    #[serde(rename = "winArea")]
    pub win_area: Rect,
    #[serde(rename = "playerSpawn")]
    pub player_spawn: Vec2,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeEvent {
    MonsterSlain {
        id: String,
        kind: MonsterKind,
    },
    SlimeSplit {
        #[serde(rename = "parentId")]
        parent_id: String,
        level: i32,
    },
    PlayerDamaged {
        amount: i32,
        by: String,
    },
    SpawnSkipped {
        kind: MonsterKind,
    },
    GameEnded {
        status: GameStatus,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub status: GameStatus,
    pub player: PlayerView,
    pub monsters: Vec<MonsterView>,
    pub projectiles: Vec<ProjectileView>,
    pub camera: CameraView,
    pub events: Vec<RuntimeEvent>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub status: GameStatus,
    pub ticks: u64,
    #[serde(rename = "elapsedSeconds")]
    pub elapsed_seconds: f32,
    pub kills: i32,
    #[serde(rename = "damageDealt")]
    pub damage_dealt: i32,
    #[serde(rename = "damageTaken")]
    pub damage_taken: i32,
    #[serde(rename = "slimeSplits")]
    pub slime_splits: i32,
    #[serde(rename = "spawnSkips")]
    pub spawn_skips: i32,
    #[serde(rename = "monstersRemaining")]
    pub monsters_remaining: usize,
}
