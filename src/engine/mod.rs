use std::collections::BTreeMap;

use crate::animation::{AnimationClip, SpriteRegion};
use crate::camera::Camera;
use crate::constants::{
    get_level_config, COLLISION_EPSILON, FOG_REVEAL_RADIUS, MELEE_FRAME_COUNT,
    MELEE_FRAME_DURATION, PLAYER_HEIGHT, PLAYER_MAX_HEALTH, PLAYER_SPEED, PLAYER_WIDTH,
    SHOOT_FRAME_COUNT, SHOOT_FRAME_DURATION, SLIME_MAX_LEVEL, SLIME_SPLIT_CHILDREN,
    SLIME_SPLIT_SCALE, TILE_SIZE,
};
use crate::fog::FogOfWar;
use crate::rng::Rng;
use crate::types::{
    AttackKind, CameraView, Difficulty, Facing, GameStatus, GameSummary, InputState, LevelConfig,
    MonsterKind, MonsterView, PlayerMotion, PlayerView, ProjectileView, Rect, RuntimeEvent,
    Snapshot, Vec2, WorldView,
};
use crate::world::{generate_maze, TileGrid};

mod combat;
mod monsters;
mod spawn_system;
mod utils;

use self::utils::aabb_overlap;

#[derive(Clone, Debug, Default)]
struct RunStats {
    kills: i32,
    damage_dealt: i32,
    damage_taken: i32,
    slime_splits: i32,
    spawn_skips: i32,
}

#[derive(Clone, Debug)]
struct ActiveAttack {
    kind: AttackKind,
    clip: AnimationClip,
}

#[derive(Clone, Debug)]
struct PlayerInternal {
    view: PlayerView,
    speed: f32,
    locomotion: BTreeMap<(PlayerMotion, Facing), AnimationClip>,
    attack: Option<ActiveAttack>,
}

#[derive(Clone, Debug)]
struct MonsterInternal {
    view: MonsterView,
    speed: f32,
    damage: i32,
    chase_radius: f32,
    chase_speed_multiplier: f32,
    roam_dir: Vec2,
    roam_timer: f32,
    damage_timer: f32,
    leader_id: Option<String>,
    anim: Option<AnimationClip>,
}

#[derive(Clone, Debug)]
struct ProjectileInternal {
    view: ProjectileView,
    speed: f32,
    traveled: f32,
    range: f32,
    damage: i32,
    anim: AnimationClip,
}

#[derive(Clone, Debug)]
pub struct GameEngine {
    pub config: LevelConfig,
    world: TileGrid,
    camera: Camera,
    fog: FogOfWar,
    rng: Rng,
    player: PlayerInternal,
    monsters: Vec<MonsterInternal>,
    projectiles: Vec<ProjectileInternal>,
    events: Vec<RuntimeEvent>,
    stats: RunStats,
    win_area: Rect,
    player_spawn: Vec2,
    status: GameStatus,
    tick_counter: u64,
    elapsed: f32,
    next_id_counter: u64,
}

impl GameEngine {
    pub fn new(config: LevelConfig, seed: u32) -> Self {
        let mut rng = Rng::new(seed);
        let world = generate_maze(
            config.cell_rows,
            config.cell_cols,
            config.corridor_width,
            config.wall_width,
            TILE_SIZE,
            &mut rng,
        );

        let player_spawn = Vec2 {
            x: TILE_SIZE,
            y: TILE_SIZE,
        };
        let win_area = Rect {
            x: (world.cols() - 2) as f32 * TILE_SIZE,
            y: (world.rows() - 2) as f32 * TILE_SIZE,
            width: TILE_SIZE,
            height: TILE_SIZE,
        };
        let camera = Camera::new(
            config.view_width,
            config.view_height,
            world.width_px(),
            world.height_px(),
        );
        let mut fog = FogOfWar::new(world.rows(), world.cols(), TILE_SIZE);
        fog.reveal(
            player_spawn.x + PLAYER_WIDTH / 2.0,
            player_spawn.y + PLAYER_HEIGHT / 2.0,
            FOG_REVEAL_RADIUS,
        );

        let player = PlayerInternal {
            view: PlayerView {
                id: "player".to_string(),
                x: player_spawn.x,
                y: player_spawn.y,
                width: PLAYER_WIDTH,
                height: PLAYER_HEIGHT,
                facing: Facing::Right,
                motion: PlayerMotion::Idle,
                attack: None,
                frame: 0,
                hp: PLAYER_MAX_HEALTH,
                max_hp: PLAYER_MAX_HEALTH,
            },
            speed: PLAYER_SPEED,
            locomotion: player_locomotion_clips(),
            attack: None,
        };

        let mut engine = Self {
            config,
            world,
            camera,
            fog,
            rng,
            player,
            monsters: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            stats: RunStats::default(),
            win_area,
            player_spawn,
            status: GameStatus::Playing,
            tick_counter: 0,
            elapsed: 0.0,
            next_id_counter: 1,
        };
        engine.spawn_monsters(&config);
        engine
    }

    pub fn for_difficulty(difficulty: Difficulty, seed: u32) -> Self {
        Self::new(get_level_config(difficulty), seed)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn world(&self) -> &TileGrid {
        &self.world
    }

    pub fn fog(&self) -> &FogOfWar {
        &self.fog
    }

    pub fn monster_count(&self) -> usize {
        self.monsters.len()
    }

    // One fixed-phase simulation tick: player, monsters, projectiles, fog,
    // camera, end-of-game check. A no-op once the game has ended.
    pub fn step(&mut self, input: &InputState, dt: f32) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.tick_counter += 1;
        self.elapsed += dt;

        self.update_player(input, dt);
        self.reap_dead_monsters();
        self.update_monsters(dt);
        self.update_projectiles(dt);
        self.reap_dead_monsters();

        let center_x = self.player.view.x + self.player.view.width / 2.0;
        let center_y = self.player.view.y + self.player.view.height / 2.0;
        self.fog.reveal(center_x, center_y, FOG_REVEAL_RADIUS);
        self.camera.update(self.player_rect());

        self.check_game_over();
    }

    fn update_player(&mut self, input: &InputState, dt: f32) {
        // A running one-shot attack finishes exactly when its clip is done.
        if let Some(attack) = self.player.attack.as_mut() {
            attack.clip.advance(dt);
            if attack.clip.is_done() {
                self.player.attack = None;
            }
        }

        // Melee and ranged are mutually exclusive; neither can re-trigger
        // until the running clip completes.
        if self.player.attack.is_none() {
            if input.melee {
                self.player.attack = Some(ActiveAttack {
                    kind: AttackKind::Melee,
                    clip: melee_clip(self.player.view.facing),
                });
                self.resolve_melee();
            } else if input.shoot {
                self.player.attack = Some(ActiveAttack {
                    kind: AttackKind::Shoot,
                    clip: shoot_clip(self.player.view.facing),
                });
                self.spawn_projectile();
            }
        }

        // Movement keeps running during attacks.
        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.up {
            dy -= self.player.speed * dt;
        }
        if input.down {
            dy += self.player.speed * dt;
        }
        if input.left && !input.right {
            dx = -self.player.speed * dt;
            self.player.view.facing = Facing::Left;
        } else if input.right && !input.left {
            dx = self.player.speed * dt;
            self.player.view.facing = Facing::Right;
        }

        self.player.view.motion = if dx != 0.0 || dy != 0.0 {
            PlayerMotion::Walking
        } else {
            PlayerMotion::Idle
        };

        self.move_player_x(dx);
        self.move_player_y(dy);
        self.player.view.x = self.player.view.x.floor();
        self.player.view.y = self.player.view.y.floor();

        let key = (self.player.view.motion, self.player.view.facing);
        if let Some(clip) = self.player.locomotion.get_mut(&key) {
            clip.advance(dt);
        }
        self.player.view.attack = self.player.attack.as_ref().map(|attack| attack.kind);
        self.player.view.frame = match self.player.attack.as_ref() {
            Some(attack) => attack.clip.current_frame(),
            // Missing table entries render as placeholder frame 0 rather than
            // unwinding the tick.
            None => self
                .player
                .locomotion
                .get(&key)
                .map(|clip| clip.current_frame())
                .unwrap_or(0),
        };
    }

    // Axis-separated resolution. A blocked axis snaps the box flush against
    // the wall tile instead of discarding the whole step.
    fn move_player_x(&mut self, dx: f32) {
        if dx == 0.0 {
            return;
        }
        let width = self.player.view.width;
        let height = self.player.view.height;
        let candidate = self.player.view.x + dx;
        if !self.world.hits_wall(candidate, self.player.view.y, width, height) {
            self.player.view.x = candidate;
            return;
        }
        let tile = self.world.tile_size();
        if dx > 0.0 {
            let wall_col = ((candidate + width - COLLISION_EPSILON) / tile).floor();
            self.player.view.x = wall_col * tile - width;
        } else {
            let wall_col = (candidate / tile).floor();
            self.player.view.x = (wall_col + 1.0) * tile;
        }
    }

    fn move_player_y(&mut self, dy: f32) {
        if dy == 0.0 {
            return;
        }
        let width = self.player.view.width;
        let height = self.player.view.height;
        let candidate = self.player.view.y + dy;
        if !self.world.hits_wall(self.player.view.x, candidate, width, height) {
            self.player.view.y = candidate;
            return;
        }
        let tile = self.world.tile_size();
        if dy > 0.0 {
            let wall_row = ((candidate + height - COLLISION_EPSILON) / tile).floor();
            self.player.view.y = wall_row * tile - height;
        } else {
            let wall_row = (candidate / tile).floor();
            self.player.view.y = (wall_row + 1.0) * tile;
        }
    }

    // Removes every monster at zero health, firing death effects exactly once.
    // Slime children are pushed before the parent leaves the live set. Runs
    // after each damage-dealing phase so a dead monster is never updated again
    // within the same tick.
    fn reap_dead_monsters(&mut self) {
        let mut idx = 0;
        while idx < self.monsters.len() {
            if self.monsters[idx].view.hp > 0 {
                idx += 1;
                continue;
            }

            let id = self.monsters[idx].view.id.clone();
            let kind = self.monsters[idx].view.kind;
            let level = self.monsters[idx].view.level;
            let x = self.monsters[idx].view.x;
            let y = self.monsters[idx].view.y;
            let width = self.monsters[idx].view.width;

            if kind == MonsterKind::Slime && level < SLIME_MAX_LEVEL {
                for _ in 0..SLIME_SPLIT_CHILDREN {
                    let child = self.make_slime(x, y, width * SLIME_SPLIT_SCALE, level + 1);
                    self.monsters.push(child);
                }
                self.stats.slime_splits += 1;
                self.events.push(RuntimeEvent::SlimeSplit {
                    parent_id: id.clone(),
                    level,
                });
            }

            self.monsters.remove(idx);
            self.stats.kills += 1;
            self.events.push(RuntimeEvent::MonsterSlain { id, kind });
        }
    }

    fn check_game_over(&mut self) {
        if self.player.view.hp <= 0 {
            self.status = GameStatus::Lost;
            self.events.push(RuntimeEvent::GameEnded {
                status: self.status,
            });
            return;
        }
        let view = &self.player.view;
        if aabb_overlap(
            view.x,
            view.y,
            view.width,
            view.height,
            self.win_area.x,
            self.win_area.y,
            self.win_area.width,
            self.win_area.height,
        ) {
            self.status = GameStatus::Won;
            self.events.push(RuntimeEvent::GameEnded {
                status: self.status,
            });
        }
    }

    fn player_rect(&self) -> Rect {
        Rect {
            x: self.player.view.x,
            y: self.player.view.y,
            width: self.player.view.width,
            height: self.player.view.height,
        }
    }

    fn make_id(&mut self, prefix: &str) -> String {
        let id = format!("{}_{}", prefix, self.next_id_counter);
        self.next_id_counter = self.next_id_counter.saturating_add(1);
        id
    }

    pub fn get_world_view(&self) -> WorldView {
        WorldView {
            rows: self.world.rows(),
            cols: self.world.cols(),
            tile_size: self.world.tile_size(),
            tiles: self.world.to_rows(),
            win_area: self.win_area,
            player_spawn: self.player_spawn,
        }
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let snapshot = Snapshot {
            tick: self.tick_counter,
            status: self.status,
            player: self.player.view.clone(),
            monsters: self.monsters.iter().map(|m| m.view.clone()).collect(),
            projectiles: self.projectiles.iter().map(|p| p.view.clone()).collect(),
            camera: self.camera_view(),
            events: if include_events {
                self.events.clone()
            } else {
                Vec::new()
            },
        };
        if include_events {
            self.events.clear();
        }
        snapshot
    }

    pub fn camera_view(&self) -> CameraView {
        self.camera.view()
    }

    pub fn build_summary(&self) -> GameSummary {
        GameSummary {
            status: self.status,
            ticks: self.tick_counter,
            elapsed_seconds: self.elapsed,
            kills: self.stats.kills,
            damage_dealt: self.stats.damage_dealt,
            damage_taken: self.stats.damage_taken,
            slime_splits: self.stats.slime_splits,
            spawn_skips: self.stats.spawn_skips,
            monsters_remaining: self.monsters.len(),
        }
    }
}

fn player_locomotion_clips() -> BTreeMap<(PlayerMotion, Facing), AnimationClip> {
    let mut clips = BTreeMap::new();
    clips.insert(
        (PlayerMotion::Idle, Facing::Left),
        AnimationClip::new(2, 0.4, true, false, SpriteRegion::new(70.0, 61.0, 35.0, 30.0)),
    );
    clips.insert(
        (PlayerMotion::Idle, Facing::Right),
        AnimationClip::new(2, 0.4, true, false, SpriteRegion::new(0.0, 61.0, 32.0, 30.0)),
    );
    clips.insert(
        (PlayerMotion::Walking, Facing::Left),
        AnimationClip::new(4, 0.4, true, false, SpriteRegion::new(0.0, 31.0, 35.0, 30.0)),
    );
    clips.insert(
        (PlayerMotion::Walking, Facing::Right),
        AnimationClip::new(4, 0.4, true, false, SpriteRegion::new(0.0, 0.0, 35.0, 30.0)),
    );
    clips
}

fn melee_clip(facing: Facing) -> AnimationClip {
    let y_start = match facing {
        Facing::Left => 151.0,
        Facing::Right => 91.0,
    };
    AnimationClip::new(
        MELEE_FRAME_COUNT,
        MELEE_FRAME_DURATION,
        false,
        false,
        SpriteRegion::new(0.0, y_start, 35.0, 30.0),
    )
}

fn shoot_clip(facing: Facing) -> AnimationClip {
    let y_start = match facing {
        Facing::Left => 241.0,
        Facing::Right => 211.0,
    };
    AnimationClip::new(
        SHOOT_FRAME_COUNT,
        SHOOT_FRAME_DURATION,
        false,
        false,
        SpriteRegion::new(0.0, y_start, 35.0, 30.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{RANGED_DAMAGE, TICK_SECONDS};
    use crate::types::MonsterState;

    fn empty_config(cell_rows: i32, cell_cols: i32, corridor_width: i32) -> LevelConfig {
        LevelConfig {
            cell_rows,
            cell_cols,
            corridor_width,
            wall_width: 1,
            view_width: 800.0,
            view_height: 600.0,
            melee_damage: 20,
            goblin_group_count: 0,
            slime_count: 0,
            ghost_count: 0,
        }
    }

    // A single 12-tile-wide room: open floor from tile (1,1) to (12,12).
    fn open_room_engine(seed: u32) -> GameEngine {
        GameEngine::new(empty_config(1, 1, 12), seed)
    }

    fn idle() -> InputState {
        InputState::default()
    }

    fn press_right() -> InputState {
        InputState {
            right: true,
            ..InputState::default()
        }
    }

    fn press_melee() -> InputState {
        InputState {
            melee: true,
            ..InputState::default()
        }
    }

    #[test]
    fn same_seed_produces_same_progression() {
        let config = LevelConfig {
            cell_rows: 4,
            cell_cols: 4,
            corridor_width: 4,
            wall_width: 1,
            view_width: 800.0,
            view_height: 600.0,
            melee_damage: 20,
            goblin_group_count: 2,
            slime_count: 2,
            ghost_count: 1,
        };
        let mut a = GameEngine::new(config, 424_242);
        let mut b = GameEngine::new(config, 424_242);

        for tick in 0..300u64 {
            let input = InputState {
                right: tick % 3 == 0,
                down: tick % 5 == 0,
                melee: tick % 7 == 0,
                shoot: tick % 11 == 0,
                ..InputState::default()
            };
            a.step(&input, TICK_SECONDS);
            b.step(&input, TICK_SECONDS);

            let sa = a.build_snapshot(false);
            let sb = b.build_snapshot(false);
            assert_eq!(sa.player.x.to_bits(), sb.player.x.to_bits());
            assert_eq!(sa.player.y.to_bits(), sb.player.y.to_bits());
            assert_eq!(sa.player.hp, sb.player.hp);
            assert_eq!(sa.monsters.len(), sb.monsters.len());
            for (ma, mb) in sa.monsters.iter().zip(sb.monsters.iter()) {
                assert_eq!(ma.id, mb.id);
                assert_eq!(ma.x.to_bits(), mb.x.to_bits());
                assert_eq!(ma.y.to_bits(), mb.y.to_bits());
                assert_eq!(ma.hp, mb.hp);
                assert_eq!(ma.frame, mb.frame);
            }
            assert_eq!(sa.projectiles.len(), sb.projectiles.len());
            assert_eq!(sa.camera.x, sb.camera.x);
            assert_eq!(sa.camera.y, sb.camera.y);

            if a.is_ended() || b.is_ended() {
                assert_eq!(a.status(), b.status());
                break;
            }
        }
    }

    #[test]
    fn player_walks_right_until_flush_with_wall() {
        let mut engine = GameEngine::new(empty_config(10, 10, 4), 99);
        assert_eq!(engine.player.view.x, TILE_SIZE);
        assert_eq!(engine.player.view.y, TILE_SIZE);

        let mut last_x = engine.player.view.x;
        for _ in 0..2_000 {
            engine.step(&press_right(), TICK_SECONDS);
            if engine.player.view.x == last_x {
                break;
            }
            last_x = engine.player.view.x;
        }

        let view = &engine.player.view;
        // Right edge exactly on a tile boundary, touching but not overlapping.
        assert!(((view.x + view.width) % TILE_SIZE).abs() < 1e-3);
        assert!(!engine.world.hits_wall(view.x, view.y, view.width, view.height));
        assert!(engine
            .world
            .hits_wall(view.x + 1.0, view.y, view.width, view.height));
    }

    #[test]
    fn diagonal_move_into_wall_slides_along_free_axis() {
        let mut engine = open_room_engine(5);
        // Player starts flush under the top boundary wall; up is blocked,
        // right is open.
        let input = InputState {
            up: true,
            right: true,
            ..InputState::default()
        };
        engine.step(&input, TICK_SECONDS);
        assert!(engine.player.view.x > TILE_SIZE);
        assert_eq!(engine.player.view.y, TILE_SIZE);
    }

    #[test]
    fn contact_damage_is_debounced_by_cooldown() {
        let mut engine = open_room_engine(11);
        let slime = engine.make_slime(engine.player.view.x, engine.player.view.y, 64.0, 1);
        engine.monsters.push(slime);
        let start_hp = engine.player.view.hp;

        engine.deal_contact_damage(0, TICK_SECONDS);
        assert_eq!(engine.player.view.hp, start_hp - 2);

        // Checks inside the cooldown window apply nothing.
        for _ in 0..19 {
            engine.deal_contact_damage(0, TICK_SECONDS);
        }
        assert_eq!(engine.player.view.hp, start_hp - 2);

        // The check that crosses the 1-second mark applies again.
        engine.deal_contact_damage(0, TICK_SECONDS);
        assert_eq!(engine.player.view.hp, start_hp - 4);
    }

    #[test]
    fn slain_slime_splits_into_two_larger_level_children() {
        let mut engine = open_room_engine(21);
        let slime = engine.make_slime(200.0, 200.0, 64.0, 1);
        engine.monsters.push(slime);

        engine.damage_monster(0, 999);
        engine.reap_dead_monsters();

        assert_eq!(engine.monsters.len(), 2);
        for child in &engine.monsters {
            assert_eq!(child.view.kind, MonsterKind::Slime);
            assert_eq!(child.view.level, 2);
            assert!((child.view.width - 64.0 * SLIME_SPLIT_SCALE).abs() < 1e-3);
            assert_eq!(child.view.x, 200.0);
            assert_eq!(child.view.y, 200.0);
            assert!(child.view.hp > 0);
        }
    }

    #[test]
    fn max_level_slime_leaves_no_children() {
        let mut engine = open_room_engine(22);
        let slime = engine.make_slime(200.0, 200.0, 31.0, SLIME_MAX_LEVEL);
        engine.monsters.push(slime);

        engine.damage_monster(0, 999);
        engine.reap_dead_monsters();
        assert!(engine.monsters.is_empty());
    }

    #[test]
    fn monster_at_zero_health_is_removed_within_the_same_step() {
        let mut engine = open_room_engine(23);
        // In melee range of the player center, weak enough to die to one hit.
        let mut ghost = engine.make_ghost(60.0, 30.0);
        ghost.view.hp = 5;
        engine.monsters.push(ghost);

        engine.step(&press_melee(), TICK_SECONDS);
        assert_eq!(engine.monster_count(), 0);
        assert_eq!(engine.build_summary().kills, 1);
    }

    #[test]
    fn follower_survives_losing_its_leader() {
        let mut engine = open_room_engine(31);
        let leader = engine.make_goblin(300.0, 300.0, true, None);
        let leader_id = leader.view.id.clone();
        engine.monsters.push(leader);
        let follower = engine.make_goblin(380.0, 300.0, false, Some(leader_id));
        engine.monsters.push(follower);

        engine.damage_monster(0, 999);
        engine.reap_dead_monsters();
        assert_eq!(engine.monsters.len(), 1);

        engine.update_monsters(TICK_SECONDS);
        assert!(engine.monsters[0].leader_id.is_none());
        assert!(engine.monsters[0].view.hp > 0);
    }

    #[test]
    fn distant_follower_closes_in_on_its_leader() {
        let mut engine = open_room_engine(32);
        let leader = engine.make_goblin(350.0, 344.0, true, None);
        let leader_id = leader.view.id.clone();
        engine.monsters.push(leader);
        let follower = engine.make_goblin(220.0, 344.0, false, Some(leader_id));
        engine.monsters.push(follower);

        engine.update_monsters(TICK_SECONDS);
        assert!(engine.monsters[1].view.x > 220.0);
        assert_eq!(engine.monsters[1].view.state, MonsterState::Chase);
    }

    #[test]
    fn ghost_walks_straight_through_walls() {
        let mut engine = open_room_engine(41);
        let ghost = engine.make_ghost(engine.player.view.x, engine.player.view.y);
        engine.monsters.push(ghost);
        engine.monsters[0].roam_dir = Vec2 { x: -1.0, y: -1.0 };
        engine.monsters[0].roam_timer = 60.0;

        for _ in 0..10 {
            engine.update_monsters(TICK_SECONDS);
        }

        let view = &engine.monsters[0].view;
        assert!(view.x < TILE_SIZE);
        assert!(view.y < TILE_SIZE);
        // It is sitting inside the boundary wall and does not care.
        assert!(engine.world.hits_wall(view.x, view.y, view.width, view.height));
    }

    #[test]
    fn melee_hits_only_monsters_inside_the_radius() {
        let mut engine = open_room_engine(51);
        let near = engine.make_slime(60.0, 30.0, 64.0, 1);
        engine.monsters.push(near);
        let far = engine.make_slime(200.0, 200.0, 64.0, 1);
        engine.monsters.push(far);

        engine.resolve_melee();
        assert_eq!(engine.monsters[0].view.hp, 30 - engine.config.melee_damage);
        assert_eq!(engine.monsters[1].view.hp, 30);
    }

    #[test]
    fn melee_cannot_retrigger_until_the_swing_finishes() {
        let mut engine = open_room_engine(52);
        let ghost = engine.make_ghost(60.0, 30.0);
        engine.monsters.push(ghost);

        engine.step(&press_melee(), TICK_SECONDS);
        assert_eq!(engine.monsters[0].view.hp, 20);
        assert_eq!(engine.player.view.attack, Some(AttackKind::Melee));

        // Held input during the running swing does nothing.
        engine.step(&press_melee(), TICK_SECONDS);
        assert_eq!(engine.monsters[0].view.hp, 20);

        // Let the one-shot finish, then swing again: the ghost dies.
        for _ in 0..20 {
            engine.step(&idle(), TICK_SECONDS);
        }
        assert_eq!(engine.player.view.attack, None);
        engine.monsters[0].view.x = 60.0;
        engine.monsters[0].view.y = 30.0;
        engine.step(&press_melee(), TICK_SECONDS);
        assert_eq!(engine.monster_count(), 0);
    }

    #[test]
    fn melee_wins_when_both_attacks_are_requested() {
        let mut engine = open_room_engine(53);
        let input = InputState {
            melee: true,
            shoot: true,
            ..InputState::default()
        };
        engine.step(&input, TICK_SECONDS);
        assert_eq!(engine.player.view.attack, Some(AttackKind::Melee));
        assert!(engine.projectiles.is_empty());
    }

    #[test]
    fn movement_keeps_running_during_an_attack() {
        let mut engine = open_room_engine(54);
        let input = InputState {
            right: true,
            melee: true,
            ..InputState::default()
        };
        engine.step(&input, TICK_SECONDS);
        assert!(engine.player.view.x > TILE_SIZE);
        assert_eq!(engine.player.view.attack, Some(AttackKind::Melee));
    }

    #[test]
    fn projectile_damages_the_first_monster_and_stops() {
        let mut engine = open_room_engine(61);
        let slime = engine.make_slime(150.0, 32.0, 64.0, 1);
        engine.monsters.push(slime);

        let shoot = InputState {
            shoot: true,
            ..InputState::default()
        };
        engine.step(&shoot, TICK_SECONDS);
        assert_eq!(engine.projectiles.len(), 1);

        for _ in 0..10 {
            engine.step(&idle(), TICK_SECONDS);
        }
        assert!(engine.projectiles.is_empty());
        assert_eq!(engine.monsters.len(), 1);
        // Exactly one hit even though the projectile overlapped for a while.
        assert_eq!(engine.monsters[0].view.hp, 30 - RANGED_DAMAGE);
    }

    #[test]
    fn projectile_dies_on_wall_contact() {
        let mut engine = open_room_engine(62);
        let left = InputState {
            left: true,
            ..InputState::default()
        };
        // Face the boundary wall, then fire into it.
        engine.step(&left, TICK_SECONDS);
        assert_eq!(engine.player.view.facing, Facing::Left);

        let shoot = InputState {
            shoot: true,
            ..InputState::default()
        };
        engine.step(&shoot, TICK_SECONDS);
        assert!(engine.projectiles.is_empty());
    }

    #[test]
    fn projectile_expires_past_its_range() {
        let mut engine = open_room_engine(63);
        let shoot = InputState {
            shoot: true,
            ..InputState::default()
        };
        engine.step(&shoot, TICK_SECONDS);
        assert_eq!(engine.projectiles.len(), 1);
        engine.projectiles[0].range = 30.0;

        engine.step(&idle(), TICK_SECONDS);
        assert_eq!(engine.projectiles.len(), 1);
        engine.step(&idle(), TICK_SECONDS);
        assert!(engine.projectiles.is_empty());
    }

    #[test]
    fn missing_animation_entry_falls_back_to_placeholder_frame() {
        let mut engine = open_room_engine(71);
        engine.player.locomotion.clear();

        engine.step(&idle(), TICK_SECONDS);
        assert_eq!(engine.player.view.frame, 0);
        engine.step(&press_right(), TICK_SECONDS);
        assert_eq!(engine.player.view.frame, 0);
    }

    #[test]
    fn reaching_the_win_area_ends_the_game() {
        let mut engine = open_room_engine(81);
        engine.player.view.x = engine.win_area.x;
        engine.player.view.y = engine.win_area.y;

        engine.step(&idle(), TICK_SECONDS);
        assert_eq!(engine.status(), GameStatus::Won);

        let tick = engine.tick_counter;
        engine.step(&idle(), TICK_SECONDS);
        assert_eq!(engine.tick_counter, tick);
    }

    #[test]
    fn player_death_ends_the_game() {
        let mut engine = open_room_engine(82);
        engine.player.view.hp = 0;
        engine.step(&idle(), TICK_SECONDS);
        assert_eq!(engine.status(), GameStatus::Lost);
    }

    #[test]
    fn impossible_spawns_are_skipped_after_bounded_retries() {
        // A 1-tile room cannot hold a 64px slime.
        let config = LevelConfig {
            slime_count: 3,
            ..empty_config(1, 1, 1)
        };
        let mut engine = GameEngine::new(config, 91);

        assert_eq!(engine.monster_count(), 0);
        assert_eq!(engine.build_summary().spawn_skips, 3);
        let snapshot = engine.build_snapshot(true);
        let skips = snapshot
            .events
            .iter()
            .filter(|event| matches!(event, RuntimeEvent::SpawnSkipped { .. }))
            .count();
        assert_eq!(skips, 3);
    }

    #[test]
    fn snapshot_drains_events_only_when_asked() {
        let config = LevelConfig {
            slime_count: 1,
            ..empty_config(1, 1, 1)
        };
        let mut engine = GameEngine::new(config, 92);

        let untouched = engine.build_snapshot(false);
        assert!(untouched.events.is_empty());

        let first = engine.build_snapshot(true);
        assert_eq!(first.events.len(), 1);
        let second = engine.build_snapshot(true);
        assert!(second.events.is_empty());
    }

    #[test]
    fn summary_tracks_kills_and_splits() {
        let mut engine = open_room_engine(93);
        let slime = engine.make_slime(200.0, 200.0, 64.0, 1);
        engine.monsters.push(slime);

        engine.damage_monster(0, 50);
        engine.reap_dead_monsters();

        let summary = engine.build_summary();
        assert_eq!(summary.kills, 1);
        assert_eq!(summary.slime_splits, 1);
        assert_eq!(summary.damage_dealt, 50);
        assert_eq!(summary.monsters_remaining, 2);
    }

    #[test]
    fn world_view_describes_the_level() {
        let engine = open_room_engine(94);
        let view = engine.get_world_view();
        assert_eq!(view.rows, engine.world.rows());
        assert_eq!(view.tiles.len(), view.rows as usize);
        assert_eq!(view.player_spawn, Vec2 { x: 32.0, y: 32.0 });
        assert_eq!(view.win_area.x, (view.cols - 2) as f32 * TILE_SIZE);
        assert_eq!(view.win_area.y, (view.rows - 2) as f32 * TILE_SIZE);
    }

    #[test]
    fn fog_opens_around_the_player_as_they_move() {
        let mut engine = GameEngine::new(empty_config(10, 10, 4), 95);
        assert!(engine.fog().is_revealed(1, 1));
        let before = engine.fog().revealed_count();

        for _ in 0..40 {
            engine.step(&press_right(), TICK_SECONDS);
        }
        assert!(engine.fog().revealed_count() >= before);
        let col = (engine.player.view.x / TILE_SIZE) as i32;
        assert!(engine.fog().is_revealed(1, col));
    }
}
