use super::{GameEngine, MonsterInternal};
use crate::animation::{AnimationClip, SpriteRegion};
use crate::constants::{
    ghost_stats, goblin_stats, slime_stats, GOBLIN_CHASE_RADIUS, GOBLIN_CHASE_SPEED_MULTIPLIER,
    GOBLIN_GROUP_FOLLOWERS, GOBLIN_GROUP_SPREAD, SLIME_CHASE_RADIUS,
    SLIME_CHASE_SPEED_MULTIPLIER, SLIME_SIZE, SPAWN_MAX_TRIES,
};
use crate::types::{Facing, LevelConfig, MonsterKind, MonsterState, MonsterView, RuntimeEvent, Vec2};

impl GameEngine {
    pub(super) fn spawn_monsters(&mut self, config: &LevelConfig) {
        for _ in 0..config.goblin_group_count {
            self.spawn_goblin_group();
        }
        for _ in 0..config.slime_count {
            match self.find_spawn_tile(SLIME_SIZE, SLIME_SIZE) {
                Some((x, y)) => {
                    let slime = self.make_slime(x, y, SLIME_SIZE, 1);
                    self.monsters.push(slime);
                }
                None => self.skip_spawn(MonsterKind::Slime),
            }
        }
        let ghost = ghost_stats();
        for _ in 0..config.ghost_count {
            match self.find_spawn_tile(ghost.width, ghost.height) {
                Some((x, y)) => {
                    let ghost = self.make_ghost(x, y);
                    self.monsters.push(ghost);
                }
                None => self.skip_spawn(MonsterKind::Ghost),
            }
        }
    }

    // One leader plus a handful of followers scattered around the same tile.
    fn spawn_goblin_group(&mut self) {
        let leader_stats = goblin_stats(true);
        let Some((x, y)) = self.find_spawn_tile(leader_stats.width, leader_stats.height) else {
            self.skip_spawn(MonsterKind::Goblin);
            return;
        };

        let leader = self.make_goblin(x, y, true, None);
        let leader_id = leader.view.id.clone();
        self.monsters.push(leader);

        for _ in 0..GOBLIN_GROUP_FOLLOWERS {
            let follower_x = x + self.rng.f32_range(0.0, GOBLIN_GROUP_SPREAD);
            let follower_y = y + self.rng.f32_range(0.0, GOBLIN_GROUP_SPREAD);
            let follower = self.make_goblin(follower_x, follower_y, false, Some(leader_id.clone()));
            self.monsters.push(follower);
        }
    }

    // Bounded random placement: a floor tile whose surroundings fit the whole
    // box. Gives up after the bounded tries instead of looping forever.
    fn find_spawn_tile(&mut self, width: f32, height: f32) -> Option<(f32, f32)> {
        let tile = self.world.tile_size();
        for _ in 0..SPAWN_MAX_TRIES {
            let row = self.rng.int(0, self.world.rows() - 1);
            let col = self.rng.int(0, self.world.cols() - 1);
            if self.world.is_blocked(row, col) {
                continue;
            }
            let x = col as f32 * tile;
            let y = row as f32 * tile;
            if self.world.hits_wall(x, y, width, height) {
                continue;
            }
            return Some((x, y));
        }
        None
    }

    fn skip_spawn(&mut self, kind: MonsterKind) {
        self.stats.spawn_skips += 1;
        self.events.push(RuntimeEvent::SpawnSkipped { kind });
    }

    pub(super) fn make_goblin(
        &mut self,
        x: f32,
        y: f32,
        leader: bool,
        leader_id: Option<String>,
    ) -> MonsterInternal {
        let stats = goblin_stats(leader);
        let region = if leader {
            SpriteRegion::new(0.0, 350.0, 210.0, 115.0)
        } else {
            SpriteRegion::new(0.0, 190.0, 170.0, 88.0)
        };
        let id = self.make_id("goblin");
        MonsterInternal {
            view: MonsterView {
                id,
                kind: MonsterKind::Goblin,
                x,
                y,
                width: stats.width,
                height: stats.height,
                facing: Facing::Right,
                state: MonsterState::Roam,
                frame: 0,
                hp: stats.max_health,
                max_hp: stats.max_health,
                level: 0,
                leader,
            },
            speed: stats.speed,
            damage: stats.damage,
            chase_radius: GOBLIN_CHASE_RADIUS,
            chase_speed_multiplier: GOBLIN_CHASE_SPEED_MULTIPLIER,
            roam_dir: Vec2 {
                x: self.rng.sign(),
                y: self.rng.sign(),
            },
            roam_timer: 0.0,
            damage_timer: 0.0,
            leader_id,
            anim: Some(AnimationClip::new(5, 0.15, true, false, region)),
        }
    }

    pub(super) fn make_slime(&mut self, x: f32, y: f32, size: f32, level: i32) -> MonsterInternal {
        let stats = slime_stats(level, size);
        let id = self.make_id("slime");
        MonsterInternal {
            view: MonsterView {
                id,
                kind: MonsterKind::Slime,
                x,
                y,
                width: stats.width,
                height: stats.height,
                facing: Facing::Right,
                state: MonsterState::Roam,
                frame: 0,
                hp: stats.max_health,
                max_hp: stats.max_health,
                level,
                leader: false,
            },
            speed: stats.speed,
            damage: stats.damage,
            chase_radius: SLIME_CHASE_RADIUS,
            chase_speed_multiplier: SLIME_CHASE_SPEED_MULTIPLIER,
            roam_dir: Vec2 {
                x: self.rng.sign(),
                y: self.rng.sign(),
            },
            roam_timer: 0.0,
            damage_timer: 0.0,
            leader_id: None,
            anim: Some(AnimationClip::new(
                7,
                0.1,
                true,
                false,
                SpriteRegion::new(0.0, 380.0, 138.0, 80.0),
            )),
        }
    }

    pub(super) fn make_ghost(&mut self, x: f32, y: f32) -> MonsterInternal {
        let stats = ghost_stats();
        let id = self.make_id("ghost");
        MonsterInternal {
            view: MonsterView {
                id,
                kind: MonsterKind::Ghost,
                x,
                y,
                width: stats.width,
                height: stats.height,
                facing: Facing::Right,
                state: MonsterState::Roam,
                frame: 0,
                hp: stats.max_health,
                max_hp: stats.max_health,
                level: 0,
                leader: false,
            },
            speed: stats.speed,
            damage: stats.damage,
            chase_radius: 0.0,
            chase_speed_multiplier: 1.0,
            roam_dir: Vec2 {
                x: self.rng.sign(),
                y: self.rng.sign(),
            },
            roam_timer: 0.0,
            damage_timer: 0.0,
            leader_id: None,
            // No sheet for ghosts; the render side gets placeholder frame 0.
            anim: None,
        }
    }
}
