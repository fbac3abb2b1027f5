use super::utils::{aabb_overlap, distance};
use super::GameEngine;
use crate::constants::{
    DAMAGE_COOLDOWN, GHOST_DIR_INTERVAL_MAX, GHOST_HOMING_CHANCE, GOBLIN_ROAM_SPEED_FACTOR,
    MIN_LEADER_DISTANCE, ROAM_INTERVAL_MAX, ROAM_INTERVAL_MIN,
};
use crate::types::{Facing, MonsterKind, MonsterState, RuntimeEvent};

impl GameEngine {
    pub(super) fn update_monsters(&mut self, dt: f32) {
        for idx in 0..self.monsters.len() {
            match self.monsters[idx].view.kind {
                MonsterKind::Goblin => self.update_goblin(idx, dt),
                MonsterKind::Slime => self.update_slime(idx, dt),
                MonsterKind::Ghost => self.update_ghost(idx, dt),
            }

            self.monsters[idx].view.x = self.monsters[idx].view.x.floor();
            self.monsters[idx].view.y = self.monsters[idx].view.y.floor();

            if let Some(anim) = self.monsters[idx].anim.as_mut() {
                anim.advance(dt);
            }
            self.monsters[idx].view.frame = self.monsters[idx]
                .anim
                .as_ref()
                .map(|anim| anim.current_frame())
                .unwrap_or(0);

            self.deal_contact_damage(idx, dt);
        }
    }

    fn update_goblin(&mut self, idx: usize, dt: f32) {
        let monster = &self.monsters[idx];
        let player_dist = distance(
            monster.view.x,
            monster.view.y,
            self.player.view.x,
            self.player.view.y,
        );
        let player_x = self.player.view.x;
        let player_y = self.player.view.y;

        if monster.view.leader {
            if player_dist < monster.chase_radius {
                self.chase(idx, player_x, player_y, dt);
            } else {
                self.goblin_roam(idx, dt);
            }
            return;
        }

        if let Some(leader_id) = self.monsters[idx].leader_id.clone() {
            let leader_pos = self
                .monsters
                .iter()
                .find(|other| other.view.id == leader_id)
                .map(|leader| (leader.view.x, leader.view.y));
            match leader_pos {
                Some((leader_x, leader_y)) => {
                    let leader_dist = distance(
                        self.monsters[idx].view.x,
                        self.monsters[idx].view.y,
                        leader_x,
                        leader_y,
                    );
                    if leader_dist > MIN_LEADER_DISTANCE {
                        self.chase(idx, leader_x, leader_y, dt);
                    } else if player_dist < self.monsters[idx].chase_radius {
                        self.chase(idx, player_x, player_y, dt);
                    } else {
                        self.goblin_roam(idx, dt);
                    }
                    return;
                }
                None => {
                    // Leader is gone; drop the handle and fall through to
                    // independent behavior.
                    self.monsters[idx].leader_id = None;
                }
            }
        }

        if player_dist < self.monsters[idx].chase_radius {
            self.chase(idx, player_x, player_y, dt);
        } else {
            self.goblin_roam(idx, dt);
        }
    }

    fn update_slime(&mut self, idx: usize, dt: f32) {
        self.monsters[idx].roam_timer -= dt;
        if self.monsters[idx].roam_timer <= 0.0 {
            self.monsters[idx].roam_dir.x = self.rng.sign();
            self.monsters[idx].roam_dir.y = self.rng.sign();
            self.monsters[idx].roam_timer = self
                .rng
                .f32_range(ROAM_INTERVAL_MIN, ROAM_INTERVAL_MAX);
        }

        let player_dist = distance(
            self.monsters[idx].view.x,
            self.monsters[idx].view.y,
            self.player.view.x,
            self.player.view.y,
        );
        if player_dist < self.monsters[idx].chase_radius {
            let player_x = self.player.view.x;
            let player_y = self.player.view.y;
            self.chase(idx, player_x, player_y, dt);
        } else {
            // Slimes drift at full speed and simply stall on a blocked axis.
            self.monsters[idx].view.state = MonsterState::Roam;
            let speed = self.monsters[idx].speed;
            let step_x = self.monsters[idx].roam_dir.x * speed * dt;
            let step_y = self.monsters[idx].roam_dir.y * speed * dt;
            self.try_move_monster(idx, step_x, step_y);
        }
    }

    fn update_ghost(&mut self, idx: usize, dt: f32) {
        self.monsters[idx].roam_timer -= dt;
        if self.monsters[idx].roam_timer <= 0.0 {
            self.monsters[idx].roam_dir.x = self.rng.sign();
            self.monsters[idx].roam_dir.y = self.rng.sign();
            self.monsters[idx].roam_timer = self.rng.f32_range(0.0, GHOST_DIR_INTERVAL_MAX);
        }

        let speed = self.monsters[idx].speed;
        let (step_x, step_y) = if self.rng.bool(GHOST_HOMING_CHANCE) {
            self.monsters[idx].view.state = MonsterState::Chase;
            let dx = self.player.view.x - self.monsters[idx].view.x;
            let dy = self.player.view.y - self.monsters[idx].view.y;
            let dist = distance(0.0, 0.0, dx, dy).max(1.0);
            (dx / dist * speed * dt, dy / dist * speed * dt)
        } else {
            self.monsters[idx].view.state = MonsterState::Roam;
            (
                self.monsters[idx].roam_dir.x * speed * dt,
                self.monsters[idx].roam_dir.y * speed * dt,
            )
        };

        // The one species the tile world does not apply to.
        self.monsters[idx].view.x += step_x;
        self.monsters[idx].view.y += step_y;
        self.face_by_step(idx, step_x);
    }

    // Roam at half speed along the rolled direction; a blocked axis inverts
    // its sign so the goblin bounces instead of stopping dead.
    fn goblin_roam(&mut self, idx: usize, dt: f32) {
        self.monsters[idx].view.state = MonsterState::Roam;
        let roam_speed = self.monsters[idx].speed * GOBLIN_ROAM_SPEED_FACTOR;

        let step_x = self.monsters[idx].roam_dir.x * roam_speed * dt;
        self.face_by_step(idx, step_x);
        let view = &self.monsters[idx].view;
        let new_x = view.x + step_x;
        if !self.world.hits_wall(new_x, view.y, view.width, view.height) {
            self.monsters[idx].view.x = new_x;
        } else {
            self.monsters[idx].roam_dir.x = -self.monsters[idx].roam_dir.x;
        }

        let step_y = self.monsters[idx].roam_dir.y * roam_speed * dt;
        let view = &self.monsters[idx].view;
        let new_y = view.y + step_y;
        if !self.world.hits_wall(view.x, new_y, view.width, view.height) {
            self.monsters[idx].view.y = new_y;
        } else {
            self.monsters[idx].roam_dir.y = -self.monsters[idx].roam_dir.y;
        }

        self.monsters[idx].roam_timer -= dt;
        if self.monsters[idx].roam_timer <= 0.0 {
            self.monsters[idx].roam_dir.x = self.rng.sign();
            self.monsters[idx].roam_dir.y = self.rng.sign();
            self.monsters[idx].roam_timer = self
                .rng
                .f32_range(ROAM_INTERVAL_MIN, ROAM_INTERVAL_MAX);
        }
    }

    // Normalized pursuit toward the target at chase speed, axis-separated.
    fn chase(&mut self, idx: usize, target_x: f32, target_y: f32, dt: f32) {
        self.monsters[idx].view.state = MonsterState::Chase;
        let view = &self.monsters[idx].view;
        let dx = target_x - view.x;
        let dy = target_y - view.y;
        let dist = distance(0.0, 0.0, dx, dy).max(1.0);
        let speed = self.monsters[idx].speed * self.monsters[idx].chase_speed_multiplier;

        let step_x = dx / dist * speed * dt;
        let step_y = dy / dist * speed * dt;
        self.face_by_step(idx, step_x);
        self.try_move_monster(idx, step_x, step_y);
    }

    fn try_move_monster(&mut self, idx: usize, step_x: f32, step_y: f32) {
        let view = &self.monsters[idx].view;
        let new_x = view.x + step_x;
        if !self.world.hits_wall(new_x, view.y, view.width, view.height) {
            self.monsters[idx].view.x = new_x;
        }
        let view = &self.monsters[idx].view;
        let new_y = view.y + step_y;
        if !self.world.hits_wall(view.x, new_y, view.width, view.height) {
            self.monsters[idx].view.y = new_y;
        }
    }

    fn face_by_step(&mut self, idx: usize, step_x: f32) {
        if step_x < 0.0 {
            self.monsters[idx].view.facing = Facing::Left;
        } else if step_x > 0.0 {
            self.monsters[idx].view.facing = Facing::Right;
        }
    }

    // Contact damage with the mandatory debounce: only when the boxes overlap
    // and the per-monster timer has run out.
    pub(super) fn deal_contact_damage(&mut self, idx: usize, dt: f32) {
        if self.monsters[idx].damage_timer > 0.0 {
            self.monsters[idx].damage_timer -= dt;
        }

        let monster = &self.monsters[idx];
        let player = &self.player.view;
        let overlapping = aabb_overlap(
            monster.view.x,
            monster.view.y,
            monster.view.width,
            monster.view.height,
            player.x,
            player.y,
            player.width,
            player.height,
        );
        if !overlapping || self.monsters[idx].damage_timer > 0.0 {
            return;
        }

        let amount = self.monsters[idx].damage;
        let by = self.monsters[idx].view.id.clone();
        self.player.view.hp -= amount;
        self.monsters[idx].damage_timer = DAMAGE_COOLDOWN;
        self.stats.damage_taken += amount;
        self.events.push(RuntimeEvent::PlayerDamaged { amount, by });
    }
}
