use super::utils::{aabb_overlap, distance};
use super::{GameEngine, ProjectileInternal};
use crate::animation::{AnimationClip, SpriteRegion};
use crate::constants::{
    MELEE_RADIUS, PROJECTILE_HEIGHT, PROJECTILE_RANGE, PROJECTILE_SPEED, PROJECTILE_WIDTH,
    RANGED_DAMAGE,
};
use crate::types::{Facing, ProjectileView};

impl GameEngine {
    // Instantaneous circular hit centered on the player; damage amount comes
    // from the difficulty config.
    pub(super) fn resolve_melee(&mut self) {
        let center_x = self.player.view.x + self.player.view.width / 2.0;
        let center_y = self.player.view.y + self.player.view.height / 2.0;
        let damage = self.config.melee_damage;

        for idx in 0..self.monsters.len() {
            let monster = &self.monsters[idx].view;
            let monster_cx = monster.x + monster.width / 2.0;
            let monster_cy = monster.y + monster.height / 2.0;
            if distance(center_x, center_y, monster_cx, monster_cy) < MELEE_RADIUS {
                self.damage_monster(idx, damage);
            }
        }
    }

    pub(super) fn damage_monster(&mut self, idx: usize, amount: i32) {
        if self.monsters[idx].view.hp <= 0 {
            return;
        }
        self.monsters[idx].view.hp -= amount;
        self.stats.damage_dealt += amount;
    }

    pub(super) fn spawn_projectile(&mut self) {
        let id = self.make_id("beam");
        let facing = self.player.view.facing;
        let x = match facing {
            Facing::Right => self.player.view.x + self.player.view.width,
            Facing::Left => self.player.view.x - PROJECTILE_WIDTH,
        };
        let y = self.player.view.y + self.player.view.height / 2.0 - PROJECTILE_HEIGHT / 2.0;

        self.projectiles.push(ProjectileInternal {
            view: ProjectileView {
                id,
                x,
                y,
                width: PROJECTILE_WIDTH,
                height: PROJECTILE_HEIGHT,
                facing,
                frame: 0,
            },
            speed: PROJECTILE_SPEED,
            traveled: 0.0,
            range: PROJECTILE_RANGE,
            damage: RANGED_DAMAGE,
            anim: AnimationClip::new(4, 0.1, true, false, SpriteRegion::new(0.0, 0.0, 35.0, 30.0)),
        });
    }

    // Advance each projectile along its fixed direction; a projectile dies on
    // wall contact, on running out its range, or on its first monster hit.
    pub(super) fn update_projectiles(&mut self, dt: f32) {
        let mut idx = 0;
        'projectiles: while idx < self.projectiles.len() {
            let step = match self.projectiles[idx].view.facing {
                Facing::Right => self.projectiles[idx].speed * dt,
                Facing::Left => -self.projectiles[idx].speed * dt,
            };

            let view = &self.projectiles[idx].view;
            let new_x = view.x + step;
            if self.world.hits_wall(new_x, view.y, view.width, view.height) {
                self.projectiles.remove(idx);
                continue;
            }
            self.projectiles[idx].view.x = new_x;
            self.projectiles[idx].traveled += step.abs();
            if self.projectiles[idx].traveled > self.projectiles[idx].range {
                self.projectiles.remove(idx);
                continue;
            }

            self.projectiles[idx].anim.advance(dt);
            self.projectiles[idx].view.frame = self.projectiles[idx].anim.current_frame();

            for monster_idx in 0..self.monsters.len() {
                if self.monsters[monster_idx].view.hp <= 0 {
                    continue;
                }
                let projectile = &self.projectiles[idx].view;
                let monster = &self.monsters[monster_idx].view;
                if aabb_overlap(
                    projectile.x,
                    projectile.y,
                    projectile.width,
                    projectile.height,
                    monster.x,
                    monster.y,
                    monster.width,
                    monster.height,
                ) {
                    let damage = self.projectiles[idx].damage;
                    self.damage_monster(monster_idx, damage);
                    self.projectiles.remove(idx);
                    continue 'projectiles;
                }
            }

            idx += 1;
        }
    }
}
