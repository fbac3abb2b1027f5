use crate::constants::CAMERA_MARGIN_RATIO;
use crate::types::{CameraView, Rect};

// Deadzone follow: the view moves only once the target pushes past the margin,
// then clamps to the map and floors to whole pixels.
#[derive(Clone, Debug)]
pub struct Camera {
    x: f32,
    y: f32,
    view_width: f32,
    view_height: f32,
    map_width: f32,
    map_height: f32,
}

impl Camera {
    pub fn new(view_width: f32, view_height: f32, map_width: f32, map_height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            view_width,
            view_height,
            map_width,
            map_height,
        }
    }

    pub fn update(&mut self, target: Rect) {
        let margin_x = self.view_width * CAMERA_MARGIN_RATIO;
        let margin_y = self.view_height * CAMERA_MARGIN_RATIO;

        let screen_x = target.x - self.x;
        let screen_y = target.y - self.y;

        if screen_x < margin_x {
            self.x = target.x - margin_x;
        } else if screen_x > self.view_width - margin_x - target.width {
            self.x = target.x - (self.view_width - margin_x - target.width);
        }

        if screen_y < margin_y {
            self.y = target.y - margin_y;
        } else if screen_y > self.view_height - margin_y - target.height {
            self.y = target.y - (self.view_height - margin_y - target.height);
        }

        self.x = self.x.clamp(0.0, (self.map_width - self.view_width).max(0.0));
        self.y = self.y.clamp(0.0, (self.map_height - self.view_height).max(0.0));

        self.x = self.x.floor();
        self.y = self.y.floor();
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            x: self.x as i32,
            y: self.y as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(x: f32, y: f32) -> Rect {
        Rect {
            x,
            y,
            width: 35.0,
            height: 30.0,
        }
    }

    fn camera() -> Camera {
        Camera::new(800.0, 600.0, 3200.0, 2400.0)
    }

    #[test]
    fn target_inside_deadzone_leaves_camera_still() {
        let mut cam = camera();
        cam.update(target(400.0, 300.0));
        let view = cam.view();
        assert_eq!((view.x, view.y), (0, 0));
    }

    #[test]
    fn target_past_right_margin_drags_camera() {
        let mut cam = camera();
        // margin = 320; right threshold = 800 - 320 - 35 = 445.
        cam.update(target(900.0, 300.0));
        assert_eq!(cam.view().x, 455);
        assert_eq!(cam.view().y, 0);
    }

    #[test]
    fn target_past_left_margin_drags_camera_back() {
        let mut cam = camera();
        cam.update(target(900.0, 300.0));
        cam.update(target(500.0, 300.0));
        assert_eq!(cam.view().x, 180);
    }

    #[test]
    fn camera_never_leaves_the_map() {
        let mut cam = camera();
        cam.update(target(3190.0, 2390.0));
        assert_eq!(cam.view().x, 2400);
        assert_eq!(cam.view().y, 1800);

        cam.update(target(0.0, 0.0));
        assert_eq!((cam.view().x, cam.view().y), (0, 0));
    }

    #[test]
    fn map_smaller_than_view_pins_camera_at_origin() {
        let mut cam = Camera::new(800.0, 600.0, 320.0, 320.0);
        cam.update(target(310.0, 310.0));
        assert_eq!((cam.view().x, cam.view().y), (0, 0));
    }

    #[test]
    fn camera_position_is_floored() {
        let mut cam = camera();
        cam.update(target(900.5, 300.0));
        assert_eq!(cam.view().x, 455);
    }
}
