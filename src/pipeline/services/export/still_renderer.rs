use super::authoring::{SceneObject, SceneSetup};
use image::{Rgb, RgbImage};

const AMBIENT: f64 = 0.3;
const NEAR_PLANE: f64 = 1e-3;

/// Minimal perspective rasterizer drawing each object as a shaded disc.
pub struct StillRenderer {
    width: u32,
    height: u32,
}

struct Projected<'a> {
    object: &'a SceneObject,
    center: (f64, f64),
    radius: f64,
    depth: f64,
}

impl StillRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn render(&self, setup: &SceneSetup, objects: &[SceneObject]) -> RgbImage {
        let mut image = RgbImage::from_pixel(self.width, self.height, Rgb(setup.lighting.background));

        let mut projected: Vec<Projected> = objects
            .iter()
            .filter_map(|object| self.project(setup, object))
            .collect();
        // Painter's algorithm: farthest first.
        projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        for item in &projected {
            self.draw_disc(&mut image, item);
        }
        image
    }

    fn project<'a>(&self, setup: &SceneSetup, object: &'a SceneObject) -> Option<Projected<'a>> {
        let camera = &setup.camera;
        let forward = normalize(sub(camera.target, camera.location))?;
        let right = normalize(cross(forward, [0.0, 0.0, 1.0]))
            .or_else(|| normalize(cross(forward, [0.0, 1.0, 0.0])))?;
        let up = cross(right, forward);

        let relative = sub(object.location, camera.location);
        let depth = dot(relative, forward);
        if depth <= NEAR_PLANE {
            return None;
        }

        let focal_px = self.width as f64 * camera.focal_length / camera.sensor_width;
        let x = self.width as f64 / 2.0 + focal_px * dot(relative, right) / depth;
        let y = self.height as f64 / 2.0 - focal_px * dot(relative, up) / depth;
        // Dimensions are diameters.
        let radius = (focal_px * object.dimensions[0] / 2.0 / depth).max(0.5);

        Some(Projected {
            object,
            center: (x, y),
            radius,
            depth,
        })
    }

    fn draw_disc(&self, image: &mut RgbImage, item: &Projected) {
        let (cx, cy) = item.center;
        let r = item.radius;
        let x0 = (cx - r).floor().max(0.0) as i64;
        let y0 = (cy - r).floor().max(0.0) as i64;
        let x1 = ((cx + r).ceil() as i64).min(self.width as i64 - 1);
        let y1 = ((cy + r).ceil() as i64).min(self.height as i64 - 1);

        let material = &item.object.material;
        let alpha = if material.use_transparency {
            material.alpha
        } else {
            1.0
        };

        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = (px as f64 + 0.5 - cx) / r;
                let dy = (py as f64 + 0.5 - cy) / r;
                let d2 = dx * dx + dy * dy;
                if d2 > 1.0 {
                    continue;
                }
                let shade = AMBIENT + (1.0 - AMBIENT) * (1.0 - d2).sqrt();
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                for (channel, diffuse) in pixel.0.iter_mut().zip(material.diffuse_color) {
                    let lit = (diffuse * shade).clamp(0.0, 1.0) * 255.0;
                    let blended = alpha * lit + (1.0 - alpha) * *channel as f64;
                    *channel = blended.round() as u8;
                }
            }
        }
    }
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f64; 3]) -> Option<[f64; 3]> {
    let len = dot(v, v).sqrt();
    (len > f64::EPSILON).then(|| v.map(|c| c / len))
}
