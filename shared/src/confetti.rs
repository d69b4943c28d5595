use rand::Rng;

// Units are pixels and milliseconds.
const GRAVITY: f64 = 0.0009;
const DRAG: f64 = 0.9985;
const FADE_PER_MS: f64 = 1.0 / 2600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub angle: f64,
    pub spin: f64,
    pub width: f64,
    pub height: f64,
    /// Index into the caller's palette
    pub color: usize,
    /// 1.0 when spawned, removed at 0.0
    pub life: f64,
}

/// One celebratory burst. Platform-agnostic: the caller steps it once per
/// animation frame and draws `particles()` however it likes.
#[derive(Debug, Clone, Default)]
pub struct ConfettiBurst {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ConfettiBurst {
    /// Launches `count` particles upwards from the bottom third of a
    /// `width` x `height` area, fanning out from the center.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        width: f64,
        height: f64,
        palette_len: usize,
    ) -> Self {
        let palette_len = palette_len.max(1);
        let particles = (0..count)
            .map(|_| {
                let heading = rng.gen_range(-2.4..-0.74_f64);
                let speed = rng.gen_range(0.45..1.1);
                Particle {
                    x: width / 2.0 + rng.gen_range(-0.15..0.15) * width,
                    y: height * rng.gen_range(0.6..0.75),
                    vx: heading.cos() * speed,
                    vy: heading.sin() * speed,
                    angle: rng.gen_range(0.0..std::f64::consts::TAU),
                    spin: rng.gen_range(-0.012..0.012),
                    width: rng.gen_range(5.0..10.0),
                    height: rng.gen_range(3.0..6.0),
                    color: rng.gen_range(0..palette_len),
                    life: 1.0,
                }
            })
            .collect();

        Self {
            particles,
            width,
            height,
        }
    }

    pub fn step(&mut self, dt_ms: f64) {
        let dt = dt_ms.clamp(0.0, 100.0);
        let drag = DRAG.powf(dt);
        for p in self.particles.iter_mut() {
            p.vy += GRAVITY * dt;
            p.vx *= drag;
            p.vy *= drag;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.angle += p.spin * dt;
            p.life -= FADE_PER_MS * dt;
        }

        let (width, height) = (self.width, self.height);
        self.particles.retain(|p| {
            p.life > 0.0 && p.y < height + p.width && p.x > -p.width && p.x < width + p.width
        });
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn burst() -> ConfettiBurst {
        ConfettiBurst::spawn(&mut StdRng::seed_from_u64(21), 50, 400.0, 400.0, 6)
    }

    #[test]
    fn spawns_requested_particles_inside_the_area() {
        let burst = burst();
        assert_eq!(burst.particles().len(), 50);
        for p in burst.particles() {
            assert!((0.0..=400.0).contains(&p.x));
            assert!(p.vy < 0.0, "particles launch upwards");
            assert!(p.color < 6);
        }
    }

    #[test]
    fn gravity_pulls_particles_back_down() {
        let mut burst = burst();
        let before: Vec<f64> = burst.particles().iter().map(|p| p.vy).collect();
        burst.step(16.0);
        for (p, vy) in burst.particles().iter().zip(before) {
            assert!(p.vy > vy * DRAG.powf(16.0));
        }
    }

    #[test]
    fn burst_finishes() {
        let mut burst = burst();
        for _ in 0..400 {
            burst.step(16.0);
        }
        assert!(burst.is_finished());
    }

    #[test]
    fn empty_palette_still_spawns() {
        let burst = ConfettiBurst::spawn(&mut StdRng::seed_from_u64(1), 3, 100.0, 100.0, 0);
        assert!(burst.particles().iter().all(|p| p.color == 0));
    }
}
