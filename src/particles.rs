//! Decorative particle field behind the hero section.
//!
//! The pool size never changes: a particle that drifts out of the surface is
//! re-sampled in place. Pairs closer than [`LINK_DISTANCE`] are joined by a
//! line that fades with distance. The pairwise pass is quadratic, which is
//! fine at this pool size.

use rand::Rng;

pub const PARTICLE_COUNT: usize = 120;
pub const LINK_DISTANCE: f64 = 100.0;
pub const LINK_MAX_ALPHA: f64 = 0.06;
pub const LINK_WIDTH: f64 = 0.5;
pub const PARTICLE_RGB: (u8, u8, u8) = (0, 195, 255);

const SPEED_SPREAD: f64 = 0.3;
const RADIUS_MIN: f64 = 0.3;
const RADIUS_SPREAD: f64 = 1.5;
const ALPHA_MIN: f64 = 0.1;
const ALPHA_SPREAD: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub alpha: f64,
}

impl Particle {
    fn spawn(rng: &mut impl Rng, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: (rng.gen::<f64>() - 0.5) * SPEED_SPREAD,
            vy: (rng.gen::<f64>() - 0.5) * SPEED_SPREAD,
            radius: rng.gen::<f64>() * RADIUS_SPREAD + RADIUS_MIN,
            alpha: rng.gen::<f64>() * ALPHA_SPREAD + ALPHA_MIN,
        }
    }

    fn within(&self, width: f64, height: f64) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub alpha: f64,
}

/// 2D drawing backend. Colours are fixed; only opacity varies.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, alpha: f64);
    fn line(&mut self, link: &Link);
}

pub struct ParticleField<R> {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(width: f64, height: f64, mut rng: R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::spawn(&mut rng, width, height))
            .collect();

        Self {
            particles,
            width,
            height,
            rng,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advances one frame and returns how many particles were re-sampled.
    pub fn tick(&mut self) -> usize {
        let (width, height) = (self.width, self.height);
        let mut resets = 0;

        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;

            if !particle.within(width, height) {
                *particle = Particle::spawn(&mut self.rng, width, height);
                resets += 1;
            }
        }

        resets
    }

    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.particles
            .iter()
            .enumerate()
            .flat_map(move |(index, a)| {
                self.particles[index + 1..]
                    .iter()
                    .filter_map(move |b| link_between(a, b))
            })
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);
        for particle in &self.particles {
            surface.fill_circle(particle.x, particle.y, particle.radius, particle.alpha);
        }
        for link in self.links() {
            surface.line(&link);
        }
    }

    #[cfg(test)]
    fn particle_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }
}

fn link_between(a: &Particle, b: &Particle) -> Option<Link> {
    let distance = (a.x - b.x).hypot(a.y - b.y);
    if distance >= LINK_DISTANCE {
        return None;
    }

    Some(Link {
        from: (a.x, a.y),
        to: (b.x, b.y),
        alpha: LINK_MAX_ALPHA * (1.0 - distance / LINK_DISTANCE),
    })
}

pub fn rgba(alpha: f64) -> String {
    let (r, g, b) = PARTICLE_RGB;
    format!("rgba({r},{g},{b},{alpha:.3})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn field(width: f64, height: f64) -> ParticleField<SmallRng> {
        ParticleField::new(width, height, SmallRng::seed_from_u64(7))
    }

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        circles: usize,
        lines: Vec<Link>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _width: f64, _height: f64) {
            self.clears += 1;
        }

        fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _alpha: f64) {
            self.circles += 1;
        }

        fn line(&mut self, link: &Link) {
            self.lines.push(*link);
        }
    }

    #[test]
    fn spawned_particles_respect_ranges() {
        let field = field(800.0, 600.0);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);

        for p in field.particles() {
            assert!(p.within(800.0, 600.0));
            assert!((-0.15..=0.15).contains(&p.vx));
            assert!((-0.15..=0.15).contains(&p.vy));
            assert!((0.3..=1.8).contains(&p.radius));
            assert!((0.1..=0.6).contains(&p.alpha));
        }
    }

    #[test]
    fn escaped_particle_is_resampled_in_place() {
        let mut field = field(300.0, 200.0);
        let stray = field.particle_mut(5);
        stray.x = 299.99;
        stray.vx = 0.5;

        let resets = field.tick();

        assert!(resets >= 1);
        assert!(field.particles()[5].within(300.0, 200.0));
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
    }

    #[test]
    fn pool_size_survives_many_frames_and_resizes() {
        let mut field = field(640.0, 360.0);
        for frame in 0..2_000 {
            if frame == 500 {
                field.resize(120.0, 80.0);
            }
            field.tick();
            assert_eq!(field.particles().len(), PARTICLE_COUNT);
        }
        assert!(field.particles().iter().all(|p| p.within(120.0, 80.0)));
    }

    #[test]
    fn shrinking_does_not_move_particles_until_next_tick() {
        let mut field = field(1000.0, 1000.0);
        let snapshot = field.particles().to_vec();
        field.resize(10.0, 10.0);
        assert_eq!(field.particles(), snapshot.as_slice());
    }

    #[test]
    fn link_opacity_fades_with_distance() {
        let at = |x: f64, y: f64| Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 1.0,
            alpha: 0.5,
        };

        let close = link_between(&at(0.0, 0.0), &at(30.0, 40.0)).expect("within threshold");
        assert!((close.alpha - 0.03).abs() < 1e-12);
        assert!(link_between(&at(0.0, 0.0), &at(60.0, 80.0)).is_none());
        assert!(link_between(&at(0.0, 0.0), &at(0.0, 0.0)).is_some());
    }

    #[test]
    fn draw_clears_then_paints_everything() {
        let field = field(200.0, 200.0);
        let mut recorder = Recorder::default();
        field.draw(&mut recorder);

        assert_eq!(recorder.clears, 1);
        assert_eq!(recorder.circles, PARTICLE_COUNT);
        assert_eq!(recorder.lines.len(), field.links().count());
        assert!(recorder
            .lines
            .iter()
            .all(|link| link.alpha > 0.0 && link.alpha <= LINK_MAX_ALPHA));
    }

    #[test]
    fn colour_string_uses_fixed_rgb() {
        assert_eq!(rgba(0.25), "rgba(0,195,255,0.250)");
    }
}
