use rand::Rng;
use tracing::debug;
use tracing::trace;

use crate::Offset;
use crate::cell::Cell;
use crate::config::ConfigError;
use crate::config::check_probability;
use crate::grid::Grid;
use crate::pattern::Pattern;
use crate::pattern::PatternError;

/// The simulation engine.
///
/// A `World` owns two independently allocated grids. `current` is the published generation and
/// is the only one ever handed out. `scratch` receives the next generation during [`World::step`]
/// and is swapped with `current` once every cell has been computed, so each step only ever reads
/// the generation it started from.
pub struct World {
    /// Published generation
    current: Grid,

    /// Target of the next step. Its contents are meaningless between steps.
    scratch: Grid,

    /// Number of completed steps since the last seeding
    generation: u64,
}

impl World {
    /// Create an all-dead world of `rows x cols` cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            current: Grid::new(rows, cols),
            scratch: Grid::new(rows, cols),
            generation: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.current.rows()
    }

    pub fn cols(&self) -> usize {
        self.current.cols()
    }

    /// Steps taken since the world was last seeded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Live cells in the published generation.
    pub fn population(&self) -> usize {
        self.current.population()
    }

    /// The published generation.
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Replace the current generation with random cells, each alive with `probability`.
    ///
    /// `probability` must lie in `[0, 1]`.
    pub fn seed_random<R: Rng + ?Sized>(
        &mut self,
        probability: f64,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        let probability = check_probability(probability)?;

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let cell = Cell::from(rng.gen_bool(probability));
                self.current.set(row, col, cell);
            }
        }

        self.reset();
        debug!(
            probability,
            population = self.population(),
            "Seeded world randomly"
        );

        Ok(())
    }

    /// Replace the current generation with `pattern`, its top-left corner at `origin`. Every
    /// other cell is dead.
    pub fn seed_pattern(
        &mut self,
        pattern: &Pattern,
        origin: (usize, usize),
    ) -> Result<(), PatternError> {
        pattern.check_fits(origin, self.rows(), self.cols())?;

        let (dr, dc) = origin;
        self.current.fill(Cell::Dead);
        for (r, c) in pattern.iter_alive() {
            self.current.set(dr + r, dc + c, Cell::Alive);
        }

        self.reset();
        debug!(
            row = dr,
            col = dc,
            population = self.population(),
            "Seeded world from pattern"
        );

        Ok(())
    }

    /// Advance the world by exactly one generation.
    pub fn step(&mut self) {
        assert_eq!(
            self.current.dimensions(),
            self.scratch.dimensions(),
            "current and scratch grids disagree on dimensions"
        );

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let (r, c) = (row as Offset, col as Offset);

                let neighbors = self.current.count_alive_neighbors(r, c);
                let cell = self.current.get(r, c).next(neighbors);

                self.scratch.set(row, col, cell);
            }
        }

        std::mem::swap(&mut self.current, &mut self.scratch);
        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.population(),
            "Stepped"
        );
    }

    /// Advance the world by `n` generations.
    pub fn advance(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    fn reset(&mut self) {
        self.scratch.fill(Cell::Dead);
        self.generation = 0;
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::World;
    use crate::cell::Cell;
    use crate::config::ConfigError;
    use crate::pattern::Pattern;

    fn world(text: &str) -> World {
        let pattern: Pattern = text.parse().unwrap();
        let mut world = World::new(pattern.rows(), pattern.cols());
        world.seed_pattern(&pattern, (0, 0)).unwrap();
        world
    }

    #[test]
    fn blinker_both_half_cycles() {
        let mut world = world("...\n###\n...");

        world.step();
        insta::assert_snapshot!(world.current().to_string(), @r"
        .#.
        .#.
        .#.
        ");

        world.step();
        insta::assert_snapshot!(world.current().to_string(), @r"
        ...
        ###
        ...
        ");

        assert_eq!(world.generation(), 2);
    }

    #[test]
    fn scratch_becomes_current() {
        let mut world = world("...\n###\n...");

        let current = world.current.cells().as_ptr();
        let scratch = world.scratch.cells().as_ptr();
        assert_ne!(current, scratch);

        world.step();
        assert_eq!(world.current().cells().as_ptr(), scratch);
        assert_eq!(world.scratch.cells().as_ptr(), current);

        world.step();
        assert_eq!(world.current().cells().as_ptr(), current);
    }

    #[test]
    fn step_reads_only_the_previous_generation() {
        // Updated in place, row by row, the top cell of this row would die before the middle
        // cell is evaluated and the blinker would collapse.
        let mut world = world(".....\n.....\n.###.\n.....\n.....");

        world.step();

        assert_eq!(
            world.current().to_string(),
            ".....\n..#..\n..#..\n..#..\n....."
        );
    }

    #[test]
    fn isolated_cell_dies() {
        let mut world = world("...\n.#.\n...");

        world.step();
        assert_eq!(world.population(), 0);

        world.advance(3);
        assert_eq!(world.population(), 0);
    }

    #[test]
    fn seed_random_is_reproducible() {
        let mut a = World::new(16, 16);
        let mut b = World::new(16, 16);

        a.seed_random(0.5, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        b.seed_random(0.5, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();

        assert_eq!(a.current(), b.current());
    }

    #[test]
    fn seed_random_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut world = World::new(8, 5);

        world.seed_random(1.0, &mut rng).unwrap();
        assert_eq!(world.population(), 40);

        world.seed_random(0.0, &mut rng).unwrap();
        assert_eq!(world.population(), 0);
    }

    #[test]
    fn seed_random_rejects_bad_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut world = World::new(4, 4);

        assert_eq!(
            world.seed_random(-0.5, &mut rng),
            Err(ConfigError::InvalidProbability { probability: -0.5 })
        );
        assert!(world.seed_random(f64::NAN, &mut rng).is_err());
        assert_eq!(world.population(), 0);
    }

    #[test]
    fn seeding_resets_generation() {
        let mut world = world("##\n##");
        world.advance(4);
        assert_eq!(world.generation(), 4);

        world.seed_pattern(&"#".parse().unwrap(), (1, 1)).unwrap();
        assert_eq!(world.generation(), 0);
        assert_eq!(world.population(), 1);
        assert_eq!(world.current().get(1, 1), Cell::Alive);
    }

    #[test]
    fn seed_pattern_out_of_bounds() {
        let mut world = World::new(3, 3);
        let pattern: Pattern = "##\n##".parse().unwrap();

        assert!(world.seed_pattern(&pattern, (2, 0)).is_err());
        assert!(world.seed_pattern(&pattern, (1, 1)).is_ok());
    }
}
