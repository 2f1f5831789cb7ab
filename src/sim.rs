use crate::error::Result;
use crate::grid::Grid;
use crate::life;
use crate::render::Renderer;
use std::thread;
use std::time::Duration;

/// Owns the live grid and counts generations.
pub struct Simulation {
    grid: Grid,
    generation: u64,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        Self { grid, generation: 0 }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn step(&mut self) {
        life::step(&mut self.grid);
        self.generation += 1;
        log::debug!(
            "generation {}: {} live cells",
            self.generation,
            self.grid.population()
        );
    }

    /// Draw the current grid, then sleep/step/draw `generations` times.
    pub fn run<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        generations: u32,
        delay: Duration,
    ) -> Result<()> {
        renderer.draw(&self.grid)?;
        for _ in 0..generations {
            thread::sleep(delay);
            self.step();
            renderer.draw(&self.grid)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Grid>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, grid: &Grid) -> Result<()> {
            self.frames.push(grid.clone());
            Ok(())
        }
    }

    struct Broken;

    impl Renderer for Broken {
        fn draw(&mut self, _grid: &Grid) -> Result<()> {
            Err(Error::Io(io::Error::new(io::ErrorKind::BrokenPipe, "gone")))
        }
    }

    #[test]
    fn renders_initial_frame_plus_one_per_generation() {
        let mut sim = Simulation::new(Grid::random(6, 6, 0.4, 3));
        let mut rec = Recorder::default();
        sim.run(&mut rec, 4, Duration::ZERO).unwrap();
        assert_eq!(rec.frames.len(), 5);
        assert_eq!(sim.generation(), 4);
        assert_eq!(rec.frames.last(), Some(sim.grid()));
    }

    #[test]
    fn zero_generations_draws_once() {
        let mut sim = Simulation::new(Grid::new(3, 3));
        let mut rec = Recorder::default();
        sim.run(&mut rec, 0, Duration::ZERO).unwrap();
        assert_eq!(rec.frames.len(), 1);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn same_seed_gives_same_history() {
        let run = |seed| {
            let mut sim = Simulation::new(Grid::random(12, 17, 0.3, seed));
            let mut rec = Recorder::default();
            sim.run(&mut rec, 6, Duration::ZERO).unwrap();
            rec.frames
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn renderer_failure_stops_the_run() {
        let mut sim = Simulation::new(Grid::new(3, 3));
        let err = sim.run(&mut Broken, 5, Duration::ZERO).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(sim.generation(), 0);
    }
}
