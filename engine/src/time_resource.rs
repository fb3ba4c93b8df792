/// Converts variable frame times into a whole number of fixed simulation ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    simulation_fixed_dt: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
    total_time: f64,
    frame_count: u64,
    dropped_time: f64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / 60.0, 5) // 60 Hz
    }
}

impl FixedTimestep {
    pub fn new(simulation_fixed_dt: f32, max_steps_per_frame: u32) -> Self {
        let simulation_fixed_dt = if simulation_fixed_dt.is_finite() && simulation_fixed_dt > 0.0 {
            simulation_fixed_dt
        } else {
            log::warn!(
                "Invalid fixed timestep {}, using 1/60 s",
                simulation_fixed_dt
            );
            1.0 / 60.0
        };
        Self {
            simulation_fixed_dt,
            accumulator: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
            total_time: 0.0,
            frame_count: 0,
            dropped_time: 0.0,
        }
    }

    pub fn fixed_dt(&self) -> f32 {
        self.simulation_fixed_dt
    }

    /// Adds a frame's elapsed time and returns how many fixed ticks to run. Backlog beyond
    /// `max_steps_per_frame` ticks is discarded.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        let frame_time = if frame_time.is_finite() {
            frame_time.max(0.0)
        } else {
            0.0
        };
        self.total_time += frame_time as f64;
        self.frame_count += 1;
        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.simulation_fixed_dt && steps < self.max_steps_per_frame {
            self.accumulator -= self.simulation_fixed_dt;
            steps += 1;
        }
        if self.accumulator >= self.simulation_fixed_dt {
            log::debug!(
                "Dropping {:.4}s of simulation backlog after {} steps",
                self.accumulator,
                steps
            );
            self.dropped_time += self.accumulator as f64;
            self.accumulator = 0.0;
        }
        steps
    }

    /// Fraction of a tick left in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.simulation_fixed_dt
    }

    /// Sum of every accepted frame time, including dropped backlog.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn dropped_time(&self) -> f64 {
        self.dropped_time
    }
}
