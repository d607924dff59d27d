//! Chart components for terminal visualization
//!
//! Both subplots render into plain `String`s with Unicode characters, so the
//! shell can clear and redraw them once per epoch.

/// Character-grid scatterplot of the real subset and generated samples
#[derive(Debug, Clone)]
pub struct ScatterChart {
    title: String,
    width: usize,
    height: usize,
    real: Vec<[f32; 2]>,
    generated: Vec<[f32; 2]>,
    redraws: usize,
}

impl ScatterChart {
    /// Create an empty scatter subplot
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            title: "Samples generated by Generator".to_string(),
            width,
            height,
            real: Vec::new(),
            generated: Vec::new(),
            redraws: 0,
        }
    }

    /// Set the fixed real subset, drawn in every frame
    pub fn set_real(&mut self, points: Vec<[f32; 2]>) {
        self.real = points;
    }

    /// Replace the generated overlay; the previous frame's points are dropped
    pub fn set_generated(&mut self, points: Vec<[f32; 2]>) {
        self.generated = points;
        self.redraws += 1;
    }

    /// Number of generated-overlay replacements so far
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Render to string
    pub fn render(&self) -> String {
        if self.real.is_empty() && self.generated.is_empty() {
            return String::from("(no samples yet)\n");
        }

        let (min_x, max_x, min_y, max_y) = self.bounds();
        let span_x = (max_x - min_x).max(f32::EPSILON);
        let span_y = (max_y - min_y).max(f32::EPSILON);

        let mut grid = vec![vec![' '; self.width]; self.height];
        self.plot(&mut grid, &self.real, '∘', min_x, min_y, span_x, span_y);
        self.plot(&mut grid, &self.generated, '●', min_x, min_y, span_x, span_y);

        let mut output = String::new();
        output.push_str(&format!("┌─ {} ", self.title));
        output.push_str(&"─".repeat(self.width.saturating_sub(self.title.len() + 2)));
        output.push_str("┐\n");
        for row in &grid {
            output.push('│');
            output.extend(row.iter());
            output.push_str("│\n");
        }
        output.push('└');
        output.push_str(&"─".repeat(self.width + 1));
        output.push_str("┘\n");
        output.push_str("  ∘ real   ● generated\n");
        output
    }

    fn bounds(&self) -> (f32, f32, f32, f32) {
        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for p in self.real.iter().chain(&self.generated) {
            min_x = min_x.min(p[0]);
            max_x = max_x.max(p[0]);
            min_y = min_y.min(p[1]);
            max_y = max_y.max(p[1]);
        }
        (min_x, max_x, min_y, max_y)
    }

    #[allow(clippy::too_many_arguments)]
    fn plot(
        &self,
        grid: &mut [Vec<char>],
        points: &[[f32; 2]],
        mark: char,
        min_x: f32,
        min_y: f32,
        span_x: f32,
        span_y: f32,
    ) {
        for p in points {
            let col = (((p[0] - min_x) / span_x) * (self.width - 1) as f32).round() as usize;
            // Rows grow downward; flip so larger y is higher on screen
            let row = (((p[1] - min_y) / span_y) * (self.height - 1) as f32).round() as usize;
            let row = self.height - 1 - row.min(self.height - 1);
            grid[row][col.min(self.width - 1)] = mark;
        }
    }
}

/// Two growing loss histories plotted against epoch index
#[derive(Debug, Clone)]
pub struct LossCurveChart {
    title: String,
    width: usize,
    height: usize,
    disc: Vec<f32>,
    gen: Vec<f32>,
}

impl LossCurveChart {
    /// Create an empty loss subplot
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            title: "Losses of Gen and Disc".to_string(),
            width,
            height,
            disc: Vec::new(),
            gen: Vec::new(),
        }
    }

    /// Append one epoch's mean losses
    pub fn push(&mut self, loss_d: f32, loss_g: f32) {
        self.disc.push(loss_d);
        self.gen.push(loss_g);
    }

    /// Epochs recorded so far
    pub fn epochs(&self) -> usize {
        self.disc.len()
    }

    /// Discriminator history
    pub fn disc_history(&self) -> &[f32] {
        &self.disc
    }

    /// Generator history
    pub fn gen_history(&self) -> &[f32] {
        &self.gen
    }

    /// Render to string
    pub fn render(&self) -> String {
        if self.disc.is_empty() {
            return String::from("(waiting for data...)\n");
        }

        let min = self
            .disc
            .iter()
            .chain(&self.gen)
            .copied()
            .fold(f32::INFINITY, f32::min);
        let max = self
            .disc
            .iter()
            .chain(&self.gen)
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        let range = (max - min).max(f32::EPSILON);

        let mut grid = vec![vec![' '; self.width]; self.height];
        self.trace(&mut grid, &self.disc, 'D', min, range);
        self.trace(&mut grid, &self.gen, 'G', min, range);

        let mut output = String::new();
        output.push_str(&format!("┌─ {} ", self.title));
        output.push_str(&"─".repeat(self.width.saturating_sub(self.title.len() + 2)));
        output.push_str("┐\n");
        for (i, row) in grid.iter().enumerate() {
            output.push('│');
            output.extend(row.iter());
            output.push('│');
            if i == 0 {
                output.push_str(&format!(" {max:.3}"));
            } else if i == self.height - 1 {
                output.push_str(&format!(" {min:.3}"));
            }
            output.push('\n');
        }
        output.push('└');
        output.push_str(&"─".repeat(self.width + 1));
        output.push_str("┘\n");
        output.push_str("  D Discriminator loss   G Generator loss\n");
        output
    }

    fn trace(&self, grid: &mut [Vec<char>], series: &[f32], mark: char, min: f32, range: f32) {
        let n = series.len();
        for (i, &v) in series.iter().enumerate() {
            let col = if n == 1 {
                0
            } else {
                (i as f32 / (n - 1) as f32 * (self.width - 1) as f32).round() as usize
            };
            let row = (((v - min) / range) * (self.height - 1) as f32).round() as usize;
            let row = self.height - 1 - row.min(self.height - 1);
            let cell = &mut grid[row][col.min(self.width - 1)];
            // Crossing series share a cell
            *cell = if *cell == ' ' || *cell == mark { mark } else { '×' };
        }
    }
}

/// The full training figure: scatter on top, loss curves below
#[derive(Debug, Clone)]
pub struct Figure {
    scatter: ScatterChart,
    losses: LossCurveChart,
}

impl Figure {
    /// Create with the default terminal dimensions
    pub fn new() -> Self {
        Self { scatter: ScatterChart::new(60, 18), losses: LossCurveChart::new(60, 10) }
    }

    /// Scatter subplot
    pub fn scatter_mut(&mut self) -> &mut ScatterChart {
        &mut self.scatter
    }

    /// Loss subplot
    pub fn losses_mut(&mut self) -> &mut LossCurveChart {
        &mut self.losses
    }

    /// Read access for assertions and status lines
    pub fn losses(&self) -> &LossCurveChart {
        &self.losses
    }

    /// Read access to the scatter subplot
    pub fn scatter(&self) -> &ScatterChart {
        &self.scatter
    }

    /// Render both subplots into one frame
    pub fn render(&self) -> String {
        let mut output = self.scatter.render();
        output.push('\n');
        output.push_str(&self.losses.render());
        output
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}
