//! Onward transmission risk of an average sized farm to an average sized farm.
//!
//! With unit farm sizes every `size^exponent` term equals one, so susceptibility
//! and transmissibility reduce to one plus the relative species weights.

/// Number of grid points of the squared distance
pub const DISTANCE_POINTS: usize = 100;
/// Largest squared distance of the grid
pub const MAX_DISTANCE_SQ: f64 = 500.0;

/// One posterior sample of the fitted transmission model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelSample
{
    pub gamma1: f64,
    pub delta: f64,
    pub omega: f64,
    pub xi_2: f64,
    pub xi_3: Option<f64>,
    pub zeta_2: f64,
    pub zeta_3: Option<f64>,
}

impl KernelSample{
    pub fn susceptibility(&self) -> f64
    {
        1.0 + self.xi_2 + self.xi_3.unwrap_or(0.0)
    }

    pub fn transmissibility(&self) -> f64
    {
        1.0 + self.zeta_2 + self.zeta_3.unwrap_or(0.0)
    }

    /// Kernel at squared distance `distance_sq`
    pub fn kernel(&self, distance_sq: f64) -> f64
    {
        self.delta / (self.delta * self.delta + distance_sq).powf(self.omega)
    }

    /// Risk summed over the squared distance grid
    pub fn risk(&self) -> f64
    {
        let scale = self.gamma1 * self.susceptibility() * self.transmissibility();
        distance_grid()
            .map(|d| scale * self.kernel(d))
            .sum()
    }
}

/// `DISTANCE_POINTS` evenly spaced values from 0 to `MAX_DISTANCE_SQ`, both included
pub fn distance_grid() -> impl Iterator<Item=f64>
{
    let step = MAX_DISTANCE_SQ / (DISTANCE_POINTS - 1) as f64;
    (0..DISTANCE_POINTS).map(move |i| i as f64 * step)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn grid_endpoints()
    {
        let grid: Vec<_> = distance_grid().collect();
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 0.0);
        assert!((grid[99] - 500.0).abs() < 1e-9);
    }

    #[test]
    fn risk_of_flat_kernel()
    {
        // omega = 0 makes the kernel equal to delta everywhere
        let sample = KernelSample{
            gamma1: 0.5,
            delta: 2.0,
            omega: 0.0,
            xi_2: 1.0,
            xi_3: Some(1.0),
            zeta_2: 0.5,
            zeta_3: None,
        };
        assert_eq!(sample.susceptibility(), 3.0);
        assert_eq!(sample.transmissibility(), 1.5);
        assert!((sample.risk() - 0.5 * 3.0 * 1.5 * 2.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn kernel_decays_with_distance()
    {
        let sample = KernelSample{
            gamma1: 1.0,
            delta: 1.0,
            omega: 1.5,
            xi_2: 0.0,
            xi_3: None,
            zeta_2: 0.0,
            zeta_3: None,
        };
        assert_eq!(sample.kernel(0.0), 1.0);
        assert!(sample.kernel(10.0) < sample.kernel(1.0));
    }
}
