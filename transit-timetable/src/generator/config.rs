//! Generator configuration.

/// How the end of an operating window bounds a direction's trips.
///
/// The default counts departures: a 06:00-07:00 window at a 10 minute
/// headway gives seven trips, the last leaving at 07:00 and arriving after
/// the window closes. Use [`WindowBound::LastArrival`] when every trip must
/// complete by the window end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowBound {
    /// A trip may start at any time up to and including the window end.
    #[default]
    LastDeparture,
    /// A trip must reach its terminal by the window end.
    LastArrival,
}

/// How vehicles are assigned to trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Chain trips into vehicle blocks greedily, reusing a vehicle whenever
    /// one is waiting at the trip's origin and has had its layover.
    #[default]
    Blocks,
    /// The k-th inbound trip and the k-th outbound trip share a vehicle
    /// that turns at the shared terminal.
    Paired,
}

/// Configuration parameters for schedule generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Maximum number of trips generated in one direction.
    /// Requests projecting more than this are rejected before any trip is
    /// built.
    pub max_trips_per_direction: usize,

    /// Which end of a trip must fall inside the operating window.
    pub window_bound: WindowBound,

    /// Vehicle assignment strategy.
    pub rotation: Rotation,
}

impl GeneratorConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_trips_per_direction: usize, window_bound: WindowBound, rotation: Rotation) -> Self {
        Self {
            max_trips_per_direction,
            window_bound,
            rotation,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_trips_per_direction: 1000,
            window_bound: WindowBound::default(),
            rotation: Rotation::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GeneratorConfig::default();

        assert_eq!(config.max_trips_per_direction, 1000);
        assert_eq!(config.window_bound, WindowBound::LastDeparture);
        assert_eq!(config.rotation, Rotation::Blocks);
    }

    #[test]
    fn custom_config() {
        let config = GeneratorConfig::new(50, WindowBound::LastArrival, Rotation::Paired);

        assert_eq!(config.max_trips_per_direction, 50);
        assert_eq!(config.window_bound, WindowBound::LastArrival);
        assert_eq!(config.rotation, Rotation::Paired);
    }
}
