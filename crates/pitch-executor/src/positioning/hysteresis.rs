/// A boolean that only flips once a value crosses the far side of a dead zone.
///
/// Above the zone it turns true, below it turns false, inside it keeps its
/// previous state.
#[derive(Clone, Copy, Debug)]
pub struct DeadZoneHysteresis {
    lower: f64,
    upper: f64,
    above: bool,
}

impl DeadZoneHysteresis {
    pub fn new(lower: f64, upper: f64, default_above: bool) -> Self {
        Self {
            lower,
            upper,
            above: default_above,
        }
    }

    pub fn evaluate(&mut self, value: f64) -> bool {
        if self.above && value < self.lower {
            self.above = false;
        } else if !self.above && value > self.upper {
            self.above = true;
        }
        self.above
    }

    /// Move the dead zone without touching the state.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) {
        self.lower = lower;
        self.upper = upper;
    }

    pub fn is_above(&self) -> bool {
        self.above
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_inside_dead_zone() {
        let mut flag = DeadZoneHysteresis::new(-300.0, 300.0, false);
        assert!(!flag.evaluate(0.0));
        assert!(!flag.evaluate(299.0));
        assert!(flag.evaluate(301.0));
        assert!(flag.evaluate(0.0));
        assert!(flag.evaluate(-299.0));
        assert!(!flag.evaluate(-301.0));
    }

    #[test]
    fn test_default_state() {
        let mut flag = DeadZoneHysteresis::new(50.0, 150.0, true);
        assert!(flag.evaluate(100.0));
        assert!(!flag.evaluate(10.0));
        assert!(!flag.is_above());
    }
}
