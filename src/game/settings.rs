use super::error::{GameError, GameResult};
use super::trig::{Quadrant, TrigFunction};

/// Which functions and quadrants questions are drawn from.
///
/// Lives for one process run and starts with everything enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub sin: bool,
    pub cos: bool,
    pub tan: bool,
    /// Indexed by `Quadrant::index`
    pub quadrants: [bool; 4],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sin: true,
            cos: true,
            tan: true,
            quadrants: [true; 4],
        }
    }
}

impl Settings {
    pub fn is_function_enabled(&self, function: TrigFunction) -> bool {
        match function {
            TrigFunction::Sin => self.sin,
            TrigFunction::Cos => self.cos,
            TrigFunction::Tan => self.tan,
        }
    }

    pub fn set_function(&mut self, function: TrigFunction, enabled: bool) {
        match function {
            TrigFunction::Sin => self.sin = enabled,
            TrigFunction::Cos => self.cos = enabled,
            TrigFunction::Tan => self.tan = enabled,
        }
    }

    pub fn is_quadrant_enabled(&self, quadrant: Quadrant) -> bool {
        self.quadrants[quadrant.index()]
    }

    pub fn set_quadrant(&mut self, quadrant: Quadrant, enabled: bool) {
        self.quadrants[quadrant.index()] = enabled;
    }

    pub fn enabled_functions(&self) -> Vec<TrigFunction> {
        TrigFunction::ALL
            .into_iter()
            .filter(|&f| self.is_function_enabled(f))
            .collect()
    }

    pub fn enabled_quadrants(&self) -> Vec<Quadrant> {
        Quadrant::ALL
            .into_iter()
            .filter(|&q| self.is_quadrant_enabled(q))
            .collect()
    }

    /// Enabled functions and quadrants, or `EmptySelection` if either is empty
    pub fn selection(&self) -> GameResult<(Vec<TrigFunction>, Vec<Quadrant>)> {
        let functions = self.enabled_functions();
        let quadrants = self.enabled_quadrants();
        if functions.is_empty() || quadrants.is_empty() {
            return Err(GameError::EmptySelection);
        }
        Ok((functions, quadrants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let settings = Settings::default();
        assert_eq!(settings.enabled_functions(), TrigFunction::ALL.to_vec());
        assert_eq!(settings.enabled_quadrants(), Quadrant::ALL.to_vec());
    }

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();
        settings.set_function(TrigFunction::Cos, false);
        settings.set_quadrant(Quadrant::ALL[1], false);

        assert_eq!(
            settings.enabled_functions(),
            vec![TrigFunction::Sin, TrigFunction::Tan]
        );
        assert!(!settings.is_quadrant_enabled(Quadrant::ALL[1]));
        assert_eq!(settings.enabled_quadrants().len(), 3);
    }

    #[test]
    fn test_empty_selection() {
        let mut settings = Settings::default();
        settings.quadrants = [false; 4];
        assert_eq!(settings.selection(), Err(GameError::EmptySelection));

        let settings = Settings {
            sin: false,
            cos: false,
            tan: false,
            ..Default::default()
        };
        assert_eq!(settings.selection(), Err(GameError::EmptySelection));
    }
}
