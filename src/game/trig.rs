//! Exact unit-circle values for the standard angles
//!
//! Values and angles are kept as LaTeX-style strings (`\frac{\sqrt{3}}{2}`,
//! `\frac{4\pi}{3}`) rather than floats: the game quizzes the symbolic form and
//! two answers are "the same" exactly when their strings match.

use std::collections::BTreeSet;
use std::fmt;

use super::error::{GameError, GameResult};

/// Trigonometric function asked about in a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
}

impl TrigFunction {
    pub const ALL: [TrigFunction; 3] = [TrigFunction::Sin, TrigFunction::Cos, TrigFunction::Tan];

    pub fn name(&self) -> &'static str {
        match self {
            TrigFunction::Sin => "sin",
            TrigFunction::Cos => "cos",
            TrigFunction::Tan => "tan",
        }
    }

    /// Reference angles with a tabulated value for this function.
    ///
    /// Tangent is undefined at π/2 and so never offers it.
    pub fn base_angles(&self) -> &'static [BaseAngle] {
        match self {
            TrigFunction::Sin | TrigFunction::Cos => &BaseAngle::ALL,
            TrigFunction::Tan => &BaseAngle::ALL[..3],
        }
    }

    /// Whether the function is negative in the given quadrant
    pub fn is_negative_in(&self, quadrant: Quadrant) -> bool {
        match (self, quadrant.number()) {
            (TrigFunction::Sin, 3 | 4) => true,
            (TrigFunction::Cos, 2 | 3) => true,
            (TrigFunction::Tan, 2 | 4) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TrigFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First-quadrant reference angle, always of the form π/den
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseAngle {
    PiOverSix,
    PiOverFour,
    PiOverThree,
    PiOverTwo,
}

impl BaseAngle {
    pub const ALL: [BaseAngle; 4] = [
        BaseAngle::PiOverSix,
        BaseAngle::PiOverFour,
        BaseAngle::PiOverThree,
        BaseAngle::PiOverTwo,
    ];

    pub fn denominator(&self) -> u32 {
        match self {
            BaseAngle::PiOverSix => 6,
            BaseAngle::PiOverFour => 4,
            BaseAngle::PiOverThree => 3,
            BaseAngle::PiOverTwo => 2,
        }
    }
}

impl fmt::Display for BaseAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "π/{}", self.denominator())
    }
}

/// One of the four quadrants of the unit circle, numbered 1 to 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quadrant(u8);

impl Quadrant {
    pub const FIRST: Quadrant = Quadrant(1);
    pub const ALL: [Quadrant; 4] = [Quadrant(1), Quadrant(2), Quadrant(3), Quadrant(4)];

    /// Returns `None` unless `number` is in 1..=4
    pub fn new(number: u8) -> Option<Self> {
        (1..=4).contains(&number).then_some(Self(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based index, handy for per-quadrant arrays
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quadrant {}", self.0)
    }
}

/// Unsigned value of `function` at a reference angle
pub fn value_of(function: TrigFunction, angle: BaseAngle) -> GameResult<&'static str> {
    use BaseAngle::*;
    use TrigFunction::*;

    let value = match (function, angle) {
        (Sin, PiOverSix) | (Cos, PiOverThree) => r"\frac{1}{2}",
        (Sin, PiOverFour) | (Cos, PiOverFour) => r"\frac{\sqrt{2}}{2}",
        (Sin, PiOverThree) | (Cos, PiOverSix) => r"\frac{\sqrt{3}}{2}",
        (Sin, PiOverTwo) => "1",
        (Cos, PiOverTwo) => "0",
        (Tan, PiOverSix) => r"\frac{1}{\sqrt{3}}",
        (Tan, PiOverFour) => "1",
        (Tan, PiOverThree) => r"\sqrt{3}",
        (Tan, PiOverTwo) => return Err(GameError::UnsupportedAngle { function, angle }),
    };
    Ok(value)
}

/// Signed value of `function` at the angle with reference `angle` in `quadrant`.
///
/// Zero carries no sign in any quadrant.
pub fn adjusted_answer(
    function: TrigFunction,
    angle: BaseAngle,
    quadrant: Quadrant,
) -> GameResult<String> {
    let value = value_of(function, angle)?;
    if value == "0" || !function.is_negative_in(quadrant) {
        Ok(value.to_string())
    } else {
        Ok(format!("-{value}"))
    }
}

/// The full angle in `quadrant` whose reference angle is `angle`.
///
/// π/2 sits on an axis: quadrants 1 and 2 both read it as π/2, 3 and 4 as 3π/2.
pub fn full_angle_label(angle: BaseAngle, quadrant: Quadrant) -> String {
    if angle == BaseAngle::PiOverTwo {
        return if quadrant.number() <= 2 {
            r"\frac{\pi}{2}".to_string()
        } else {
            r"\frac{3\pi}{2}".to_string()
        };
    }

    let den = angle.denominator();
    let n = match quadrant.number() {
        1 => 1,
        2 => den - 1,
        3 => den + 1,
        _ => 2 * den - 1,
    };

    if n == 1 {
        format!(r"\frac{{\pi}}{{{den}}}")
    } else {
        format!(r"\frac{{{n}\pi}}{{{den}}}")
    }
}

/// Every signed answer `function` can produce over its reference angles and all
/// four quadrants.
///
/// Several angle/quadrant pairs collapse to the same string (tan gives `1` at
/// both π/4 and 5π/4); the set keeps one copy. Ordered so seeded sampling from
/// it is reproducible.
pub fn answer_universe(function: TrigFunction) -> BTreeSet<String> {
    function
        .base_angles()
        .iter()
        .flat_map(|&angle| {
            Quadrant::ALL
                .into_iter()
                .filter_map(move |quadrant| adjusted_answer(function, angle, quadrant).ok())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn q(n: u8) -> Quadrant {
        Quadrant::new(n).unwrap()
    }

    #[test]
    fn test_quadrant_bounds() {
        assert!(Quadrant::new(0).is_none());
        assert!(Quadrant::new(5).is_none());
        assert_eq!(Quadrant::new(3).map(|q| q.index()), Some(2));
    }

    #[test]
    fn test_tan_rejects_right_angle() {
        assert_eq!(
            value_of(TrigFunction::Tan, BaseAngle::PiOverTwo),
            Err(GameError::UnsupportedAngle {
                function: TrigFunction::Tan,
                angle: BaseAngle::PiOverTwo,
            })
        );
        assert!(!TrigFunction::Tan
            .base_angles()
            .contains(&BaseAngle::PiOverTwo));
    }

    #[test]
    fn test_adjusted_answer_signs() {
        assert_eq!(
            adjusted_answer(TrigFunction::Sin, BaseAngle::PiOverThree, q(4)).unwrap(),
            r"-\frac{\sqrt{3}}{2}"
        );
        assert_eq!(
            adjusted_answer(TrigFunction::Cos, BaseAngle::PiOverSix, q(2)).unwrap(),
            r"-\frac{\sqrt{3}}{2}"
        );
        assert_eq!(
            adjusted_answer(TrigFunction::Tan, BaseAngle::PiOverFour, q(3)).unwrap(),
            "1"
        );
        assert_eq!(
            adjusted_answer(TrigFunction::Tan, BaseAngle::PiOverThree, q(4)).unwrap(),
            r"-\sqrt{3}"
        );
    }

    #[test]
    fn test_cos_right_angle_is_unsigned_zero() {
        for quadrant in Quadrant::ALL {
            assert_eq!(
                adjusted_answer(TrigFunction::Cos, BaseAngle::PiOverTwo, quadrant).unwrap(),
                "0"
            );
        }
    }

    #[test]
    fn test_full_angle_labels() {
        assert_eq!(full_angle_label(BaseAngle::PiOverTwo, q(1)), r"\frac{\pi}{2}");
        assert_eq!(full_angle_label(BaseAngle::PiOverTwo, q(2)), r"\frac{\pi}{2}");
        assert_eq!(full_angle_label(BaseAngle::PiOverTwo, q(3)), r"\frac{3\pi}{2}");
        assert_eq!(full_angle_label(BaseAngle::PiOverTwo, q(4)), r"\frac{3\pi}{2}");
        assert_eq!(full_angle_label(BaseAngle::PiOverThree, q(3)), r"\frac{4\pi}{3}");
        assert_eq!(full_angle_label(BaseAngle::PiOverSix, q(1)), r"\frac{\pi}{6}");
        assert_eq!(full_angle_label(BaseAngle::PiOverSix, q(2)), r"\frac{5\pi}{6}");
        assert_eq!(full_angle_label(BaseAngle::PiOverFour, q(4)), r"\frac{7\pi}{4}");
    }

    #[test]
    fn test_answer_universe_sizes() {
        // sin: ±1/2, ±√2/2, ±√3/2, ±1
        assert_eq!(answer_universe(TrigFunction::Sin).len(), 8);
        // cos: ±1/2, ±√2/2, ±√3/2, 0
        assert_eq!(answer_universe(TrigFunction::Cos).len(), 7);
        // tan: ±1/√3, ±1, ±√3
        assert_eq!(answer_universe(TrigFunction::Tan).len(), 6);
    }

    proptest! {
        #[test]
        fn prop_sign_matches_quadrant_table(
            function in prop::sample::select(TrigFunction::ALL.to_vec()),
            angle_index in 0usize..4,
            quadrant in prop::sample::select(Quadrant::ALL.to_vec()),
        ) {
            let angles = function.base_angles();
            let angle = angles[angle_index % angles.len()];
            let answer = adjusted_answer(function, angle, quadrant).unwrap();
            let magnitude = value_of(function, angle).unwrap();

            if magnitude == "0" {
                prop_assert_eq!(answer, "0");
            } else {
                prop_assert_eq!(answer.starts_with('-'), function.is_negative_in(quadrant));
                prop_assert!(answer.ends_with(magnitude));
            }
        }

        #[test]
        fn prop_full_angle_lands_in_quadrant(
            angle in prop::sample::select(BaseAngle::ALL[..3].to_vec()),
            quadrant in prop::sample::select(Quadrant::ALL.to_vec()),
        ) {
            let den = angle.denominator();
            let label = full_angle_label(angle, quadrant);
            let numerator: u32 = label
                .trim_start_matches(r"\frac{")
                .split(r"\pi")
                .next()
                .and_then(|n| if n.is_empty() { Some(1) } else { n.parse().ok() })
                .unwrap();
            // n/den of a half turn falls strictly inside the quadrant
            let quarter_turns = f64::from(numerator) * 2.0 / f64::from(den);
            prop_assert!(quarter_turns > f64::from(quadrant.number() - 1));
            prop_assert!(quarter_turns < f64::from(quadrant.number()));
        }
    }
}
