//! Question and food generation
//!
//! A round asks for one signed value; the board carries the correct value plus
//! a few decoys drawn from the same function's answers.

use std::cmp::Reverse;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::config::GameConfig;
use super::error::{GameError, GameResult};
use super::settings::Settings;
use super::state::Position;
use super::trig::{self, BaseAngle, Quadrant, TrigFunction};

/// What the player is asked in the current round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub function: TrigFunction,
    pub base_angle: BaseAngle,
    pub quadrant: Quadrant,
    /// Full angle, e.g. `\frac{4\pi}{3}`
    pub angle_label: String,
    /// What is shown in the question bar, e.g. `sin(\frac{4\pi}{3})`
    pub prompt: String,
    /// Signed symbolic answer
    pub answer: String,
}

impl Question {
    pub fn new(function: TrigFunction, base_angle: BaseAngle, quadrant: Quadrant) -> GameResult<Self> {
        let answer = trig::adjusted_answer(function, base_angle, quadrant)?;
        let angle_label = trig::full_angle_label(base_angle, quadrant);
        let prompt = format!("{function}({angle_label})");

        Ok(Self {
            function,
            base_angle,
            quadrant,
            angle_label,
            prompt,
            answer,
        })
    }
}

/// A value on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub value: String,
    /// Set against the question the batch was generated for
    pub is_correct: bool,
}

/// Draws questions and lays out food for them.
///
/// All randomness flows through one seeded PCG stream, so a session replays
/// exactly from its seed.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    rng: Pcg32,
    grid_width: usize,
    grid_height: usize,
    margin: usize,
    spacing: u32,
    max_distractors: usize,
    placement_attempts: usize,
}

impl QuestionGenerator {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            margin: config.food_margin,
            spacing: config.food_spacing,
            max_distractors: config.max_distractors,
            placement_attempts: config.placement_attempts,
        }
    }

    /// Pick a question from the enabled functions and quadrants.
    ///
    /// An empty selection falls back to sine in the first quadrant.
    pub fn generate_question(&mut self, settings: &Settings) -> GameResult<Question> {
        let (functions, quadrants) = match settings.selection() {
            Ok(selection) => selection,
            Err(err) => {
                log::debug!("{err}; asking about sin in quadrant 1");
                (vec![TrigFunction::Sin], vec![Quadrant::FIRST])
            }
        };

        let function = *functions
            .choose(&mut self.rng)
            .ok_or(GameError::EmptySelection)?;
        let base_angle = *function
            .base_angles()
            .choose(&mut self.rng)
            .ok_or(GameError::EmptySelection)?;
        let quadrant = *quadrants
            .choose(&mut self.rng)
            .ok_or(GameError::EmptySelection)?;

        Question::new(function, base_angle, quadrant)
    }

    /// Lay out the correct answer and up to `max_distractors` decoys, in
    /// shuffled order, clear of the snake and of each other.
    pub fn generate_foods(
        &mut self,
        function: TrigFunction,
        correct_answer: &str,
        snake: &[Position],
    ) -> GameResult<Vec<Food>> {
        let pool: Vec<String> = trig::answer_universe(function)
            .into_iter()
            .filter(|value| value != correct_answer)
            .collect();

        let count = self.max_distractors.min(pool.len());
        let mut values: Vec<String> = pool
            .choose_multiple(&mut self.rng, count)
            .cloned()
            .collect();
        values.push(correct_answer.to_string());
        values.shuffle(&mut self.rng);

        let mut foods = Vec::with_capacity(values.len());
        for value in values {
            let position = self.place_food(snake, &foods)?;
            let is_correct = value == correct_answer;
            foods.push(Food {
                position,
                value,
                is_correct,
            });
        }

        Ok(foods)
    }

    /// A fresh question together with its food
    pub fn new_round(
        &mut self,
        settings: &Settings,
        snake: &[Position],
    ) -> GameResult<(Question, Vec<Food>)> {
        let question = self.generate_question(settings)?;
        let foods = self.generate_foods(question.function, &question.answer, snake)?;
        Ok((question, foods))
    }

    /// Rejection-sample an interior cell off the snake and at least `spacing`
    /// away from every food already placed.
    ///
    /// Once the attempt budget is spent, falls back to scanning the interior for
    /// the free cell with the fewest spacing conflicts.
    pub fn place_food(&mut self, snake: &[Position], placed: &[Food]) -> GameResult<Position> {
        let (min, max_x, max_y) = self.interior();
        if max_x < min || max_y < min {
            return Err(GameError::PlacementExhausted { attempts: 0 });
        }

        for _ in 0..self.placement_attempts {
            let pos = Position::new(
                self.rng.gen_range(min..=max_x),
                self.rng.gen_range(min..=max_y),
            );
            if !snake.contains(&pos) && self.conflicts(pos, placed) == 0 {
                return Ok(pos);
            }
        }

        let fallback = (min..=max_y)
            .flat_map(|y| (min..=max_x).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.contains(pos))
            .min_by_key(|&pos| {
                let nearest = placed
                    .iter()
                    .map(|food| food.position.chebyshev_distance(pos))
                    .min()
                    .unwrap_or(u32::MAX);
                (self.conflicts(pos, placed), Reverse(nearest))
            });

        match fallback {
            Some(pos) => {
                log::warn!(
                    "food placement fell back to {pos:?} after {} attempts",
                    self.placement_attempts
                );
                Ok(pos)
            }
            None => Err(GameError::PlacementExhausted {
                attempts: self.placement_attempts,
            }),
        }
    }

    /// Inclusive interior bounds: (min, max_x, max_y)
    fn interior(&self) -> (i32, i32, i32) {
        let min = self.margin as i32;
        (
            min,
            self.grid_width as i32 - min - 1,
            self.grid_height as i32 - min - 1,
        )
    }

    fn conflicts(&self, pos: Position, placed: &[Food]) -> usize {
        placed
            .iter()
            .filter(|food| food.position.chebyshev_distance(pos) < self.spacing)
            .count()
    }
}
