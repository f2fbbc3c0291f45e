use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::GameResult,
    question::{Food, QuestionGenerator},
    settings::Settings,
    state::{EndReason, GameState, Position, Snake},
};

/// What the head ate this step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pickup {
    /// The answer to the current question
    Correct { value: String },
    /// A decoy
    Wrong { value: String },
}

/// Information about a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    pub pickup: Option<Pickup>,
    /// Set when this step ended the round
    pub end_reason: Option<EndReason>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the round has ended
    pub terminated: bool,
    pub info: StepInfo,
}

impl StepResult {
    fn running(pickup: Option<Pickup>) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                pickup,
                end_reason: None,
            },
        }
    }

    fn ended(reason: EndReason, pickup: Option<Pickup>) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                pickup,
                end_reason: Some(reason),
            },
        }
    }
}

/// The game engine that handles movement, collisions and pickups
pub struct GameEngine {
    config: GameConfig,
    generator: QuestionGenerator,
}

impl GameEngine {
    /// Create a new game engine whose randomness derives from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let generator = QuestionGenerator::new(&config, seed);
        Self { config, generator }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh round: centered snake heading right, first question on the board
    pub fn reset(&mut self, settings: &Settings) -> GameResult<GameState> {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let (question, foods) = self.generator.new_round(settings, &snake.body)?;
        log::info!("new question: {} = {}", question.prompt, question.answer);

        Ok(GameState::new(
            snake,
            question,
            foods,
            self.config.grid_width,
            self.config.grid_height,
            self.config.initial_lives,
        ))
    }

    /// Execute one step of the game
    pub fn step(
        &mut self,
        state: &mut GameState,
        action: Action,
        settings: &Settings,
    ) -> GameResult<StepResult> {
        if !state.is_alive {
            return Ok(StepResult {
                terminated: true,
                info: StepInfo {
                    pickup: None,
                    end_reason: None,
                },
            });
        }

        // Reversing straight into the neck is never accepted
        if let Action::Move(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        let new_head = state.snake.next_head();
        state.steps += 1;

        if let Some(reason) = self.check_collision(state, new_head) {
            state.end(reason);
            log::info!("round over: {reason} with score {}", state.score);
            return Ok(StepResult::ended(reason, None));
        }

        state.snake.push_head(new_head);

        let Some(index) = self.find_pickup(new_head, &state.foods) else {
            state.snake.retract_tail();
            return Ok(StepResult::running(None));
        };

        if state.foods[index].is_correct {
            let value = state.foods[index].value.clone();
            state.score += 1;

            let (question, foods) = self.generator.new_round(settings, &state.snake.body)?;
            log::info!(
                "correct ({value}), score {}; next: {} = {}",
                state.score,
                question.prompt,
                question.answer
            );
            state.question = question;
            state.foods = foods;

            return Ok(StepResult::running(Some(Pickup::Correct { value })));
        }

        let eaten = state.foods.remove(index);
        state.snake.retract_tail();
        state.lives = state.lives.saturating_sub(1);
        log::info!(
            "wrong answer {} for {}, {} lives left",
            eaten.value,
            state.question.prompt,
            state.lives
        );

        let pickup = Some(Pickup::Wrong { value: eaten.value });
        if state.lives == 0 {
            state.end(EndReason::OutOfLives);
            log::info!("round over: out of lives with score {}", state.score);
            return Ok(StepResult::ended(EndReason::OutOfLives, pickup));
        }

        Ok(StepResult::running(pickup))
    }

    /// Check if the new head position causes a collision.
    ///
    /// The tail has not moved yet, so stepping onto it counts.
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<EndReason> {
        if !state.is_in_bounds(pos) {
            return Some(EndReason::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    /// First food, in generation order, close enough to the head to be eaten
    fn find_pickup(&self, head: Position, foods: &[Food]) -> Option<usize> {
        foods.iter().position(|food| {
            head.pixel_distance(food.position, self.config.cell_size_px)
                < self.config.pickup_radius_px
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::question::Question;
    use crate::game::trig::{BaseAngle, Quadrant, TrigFunction};

    fn question() -> Question {
        Question::new(TrigFunction::Sin, BaseAngle::PiOverSix, Quadrant::FIRST).unwrap()
    }

    fn food(x: i32, y: i32, value: &str, is_correct: bool) -> Food {
        Food {
            position: Position::new(x, y),
            value: value.to_string(),
            is_correct,
        }
    }

    fn state_with(snake: Snake, foods: Vec<Food>) -> GameState {
        let config = GameConfig::default();
        GameState::new(
            snake,
            question(),
            foods,
            config.grid_width,
            config.grid_height,
            config.initial_lives,
        )
    }

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::default(), 9)
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset(&Settings::default()).unwrap();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(16, 10));
        assert!(state.correct_food().is_some());
    }

    #[test]
    fn test_neutral_step_keeps_length() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        let mut state = state_with(snake, vec![food(25, 4, r"\frac{1}{2}", true)]);

        let result = engine
            .step(&mut state, Action::Continue, &Settings::default())
            .unwrap();

        assert!(!result.terminated);
        assert_eq!(result.info.pickup, None);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(11, 10));
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_correct_pickup_grows_and_starts_new_round() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 2);
        let mut state = state_with(
            snake,
            vec![
                food(20, 4, "1", false),
                food(11, 10, r"\frac{1}{2}", true),
            ],
        );

        let result = engine
            .step(&mut state, Action::Continue, &Settings::default())
            .unwrap();

        assert_eq!(
            result.info.pickup,
            Some(Pickup::Correct {
                value: r"\frac{1}{2}".to_string()
            })
        );
        assert_eq!(state.score, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.snake.len(), 3);
        assert!(state
            .foods
            .iter()
            .any(|f| f.value == state.question.answer && f.is_correct));
        assert!(state
            .foods
            .iter()
            .all(|f| !state.snake.occupies(f.position)));
    }

    #[test]
    fn test_wrong_pickup_costs_a_life_and_keeps_question() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 2);
        let mut state = state_with(
            snake,
            vec![
                food(11, 10, "1", false),
                food(20, 4, r"\frac{1}{2}", true),
            ],
        );
        let question_before = state.question.clone();

        let result = engine
            .step(&mut state, Action::Continue, &Settings::default())
            .unwrap();

        assert_eq!(
            result.info.pickup,
            Some(Pickup::Wrong {
                value: "1".to_string()
            })
        );
        assert!(!result.terminated);
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.question, question_before);
        assert_eq!(state.foods.len(), 1);
        assert!(state.foods[0].is_correct);
    }

    #[test]
    fn test_pickup_reaches_orthogonal_neighbour() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 1);
        // head moves to (11, 10); food one cell further on is 20 px away
        let mut state = state_with(snake, vec![food(12, 10, r"\frac{1}{2}", true)]);

        let result = engine
            .step(&mut state, Action::Continue, &Settings::default())
            .unwrap();

        assert!(matches!(result.info.pickup, Some(Pickup::Correct { .. })));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_pickup_skips_diagonal_neighbour() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 1);
        // head moves to (11, 10); a diagonal neighbour is a full cell diagonal away
        let mut state = state_with(snake, vec![food(12, 11, r"\frac{1}{2}", true)]);

        let result = engine
            .step(&mut state, Action::Continue, &Settings::default())
            .unwrap();

        assert_eq!(result.info.pickup, None);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.foods.len(), 1);
    }

    #[test]
    fn test_pickup_prefers_generation_order() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 1);
        let mut state = state_with(
            snake,
            vec![
                food(12, 10, "1", false),
                food(11, 10, r"\frac{1}{2}", true),
            ],
        );

        let result = engine
            .step(&mut state, Action::Continue, &Settings::default())
            .unwrap();

        assert!(matches!(result.info.pickup, Some(Pickup::Wrong { .. })));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(0, 5), Direction::Left, 1);
        let mut state = state_with(snake, vec![]);

        let result = engine
            .step(&mut state, Action::Continue, &Settings::default())
            .unwrap();

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.info.end_reason, Some(EndReason::Wall));
        assert_eq!(state.end_reason, Some(EndReason::Wall));
    }

    #[test]
    fn test_self_collision_against_tail() {
        let mut engine = engine();
        // Stepping left from (5,6) lands on the tail cell (4,6), which has not
        // been vacated yet.
        let snake = Snake::from_cells(
            vec![
                Position::new(5, 6),
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(4, 6),
            ],
            Direction::Down,
        );
        let mut state = state_with(snake, vec![]);

        let result = engine
            .step(&mut state, Action::Move(Direction::Left), &Settings::default())
            .unwrap();

        assert!(result.terminated);
        assert_eq!(result.info.end_reason, Some(EndReason::SelfCollision));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        let mut state = state_with(snake, vec![]);

        engine
            .step(&mut state, Action::Move(Direction::Left), &Settings::default())
            .unwrap();

        assert_eq!(state.snake.direction, Direction::Right);
        assert!(state.is_alive);
        assert_eq!(state.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_three_wrong_pickups_end_the_round() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 1);
        let mut state = state_with(
            snake,
            vec![
                food(12, 10, "1", false),
                food(16, 10, r"\frac{\sqrt{2}}{2}", false),
                food(20, 10, r"-\frac{1}{2}", false),
                food(10, 16, r"\frac{1}{2}", true),
            ],
        );

        let mut last = None;
        for _ in 0..20 {
            let result = engine
                .step(&mut state, Action::Continue, &Settings::default())
                .unwrap();
            if result.terminated {
                last = Some(result);
                break;
            }
        }

        let result = last.unwrap();
        assert_eq!(result.info.end_reason, Some(EndReason::OutOfLives));
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset(&Settings::default()).unwrap();
        state.is_alive = false;
        let steps_before = state.steps;

        let result = engine
            .step(&mut state, Action::Continue, &Settings::default())
            .unwrap();

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before);
    }
}
