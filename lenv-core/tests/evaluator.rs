use anyhow::Result;
use lenv_core::{
    record::{BufferedRecorder, NullRecorder, Record, RecordValue},
    Action, ActionSpace, DefaultEvaluator, EnvConfig, EnvError, Episode, Evaluator, LearningEnv,
    LearningMode, Observation, ParallelEvaluator, Step,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CorridorConfig {
    length: i64,
    copyable: bool,
}

impl EnvConfig for CorridorConfig {}

/// Walks along a corridor, starting at a seeded offset. Terminates at the end.
struct Corridor {
    config: CorridorConfig,
    action_space: ActionSpace,
    episode: Episode,
    position: i64,
    obs: Observation,
}

impl LearningEnv for Corridor {
    type Config = CorridorConfig;

    fn build(config: &Self::Config) -> Result<Self, EnvError> {
        Ok(Self {
            config: config.clone(),
            action_space: ActionSpace::Discrete { n: 2 },
            episode: Episode::default(),
            position: 0,
            obs: Observation::zeros(1),
        })
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn reset(&mut self, seed: u64, mode: LearningMode) -> Result<(), EnvError> {
        let rng = self.episode.begin(seed, mode);
        self.position = rng.i64(0..3);
        self.obs.overwrite(&[self.position as f64]);
        Ok(())
    }

    fn act(&mut self, action: &Action) -> Result<(Step, Record), EnvError> {
        self.episode.ensure_active()?;
        self.action_space.validate(action)?;
        self.position += match action {
            Action::Discrete(1) => 1,
            _ => -1,
        };
        self.obs.overwrite(&[self.position as f64]);
        let done = self.position >= self.config.length;
        let step = self.episode.record_step(if done { 10.0 } else { -1.0 }, done);
        Ok((step, Record::from_scalar("position", self.position as f64)))
    }

    fn obs(&self) -> &Observation {
        &self.obs
    }

    fn score(&self) -> f64 {
        self.episode.score()
    }

    fn is_terminal(&self) -> bool {
        self.episode.is_terminal()
    }

    fn is_copyable(&self) -> bool {
        self.config.copyable
    }

    fn clone_env(&self) -> Result<Self, EnvError> {
        if self.config.copyable {
            Self::build(&self.config)
        } else {
            Err(EnvError::Unsupported("corridor".to_string()))
        }
    }
}

fn forward(_: &Observation) -> Action {
    Action::Discrete(1)
}

fn config(copyable: bool) -> CorridorConfig {
    CorridorConfig {
        length: 8,
        copyable,
    }
}

#[test_log::test]
fn test_default_evaluator() -> Result<()> {
    let mut evaluator =
        DefaultEvaluator::<Corridor>::new(&config(true), 4, 100)?.mode(LearningMode::Validation);
    let mut recorder = BufferedRecorder::new();
    let record = evaluator.evaluate(&mut forward, &mut recorder)?;

    // Validation episodes all start at the same cell.
    let scores: Vec<f64> = recorder
        .iter()
        .map(|r| r.get_scalar("score").unwrap())
        .collect();
    assert_eq!(recorder.len(), 4);
    assert!(scores.iter().all(|s| *s == scores[0]));
    assert_eq!(record.get_scalar("Episode score")?, scores[0]);
    assert_eq!(record.get_scalar("Terminated episodes")?, 4.0);
    Ok(())
}

#[test]
fn test_step_budget_bounds_episode() -> Result<()> {
    let mut backward = |_: &Observation| Action::Discrete(0);
    let mut evaluator = DefaultEvaluator::<Corridor>::new(&config(true), 2, 5)?;
    let record = evaluator.evaluate(&mut backward, &mut NullRecorder)?;
    assert_eq!(record.get_scalar("Episode length")?, 5.0);
    assert_eq!(record.get_scalar("Episode score")?, -5.0);
    assert_eq!(record.get_scalar("Terminated episodes")?, 0.0);
    Ok(())
}

#[test_log::test]
fn test_parallel_matches_sequential() -> Result<()> {
    let mut sequential = DefaultEvaluator::<Corridor>::new(&config(true), 9, 100)?
        .seed(3)
        .mode(LearningMode::Training);
    let mut parallel = ParallelEvaluator::<Corridor>::new(&config(true), 3, 9, 100)?
        .seed(3)
        .mode(LearningMode::Training);

    let mut rec_seq = BufferedRecorder::new();
    let mut rec_par = BufferedRecorder::new();
    let r_seq = sequential.evaluate(&mut forward, &mut rec_seq)?;
    let r_par = parallel.evaluate(&mut forward, &mut rec_par)?;

    assert_eq!(r_seq, r_par);
    for (a, b) in rec_seq.iter().zip(rec_par.iter()) {
        assert_eq!(a, b);
    }
    Ok(())
}

#[test_log::test]
fn test_non_copyable_is_evaluated_sequentially() -> Result<()> {
    let env = Corridor::build(&config(false))?;
    assert!(!env.is_copyable());
    assert!(matches!(env.clone_env(), Err(EnvError::Unsupported(_))));

    let mut parallel = ParallelEvaluator::with_env(env, 4, 6, 100).mode(LearningMode::Testing);
    let mut recorder = BufferedRecorder::new();
    let record = parallel.evaluate(&mut forward, &mut recorder)?;
    assert_eq!(recorder.len(), 6);
    assert_eq!(record.get_scalar("Terminated episodes")?, 6.0);
    Ok(())
}

#[test]
fn test_snapshot_is_read_only() -> Result<()> {
    let mut env = Corridor::build(&config(true))?;
    env.reset(1, LearningMode::Training)?;
    env.act(&Action::Discrete(1))?;
    let before = env.obs().clone();
    let snapshot = env.snapshot();
    assert_eq!(snapshot.get_array1("obs")?, before.as_slice().to_vec());
    assert_eq!(snapshot.get_scalar("score")?, env.score());
    assert_eq!(snapshot.get("is_terminal"), Some(&RecordValue::Scalar(0.0)));
    assert_eq!(env.obs(), &before);
    Ok(())
}

#[test]
fn test_default_clone_is_unsupported() {
    struct Fixed(Observation, ActionSpace);

    impl LearningEnv for Fixed {
        type Config = CorridorConfig;

        fn build(_: &Self::Config) -> Result<Self, EnvError> {
            Ok(Self(Observation::zeros(1), ActionSpace::Discrete { n: 1 }))
        }
        fn action_space(&self) -> &ActionSpace {
            &self.1
        }
        fn reset(&mut self, _: u64, _: LearningMode) -> Result<(), EnvError> {
            Ok(())
        }
        fn act(&mut self, _: &Action) -> Result<(Step, Record), EnvError> {
            Ok((Step::new(0.0, false, 1), Record::empty()))
        }
        fn obs(&self) -> &Observation {
            &self.0
        }
        fn score(&self) -> f64 {
            0.0
        }
        fn is_terminal(&self) -> bool {
            false
        }
    }

    let env = Fixed::build(&config(true)).unwrap();
    assert!(!env.is_copyable());
    assert!(matches!(env.clone_env(), Err(EnvError::Unsupported(_))));
}
