use anyhow::Result;
use lenv_core::{Action, EnvConfig, EnvError, EpisodePhase, LearningEnv, LearningMode};
use lenv_gridworld::{GridWorld, GridWorldConfig, Move, Tile, OBS_DIM};
use tempdir::TempDir;

fn act(env: &mut GridWorld, m: Move) -> Result<f64, EnvError> {
    env.act(&Action::Discrete(m.into())).map(|(step, _)| step.reward)
}

fn new_env() -> GridWorld {
    let mut env = GridWorld::build(&GridWorldConfig::default()).unwrap();
    env.reset(42, LearningMode::Training).unwrap();
    env
}

#[test_log::test]
fn test_reaching_good_tile() -> Result<()> {
    let mut env = new_env();
    assert_eq!(env.obs().as_slice(), &[0.0, 0.0]);

    // Around the wall in the middle row.
    let path = [Move::Down, Move::Down, Move::Right, Move::Right, Move::Right];
    for (i, m) in path.iter().enumerate() {
        assert!(!env.is_terminal(), "terminated before reaching the goal");
        let reward = act(&mut env, *m)?;
        assert_eq!(reward > 0.0, i == path.len() - 1);
    }

    assert!(env.is_terminal());
    assert_eq!(env.position(), (3, 2));
    assert_eq!(env.obs().as_slice(), &[3.0, 2.0]);
    assert!(env.score() > 0.0);
    assert_eq!(env.score(), 100.0);
    Ok(())
}

#[test]
fn test_reaching_bad_tile() -> Result<()> {
    let mut env = new_env();
    for _ in 0..2 {
        act(&mut env, Move::Right)?;
        assert!(!env.is_terminal());
    }
    act(&mut env, Move::Right)?;
    assert!(env.is_terminal());
    assert!(env.score() < 0.0);
    Ok(())
}

#[test]
fn test_wandering_stays_active() -> Result<()> {
    let mut env = new_env();
    let moves = [
        Move::Down,
        Move::Right,
        Move::Right, // wall
        Move::Up,
        Move::Left,
        Move::Left, // edge
        Move::Down,
        Move::Down,
        Move::Right,
        Move::Up,
    ];
    for m in moves {
        act(&mut env, m)?;
        assert!(!env.is_terminal());
        assert_eq!(env.obs().len(), OBS_DIM);
    }
    assert_eq!(env.score(), 0.0);
    Ok(())
}

#[test]
fn test_act_after_termination_fails() -> Result<()> {
    let mut env = new_env();
    for _ in 0..3 {
        act(&mut env, Move::Right)?;
    }
    let (obs, score) = (env.obs().clone(), env.score());
    assert_eq!(
        act(&mut env, Move::Left),
        Err(EnvError::NotActive {
            phase: EpisodePhase::Terminal
        })
    );
    assert_eq!(env.obs(), &obs);
    assert_eq!(env.score(), score);

    // A reset starts over.
    env.reset(42, LearningMode::Training)?;
    assert_eq!(env.score(), 0.0);
    assert_eq!(env.obs().as_slice(), &[0.0, 0.0]);
    assert!(!env.is_terminal());
    Ok(())
}

#[test]
fn test_act_before_reset_fails() -> Result<()> {
    let mut env = GridWorld::build(&GridWorldConfig::default())?;
    let obs = env.obs().clone();
    assert_eq!(
        act(&mut env, Move::Down),
        Err(EnvError::NotActive {
            phase: EpisodePhase::NotReset
        })
    );
    assert_eq!(env.obs(), &obs);
    assert_eq!(env.score(), 0.0);
    Ok(())
}

#[test]
fn test_invalid_actions_leave_state_untouched() -> Result<()> {
    let mut env = new_env();
    act(&mut env, Move::Down)?;
    let obs = env.obs().clone();

    assert!(matches!(
        env.act(&Action::Discrete(4)),
        Err(EnvError::InvalidAction(_))
    ));
    assert!(matches!(
        env.act(&Action::Continuous(vec![1.0])),
        Err(EnvError::InvalidAction(_))
    ));
    assert_eq!(env.obs(), &obs);
    act(&mut env, Move::Down)?;
    assert_eq!(env.position(), (0, 2));
    Ok(())
}

#[test]
fn test_clone_is_independent() -> Result<()> {
    let mut env = new_env();
    act(&mut env, Move::Down)?;
    let (obs, score) = (env.obs().clone(), env.score());

    assert!(env.is_copyable());
    let mut clone = env.clone_env()?;
    assert!(matches!(
        act(&mut clone, Move::Down),
        Err(EnvError::NotActive { .. })
    ));
    clone.reset(7, LearningMode::Testing)?;
    for _ in 0..3 {
        act(&mut clone, Move::Right)?;
    }
    assert!(clone.is_terminal());

    assert_eq!(env.obs(), &obs);
    assert_eq!(env.score().to_bits(), score.to_bits());
    assert!(!env.is_terminal());
    Ok(())
}

#[test]
fn test_validation_reset_is_identical() -> Result<()> {
    let mut a = GridWorld::build(&GridWorldConfig::default())?;
    let mut b = GridWorld::build(&GridWorldConfig::default())?;
    a.reset(1, LearningMode::Validation)?;
    b.reset(99, LearningMode::Validation)?;
    assert_eq!(a.obs(), b.obs());
    Ok(())
}

#[test]
fn test_invalid_configs_are_rejected() {
    let ragged = GridWorldConfig::default().grid(vec![
        vec![Tile::Accessible, Tile::Good],
        vec![Tile::Accessible],
    ]);
    assert!(matches!(
        GridWorld::build(&ragged),
        Err(EnvError::Config(_))
    ));

    let walled_start = GridWorldConfig::default().start(2, 1);
    assert!(matches!(
        GridWorld::build(&walled_start),
        Err(EnvError::Config(_))
    ));

    let outside = GridWorldConfig::default().start(4, 0);
    assert!(GridWorld::build(&outside).is_err());

    assert!(GridWorld::build(&GridWorldConfig::default().grid(vec![])).is_err());
}

#[test]
fn test_config_file() -> Result<()> {
    let dir = TempDir::new("gridworld")?;
    let path = dir.path().join("gridworld.yaml");
    let config = GridWorldConfig::default().good_reward(10.0).start(1, 2);
    config.save(&path)?;
    assert_eq!(GridWorldConfig::load(&path)?, config);

    // Tiles are integers in the file.
    let text = std::fs::read_to_string(&path)?;
    assert!(!text.contains("Accessible"));

    std::fs::write(&path, text.replace("- 3", "- 7"))?;
    assert!(GridWorldConfig::load(&path).is_err());
    Ok(())
}

#[test]
fn test_config_from_fields() -> Result<()> {
    use Tile::{Accessible as O, Good as G};

    let config = GridWorldConfig {
        grid: vec![vec![O, G]],
        start: [0, 0],
        good_reward: 5.0,
        ..GridWorldConfig::default()
    };
    assert_eq!(config.bad_reward, -100.0);
    let mut env = GridWorld::build(&config)?;
    env.reset(0, LearningMode::Testing)?;
    assert_eq!(act(&mut env, Move::Right)?, 5.0);
    assert!(env.is_terminal());
    Ok(())
}
