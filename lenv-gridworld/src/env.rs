use crate::{GridWorldConfig, Move, Tile};
use lenv_core::{
    record::{Record, RecordValue},
    Action, ActionSpace, EnvConfig, EnvError, Episode, LearningEnv, LearningMode, Observation,
    Step,
};
use log::info;

/// Dimension of the observation, `[column, row]`.
pub const OBS_DIM: usize = 2;

/// A discrete grid world.
///
/// The agent walks on the grid with the four [`Move`]s. Moves towards a cell
/// outside of the grid or onto an inaccessible tile leave the agent in place.
/// Entering a good tile ends the episode with `good_reward`, entering a bad tile
/// ends it with `bad_reward`. Any other step is rewarded `0`.
///
/// The observation is `[column, row]` of the agent.
#[derive(Debug)]
pub struct GridWorld {
    config: GridWorldConfig,
    action_space: ActionSpace,
    episode: Episode,

    // (column, row)
    position: (usize, usize),
    obs: Observation,
}

impl GridWorld {
    /// Returns `(column, row)` of the agent.
    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GridWorldConfig {
        &self.config
    }

    /// Returns `true` if the agent may stand at `(column, row)`.
    pub fn position_available(&self, column: i64, row: i64) -> bool {
        if column < 0 || row < 0 {
            return false;
        }
        self.config
            .tile(column as usize, row as usize)
            .map_or(false, |t| t.is_available())
    }

    fn tile(&self) -> Tile {
        let (column, row) = self.position;
        // Positions are only ever set to cells of the grid.
        self.config
            .tile(column, row)
            .unwrap_or(Tile::Inaccessible)
    }

    fn extract(position: (usize, usize)) -> [f64; OBS_DIM] {
        [position.0 as f64, position.1 as f64]
    }

    /// Reward for entering `tile`.
    fn reward(&self, tile: Tile) -> f64 {
        match tile {
            Tile::Good => self.config.good_reward,
            Tile::Bad => self.config.bad_reward,
            Tile::Accessible | Tile::Inaccessible => 0.0,
        }
    }

    fn target(&self, m: Move) -> Option<(usize, usize)> {
        let (dc, dr) = m.delta();
        let column = self.position.0 as i64 + dc;
        let row = self.position.1 as i64 + dr;
        if self.position_available(column, row) {
            Some((column as usize, row as usize))
        } else {
            None
        }
    }
}

impl LearningEnv for GridWorld {
    type Config = GridWorldConfig;

    fn build(config: &Self::Config) -> Result<Self, EnvError> {
        config.validate()?;
        let (columns, rows) = config.size();
        info!("Build grid world of {}x{} tiles", columns, rows);

        Ok(Self {
            config: config.clone(),
            action_space: ActionSpace::Discrete { n: Move::COUNT },
            episode: Episode::default(),
            position: (config.start[0], config.start[1]),
            obs: Observation::zeros(OBS_DIM),
        })
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    /// The grid world is deterministic, the seed only identifies the episode.
    fn reset(&mut self, seed: u64, mode: LearningMode) -> Result<(), EnvError> {
        let _ = self.episode.begin(seed, mode);
        self.position = (self.config.start[0], self.config.start[1]);
        self.obs.overwrite(&Self::extract(self.position));
        self.episode.mark_terminal(self.tile().is_terminal());
        Ok(())
    }

    fn act(&mut self, action: &Action) -> Result<(Step, Record), EnvError> {
        self.episode.ensure_active()?;
        self.action_space.validate(action)?;
        let m = match action {
            Action::Discrete(ix) => Move::from_index(*ix),
            Action::Continuous(_) => None,
        }
        .ok_or_else(|| EnvError::InvalidAction(format!("{:?}", action)))?;

        let target = self.target(m);
        if let Some(position) = target {
            self.position = position;
        }
        self.obs.overwrite(&Self::extract(self.position));

        let tile = self.tile();
        let reward = self.reward(tile);
        let step = self.episode.record_step(reward, tile.is_terminal());

        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward)),
            (
                "moved",
                RecordValue::Scalar(if target.is_some() { 1.0 } else { 0.0 }),
            ),
        ]);
        Ok((step, record))
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
        true
    }

    fn clone_env(&self) -> Result<Self, EnvError> {
        Self::build(&self.config)
    }
}
