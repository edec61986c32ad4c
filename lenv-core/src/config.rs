//! Configuration files of environments.
use crate::EnvError;
use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of a [`LearningEnv`](crate::LearningEnv).
///
/// Configurations are plain values shared by an environment and its clones.
/// They can be stored in YAML files.
pub trait EnvConfig: Clone + Serialize + DeserializeOwned {
    /// Checks the consistency of the parameters.
    fn validate(&self) -> Result<(), EnvError> {
        Ok(())
    }

    /// Constructs the configuration from YAML file.
    ///
    /// The loaded configuration is validated.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(rdr)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
