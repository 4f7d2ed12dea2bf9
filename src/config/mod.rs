//! Configuration for repodist: the repository configuration file consumed
//! by the generator, and the on-disk layout of the tool home with the
//! generator checkout inside it.

pub mod repository;
pub mod workspace;

pub use repository::{
    starter_config_json, RepositoryConfig, RepositoryConfigFile, RemoteSection,
    REPOSITORY_CONFIG_FILE_NAME,
};
pub use workspace::{resolve_home, GeneratorWorkspace, GENERATOR_DIR_NAME, HOME_ENV};
