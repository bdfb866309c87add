mod init;
mod seed;
mod serve;

pub use init::cmd_init_config;
pub use seed::cmd_seed;
pub use serve::cmd_serve;
