use error_stack::{Report, ResultExt};

use kernel::KernelError;

static SERVER_PORT: &str = "SERVER_PORT";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ServerConfig {
    port: u16,
}

impl ServerConfig {
    /// Reads `SERVER_PORT`, falling back to `default_port` when it is unset.
    pub fn from_env(default_port: u16) -> error_stack::Result<Self, KernelError> {
        let port = match dotenvy::var(SERVER_PORT) {
            Ok(port) => Self::parse_port(&port)?,
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => default_port,
            Err(e) => {
                return Err(Report::new(e)
                    .change_context(KernelError::Internal)
                    .attach_printable(format!("Failed to read {SERVER_PORT}")))
            }
        };
        Ok(Self { port })
    }

    fn parse_port(value: &str) -> error_stack::Result<u16, KernelError> {
        value
            .trim()
            .parse::<u16>()
            .change_context(KernelError::Internal)
            .attach_printable_lazy(|| format!("Invalid {SERVER_PORT}: {value}"))
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
