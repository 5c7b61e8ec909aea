//! Exit codes for calico-kicker.
//!
//! The sidecar only exits on its own when startup fails; once the poll loop
//! runs, the process ends only by signal.

use crate::StartupError;

/// Exit code constants.
pub mod codes {
    /// Successful execution.
    pub const SUCCESS: u8 = 0;
    /// Invalid arguments.
    pub const INVALID_ARGS: u8 = 1;
    /// Netlink session could not be opened.
    pub const NETLINK_ERROR: u8 = 2;
    /// Async runtime could not be built.
    pub const RUNTIME_ERROR: u8 = 3;
}

/// Map a StartupError to an exit code.
pub fn exit_code(error: &StartupError) -> u8 {
    match error {
        StartupError::InvalidArgument(_) => codes::INVALID_ARGS,
        StartupError::Netlink(_) => codes::NETLINK_ERROR,
        StartupError::Runtime(_) => codes::RUNTIME_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use kicker_netlink::NetlinkError;

    #[test]
    fn test_exit_code_invalid_argument() {
        let error = StartupError::InvalidArgument(CliError::ZeroDuration("check-interval"));
        assert_eq!(exit_code(&error), codes::INVALID_ARGS);
    }

    #[test]
    fn test_exit_code_netlink() {
        let error = StartupError::Netlink(NetlinkError::Connection("EPERM".to_string()));
        assert_eq!(exit_code(&error), codes::NETLINK_ERROR);
    }

    #[test]
    fn test_exit_code_runtime() {
        let error = StartupError::Runtime(std::io::Error::other("no reactor"));
        assert_eq!(exit_code(&error), codes::RUNTIME_ERROR);
    }

    #[test]
    fn test_exit_codes_constants() {
        assert_eq!(codes::SUCCESS, 0);
        assert_eq!(codes::INVALID_ARGS, 1);
        assert_eq!(codes::NETLINK_ERROR, 2);
        assert_eq!(codes::RUNTIME_ERROR, 3);
    }

    #[test]
    fn test_startup_error_display() {
        let error = StartupError::Netlink(NetlinkError::Connection("EPERM".to_string()));
        assert_eq!(
            error.to_string(),
            "failed to create netlink connection: failed to open netlink connection: EPERM"
        );
    }
}
