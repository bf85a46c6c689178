// Unit tests for logger module initialization logic
// Tests focus on idempotence and error handling

use crate::error::AdvisorError;
use crate::logger::{initialize, initialize_internal};

use std::path::PathBuf;

use log::LevelFilter;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Tests and the binary may both initialise logging. A
/// second global logger registration would otherwise abort startup.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = tempfile::TempDir::new().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path(), None);
    let result2 = initialize(temp_dir.path(), Some(LevelFilter::Debug));

    // THEN: Both succeed; the second call is a no-op
    // This is the only test in the binary that installs the global logger
    assert!(result1.is_ok(), "First initialization should succeed: {result1:?}");
    assert!(result2.is_ok(), "Second initialization should succeed (idempotent)");
}

/// **VALUE**: Verifies that an unwritable log directory is an error, not a panic.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` being unwrapped.
#[test]
fn given_invalid_log_dir_when_initialize_internal_called_then_returns_error() {
    // GIVEN: A path that cannot hold a file on Unix-like systems
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Initializing with the invalid directory
    let result = initialize_internal(&invalid_dir, LevelFilter::Warn);

    // THEN: Should return the app error variant
    match result {
        Err(AdvisorError::Advisor { message, .. }) => {
            assert!(message.contains("Failed to create log file"), "{message}");
        }
        other => panic!("Expected AdvisorError::Advisor, got {other:?}"),
    }
}
