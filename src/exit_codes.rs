//! Exit code constants for the bar CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing grammar path, bad config)
//! - 2: Grammar failure (load error or failed grammar check)
//! - 3: Conflicts found while running in strict mode

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, or invalid config.
pub const USER_ERROR: i32 = 1;

/// Grammar could not be loaded or failed validation.
pub const GRAMMAR_FAILURE: i32 = 2;

/// The selection contains conflicts and strict mode is on.
pub const CONFLICTS_FOUND: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, GRAMMAR_FAILURE, CONFLICTS_FOUND];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(GRAMMAR_FAILURE, 2);
        assert_eq!(CONFLICTS_FOUND, 3);
    }
}
