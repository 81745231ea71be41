//! Pipeline orchestration for combine runs.
//!
//! Sources are loaded and folded one at a time by [`Combiner`]; the combined
//! document is then serialized and written with the output helpers.

mod combine;
mod output;

pub use combine::{combine_sboms_from_paths, combine_sboms_from_streams, Combiner};
pub use output::{to_json_string, write_document, write_output, OutputTarget};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
