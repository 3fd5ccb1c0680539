//! Error types for the syncat-magnitude crate.

/// Error type for all fallible operations in the syncat-magnitude crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MagnitudeError {
    /// Returned when a magnitude bound or bin width is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending parameter.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Returned when the bin width is not positive.
    #[error("bin width must be positive, got {width}")]
    InvalidBinWidth {
        /// The invalid width.
        width: f64,
    },

    /// Returned when `[mag_min, ceiling)` holds no complete bin.
    #[error("no magnitude bins between {mag_min} and ceiling {ceiling} with width {width}")]
    EmptyRange {
        /// Lower magnitude bound.
        mag_min: f64,
        /// Exclusive upper bound.
        ceiling: f64,
        /// Bin width.
        width: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_finite() {
        let e = MagnitudeError::NonFinite {
            name: "mag_min",
            value: f64::NAN,
        };
        assert_eq!(e.to_string(), "mag_min must be finite, got NaN");
    }

    #[test]
    fn error_invalid_bin_width() {
        let e = MagnitudeError::InvalidBinWidth { width: 0.0 };
        assert_eq!(e.to_string(), "bin width must be positive, got 0");
    }

    #[test]
    fn error_empty_range() {
        let e = MagnitudeError::EmptyRange {
            mag_min: 8.5,
            ceiling: 8.1,
            width: 0.1,
        };
        assert_eq!(
            e.to_string(),
            "no magnitude bins between 8.5 and ceiling 8.1 with width 0.1"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<MagnitudeError>();
    }
}
