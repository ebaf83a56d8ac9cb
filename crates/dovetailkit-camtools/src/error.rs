//! Error types for the CAM tools crate.
//!
//! Joint validation failures are user-facing: the host shows their message
//! verbatim and draws nothing. Everything else is wrapped in [`CamToolError`].

use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The joint parameters describe a joint that cannot be cut.
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// A parameter validation error occurred outside of joint resolution.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Errors related to parameter values that lie outside their domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero, negative or not finite).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Reasons a set of joint parameters is rejected.
///
/// The physical checks run in declaration order and the first one that fails
/// is reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    /// A parameter lies outside its basic domain (e.g. a negative width).
    #[error("{0}")]
    InvalidParameter(#[from] ParameterError),

    /// The dovetail bit has no cutting width left at the plunge depth.
    #[error(
        "The dovetail bit's cutting diameter at the top of the pin board works out to \
         {upper_tail_diameter:.2}mm, which is zero or less.\n\n\
         The cut angle ({cut_angle}°), the dovetail bit diameter ({tail_bit_diameter}mm) \
         and the pin board thickness ({pin_thickness}mm, which sets the plunge depth) \
         describe a cut that is impossible to make.\n\nPlease re-check these parameters."
    )]
    DiameterNonPositive {
        cut_angle: f64,
        tail_bit_diameter: f64,
        pin_thickness: f64,
        upper_tail_diameter: f64,
    },

    /// The narrow end of a tail is thinner than the straight bit.
    #[error(
        "Tails {tail_width}mm wide narrow down to {smaller_tail_width:.2}mm at their \
         small end.\n\nThat is less than the diameter of the straight bit \
         ({pin_bit_diameter}mm), which cannot cut a gap this small.\n\n\
         Use a thinner straight bit or wider tails."
    )]
    TailNarrowerThanPinBit {
        tail_width: f64,
        smaller_tail_width: f64,
        pin_bit_diameter: f64,
    },

    /// The tails do not fit side by side on the board.
    #[error(
        "The tails add up to {cumulative_tail_width}mm, which does not fit on a \
         {board_width}mm wide board.\nReduce the number of tails or the tail width.{}",
        odd_padding_note(.odd_tail_count)
    )]
    TailsExceedBoardWidth {
        cumulative_tail_width: f64,
        board_width: f64,
        odd_tail_count: bool,
    },

    /// The gaps between tails are narrower than the dovetail bit.
    #[error(
        "The cuts between the tails would be {inter_tail_cut_width:.2}mm wide.\n\n\
         The dovetail bit is {upper_tail_diameter:.2}mm wide when plunged to \
         {pin_thickness}mm (the pin board thickness), so it cannot make these cuts.\n\n\
         Reduce the number of tails or the tail width."
    )]
    InterTailCutTooNarrow {
        inter_tail_cut_width: f64,
        upper_tail_diameter: f64,
        pin_thickness: f64,
    },
}

fn odd_padding_note(odd_tail_count: &bool) -> &'static str {
    if *odd_tail_count {
        "\nAn odd number of tails adds a half tail at each board edge, \
         which takes up the width of one more tail."
    } else {
        ""
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "cut_angle".to_string(),
            value: 95.0,
            min: 0.0,
            max: 90.0,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'cut_angle' out of range: 95 (valid: 0..90)"
        );
    }

    #[test]
    fn test_tails_exceed_note_only_for_odd_counts() {
        let even = ValidationFailure::TailsExceedBoardWidth {
            cumulative_tail_width: 160.0,
            board_width: 150.0,
            odd_tail_count: false,
        };
        let odd = ValidationFailure::TailsExceedBoardWidth {
            cumulative_tail_width: 160.0,
            board_width: 150.0,
            odd_tail_count: true,
        };
        assert!(even.to_string().contains("160mm"));
        assert!(!even.to_string().contains("half tail"));
        assert!(odd.to_string().contains("half tail"));
    }

    #[test]
    fn test_failure_messages_name_derived_values() {
        let err = ValidationFailure::InterTailCutTooNarrow {
            inter_tail_cut_width: 3.333_333,
            upper_tail_diameter: 5.761_54,
            pin_thickness: 15.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("3.33mm"));
        assert!(msg.contains("5.76mm"));
        assert!(msg.contains("15mm"));
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::InvalidDimensions("width".to_string());
        let failure: ValidationFailure = param_err.clone().into();
        assert!(matches!(failure, ValidationFailure::InvalidParameter(_)));

        let cam_err: CamToolError = failure.into();
        assert!(matches!(cam_err, CamToolError::Validation(_)));

        let cam_err: CamToolError = param_err.into();
        assert!(matches!(cam_err, CamToolError::Parameter(_)));
    }
}
