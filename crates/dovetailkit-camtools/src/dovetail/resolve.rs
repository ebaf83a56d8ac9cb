//! Parameter validation and derivation of the joint geometry.

use super::types::{JointParameters, ResolvedGeometry};
use crate::error::ValidationFailure;
use tracing::debug;

/// Cutting width of a tapered bit at the top of a cut `depth` deep.
///
/// The bit is widest at its tip and narrows by `2 * tan(angle)` per
/// millimeter of height. For the common 15° bit with a 13.8mm tip plunged
/// 10mm deep: `13.8 - 2 * 0.268 * 10 = 8.44mm`.
pub fn upper_tail_diameter(tail_bit_diameter: f64, tan_cut_angle: f64, depth: f64) -> f64 {
    tail_bit_diameter - 2.0 * tan_cut_angle * depth
}

/// Validate `params` and derive the joint geometry.
///
/// Checks run in a fixed order and the first failure is returned.
pub fn resolve(params: JointParameters) -> Result<ResolvedGeometry, ValidationFailure> {
    if let Err(err) = params.validate() {
        return reject(err.into());
    }

    let tan_cut_angle = params.cut_angle.to_radians().tan();
    let is_odd_tail_count = params.num_tails % 2 == 1;

    let upper_tail_diameter =
        upper_tail_diameter(params.tail_bit_diameter, tan_cut_angle, params.pin_thickness);
    if upper_tail_diameter <= 0.0 {
        return reject(ValidationFailure::DiameterNonPositive {
            cut_angle: params.cut_angle,
            tail_bit_diameter: params.tail_bit_diameter,
            pin_thickness: params.pin_thickness,
            upper_tail_diameter,
        });
    }

    // The user gives the wide end of a tail, which the narrow top of the bit
    // cuts. The narrow end is cut by the wide tip, so it loses exactly the
    // difference between the two bit diameters.
    let smaller_tail_width =
        params.tail_width - (params.tail_bit_diameter - upper_tail_diameter);
    if smaller_tail_width < params.pin_bit_diameter {
        return reject(ValidationFailure::TailNarrowerThanPinBit {
            tail_width: params.tail_width,
            smaller_tail_width,
            pin_bit_diameter: params.pin_bit_diameter,
        });
    }

    // Odd counts put a half tail on each edge, which together cost one more tail.
    let num_tail_cuts = if is_odd_tail_count {
        u64::from(params.num_tails) + 1
    } else {
        u64::from(params.num_tails)
    };
    debug_assert!(num_tail_cuts > 0);

    let cumulative_tail_width = num_tail_cuts as f64 * params.tail_width;
    if cumulative_tail_width >= params.board_width {
        return reject(ValidationFailure::TailsExceedBoardWidth {
            cumulative_tail_width,
            board_width: params.board_width,
            odd_tail_count: is_odd_tail_count,
        });
    }

    let inter_tail_cut_width = (params.board_width - cumulative_tail_width) / num_tail_cuts as f64;
    if inter_tail_cut_width < upper_tail_diameter {
        return reject(ValidationFailure::InterTailCutTooNarrow {
            inter_tail_cut_width,
            upper_tail_diameter,
            pin_thickness: params.pin_thickness,
        });
    }

    debug!(
        upper_tail_diameter,
        smaller_tail_width,
        inter_tail_cut_width,
        num_tail_cuts,
        "resolved dovetail geometry"
    );

    Ok(ResolvedGeometry {
        params,
        tan_cut_angle,
        is_odd_tail_count,
        upper_tail_diameter,
        smaller_tail_width,
        num_tail_cuts,
        inter_tail_cut_width,
    })
}

fn reject(failure: ValidationFailure) -> Result<ResolvedGeometry, ValidationFailure> {
    debug!(%failure, "dovetail parameters rejected");
    Err(failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_default_parameters_resolve() {
        let resolved = resolve(JointParameters::default()).unwrap();

        assert_close(resolved.tan_cut_angle(), 0.267_949);
        assert!(!resolved.is_odd_tail_count());
        assert_close(resolved.upper_tail_diameter(), 5.761_53);
        assert_close(resolved.smaller_tail_width(), 11.961_53);
        assert_eq!(resolved.num_tail_cuts(), 2);
        assert_close(resolved.cumulative_tail_width(), 40.0);
        assert_close(resolved.inter_tail_cut_width(), 55.0);
        assert_close(resolved.tail_pitch(), 75.0);
    }

    #[test]
    fn test_upper_tail_diameter_example() {
        let tan = 15f64.to_radians().tan();
        assert_close(upper_tail_diameter(13.8, tan, 10.0), 8.440_98);
    }

    #[test]
    fn test_odd_count_adds_a_cut() {
        let params = JointParameters {
            num_tails: 3,
            ..JointParameters::default()
        };
        let resolved = resolve(params).unwrap();
        assert!(resolved.is_odd_tail_count());
        assert_eq!(resolved.num_tail_cuts(), 4);
        assert_close(resolved.inter_tail_cut_width(), (150.0 - 80.0) / 4.0);
    }

    #[test]
    fn test_domain_errors_come_first() {
        let params = JointParameters {
            cut_angle: 90.0,
            pin_thickness: 1000.0,
            ..JointParameters::default()
        };
        assert!(matches!(
            resolve(params),
            Err(ValidationFailure::InvalidParameter(_))
        ));

        let params = JointParameters {
            num_tails: 0,
            ..JointParameters::default()
        };
        assert!(matches!(
            resolve(params),
            Err(ValidationFailure::InvalidParameter(_))
        ));

        let params = JointParameters {
            board_width: f64::NAN,
            ..JointParameters::default()
        };
        assert!(matches!(
            resolve(params),
            Err(ValidationFailure::InvalidParameter(_))
        ));
    }
}
