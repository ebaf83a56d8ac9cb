//! Cut layout for the pin board and the tail board.
//!
//! Coordinates are millimeters with the origin at the top-left corner of the
//! pin board, x to the right and y down into the board.

use super::types::{Annotation, BoardLayout, JointLayout, LayoutSettings, ResolvedGeometry};
use crate::anchor::{AnchorMarker, AxisOrientation};
use crate::routing::RoutingClassification;
use crate::shape::{CutDepth, CutShape, Point};
use dovetailkit_core::units::{format_length, get_unit_label, MeasurementSystem};
use tracing::debug;

/// Lay out both boards with the default [`LayoutSettings`].
pub fn generate(resolved: &ResolvedGeometry) -> JointLayout {
    generate_with(resolved, &LayoutSettings::default())
}

/// Lay out both boards. The tail board is placed `board_separation` below
/// the lowest pin board cut.
pub fn generate_with(resolved: &ResolvedGeometry, settings: &LayoutSettings) -> JointLayout {
    let pin_board = pin_board(resolved, settings);
    let tail_origin = pin_board.lower_end + settings.board_separation;
    let tail_board = tail_board(resolved, settings, tail_origin);

    debug!(
        pin_cuts = pin_board.cuts.len(),
        tail_cuts = tail_board.cuts.len(),
        tail_origin,
        "generated dovetail layout"
    );

    JointLayout {
        pin_board,
        tail_board,
    }
}

fn pin_board(resolved: &ResolvedGeometry, settings: &LayoutSettings) -> BoardLayout {
    let p = resolved.params();
    let guide = CutShape::rectangle(
        0.0,
        0.0,
        p.board_width,
        p.pin_thickness,
        RoutingClassification::Guide,
    );
    let (cuts, lower_end) = pin_cuts(resolved, settings);
    let anchor = AnchorMarker::new(AxisOrientation::RT, 0.0, p.pin_thickness, p.pin_thickness / 2.0);

    let depth = CutDepth::new(p.tail_thickness, settings.depth_units);
    let annotations = annotate(
        settings,
        lower_end,
        vec![
            (
                1.0,
                "Cutting pattern for the straight bit in the pin board.".to_string(),
                false,
            ),
            (2.0, format!("Set cutting depth to {}.", depth.encode()), false),
        ],
    );

    BoardLayout {
        guide,
        cuts,
        anchor,
        annotations,
        origin_y: 0.0,
        lower_end,
    }
}

/// Trapezoidal pockets for the straight bit. Each pocket has its narrow edge
/// above the board and its wide edge below it, and keeps the cut angle through
/// the overcut so the bit does not jog at the board faces.
fn pin_cuts(resolved: &ResolvedGeometry, settings: &LayoutSettings) -> (Vec<CutShape>, f64) {
    let p = resolved.params();
    let buffer = p.pin_bit_diameter * settings.overcut_buffer_factor;
    let start_y = -buffer;
    let end_y = p.pin_thickness + buffer;
    let delta_x = buffer * resolved.tan_cut_angle();

    let half_narrow = resolved.smaller_tail_width() / 2.0;
    let half_wide = p.tail_width / 2.0;
    let edge_buffer = settings.horizontal_buffer;
    let pitch = resolved.tail_pitch();
    let depth = CutDepth::new(p.tail_thickness, settings.depth_units);
    let pocket = |points: [(f64, f64); 4]| {
        CutShape::polygon(
            points.into_iter().map(Point::from).collect(),
            RoutingClassification::Interior,
        )
        .with_depth(depth)
    };

    let mut cuts = Vec::with_capacity(p.num_tails as usize + 2);

    let first_center = if resolved.is_odd_tail_count() {
        // Half tails on both edges, running past the edge by the fixed buffer.
        cuts.push(pocket([
            (-edge_buffer, start_y),
            (half_narrow - delta_x, start_y),
            (half_wide + delta_x, end_y),
            (-edge_buffer, end_y),
        ]));
        cuts.push(pocket([
            (p.board_width - half_narrow + delta_x, start_y),
            (p.board_width + edge_buffer, start_y),
            (p.board_width + edge_buffer, end_y),
            (p.board_width - half_wide - delta_x, end_y),
        ]));
        // Half tail, then a full gap, then half of the next tail.
        p.tail_width + resolved.inter_tail_cut_width()
    } else {
        pitch / 2.0
    };

    for i in 0..p.num_tails {
        let x = first_center + f64::from(i) * pitch;
        cuts.push(pocket([
            (x - half_narrow + delta_x, start_y),
            (x + half_narrow - delta_x, start_y),
            (x + half_wide + delta_x, end_y),
            (x - half_wide - delta_x, end_y),
        ]));
    }

    (cuts, end_y)
}

fn tail_board(resolved: &ResolvedGeometry, settings: &LayoutSettings, origin_y: f64) -> BoardLayout {
    let p = resolved.params();
    let guide = CutShape::rectangle(
        0.0,
        origin_y,
        p.board_width,
        origin_y + p.tail_thickness,
        RoutingClassification::Guide,
    );
    let (cuts, lower_end) = tail_cuts(resolved, settings, origin_y);
    let anchor = AnchorMarker::new(
        AxisOrientation::RT,
        0.0,
        origin_y + p.tail_thickness,
        p.tail_thickness / 2.0,
    );

    let units = settings.depth_units;
    let depth = CutDepth::new(p.pin_thickness, units);
    let annotations = annotate(
        settings,
        lower_end,
        vec![
            (
                1.0,
                "Cutting pattern for the dovetail bit in the tail board.".to_string(),
                false,
            ),
            (2.0, format!("Set cutting depth to {}.", depth.encode()), false),
            (
                3.0,
                "Any straight bit can rough out these paths to spare the dovetail bit."
                    .to_string(),
                false,
            ),
            (
                4.5,
                format!(
                    "IMPORTANT: set the cutting diameter to {} when using the dovetail bit!",
                    length_label(resolved.upper_tail_diameter(), units)
                ),
                true,
            ),
            (
                5.5,
                "Do not use incremental depths with the dovetail bit, and plunge and \
                 retract as far away from the board as possible."
                    .to_string(),
                false,
            ),
            (
                6.5,
                "The overcut buffers leave enough room for safe plunging and retracting."
                    .to_string(),
                false,
            ),
            (
                9.0,
                "Skip the text when loading these cut paths onto the router.".to_string(),
                false,
            ),
            (
                10.0,
                "Large numbers of paths can be slow to load on older routers.".to_string(),
                false,
            ),
        ],
    );

    BoardLayout {
        guide,
        cuts,
        anchor,
        annotations,
        origin_y,
        lower_end,
    }
}

/// Rectangular gap cuts for the dovetail bit.
///
/// The bit tapers by itself, so a vertical box is all it needs. The boxes are
/// exactly as wide as the gap, which lets a plain straight bit rough them out
/// first without any offset. Below the board the overrun is the full bit
/// diameter so the bit clears the tails when it retracts.
fn tail_cuts(
    resolved: &ResolvedGeometry,
    settings: &LayoutSettings,
    origin_y: f64,
) -> (Vec<CutShape>, f64) {
    let p = resolved.params();
    let start_y = origin_y - p.tail_bit_diameter * settings.overcut_buffer_factor;
    let end_y =
        origin_y + p.tail_thickness + p.tail_bit_diameter * settings.lower_dovetail_buffer_factor;

    let gap = resolved.inter_tail_cut_width();
    let pitch = resolved.tail_pitch();
    let edge_buffer = settings.horizontal_buffer;
    let depth = CutDepth::new(p.pin_thickness, settings.depth_units);
    let gap_cut = |x0: f64, x1: f64| {
        CutShape::rectangle(x0, start_y, x1, end_y, RoutingClassification::Interior)
            .with_depth(depth)
    };

    let mut cuts = Vec::with_capacity(resolved.num_tail_cuts() as usize + 1);

    if resolved.is_odd_tail_count() {
        // Half tails stay on both edges, every gap is a full one.
        let first = p.tail_width / 2.0;
        for i in 0..resolved.num_tail_cuts() {
            let x = first + i as f64 * pitch;
            cuts.push(gap_cut(x, x + gap));
        }
    } else {
        // Half gaps on both edges, then the full gaps between the tails.
        cuts.push(gap_cut(-edge_buffer, gap / 2.0));
        cuts.push(gap_cut(p.board_width - gap / 2.0, p.board_width + edge_buffer));
        let first = gap / 2.0 + p.tail_width;
        for i in 0..p.num_tails - 1 {
            let x = first + f64::from(i) * pitch;
            cuts.push(gap_cut(x, x + gap));
        }
    }

    (cuts, end_y)
}

fn annotate(
    settings: &LayoutSettings,
    lower_end: f64,
    lines: Vec<(f64, String, bool)>,
) -> Vec<Annotation> {
    let line_height = settings.line_height();
    lines
        .into_iter()
        .map(|(line, text, bold)| Annotation {
            x: 0.0,
            y: lower_end + line * line_height,
            text,
            font_size: settings.font_size,
            bold,
        })
        .collect()
}

fn length_label(value_mm: f64, units: MeasurementSystem) -> String {
    format!("{}{}", format_length(value_mm, units), get_unit_label(units))
}
