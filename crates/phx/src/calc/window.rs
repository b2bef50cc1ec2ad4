//! Whole-window thermal transmittance after ISO 10077-1.

use crate::model::constructions::{PhxWindowFrameElement, WindowFrames};

/// Reference window size used for window-type U-values, m.
pub const ISO_REFERENCE_WIDTH: f64 = 1.23;
pub const ISO_REFERENCE_HEIGHT: f64 = 1.48;

/// Result of [`iso_10077_1`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowPerformance {
    /// W/m²K
    pub u_w: f64,
    /// Glazing area over window area.
    pub frame_factor: f64,
    pub area_window: f64,
    pub area_glazing: f64,
    pub area_frames: f64,
}

fn frame_area(frame: &PhxWindowFrameElement, interior_length: f64, adj_1: f64, adj_2: f64) -> f64 {
    frame.width * interior_length + 0.5 * (frame.width * adj_1 + frame.width * adj_2)
}

/// U_w and frame factor of a `width` × `height` window built from
/// `frames` and a glazing of U-value `glazing_u`.
pub fn iso_10077_1(frames: &WindowFrames, glazing_u: f64, width: f64, height: f64) -> WindowPerformance {
    let WindowFrames {
        top,
        right,
        bottom,
        left,
    } = frames;

    let int_top = width - (left.width + right.width);
    let int_bottom = int_top;
    let int_left = height - (top.width + bottom.width);
    let int_right = int_left;

    let a_top = frame_area(top, int_top, left.width, right.width);
    let a_bottom = frame_area(bottom, int_bottom, left.width, right.width);
    let a_left = frame_area(left, int_left, top.width, bottom.width);
    let a_right = frame_area(right, int_right, top.width, bottom.width);

    let area_window = width * height;
    let area_glazing = int_top * int_right;
    let area_frames = a_top + a_bottom + a_left + a_right;

    let heat_loss_glazing = glazing_u * area_glazing;
    let heat_loss_frames = top.u_value * a_top
        + bottom.u_value * a_bottom
        + left.u_value * a_left
        + right.u_value * a_right;
    let heat_loss_psi_glazing = top.psi_glazing * int_top
        + bottom.psi_glazing * int_bottom
        + left.psi_glazing * int_left
        + right.psi_glazing * int_right;
    let heat_loss_psi_install = top.psi_install * width
        + bottom.psi_install * width
        + left.psi_install * height
        + right.psi_install * height;

    let total = heat_loss_glazing + heat_loss_frames + heat_loss_psi_glazing + heat_loss_psi_install;

    WindowPerformance {
        u_w: total / area_window,
        frame_factor: area_glazing / area_window,
        area_window,
        area_glazing,
        area_frames,
    }
}

/// [`iso_10077_1`] over the standard reference window.
pub fn iso_10077_1_reference(frames: &WindowFrames, glazing_u: f64) -> WindowPerformance {
    iso_10077_1(frames, glazing_u, ISO_REFERENCE_WIDTH, ISO_REFERENCE_HEIGHT)
}
