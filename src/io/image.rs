//! PNG snapshots of vein networks and capture filename selection

use crate::geometry::Polygon;
use crate::io::configuration::{
    CENTER_MARKER_RADIUS, INTERSECTION_MARKER_RADIUS, MAX_CAPTURE_INDEX,
};
use crate::io::error::{Result, VenationError};
use crate::veins::network::VeinNetwork;
use glam::DVec2;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

const BACKGROUND: [u8; 3] = [0, 0, 0];
const VEIN_COLOR: [u8; 3] = [255, 255, 255];
const CELL_COLOR: [u8; 3] = [90, 140, 200];
const CENTER_COLOR: [u8; 3] = [240, 200, 60];
const INTERSECTION_COLOR: [u8; 3] = [255, 40, 40];

/// Rasterize a network onto an opaque canvas in world coordinates
///
/// Primary veins are blended with the network's alpha. Voronoi cell outlines,
/// inhibitory centers and the first intersection are drawn when present.
/// Geometry outside the canvas is clipped.
pub fn render_network(network: &VeinNetwork, width: u32, height: u32) -> RgbaImage {
    let [r, g, b] = BACKGROUND;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, u8::MAX]));

    for region in network.regions() {
        for piece in region.cells().iter().flat_map(|cell| cell.pieces()) {
            draw_polygon(&mut canvas, piece, CELL_COLOR, u8::MAX);
        }
        for &center in region.inhibitory_centers() {
            fill_disc(&mut canvas, center, CENTER_MARKER_RADIUS, CENTER_COLOR);
        }
    }

    for root in network.roots() {
        root.for_each(&mut |segment| {
            draw_line(
                &mut canvas,
                segment.position,
                segment.endpoint(),
                VEIN_COLOR,
                network.alpha(),
            );
        });
    }

    if let Some(point) = network.first_intersection() {
        draw_ring(
            &mut canvas,
            point,
            INTERSECTION_MARKER_RADIUS,
            INTERSECTION_COLOR,
        );
    }

    canvas
}

/// Render a network and save it as a PNG at `output_path`
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_network_as_png(
    network: &VeinNetwork,
    width: u32,
    height: u32,
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| VenationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    render_network(network, width, height)
        .save(output_path)
        .map_err(|e| VenationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(path = %output_path.display(), "exported network snapshot");
    Ok(())
}

/// Filename for capture `index`, zero-padded to three digits
pub fn capture_filename(prefix: &str, index: usize, suffix: &str) -> String {
    format!("{prefix}{index:03}{suffix}")
}

/// Next capture path in `directory`, one past the highest existing index
///
/// Indices are probed downward from [`MAX_CAPTURE_INDEX`], so a deleted
/// capture in the middle of a run is never overwritten.
pub fn next_capture_path(directory: &Path, prefix: &str, suffix: &str) -> PathBuf {
    let next = (0..=MAX_CAPTURE_INDEX)
        .rev()
        .find(|&index| {
            directory
                .join(capture_filename(prefix, index, suffix))
                .exists()
        })
        .map_or(0, |highest| highest + 1);
    directory.join(capture_filename(prefix, next, suffix))
}

fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: [u8; 3], alpha: u8) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    let Some(pixel) = canvas.get_pixel_mut_checked(x, y) else {
        return;
    };
    let a = u16::from(alpha);
    for (channel, &source) in pixel.0.iter_mut().zip(&color) {
        let mixed = (u16::from(source) * a + u16::from(*channel) * (255 - a)) / 255;
        *channel = mixed as u8;
    }
}

fn draw_line(canvas: &mut RgbaImage, from: DVec2, to: DVec2, color: [u8; 3], alpha: u8) {
    let size = DVec2::new(f64::from(canvas.width()), f64::from(canvas.height()));
    let Some((from, to)) = clip_to_canvas(from, to, size) else {
        return;
    };
    let (mut x, mut y) = (from.x.round() as i64, from.y.round() as i64);
    let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut error = dx + dy;

    loop {
        blend(canvas, x, y, color, alpha);
        if x == x1 && y == y1 {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += sx;
        }
        if doubled <= dx {
            error += dx;
            y += sy;
        }
    }
}

// Liang-Barsky against the canvas rectangle, padded by one pixel
fn clip_to_canvas(from: DVec2, to: DVec2, size: DVec2) -> Option<(DVec2, DVec2)> {
    let delta = to - from;
    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);
    let checks = [
        (-delta.x, from.x + 1.0),
        (delta.x, size.x - from.x),
        (-delta.y, from.y + 1.0),
        (delta.y, size.y - from.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            exit = exit.min(t);
        }
    }
    (enter <= exit && from.is_finite() && to.is_finite())
        .then(|| (from + delta * enter, from + delta * exit))
}

fn draw_polygon(canvas: &mut RgbaImage, polygon: &Polygon, color: [u8; 3], alpha: u8) {
    for (from, to) in polygon.edges() {
        draw_line(canvas, from, to, color, alpha);
    }
}

// Markers that cannot touch the canvas are skipped before integer conversion
fn marker_center(canvas: &RgbaImage, center: DVec2, radius: i32) -> Option<(i64, i64)> {
    let reach = f64::from(radius) + 1.0;
    let max = DVec2::new(f64::from(canvas.width()), f64::from(canvas.height())) + reach;
    let visible = center.is_finite()
        && center.cmpge(DVec2::splat(-reach)).all()
        && center.cmple(max).all();
    visible.then(|| (center.x.round() as i64, center.y.round() as i64))
}

fn fill_disc(canvas: &mut RgbaImage, center: DVec2, radius: i32, color: [u8; 3]) {
    let Some((cx, cy)) = marker_center(canvas, center, radius) else {
        return;
    };
    let r = i64::from(radius);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                blend(canvas, cx + dx, cy + dy, color, u8::MAX);
            }
        }
    }
}

fn draw_ring(canvas: &mut RgbaImage, center: DVec2, radius: i32, color: [u8; 3]) {
    let Some((cx, cy)) = marker_center(canvas, center, radius) else {
        return;
    };
    let r = i64::from(radius);
    let inner = (r - 1) * (r - 1);
    for dy in -r..=r {
        for dx in -r..=r {
            let distance = dx * dx + dy * dy;
            if distance <= r * r && distance >= inner {
                blend(canvas, cx + dx, cy + dy, color, u8::MAX);
            }
        }
    }
}
