//! KML map of the route partition.
//!
//! One placemark per stop, colored by route so a dispatcher can eyeball
//! the clustering on a map. Colors are cosmetic only and have no bearing
//! on cluster correctness; the palette is seeded so reruns produce the
//! same file.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::models::Stop;

/// Writes `deliveries.kml` with one point per delivery.
pub fn write_kml(dir: &Path, routes: &[Vec<Stop>]) -> Result<PathBuf> {
    let path = dir.join("deliveries.kml");
    let colors = route_colors(routes.len());

    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    doc.push_str("<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n");
    doc.push_str("  <Document>\n");

    for (index, route) in routes.iter().enumerate() {
        let label = format!("route-{}", index + 1);
        for stop in route {
            let Some(location) = stop.location else {
                continue;
            };
            let name = escape(&format!(
                "{} {} ({} bags)",
                stop.id, stop.address, stop.load
            ));
            // KML colors are aabbggrr.
            let _ = write!(
                doc,
                "    <Placemark>\n      <name>{name}</name>\n      <description>{label}</description>\n      <Style><IconStyle><color>{color}</color></IconStyle></Style>\n      <Point><coordinates>{lon},{lat},0</coordinates></Point>\n    </Placemark>\n",
                color = colors[index],
                lon = location.longitude,
                lat = location.latitude,
            );
        }
    }

    doc.push_str("  </Document>\n");
    doc.push_str("</kml>\n");
    fs::write(&path, doc)?;
    Ok(path)
}

/// One `aabbggrr` color per route: hues spread evenly around the wheel
/// with jittered lightness and saturation. Fixed seed keeps artifacts
/// stable across reruns.
fn route_colors(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..count)
        .map(|i| {
            let hue = i as f64 / count.max(1) as f64;
            let lightness = (50.0 + rng.random_range(0.0..10.0)) / 100.0;
            let saturation = (90.0 + rng.random_range(0.0..10.0)) / 100.0;
            let (r, g, b) = hsl_to_rgb(hue, lightness, saturation);
            format!("ff{b:02x}{g:02x}{r:02x}")
        })
        .collect()
}

fn hsl_to_rgb(hue: f64, lightness: f64, saturation: f64) -> (u8, u8, u8) {
    let channel = |t: f64| -> u8 {
        let t = t.rem_euclid(1.0);
        let q = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;
        let value = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    };
    (
        channel(hue + 1.0 / 3.0),
        channel(hue),
        channel(hue - 1.0 / 3.0),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
