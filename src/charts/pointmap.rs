//! Interactive city map: a self-contained Leaflet HTML document with one
//! circle marker per station row, generated by string templating.

use std::fs;
use std::path::Path;

use crate::data::StationMarker;

use super::ChartError;

/// Map view when a city has no matching rows (roughly the center of Germany).
const FALLBACK_CENTER: (f64, f64) = (51.1657, 10.4515);
const FALLBACK_ZOOM: u8 = 6;
const CITY_ZOOM: u8 = 13;

/// Writes the interactive station map for one city.
pub struct PointMapRenderer;

impl PointMapRenderer {
    pub fn render(path: &Path, city: &str, markers: &[StationMarker]) -> Result<(), ChartError> {
        fs::write(path, Self::html(city, markers))?;
        Ok(())
    }

    /// Build the full HTML document. Kept separate from the file write so the
    /// marker set can be checked without touching disk.
    pub fn html(city: &str, markers: &[StationMarker]) -> String {
        let (center, zoom) = Self::view(markers);

        let mut marker_js = String::new();
        for marker in markers {
            let popup = escape_js(&format!("{} ({} kW)", marker.operator, marker.power_kw));
            marker_js.push_str(&format!(
                "    L.circleMarker([{lat}, {lon}], {{radius: 5, color: 'blue', fill: true}})\n      .bindPopup('{popup}').addTo(map);\n",
                lat = marker.latitude,
                lon = marker.longitude,
            ));
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Charging stations in {title}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
  <div id="map"></div>
  <script>
    var map = L.map('map').setView([{lat}, {lon}], {zoom});
    L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
      attribution: '&copy; OpenStreetMap contributors'
    }}).addTo(map);
{markers}  </script>
</body>
</html>
"#,
            title = escape_html(city),
            lat = center.0,
            lon = center.1,
            zoom = zoom,
            markers = marker_js,
        )
    }

    fn view(markers: &[StationMarker]) -> ((f64, f64), u8) {
        if markers.is_empty() {
            return (FALLBACK_CENTER, FALLBACK_ZOOM);
        }
        let n = markers.len() as f64;
        let lat = markers.iter().map(|m| m.latitude).sum::<f64>() / n;
        let lon = markers.iter().map(|m| m.longitude).sum::<f64>() / n;
        ((lat, lon), CITY_ZOOM)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape for a single-quoted JS string literal inside an inline script.
fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('<', "\\u003c")
        .replace('\n', "\\n")
}
