//! GPX 1.1 track export
//!
//! Renders a stored tour as the location-exchange document offered for
//! download: one track, one segment, timestamped trackpoints.

use crate::tour::TourRecord;
use chrono::SecondsFormat;

/// Render a tour as a GPX 1.1 document
pub fn tour_to_gpx(tour: &TourRecord) -> String {
    let mut points = String::new();
    for p in &tour.points {
        let time = p.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        points.push_str(&format!(
            "<trkpt lat=\"{}\" lon=\"{}\"><time>{}</time></trkpt>",
            p.lat, p.lon, time
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"monobility\">\n  \
         <trk><name>{}</name><trkseg>\n    {}\n  \
         </trkseg></trk>\n\
         </gpx>",
        xml_escape(&tour.name),
        points
    )
}

/// Download filename for a tour: whitespace runs become underscores
pub fn export_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out.push_str(".gpx");
    out
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
