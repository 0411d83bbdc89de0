/// Translation of an OBJ mesh towards the origin.
use crate::error::Result;
use crate::obj::{Vertex, obj_lines, parse_vertex};

/// Significant digits kept for translated x and y.
const SIGNIFICANT_DIGITS: i32 = 12;

/// Shortest decimal text of `value` rounded to `SIGNIFICANT_DIGITS`.
fn format_coordinate(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return if value == 0.0 {
            "0".to_string()
        } else {
            value.to_string()
        };
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    let trimmed = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };

    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Shifts every vertex so the smallest x and smallest y become zero. z is
/// kept verbatim. Vertex records are emitted first, followed by all other
/// lines in input order.
pub fn translate_to_min(text: &str) -> Result<String> {
    let vertices = obj_lines(text)
        .filter(|line| line.tag == "v")
        .map(|line| parse_vertex(&line))
        .collect::<Result<Vec<Vertex>>>()?;

    if vertices.is_empty() {
        return Ok(text.to_string());
    }

    let (min_x, min_y) = vertices.iter().fold(
        (f64::INFINITY, f64::INFINITY),
        |(min_x, min_y), v| (min_x.min(v.position[0]), min_y.min(v.position[1])),
    );

    let mut out = String::with_capacity(text.len());
    for v in &vertices {
        out.push_str(&format!(
            "v {} {} {}\n",
            format_coordinate(v.position[0] - min_x),
            format_coordinate(v.position[1] - min_y),
            v.text[2]
        ));
    }

    for line in text.lines() {
        if line.split_whitespace().next() != Some("v") {
            out.push_str(line);
            out.push('\n');
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_moves_to_origin() {
        let text = "v 100.5 200 1.25\nv 102.5 201 3\nv 101 204 2\nf 1 2 3\n";
        let out = translate_to_min(text).unwrap();
        assert_eq!(out, "v 0 0 1.25\nv 2 1 3\nv 0.5 4 2\nf 1 2 3\n");
    }

    #[test]
    fn test_translated_coordinates_hide_rounding_noise() {
        let text = "v 0.1 0.3 2\nv 0.3 0.8 2\nv 0.5 0.4 2.25\n";
        let out = translate_to_min(text).unwrap();
        assert_eq!(out, "v 0 0 2\nv 0.2 0.5 2\nv 0.4 0.1 2.25\n");
    }

    #[test]
    fn test_large_coordinates_keep_decimals() {
        let text = "v 84000.25 446000.5 0\nv 85000.123 446001.75 0\n";
        let out = translate_to_min(text).unwrap();
        assert_eq!(out, "v 0 0 0\nv 999.873 1.25 0\n");
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(0.0), "0");
        assert_eq!(format_coordinate(-0.0), "0");
        assert_eq!(format_coordinate(0.30000000000000004), "0.3");
        assert_eq!(format_coordinate(12.5), "12.5");
        assert_eq!(format_coordinate(250.0), "250");
        assert_eq!(format_coordinate(1e-4), "0.0001");
    }

    #[test]
    fn test_non_vertex_lines_keep_order() {
        let text = "mtllib a.mtl\nv 5 5 0\no x\nusemtl Road\nv 6 7 0\nf 1 2 2\n";
        let out = translate_to_min(text).unwrap();
        assert_eq!(
            out,
            "v 0 0 0\nv 1 2 0\nmtllib a.mtl\no x\nusemtl Road\nf 1 2 2\n"
        );
    }

    #[test]
    fn test_without_vertices_is_unchanged() {
        let text = "# empty\no nothing\n";
        assert_eq!(translate_to_min(text).unwrap(), text);
    }

    #[test]
    fn test_malformed_vertex_fails() {
        assert!(translate_to_min("v 1 x 2\n").is_err());
    }
}
