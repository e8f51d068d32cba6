use datatest_stable::Utf8Path;
use regex_lite::Regex;
use vectis::{Point, PointState, Shape, parse_path_data};

/// Coordinates in fixtures are written with a few decimals at most
const FLOAT_TOLERANCE: f64 = 1e-6;

// =============================================================================
// Fixture format
// =============================================================================

/// One `.path` fixture: `key: value` lines, `#` comments.
///
/// ```text
/// d: M0,0 L10,0 L10,10 Z
/// segments: 4
/// bbox: 0 0 10 10        (or `empty`)
/// diagnostics: 0
/// serialized: M0,0 L10,0 L10,10 Z
/// fill: #000             (any pen attribute)
/// probe: 5 5 outside
/// ```
#[derive(Debug, Default)]
struct Fixture {
    d: String,
    segments: Option<usize>,
    bbox: Option<Option<[f64; 4]>>,
    diagnostics: Option<usize>,
    serialized: Option<String>,
    pen: Vec<(String, String)>,
    probes: Vec<(Point, PointState)>,
}

fn numbers(value: &str) -> Result<Vec<f64>, String> {
    value
        .split_whitespace()
        .map(|n| n.parse::<f64>().map_err(|e| format!("bad number {n:?}: {e}")))
        .collect()
}

fn parse_fixture(source: &str) -> Result<Fixture, String> {
    let line_re = Regex::new(r"^([a-z][a-z-]*):\s*(.*?)\s*$").map_err(|e| e.to_string())?;
    let probe_re = Regex::new(r"^(\S+)\s+(\S+)\s+(inside|edge|outside)$").map_err(|e| e.to_string())?;

    let mut fixture = Fixture::default();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let caps = line_re.captures(line).ok_or_else(|| format!("unreadable line: {line}"))?;
        let value = &caps[2];
        match &caps[1] {
            "d" => fixture.d = value.to_string(),
            "segments" => fixture.segments = Some(value.parse().map_err(|e| format!("segments: {e}"))?),
            "diagnostics" => fixture.diagnostics = Some(value.parse().map_err(|e| format!("diagnostics: {e}"))?),
            "serialized" => fixture.serialized = Some(value.to_string()),
            "bbox" if value == "empty" => fixture.bbox = Some(None),
            "bbox" => {
                let n = numbers(value)?;
                let corners: [f64; 4] = n.try_into().map_err(|n| format!("bbox needs 4 numbers, got {n:?}"))?;
                fixture.bbox = Some(Some(corners));
            }
            "probe" => {
                let probe = probe_re.captures(value).ok_or_else(|| format!("unreadable probe: {value}"))?;
                let xy = numbers(&format!("{} {}", &probe[1], &probe[2]))?;
                let state = match &probe[3] {
                    "inside" => PointState::Inside,
                    "edge" => PointState::Edge,
                    _ => PointState::Outside,
                };
                fixture.probes.push((Point::new(xy[0], xy[1]), state));
            }
            key => fixture.pen.push((key.to_string(), value.to_string())),
        }
    }
    Ok(fixture)
}

// =============================================================================
// Test
// =============================================================================

fn test_path_file(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let fixture = parse_fixture(&source)?;

    let parsed = parse_path_data(&fixture.d);
    let mut shape = parsed.path;
    for (key, value) in &fixture.pen {
        if !shape.pen_mut().apply_attribute(key, value) {
            return Err(format!("{path}: unknown fixture key {key:?}").into());
        }
    }

    if let Some(expected) = fixture.diagnostics {
        assert_eq!(
            parsed.diagnostics.len(),
            expected,
            "{path}: diagnostics {:?}",
            parsed.diagnostics
        );
    }
    if let Some(expected) = fixture.segments {
        assert_eq!(shape.len(), expected, "{path}: segment count for {shape}");
    }
    if let Some(expected) = &fixture.serialized {
        assert_eq!(&shape.to_string(), expected, "{path}: serialization");
    }
    match fixture.bbox {
        Some(None) => assert!(shape.bounding_box().is_empty(), "{path}: expected an empty bbox"),
        Some(Some([x0, y0, x1, y1])) => {
            let bb = shape.bounding_box();
            let actual = [bb.min.x, bb.min.y, bb.max.x, bb.max.y];
            let close = actual
                .iter()
                .zip([x0, y0, x1, y1])
                .all(|(a, e)| (a - e).abs() < FLOAT_TOLERANCE);
            assert!(close, "{path}: bbox {actual:?} != {:?}", [x0, y0, x1, y1]);
        }
        None => {}
    }

    for (point, expected) in &fixture.probes {
        let state = shape.contains(*point)?;
        assert_eq!(state, *expected, "{path}: probe {point}");
    }

    Ok(())
}

datatest_stable::harness! {
    { test = test_path_file, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"), pattern = r"\.path$" },
}
