//! Benchmark for geometry literal decoding using GeoJSON feature data.
//!
//! Reads a FeatureCollection (or synthesizes one), converts each geometry to
//! a literal tree and times decoding and encoding.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Instant;

use geojson_input::{
    decode_geometry, encode_geometry, DecodeContext, Geometry, GeometryType, Literal, ObjectField,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Value>,
}

// =============================================================================
// CONVERSION TO LITERALS
// =============================================================================

/// Converts parsed JSON to a literal tree, borrowing strings from the input.
fn json_to_literal(value: &Value) -> Literal<'_> {
    match value {
        Value::Null => Literal::Null,
        Value::Bool(b) => Literal::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Literal::Int(i),
            None => Literal::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Literal::string(s.as_str()),
        Value::Array(items) => Literal::List(items.iter().map(json_to_literal).collect()),
        Value::Object(fields) => Literal::Object(
            fields
                .iter()
                .map(|(name, value)| ObjectField::new(name.as_str(), json_to_literal(value)))
                .collect(),
        ),
    }
}

/// A geometry literal with the type its `type` field names.
struct Input<'a> {
    geometry_type: GeometryType,
    literal: Literal<'a>,
}

fn collect_inputs(features: &[Feature]) -> (Vec<Input<'_>>, usize) {
    let mut inputs = Vec::with_capacity(features.len());
    let mut skipped = 0;
    for geometry in features.iter().filter_map(|f| f.geometry.as_ref()) {
        let declared = geometry.get("type").and_then(Value::as_str).and_then(GeometryType::from_name);
        match declared {
            Some(geometry_type) => inputs.push(Input { geometry_type, literal: json_to_literal(geometry) }),
            None => skipped += 1,
        }
    }
    (inputs, skipped)
}

// =============================================================================
// SYNTHETIC DATA
// =============================================================================

fn square(x: f64, y: f64, size: f64) -> Value {
    json!([[x, y], [x + size, y], [x + size, y + size], [x, y + size], [x, y]])
}

/// Builds a deterministic feature collection covering every geometry type.
fn synthesize(count: usize) -> FeatureCollection {
    let features = (0..count)
        .map(|i| {
            let x = (i % 360) as f64 - 180.0;
            let y = ((i / 360) % 180) as f64 - 90.0;
            let geometry = match i % 7 {
                0 => json!({ "type": "Point", "coordinates": [x, y] }),
                1 => json!({ "type": "LineString", "coordinates": [[x, y], [x + 0.5, y + 0.5], [x + 1.0, y]], "crs": 4326 }),
                2 => json!({ "type": "Polygon", "coordinates": [square(x, y, 1.0), square(x + 0.25, y + 0.25, 0.5)] }),
                3 => json!({ "type": "MultiPoint", "coordinates": [[x, y], [x, y + 1.0]], "crs": 3857 }),
                4 => json!({ "type": "MultiLineString", "coordinates": [[[x, y], [x + 1.0, y]], [[x, y + 1.0], [x + 1.0, y + 1.0]]] }),
                5 => json!({ "type": "MultiPolygon", "coordinates": [[square(x, y, 0.5)], [square(x + 1.0, y, 0.5)]], "crs": 4326 }),
                _ => json!({
                    "type": "GeometryCollection",
                    "geometries": [
                        { "type": "Point", "coordinates": [x, y] },
                        { "type": "LineString", "coordinates": [[x, y], [x + 1.0, y + 1.0]] }
                    ],
                    "crs": 4326
                }),
            };
            Feature { geometry: Some(geometry) }
        })
        .collect();
    FeatureCollection { features }
}

// =============================================================================
// BENCHMARK
// =============================================================================

fn decode_all(inputs: &[Input<'_>], ctx: &DecodeContext<'_>) -> (Vec<Geometry>, usize) {
    let mut decoded = Vec::with_capacity(inputs.len());
    let mut failures = 0;
    for input in inputs {
        match decode_geometry(&input.literal, input.geometry_type, ctx) {
            Ok(Some(geometry)) => decoded.push(geometry),
            Ok(None) => {}
            Err(err) => {
                if failures < 5 {
                    warn!(error = %err, "geometry rejected");
                }
                failures += 1;
            }
        }
    }
    (decoded, failures)
}

fn main() {
    // Setup logging.
    let directives = env::var("RUST_LOG").unwrap_or("warn,bench_geometries=info".into());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    FmtSubscriber::builder().with_env_filter(env_filter).init();

    let data_path = env::args().nth(1);
    let collection = match data_path.as_deref() {
        Some(path) if Path::new(path).exists() => {
            info!(path, "loading features");
            let json_data = fs::read_to_string(path).expect("Failed to read feature file");
            let parse_start = Instant::now();
            let collection: FeatureCollection =
                serde_json::from_str(&json_data).expect("Failed to parse FeatureCollection");
            println!("Parsed {} features in {:?}", collection.features.len(), parse_start.elapsed());
            collection
        }
        _ => {
            let collection = synthesize(100_000);
            println!("Synthesized {} features", collection.features.len());
            collection
        }
    };

    let convert_start = Instant::now();
    let (inputs, skipped) = collect_inputs(&collection.features);
    println!(
        "Converted {} geometries to literals in {:?} ({} skipped)",
        inputs.len(),
        convert_start.elapsed(),
        skipped
    );

    let ctx = DecodeContext::global();

    // Warmup
    let (decoded, failures) = decode_all(&inputs, &ctx);

    let mut by_type: BTreeMap<GeometryType, usize> = BTreeMap::new();
    for geometry in &decoded {
        *by_type.entry(geometry.geometry_type()).or_default() += 1;
    }
    println!("\nDecoded {} geometries, {} rejected", decoded.len(), failures);
    for (geometry_type, count) in &by_type {
        println!("  - {geometry_type}: {count}");
    }

    const DECODE_ITERS: u32 = 10;
    let decode_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        let _ = decode_all(&inputs, &ctx);
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;
    println!("\nDecode: {:?} per pass", decode_time);
    println!(
        "  Throughput: {:.0} geometries/s",
        inputs.len() as f64 / decode_time.as_secs_f64()
    );

    let encode_start = Instant::now();
    let encoded: Vec<Literal<'static>> = decoded
        .iter()
        .map(|g| encode_geometry(g).expect("Failed to encode"))
        .collect();
    println!("\nEncode: {:?}", encode_start.elapsed());

    // Verify decoded geometries survive encode/decode
    for (literal, original) in encoded.iter().zip(&decoded) {
        let again = decode_geometry(literal, original.geometry_type(), &ctx).expect("Failed to decode encoded geometry");
        assert_eq!(again.as_ref(), Some(original), "Round trip should preserve geometry");
    }
    println!("Round trip verified for {} geometries", encoded.len());
}
