//! Lightweight encode benchmark harness for local baselines.
//!
//! Run from repository root:
//! `cargo run -p tspl_toolchain_core --example encode_benchmark --release`

use std::time::Instant;

use tspl_toolchain_core::{Element, LabelJob, MemoryConnector, TextElement};

type BoxError = Box<dyn std::error::Error>;

fn run_benchmark(label: &str, job: &LabelJob, iterations: usize) -> Result<(), BoxError> {
    let encode_start = Instant::now();
    let mut bytes = 0;
    for _ in 0..iterations {
        let mut out = MemoryConnector::new();
        let mut encoder = job.encode(&mut out)?;
        encoder.close()?;
        drop(encoder);
        bytes = out.data().len();
    }
    let encode_elapsed = encode_start.elapsed();

    let json = job.to_json_pretty()?;
    let parse_start = Instant::now();
    for _ in 0..iterations {
        let _ = LabelJob::from_json(&json);
    }
    let parse_elapsed = parse_start.elapsed();

    println!("Benchmark: {label}");
    println!("  elements: {}, output_bytes: {bytes}", job.elements.len());
    println!(
        "  encode: total={:?}, per_iter={:.3} us",
        encode_elapsed,
        encode_elapsed.as_secs_f64() * 1e6 / iterations as f64
    );
    println!(
        "  parse:  total={:?}, per_iter={:.3} us",
        parse_elapsed,
        parse_elapsed.as_secs_f64() * 1e6 / iterations as f64
    );
    Ok(())
}

/// A sheet of `rows` text lines, each at maximum scale.
fn text_sheet(rows: u32) -> LabelJob {
    let mut job = LabelJob::price_tag_sample();
    job.elements = (0..rows)
        .map(|row| {
            Element::Text(TextElement {
                content: "0123456789ABCDEF".into(),
                x: 10,
                y: 10 + row * 24,
                x_multiplier: 15,
                y_multiplier: 15,
                ..TextElement::default()
            })
        })
        .collect();
    job
}

fn main() -> Result<(), BoxError> {
    let iterations = std::env::var("TSPL_BENCH_ITERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(10_000);

    run_benchmark("price_tag", &LabelJob::price_tag_sample(), iterations)?;
    run_benchmark("text_sheet_200", &text_sheet(200), iterations)?;
    Ok(())
}
