//! Scale Factory Integration Tests
//!
//! These tests verify:
//! 1. Declarative specs arriving as JSON build working scales
//! 2. Each scale kind maps domain values the way a renderer expects
//! 3. Invalid specs are rejected with the right error, never defaulted
//! 4. Adaptive scale selection picks sensible kinds from raw data

use telemetry_charts::prelude::*;

const EPSILON: f64 = 1e-9;

// ============================================================================
// Axis Specs From JSON
// ============================================================================

#[test]
fn test_dashboard_axis_pair_from_json() {
    // An x/y axis pair the way a dashboard layout ships it
    let json = r#"[
        {"kind": "time", "domain": [1700000000000, 1700000060000], "range": [0.0, 800.0]},
        {"kind": "linear", "domain": [0.0, 100.0], "range": [400.0, 0.0], "clamp": true}
    ]"#;

    let specs: Vec<ScaleSpec> = serde_json::from_str(json).expect("Axis specs should parse");
    assert_eq!(specs[0].kind(), ScaleKind::Time);
    assert_eq!(specs[1].kind(), ScaleKind::Linear);

    let x = create_scale(&specs[0]).unwrap();
    let y = create_scale(&specs[1]).unwrap();

    // Midpoint of the minute lands mid-chart
    let mid_x = x.scale_value(1_700_000_030_000.0).unwrap();
    assert!((mid_x - 400.0).abs() < EPSILON, "got {mid_x}");

    // y range is flipped for screen coordinates: 0 at the bottom
    assert!((y.scale_value(0.0).unwrap() - 400.0).abs() < EPSILON);
    assert!((y.scale_value(100.0).unwrap() - 0.0).abs() < EPSILON);

    // Clamped: a reading above 100% stays on the chart
    assert!((y.scale_value(130.0).unwrap() - 0.0).abs() < EPSILON);
}

#[test]
fn test_spec_collection_round_trips_through_json() {
    let specs = vec![
        ScaleSpec::Linear {
            domain: [0.0, 100.0],
            range: [0.0, 400.0],
            nice: true,
            clamp: false,
        },
        ScaleSpec::Band {
            domain: vec!["web-1".to_string(), "web-2".to_string()],
            range: [0.0, 200.0],
            padding: 0.1,
        },
        ScaleSpec::Sequential {
            domain: [0.0, 1.0],
            interpolator: "viridis".to_string(),
        },
    ];

    let json = serde_json::to_string(&specs).unwrap();
    let parsed: Vec<ScaleSpec> = serde_json::from_str(&json).unwrap();
    assert_eq!(specs, parsed);
}

// ============================================================================
// Per-Kind Mapping Behavior
// ============================================================================

#[test]
fn test_nice_linear_axis_ticks() {
    let spec = ScaleSpec::Linear {
        domain: [0.13, 9.87],
        range: [0.0, 400.0],
        nice: true,
        clamp: false,
    };
    let scale = create_scale(&spec).unwrap();

    let ticks = scale.ticks(10).unwrap();
    assert_eq!(ticks.first().copied(), Some(0.0));
    assert_eq!(ticks.last().copied(), Some(10.0));
    // Friendly unit steps between
    for pair in ticks.windows(2) {
        assert!((pair[1] - pair[0] - 1.0).abs() < EPSILON);
    }
}

#[test]
fn test_log_axis_for_latency_histogram() {
    // Latencies from 1ms to 1s, three decades
    let spec = ScaleSpec::Log {
        domain: [1.0, 1_000.0],
        range: [0.0, 300.0],
        nice: false,
        clamp: false,
    };
    let scale = create_scale(&spec).unwrap();

    // One decade per 100 pixels
    assert!((scale.scale_value(1.0).unwrap() - 0.0).abs() < EPSILON);
    assert!((scale.scale_value(10.0).unwrap() - 100.0).abs() < EPSILON);
    assert!((scale.scale_value(100.0).unwrap() - 200.0).abs() < EPSILON);
    assert!((scale.scale_value(1_000.0).unwrap() - 300.0).abs() < EPSILON);

    let ticks = scale.ticks(5).unwrap();
    assert_eq!(ticks, vec![1.0, 10.0, 100.0, 1_000.0]);
}

#[test]
fn test_time_axis_ticks_and_format() {
    let spec = ScaleSpec::Time {
        domain: [0, 60_000],
        range: [0.0, 800.0],
        nice: false,
        clamp: false,
    };
    let scale = create_scale(&spec).unwrap();

    // A one-minute window labels down to seconds
    assert_eq!(scale.tick_format(), Some("%H:%M:%S"));

    // Six requested ticks snap to the 15s tier
    let ticks = scale.ticks(6).unwrap();
    assert_eq!(ticks, vec![0.0, 15_000.0, 30_000.0, 45_000.0, 60_000.0]);

    // Epoch ms in, pixel out
    assert!((scale.scale_value(30_000.0).unwrap() - 400.0).abs() < EPSILON);
}

#[test]
fn test_band_layout_for_bar_chart() {
    let spec = ScaleSpec::Band {
        domain: vec![
            "web-1".to_string(),
            "web-2".to_string(),
            "web-3".to_string(),
            "web-4".to_string(),
        ],
        range: [0.0, 400.0],
        padding: 0.2,
    };
    let scale = create_scale(&spec).unwrap();

    // Four slots of 100px each, 20% padding leaves 80px bars
    assert!((scale.bandwidth().unwrap() - 80.0).abs() < EPSILON);
    assert!((scale.scale_category("web-1").unwrap() - 10.0).abs() < EPSILON);
    assert!((scale.scale_category("web-3").unwrap() - 210.0).abs() < EPSILON);

    // Unknown host is a signal to the caller, not a panic
    assert_eq!(scale.scale_category("web-9"), None);

    // Numeric mapping does not apply to bands
    assert_eq!(scale.scale_value(1.0), None);
}

#[test]
fn test_ordinal_colors_cycle_over_hosts() {
    let spec = ScaleSpec::Ordinal {
        domain: vec![
            "web-1".to_string(),
            "web-2".to_string(),
            "web-3".to_string(),
            "web-4".to_string(),
            "web-5".to_string(),
        ],
        range: vec![
            "#1f77b4".to_string(),
            "#ff7f0e".to_string(),
            "#2ca02c".to_string(),
        ],
    };
    let scale = create_scale(&spec).unwrap();

    assert_eq!(scale.output_for("web-1"), Some("#1f77b4"));
    assert_eq!(scale.output_for("web-3"), Some("#2ca02c"));
    // More hosts than colors: assignment wraps around
    assert_eq!(scale.output_for("web-4"), Some("#1f77b4"));
    assert_eq!(scale.output_for("unknown"), None);
}

#[test]
fn test_sequential_heatmap_colors() {
    let spec = ScaleSpec::Sequential {
        domain: [0.0, 100.0],
        interpolator: "viridis".to_string(),
    };
    let scale = create_scale(&spec).unwrap();

    let cold = scale.color_at(0.0).unwrap();
    let hot = scale.color_at(100.0).unwrap();
    assert_eq!(cold.to_hex(), "#440154");
    assert_eq!(hot.to_hex(), "#fde725");

    // Saturates instead of extrapolating past the domain
    assert_eq!(scale.color_at(250.0).unwrap(), hot);
}

// ============================================================================
// Rejection Paths
// ============================================================================

#[test]
fn test_invalid_specs_rejected() {
    let cases: Vec<(ScaleSpec, &str)> = vec![
        (
            ScaleSpec::Log {
                domain: [0.0, 10.0],
                range: [0.0, 100.0],
                nice: false,
                clamp: false,
            },
            "log scale spanning zero",
        ),
        (
            ScaleSpec::Linear {
                domain: [f64::NAN, 10.0],
                range: [0.0, 100.0],
                nice: false,
                clamp: false,
            },
            "NaN domain bound",
        ),
        (
            ScaleSpec::Band {
                domain: Vec::new(),
                range: [0.0, 100.0],
                padding: 0.0,
            },
            "empty band domain",
        ),
    ];

    for (spec, what) in cases {
        assert!(create_scale(&spec).is_err(), "Expected rejection for {what}");
    }

    // Band padding of 1.0 would leave zero-width bars
    let spec = ScaleSpec::Band {
        domain: vec!["a".to_string()],
        range: [0.0, 100.0],
        padding: 1.0,
    };
    assert!(matches!(
        create_scale(&spec),
        Err(ChartError::InvalidArgument(_))
    ));

    // Unknown gradients name themselves in the error
    let spec = ScaleSpec::Sequential {
        domain: [0.0, 1.0],
        interpolator: "rainbow_v9".to_string(),
    };
    let err = create_scale(&spec).unwrap_err();
    assert!(err.to_string().contains("rainbow_v9"));
}

// ============================================================================
// Adaptive Selection
// ============================================================================

#[test]
fn test_adaptive_kind_inference() {
    let numeric: Vec<DomainValue> = vec![1.0.into(), 50.0.into(), 80.0.into()];
    assert_eq!(infer_scale_kind(&numeric, 3.0), ScaleKind::Linear);

    let wide: Vec<DomainValue> = vec![0.5.into(), 10.0.into(), 50_000.0.into()];
    assert_eq!(infer_scale_kind(&wide, 3.0), ScaleKind::Log);

    let timestamps: Vec<DomainValue> = vec![1_700_000_000_000_i64.into(), 5.0.into()];
    assert_eq!(infer_scale_kind(&timestamps, 3.0), ScaleKind::Time);

    let mixed: Vec<DomainValue> = vec!["web-1".into(), 5.0.into()];
    assert_eq!(infer_scale_kind(&mixed, 3.0), ScaleKind::Band);
}

#[test]
fn test_adaptive_scale_picks_log_for_wide_magnitudes() {
    // Request rates spread over four decades
    let values = [0.5, 3.0, 42.0, 800.0, 5_000.0];
    let scale = create_adaptive_scale(&values, [0.0, 400.0], AdaptiveScaleOptions::default())
        .expect("Adaptive scale should build");

    assert_eq!(scale.kind(), ScaleKind::Log);
}

#[test]
fn test_adaptive_scale_force_zero_for_bars() {
    let values = [40.0, 55.0, 70.0];
    let options = AdaptiveScaleOptions {
        force_zero: true,
        ..AdaptiveScaleOptions::default()
    };
    let scale = create_adaptive_scale(&values, [0.0, 400.0], options).unwrap();

    assert_eq!(scale.kind(), ScaleKind::Linear);
    // Zero is on the chart
    assert!((scale.scale_value(0.0).unwrap() - 0.0).abs() < EPSILON);
}

#[test]
fn test_adaptive_scale_rejects_all_nan_input() {
    let values = [f64::NAN, f64::INFINITY];
    let err =
        create_adaptive_scale(&values, [0.0, 100.0], AdaptiveScaleOptions::default()).unwrap_err();
    assert!(matches!(err, ChartError::InvalidDomain(_)));
}
