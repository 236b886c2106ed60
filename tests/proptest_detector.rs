//! Property-based tests for the cell classification chain.
//!
//! These verify invariants that must hold for arbitrary inputs:
//! - determinism and idempotence of `classify`
//! - counter bookkeeping (one increment path per rejection, totals add up)
//! - the rule gates (latitude, disabled threshold, disabled heuristic)
//! - geometry leaf properties (normalization window, sphere radius)

use orca_quad::prelude::*;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Arbitrary finite longitude, deliberately wider than one wrap.
fn any_lon() -> impl Strategy<Value = f64> {
    -540.0..540.0
}

/// Arbitrary latitude.
fn any_lat() -> impl Strategy<Value = f64> {
    -90.0..90.0
}

/// A completely arbitrary corner point.
fn any_point() -> impl Strategy<Value = PointLonLat> {
    (any_lon(), any_lat()).prop_map(|(lon, lat)| PointLonLat::new(lon, lat))
}

/// An arbitrary quad: no shape guarantees at all.
fn any_quad() -> impl Strategy<Value = [PointLonLat; 4]> {
    prop::array::uniform4(any_point())
}

/// A well-formed lon/lat rectangle away from the poles: SW at
/// `(lon0, lat0)`, spans in `[0.1, 5]` degrees, `lat0` kept below 60° so
/// the whole cell stays under 65°.
fn grid_rectangle() -> impl Strategy<Value = [PointLonLat; 4]> {
    (-180.0..180.0, -60.0..55.0, 0.1..5.0, 0.1..5.0).prop_map(|(lon0, lat0, dlon, dlat)| {
        [
            PointLonLat::new(lon0, lat0),
            PointLonLat::new(lon0 + dlon, lat0),
            PointLonLat::new(lon0 + dlon, lat0 + dlat),
            PointLonLat::new(lon0, lat0 + dlat),
        ]
    })
}

/// A rectangle entirely above the 45° gate.
fn high_latitude_quad() -> impl Strategy<Value = [PointLonLat; 4]> {
    prop::array::uniform4((any_lon(), 46.0..89.0))
        .prop_map(|corners| corners.map(|(lon, lat)| PointLonLat::new(lon, lat)))
}

fn any_config() -> impl Strategy<Value = DetectorConfig> {
    (any::<bool>(), prop_oneof![Just(0.0), 0.5..50.0])
        .prop_map(|(orca2, diagonal)| DetectorConfig { orca2, diagonal })
}

fn detector(config: DetectorConfig) -> InvalidElementDetector {
    InvalidElementDetector::new(config).unwrap()
}

// =============================================================================
// CLASSIFICATION PROPERTIES
// =============================================================================

proptest! {
    /// Classification is a pure function: same inputs, same verdict,
    /// same counter deltas.
    #[test]
    fn prop_classify_is_idempotent(quad in any_quad(), config in any_config()) {
        let d = detector(config);
        let [sw, se, ne, nw] = quad;

        let first = d.classify(sw, se, ne, nw);
        let second = d.classify(sw, se, ne, nw);
        prop_assert_eq!(first, second);

        let mut stats_a = Statistics::default();
        let mut stats_b = Statistics::default();
        prop_assert_eq!(
            d.invalid_element(sw, se, ne, nw, &mut stats_a),
            d.invalid_element(sw, se, ne, nw, &mut stats_b)
        );
        prop_assert_eq!(stats_a, stats_b);
    }

    /// At most one rejection path fires per call: the total moves by 0 or 1,
    /// and at most one sub-counter moves with it.
    #[test]
    fn prop_single_increment_per_call(quad in any_quad(), config in any_config()) {
        let d = detector(config);
        let [sw, se, ne, nw] = quad;

        let mut stats = Statistics::default();
        let invalid = d.invalid_element(sw, se, ne, nw, &mut stats);

        prop_assert_eq!(stats.invalid_elements, u64::from(invalid));
        let named = stats.invalid_quads_2d + stats.invalid_quads_3d + stats.diagonal_too_large;
        prop_assert!(named <= stats.invalid_elements);
    }

    /// Over a whole stream, `invalid_elements` equals the number of calls
    /// that returned true, and dominates every sub-counter.
    #[test]
    fn prop_stream_counting(quads in prop::collection::vec(any_quad(), 1..40), config in any_config()) {
        let d = detector(config);
        let mut stats = Statistics::default();
        let mut rejections = 0u64;
        for [sw, se, ne, nw] in &quads {
            if d.invalid_element(*sw, *se, *ne, *nw, &mut stats) {
                rejections += 1;
            }
        }
        prop_assert_eq!(stats.invalid_elements, rejections);
        prop_assert!(stats.invalid_quads_2d <= stats.invalid_elements);
        prop_assert!(stats.invalid_quads_3d <= stats.invalid_elements);
        prop_assert!(stats.diagonal_too_large <= stats.invalid_elements);
    }

    /// Splitting a stream across two accumulators and merging them gives
    /// the same totals as a single accumulator.
    #[test]
    fn prop_statistics_merge(
        quads in prop::collection::vec(any_quad(), 2..30),
        split in 0usize..30,
        config in any_config(),
    ) {
        let d = detector(config);
        let split = split.min(quads.len());

        let mut single = Statistics::default();
        for [sw, se, ne, nw] in &quads {
            d.invalid_element(*sw, *se, *ne, *nw, &mut single);
        }

        let mut a = Statistics::default();
        for [sw, se, ne, nw] in &quads[..split] {
            d.invalid_element(*sw, *se, *ne, *nw, &mut a);
        }
        let mut b = Statistics::default();
        for [sw, se, ne, nw] in &quads[split..] {
            d.invalid_element(*sw, *se, *ne, *nw, &mut b);
        }

        prop_assert_eq!(a + b, single);
    }

    /// Rule 1 is suppressed above the 45° latitude gate regardless of the
    /// orientation deltas.
    #[test]
    fn prop_no_2d_verdict_above_gate(quad in high_latitude_quad(), config in any_config()) {
        let d = detector(config);
        let [sw, se, ne, nw] = quad;
        prop_assert_ne!(d.classify(sw, se, ne, nw), CellVerdict::Invalid2d);
    }

    /// A zero diagonal threshold disables rule 2 for any input.
    #[test]
    fn prop_zero_diagonal_never_fires(quad in any_quad(), orca2 in any::<bool>()) {
        let d = detector(DetectorConfig { orca2, diagonal: 0.0 });
        let [sw, se, ne, nw] = quad;
        prop_assert_ne!(d.classify(sw, se, ne, nw), CellVerdict::DiagonalTooLarge);
    }

    /// With the ORCA2 flag off, the skew heuristic never fires.
    #[test]
    fn prop_orca2_off_never_skews(quad in any_quad(), diagonal in prop_oneof![Just(0.0), 0.5..50.0]) {
        let d = detector(DetectorConfig { orca2: false, diagonal });
        let [sw, se, ne, nw] = quad;
        prop_assert_ne!(d.classify(sw, se, ne, nw), CellVerdict::OrcaSkew);
    }

    /// Well-formed grid rectangles away from the poles are always accepted
    /// with the heuristics off.
    #[test]
    fn prop_rectangles_are_valid(quad in grid_rectangle()) {
        let d = detector(DetectorConfig::default());
        let [sw, se, ne, nw] = quad;
        prop_assert_eq!(d.classify(sw, se, ne, nw), CellVerdict::Valid);
    }

    /// Swapping the two northern corners of a well-formed rectangle makes
    /// the perimeter cross itself; some rule must reject it.
    #[test]
    fn prop_bowties_are_rejected(quad in grid_rectangle()) {
        let d = detector(DetectorConfig::default());
        let [sw, se, ne, nw] = quad;
        let verdict = d.classify(sw, se, nw, ne);
        prop_assert!(verdict.is_invalid(), "bowtie accepted: {}", verdict);
    }
}

// =============================================================================
// GEOMETRY LEAF PROPERTIES
// =============================================================================

proptest! {
    /// Normalization lands in the window and is the identity inside it.
    #[test]
    fn prop_normalise_longitude_window(lon in any_lon(), west in -360.0..0.0) {
        let n = NormaliseLongitude::new(west);
        let out = n.apply(lon);
        prop_assert!(out >= n.west() && out <= n.east());

        // Shifting by a full wrap does not change the result.
        let wrapped = n.apply(lon + 360.0);
        prop_assert!((out - wrapped).abs() < 1e-9);

        if lon >= n.west() && lon <= n.east() {
            prop_assert_eq!(out, lon);
        }
    }

    /// Every projected point lies on the sphere surface.
    #[test]
    fn prop_projection_preserves_radius(lon in any_lon(), lat in any_lat()) {
        let sphere = Sphere::earth();
        let xyz = sphere.xyz(PointLonLat::new(lon, lat));
        prop_assert!((xyz.norm() - sphere.radius()).abs() / sphere.radius() < 1e-12);
    }
}
