pub(crate) use super::*;

fn glyph(ink: &[(usize, usize)]) -> Bitmap {
    let mut pixels = vec![0.0; BITMAP_SIZE * BITMAP_SIZE];
    for &(row, col) in ink {
        pixels[row * BITMAP_SIZE + col] = 1.0;
    }
    Bitmap::from_pixels(pixels).expect("valid glyph")
}

fn l_shape(offset: usize) -> Bitmap {
    glyph(&[
        (offset, offset),
        (offset + 1, offset),
        (offset + 2, offset),
        (offset + 2, offset + 1),
    ])
}

fn scatter() -> Bitmap {
    glyph(&[(1, 4), (3, 9), (6, 2), (10, 12), (12, 5), (14, 14)])
}

#[test]
fn test_centroid_single_pixel_is_one_indexed() {
    let g = glyph(&[(4, 9)]);
    let (xc, yc) = centroid(&g).expect("has ink");
    assert!((xc - 5.0).abs() < 1e-12);
    assert!((yc - 10.0).abs() < 1e-12);
}

#[test]
fn test_centroid_uses_rows_for_x() {
    // Two pixels in the same row differ only in y.
    let g = glyph(&[(0, 0), (0, 4)]);
    let (xc, yc) = centroid(&g).expect("has ink");
    assert!((xc - 1.0).abs() < 1e-12);
    assert!((yc - 3.0).abs() < 1e-12);
}

#[test]
fn test_centroid_zero_ink() {
    assert!(centroid(&glyph(&[])).is_none());
    assert!(raw_moments(&glyph(&[])).is_none());
}

#[test]
fn test_raw_moment_about_origin() {
    // M(1,0) for pixels at rows 0 and 2 = 1 + 3
    let g = glyph(&[(0, 5), (2, 5)]);
    assert!((central_moment(&g, (0.0, 0.0), (1, 0)) - 4.0).abs() < 1e-12);
    assert!((central_moment(&g, (0.0, 0.0), (0, 0)) - 2.0).abs() < 1e-12);
}

#[test]
fn test_raw_moments_diagonal_pair() {
    // Pixels at 1-indexed (1,1) and (3,3): centroid (2,2), offsets ±1.
    let g = glyph(&[(0, 0), (2, 2)]);
    let m = raw_moments(&g).expect("has ink");
    let expected = [2.0, 0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 0.0, 0.0];
    assert_eq!(m.len(), MOMENT_ORDERS.len());
    for (i, (&got, &want)) in m.iter().zip(expected.iter()).enumerate() {
        assert!((got - want).abs() < 1e-5, "moment {i}: {got} != {want}");
    }
}

#[test]
fn test_raw_moments_translation_invariant() {
    let a = raw_moments(&l_shape(0)).expect("has ink");
    let b = raw_moments(&l_shape(9)).expect("has ink");
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < 1e-4);
    }
}

#[test]
fn test_rms_known_values() {
    let mut set = LabeledSet::new();
    set.push("a", Vector::from_slice(&[3.0_f32, 4.0]));
    set.push("b", Vector::from_slice(&[4.0_f32, 3.0]));
    let r = rms(&set).expect("non-degenerate");
    let expected = 12.5_f32.sqrt();
    assert!((r[0] - expected).abs() < 1e-5);
    assert!((r[1] - expected).abs() < 1e-5);
}

#[test]
fn test_rms_constant_dimension_normalizes_to_unit() {
    let mut set = LabeledSet::new();
    set.push("a", Vector::from_slice(&[-2.5_f32, 1.0]));
    set.push("a", Vector::from_slice(&[-2.5_f32, 3.0]));
    set.push("b", Vector::from_slice(&[-2.5_f32, 5.0]));
    let r = rms(&set).expect("non-degenerate");
    for (_, v) in set.samples() {
        assert!((v[0] / r[0] + 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_rms_zero_dimension_is_flagged() {
    let mut set = LabeledSet::new();
    set.push("a", Vector::from_slice(&[1.0_f32, 0.0]));
    set.push("b", Vector::from_slice(&[2.0_f32, 0.0]));
    let err = rms(&set).expect_err("dimension 1 is all zero");
    assert!(matches!(err, PatrecError::DegenerateFeature { index: 1 }));
}

#[test]
fn test_moment_features_have_unit_rms() {
    let mut set = LabeledSet::new();
    set.push("1", l_shape(2));
    set.push("1", l_shape(7));
    set.push("2", scatter());

    let features = moment_features(&set).expect("asymmetric glyphs");
    assert_eq!(features.n_samples(), 3);
    let r = rms(&features).expect("still non-degenerate");
    for (i, &x) in r.iter().enumerate() {
        assert!((x - 1.0).abs() < 1e-4, "dimension {i} rms = {x}");
    }
}

#[test]
fn test_moment_features_normalize_across_classes() {
    // Same glyph in two classes: identical features regardless of class.
    let mut set = LabeledSet::new();
    set.push("a", scatter());
    set.push("b", scatter());
    set.push("b", l_shape(3));
    let features = moment_features(&set).expect("asymmetric glyphs");
    let a = &features.get("a").expect("class a")[0];
    let b = &features.get("b").expect("class b")[0];
    assert_eq!(a, b);
}

#[test]
fn test_moment_features_zero_ink_reports_sample() {
    let mut set = LabeledSet::new();
    set.push("4", scatter());
    set.push("7", l_shape(1));
    set.push("7", glyph(&[]));
    let err = moment_features(&set).expect_err("blank glyph");
    match err {
        PatrecError::ZeroInk { label, index } => {
            assert_eq!(label, "7");
            assert_eq!(index, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}
