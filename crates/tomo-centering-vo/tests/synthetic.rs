use tomo_centering_core::{parallel_beam_sinogram, Blob, Sinogram};
use tomo_centering_vo::{build_mask, CenterSearch, SymmetryScorer, VoCenteringParams};

fn phantom() -> Vec<Blob> {
    vec![
        Blob {
            x: 0.0,
            y: 0.0,
            sigma: 6.0,
            amplitude: 0.5,
        },
        Blob {
            x: 25.0,
            y: 10.0,
            sigma: 2.0,
            amplitude: 1.0,
        },
        Blob {
            x: -12.0,
            y: 30.0,
            sigma: 3.0,
            amplitude: 0.8,
        },
        Blob {
            x: 8.0,
            y: -35.0,
            sigma: 1.5,
            amplitude: 1.2,
        },
    ]
}

fn estimate_center(sino: &Sinogram) -> f64 {
    let search = CenterSearch::new(VoCenteringParams::default()).expect("params");
    let shift = search.find_shift(&sino.view()).expect("search");
    sino.cols as f64 / 2.0 - shift
}

#[test]
fn finds_center_in_the_middle_of_the_detector() {
    let sino = parallel_beam_sinogram(180, 200, 100.0, &phantom());
    let center = estimate_center(&sino);
    assert!(
        (99.99..=100.01).contains(&center),
        "expected center of rotation 100.0, got {center}"
    );
}

#[test]
fn finds_off_center_axis() {
    let sino = parallel_beam_sinogram(180, 200, 97.0, &phantom());
    let center = estimate_center(&sino);
    assert!(
        (center - 97.0).abs() < 0.05,
        "expected center of rotation 97.0, got {center}"
    );
}

#[test]
fn wrong_shifts_score_higher_than_the_true_one() {
    let sino = parallel_beam_sinogram(90, 128, 64.0, &phantom());
    let mask = build_mask(90, 128, 0.5);
    let scorer = SymmetryScorer::new(90, 128);
    let at_truth = scorer.score(0.0, &sino.view(), &mask).expect("score");
    for shift in [-8.0, -2.0, -0.5, 0.5, 2.0, 8.0] {
        let off = scorer.score(shift, &sino.view(), &mask).expect("score");
        assert!(
            off > at_truth,
            "shift {shift}: score {off} not above {at_truth}"
        );
    }
}

#[test]
fn nan_pixels_do_not_break_the_search() {
    let mut sino = parallel_beam_sinogram(180, 200, 100.0, &phantom());
    sino.data[3 * 200 + 5] = f64::NAN;
    sino.data[100 * 200 + 190] = f64::NAN;
    let search = CenterSearch::default();
    let shift = search.find_shift(&sino.view()).expect("search");
    assert!(shift.is_finite());
    assert!(shift.abs() < 0.5, "shift {shift}");
}

#[test]
fn infinite_pixels_do_not_break_the_search() {
    let mut sino = parallel_beam_sinogram(180, 200, 100.0, &phantom());
    sino.data[3 * 200 + 5] = f64::INFINITY;
    sino.data[100 * 200 + 190] = f64::NEG_INFINITY;
    sino.data[150 * 200 + 2] = f64::INFINITY;
    let center = estimate_center(&sino);
    assert!(
        (center - 100.0).abs() < 0.05,
        "expected center of rotation 100.0, got {center}"
    );
}
