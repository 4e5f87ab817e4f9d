use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

fn v(ax: f64, ay: f64, bx: f64, by: f64) -> Vector {
    Vector::new(Point::new(ax, ay), Point::new(bx, by))
}

#[test]
fn length_and_heading() {
    let seg = v(1.0, 1.0, 4.0, 5.0);
    assert_eq!(seg.delta(), Vec2::new(3.0, 4.0));
    assert_eq!(seg.length(), 5.0);
    let h = seg.heading();
    assert!((h.x - 0.6).abs() < 1e-12);
    assert!((h.y - 0.8).abs() < 1e-12);
}

#[test]
fn zero_length_heading_is_zero_vector() {
    let seg = v(2.0, 2.0, 2.0, 2.0);
    assert_eq!(seg.heading(), Vec2::ZERO);
    assert!(seg.phi().is_finite());
}

#[test]
fn phi_uses_swapped_atan2_arguments() {
    // Pointing along +y gives phi = 0, along +x gives phi = π/2.
    assert!(v(0.0, 0.0, 0.0, 3.0).phi().abs() < 1e-12);
    assert!((v(0.0, 0.0, 3.0, 0.0).phi() - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn polar_angle_feeds_from_polar() {
    let seg = v(10.0, 10.0, 13.0, 14.0);
    let rebuilt = Vector::from_polar(seg.a, seg.polar_angle(), seg.length());
    assert!((rebuilt.b.x - seg.b.x).abs() < 1e-9);
    assert!((rebuilt.b.y - seg.b.y).abs() < 1e-9);
}

#[test]
fn from_polar_preserves_length() {
    let origins = [Point::new(0.0, 0.0), Point::new(-12.5, 300.0), Point::new(1e3, 1e-3)];
    for o in origins {
        for k in 0..16 {
            let phi = -PI + f64::from(k) * 0.43;
            for len in [0.001, 1.0, 7.5, 1234.0] {
                let seg = Vector::from_polar(o, phi, len);
                let measured = Vector::new(o, seg.b).length();
                assert!((measured - len).abs() <= 1e-9 * len.max(1.0));
            }
        }
    }
}

#[test]
fn angle_between_right_angle_and_parallel() {
    let x = v(0.0, 0.0, 2.0, 0.0);
    let y = v(5.0, 5.0, 5.0, 9.0);
    assert!((x.angle_between(&y) - FRAC_PI_2).abs() < 1e-12);
    let longer = v(1.0, 1.0, 4.0, 1.0);
    assert_eq!(x.angle_between(&longer), 0.0);
}

#[test]
fn angle_between_anti_parallel_is_pi() {
    let a = v(0.0, 0.0, 0.1, 0.7);
    let b = v(0.0, 0.0, -0.1, -0.7);
    assert!((a.angle_between(&b) - PI).abs() < 1e-6);
}

#[test]
fn cosine_outside_domain_falls_back_to_pi() {
    assert_eq!(angle_from_cosine(-1.000_000_1), PI);
    assert_eq!(angle_from_cosine(1.000_000_1), PI);
    assert_eq!(angle_from_cosine(f64::NAN), PI);
    assert_eq!(angle_from_cosine(1.0), 0.0);
}

#[test]
fn angle_between_zero_length_is_pi() {
    let zero = v(3.0, 3.0, 3.0, 3.0);
    let x = v(0.0, 0.0, 1.0, 0.0);
    assert_eq!(zero.angle_between(&x), PI);
}

#[test]
fn turn_sign_follows_cross_product() {
    let x = v(0.0, 0.0, 1.0, 0.0);
    assert_eq!(x.turn_sign(&v(1.0, 0.0, 2.0, 1.0)), 1.0);
    assert_eq!(x.turn_sign(&v(1.0, 0.0, 2.0, -1.0)), -1.0);
    assert_eq!(x.turn_sign(&v(1.0, 0.0, 3.0, 0.0)), 0.0);
}
