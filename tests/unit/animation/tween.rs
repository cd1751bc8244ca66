use super::*;

#[test]
fn rect_lerp_moves_every_edge() {
    let a = Rect::new(0.0, 0.0, 100.0, 900.0);
    let b = Rect::new(800.0, 200.0, 1000.0, 600.0);
    assert_eq!(Rect::lerp(&a, &b, 0.5), Rect::new(400.0, 100.0, 550.0, 750.0));
    assert_eq!(Rect::lerp(&a, &b, 1.0), b);
}

#[test]
fn colour_lerp_rounds_channels() {
    let white = Rgba8::WHITE;
    let accent = Rgba8::rgb(0x7c, 0x3a, 0xed);
    assert_eq!(Rgba8::lerp(&white, &accent, 0.0), white);
    assert_eq!(Rgba8::lerp(&white, &accent, 1.0), accent);
    let mid = Rgba8::lerp(&white, &accent, 0.5);
    assert_eq!(mid, Rgba8::rgb(190, 157, 246));
}

#[test]
fn point_lerp_is_componentwise() {
    let p = <Point as Lerp>::lerp(&Point::new(0.0, 10.0), &Point::new(10.0, 0.0), 0.25);
    assert_eq!(p, Point::new(2.5, 7.5));
}
