use super::*;
use serde_json::json;

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(5).since(Millis(9)), Millis::ZERO);
    assert_eq!(Millis(u64::MAX).plus(Millis(1)), Millis(u64::MAX));
    assert_eq!(Millis(1200).scaled(0.5), Millis(600));
    assert_eq!(Millis(100).scaled(-2.0), Millis::ZERO);
    assert!((Millis(550).as_secs_f64() - 0.55).abs() < 1e-12);
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 800.0, 1.0).is_err());
    assert!(Viewport::new(1280.0, f64::NAN, 1.0).is_err());
    assert!(Viewport::new(1280.0, 800.0, 0.0).is_err());
    let vp = Viewport::new(1280.0, 800.0, 2.0).unwrap();
    assert_eq!(vp.rect(), Rect::new(0.0, 0.0, 1280.0, 800.0));
}

#[test]
fn viewport_defaults_pixel_ratio() {
    let vp: Viewport = serde_json::from_value(json!({"width": 390.0, "height": 844.0})).unwrap();
    assert_eq!(vp.device_pixel_ratio, 1.0);
}

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(Rgba8::parse_hex("#7C3AED").unwrap(), Rgba8::rgb(0x7c, 0x3a, 0xed));
    let c = Rgba8::parse_hex("0000ff80").unwrap();
    assert_eq!((c.b, c.a), (255, 128));
    assert!(Rgba8::parse_hex("#fff").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
}

#[test]
fn colour_serde_uses_css_hex() {
    let c: Rgba8 = serde_json::from_value(json!("#9CA3AF")).unwrap();
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#9ca3af"));
    let translucent = Rgba8 { a: 0x40, ..c };
    assert_eq!(translucent.to_hex(), "#9ca3af40");
}
