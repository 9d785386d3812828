//! Color helpers
//!
//! Colors are linear-agnostic `[r, g, b]` triples in `0.0..=1.0`; packing
//! to `0xRRGGBB` happens only at the edges (export, display).

/// Convert hue (degrees), saturation and lightness to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if hp < 1.0 {
        (c, x, 0.0)
    } else if hp < 2.0 {
        (x, c, 0.0)
    } else if hp < 3.0 {
        (0.0, c, x)
    } else if hp < 4.0 {
        (0.0, x, c)
    } else if hp < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [r + m, g + m, b + m]
}

/// Pack an RGB triple into `0xRRGGBB`
pub fn pack_rgb(rgb: [f32; 3]) -> u32 {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u32);
    (r << 16) | (g << 8) | b
}

/// Unpack `0xRRGGBB` into an RGB triple
pub fn unpack_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Move each channel toward white by `amount` (0 = unchanged, 1 = white)
pub fn lighten(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    let t = amount.clamp(0.0, 1.0);
    rgb.map(|c| c + (1.0 - c) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_gray_and_extremes() {
        assert!(close(hsl_to_rgb(200.0, 0.0, 0.5), [0.5, 0.5, 0.5]));
        assert!(close(hsl_to_rgb(30.0, 0.8, 0.0), [0.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(30.0, 0.8, 1.0), [1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_brown() {
        // A dark warm brown: red > green > blue
        let [r, g, b] = hsl_to_rgb(30.0, 0.8, 0.2);
        assert!(r > g && g > b);
    }

    #[test]
    fn test_pack_unpack() {
        assert_eq!(pack_rgb([1.0, 0.0, 0.0]), 0xFF0000);
        assert_eq!(pack_rgb(unpack_rgb(0x222222)), 0x222222);
        assert_eq!(pack_rgb(unpack_rgb(0xFFD700)), 0xFFD700);
    }

    #[test]
    fn test_lighten() {
        assert!(close(lighten([0.0, 0.5, 1.0], 0.5), [0.5, 0.75, 1.0]));
    }
}
