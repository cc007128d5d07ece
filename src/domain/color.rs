use image::{imageops::FilterType, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lado del cuadrado al que se reduce la imagen antes de promediar.
pub const SAMPLE_SIZE: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hue in degrees, [0, 360). Achromatic colors report 0.
    pub fn hue_degrees(&self) -> f64 {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta == 0.0 {
            return 0.0;
        }

        let h = if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        let h = h.rem_euclid(360.0);
        // rem_euclid puede devolver 360.0 por redondeo con valores negativos diminutos
        if h >= 360.0 { 0.0 } else { h }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneLabel {
    #[serde(rename = "Warm & energetic")]
    Warm,
    #[serde(rename = "Fresh & friendly")]
    Fresh,
    #[serde(rename = "Calm & balanced")]
    Calm,
    #[serde(rename = "Cool & composed")]
    Cool,
    #[serde(rename = "Moody & intriguing")]
    Moody,
}

impl ToneLabel {
    pub const ALL: [ToneLabel; 5] = [
        ToneLabel::Warm,
        ToneLabel::Fresh,
        ToneLabel::Calm,
        ToneLabel::Cool,
        ToneLabel::Moody,
    ];

    /// Half-open buckets; [330, 360) wraps into the warm bucket with [0, 30).
    pub fn from_hue(hue: f64) -> Self {
        let hue = hue.rem_euclid(360.0);
        match hue {
            h if h < 30.0 => ToneLabel::Warm,
            h if h < 90.0 => ToneLabel::Fresh,
            h if h < 180.0 => ToneLabel::Calm,
            h if h < 270.0 => ToneLabel::Cool,
            h if h < 330.0 => ToneLabel::Moody,
            _ => ToneLabel::Warm,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToneLabel::Warm => "Warm & energetic",
            ToneLabel::Fresh => "Fresh & friendly",
            ToneLabel::Calm => "Calm & balanced",
            ToneLabel::Cool => "Cool & composed",
            ToneLabel::Moody => "Moody & intriguing",
        }
    }
}

impl fmt::Display for ToneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color medio de una copia reducida a 120x120. Los canales se truncan, no se redondean.
pub fn dominant_rgb(img: &RgbImage) -> Rgb {
    let thumb = image::imageops::resize(img, SAMPLE_SIZE, SAMPLE_SIZE, FilterType::CatmullRom);

    let mut sums = [0u64; 3];
    for pixel in thumb.pixels() {
        sums[0] += pixel[0] as u64;
        sums[1] += pixel[1] as u64;
        sums[2] += pixel[2] as u64;
    }

    let count = (thumb.width() as u64 * thumb.height() as u64).max(1);
    Rgb::new(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    )
}

pub fn tone_label(rgb: Rgb) -> ToneLabel {
    ToneLabel::from_hue(rgb.hue_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, image::Rgb(rgb))
    }

    fn assert_close(actual: Rgb, expected: Rgb) {
        let d = |a: u8, b: u8| (a as i16 - b as i16).abs();
        assert!(
            d(actual.r, expected.r) <= 1 && d(actual.g, expected.g) <= 1 && d(actual.b, expected.b) <= 1,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn uniform_images_keep_their_color() {
        for color in [[255, 0, 0], [0, 128, 255], [12, 200, 77], [0, 0, 0], [255, 255, 255]] {
            let got = dominant_rgb(&solid(10, 10, color));
            assert_close(got, Rgb::new(color[0], color[1], color[2]));
        }
        assert_close(dominant_rgb(&solid(640, 480, [90, 60, 30])), Rgb::new(90, 60, 30));
    }

    #[test]
    fn channel_means_are_truncated() {
        // mitad negro, mitad (1,1,1) en columnas de 60px: la media exacta es 0.5
        let img = RgbImage::from_fn(120, 120, |x, _| {
            if x < 60 { image::Rgb([0, 0, 0]) } else { image::Rgb([1, 1, 1]) }
        });
        let got = dominant_rgb(&img);
        assert_eq!(got, Rgb::new(0, 0, 0));
    }

    #[test]
    fn alpha_is_discarded_on_rgb_conversion() {
        let transparent = RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 0]));
        let rgb = DynamicImage::ImageRgba8(transparent).to_rgb8();
        assert_close(dominant_rgb(&rgb), Rgb::new(10, 200, 30));
    }

    #[test]
    fn primary_hues() {
        assert_eq!(Rgb::new(255, 0, 0).hue_degrees(), 0.0);
        assert!((Rgb::new(0, 255, 0).hue_degrees() - 120.0).abs() < 1e-9);
        assert!((Rgb::new(0, 0, 255).hue_degrees() - 240.0).abs() < 1e-9);
        assert!((Rgb::new(255, 0, 255).hue_degrees() - 300.0).abs() < 1e-9);
        assert_eq!(Rgb::new(128, 128, 128).hue_degrees(), 0.0);
    }

    #[test]
    fn tone_buckets_by_color() {
        assert_eq!(tone_label(Rgb::new(255, 0, 0)), ToneLabel::Warm);
        assert_eq!(tone_label(Rgb::new(255, 255, 0)), ToneLabel::Fresh);
        assert_eq!(tone_label(Rgb::new(0, 255, 0)), ToneLabel::Calm);
        assert_eq!(tone_label(Rgb::new(0, 0, 255)), ToneLabel::Cool);
        assert_eq!(tone_label(Rgb::new(255, 0, 255)), ToneLabel::Moody);
        assert_eq!(tone_label(Rgb::new(255, 0, 40)), ToneLabel::Warm);
        assert_eq!(tone_label(Rgb::new(40, 40, 40)), ToneLabel::Warm);
    }

    #[test]
    fn bucket_boundaries_are_half_open() {
        let cases = [
            (0.0, ToneLabel::Warm),
            (29.999, ToneLabel::Warm),
            (30.0, ToneLabel::Fresh),
            (89.999, ToneLabel::Fresh),
            (90.0, ToneLabel::Calm),
            (180.0, ToneLabel::Cool),
            (270.0, ToneLabel::Moody),
            (329.999, ToneLabel::Moody),
            (330.0, ToneLabel::Warm),
            (359.999, ToneLabel::Warm),
        ];
        for (hue, expected) in cases {
            assert_eq!(ToneLabel::from_hue(hue), expected, "hue {hue}");
        }
    }

    #[test]
    fn every_hue_maps_to_one_known_label() {
        let mut step = 0.0;
        while step < 360.0 {
            let label = ToneLabel::from_hue(step);
            assert_eq!(ToneLabel::ALL.iter().filter(|l| **l == label).count(), 1);
            assert!(!label.as_str().is_empty());
            step += 0.25;
        }
    }

    #[test]
    fn labels_serialize_as_display_text() {
        let json = serde_json::to_value(ToneLabel::Cool).unwrap();
        assert_eq!(json, "Cool & composed");
        assert_eq!(ToneLabel::Cool.to_string(), "Cool & composed");
    }
}
