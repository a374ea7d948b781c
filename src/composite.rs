//! CPU pixel math for background compositing previews.
//!
//! Two jobs live here: the premultiplied `over`/`crossfade` primitives used
//! to flatten a layer stack at given opacities, and the static gradient-band
//! blend that stitches two zone backgrounds with a linear vertical ramp.
//! All interpolation happens on the stored bytes; no gamma linearization.

use image::RgbaImage;

use crate::error::{ScrollworkError, ScrollworkResult};

pub type Rgba8 = [u8; 4];

/// Source-over for premultiplied pixels with an extra opacity factor.
pub fn over(dst: Rgba8, src: Rgba8, opacity: f32) -> Rgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = mul_div255(u16::from(dst[3]), inv).saturating_add(sa);

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Linear per-channel blend, `t = 0` gives `a`, `t = 1` gives `b`.
pub fn crossfade(a: Rgba8, b: Rgba8, t: f32) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let av = mul_div255(u16::from(a[i]), it);
        let bv = mul_div255(u16::from(b[i]), tt);
        out[i] = av.saturating_add(bv);
    }
    out
}

/// Flattens a layer stack bottom-up at the given per-layer opacities.
///
/// This is the pixel realization of the crossfade tracker's opacity outputs:
/// layer order is the configured z order and is never resorted here.
pub fn flatten_layers(layers: &[(&RgbaImage, f32)]) -> ScrollworkResult<RgbaImage> {
    let Some(((first, _), rest)) = layers.split_first() else {
        return Err(ScrollworkError::evaluation(
            "flatten_layers needs at least one layer",
        ));
    };
    let (w, h) = first.dimensions();
    for (img, _) in rest {
        if img.dimensions() != (w, h) {
            return Err(ScrollworkError::evaluation(
                "flatten_layers expects equally sized layers",
            ));
        }
    }

    let mut out = RgbaImage::new(w, h);
    for (img, opacity) in layers {
        for (dst, src) in out.pixels_mut().zip(img.pixels()) {
            dst.0 = over(dst.0, src.0, *opacity);
        }
    }
    Ok(out)
}

/// Blends the bottom `band_h` rows of `a` into the top `band_h` rows of `b`
/// with a linear vertical ramp: the band's top row is 100% `a`, its bottom
/// row 100% `b`.
pub fn gradient_band_blend(
    a: &RgbaImage,
    b: &RgbaImage,
    band_h: u32,
) -> ScrollworkResult<RgbaImage> {
    if a.width() != b.width() {
        return Err(ScrollworkError::validation(
            "band blend requires images of equal width",
        ));
    }
    if band_h == 0 {
        return Err(ScrollworkError::validation("band height must be > 0"));
    }
    if band_h > a.height() || band_h > b.height() {
        return Err(ScrollworkError::validation(
            "band height exceeds an input image",
        ));
    }

    let w = a.width();
    let a_base = a.height() - band_h;
    let denom = band_h.saturating_sub(1).max(1) as f32;

    let mut out = RgbaImage::new(w, band_h);
    for y in 0..band_h {
        let t = y as f32 / denom;
        for x in 0..w {
            let pa = a.get_pixel(x, a_base + y).0;
            let pb = b.get_pixel(x, y).0;
            out.get_pixel_mut(x, y).0 = crossfade(pa, pb, t);
        }
    }
    Ok(out)
}

/// Stitches two zone backgrounds into one scroll strip: `a` minus its bottom
/// `band_h` rows, then the blended band, then `b` minus its top `band_h` rows.
pub fn blend_strip(a: &RgbaImage, b: &RgbaImage, band_h: u32) -> ScrollworkResult<RgbaImage> {
    let band = gradient_band_blend(a, b, band_h)?;
    let w = a.width();
    let a_keep = a.height() - band_h;
    let b_keep = b.height() - band_h;

    let mut out = RgbaImage::new(w, a_keep + band_h + b_keep);
    for y in 0..a_keep {
        for x in 0..w {
            *out.get_pixel_mut(x, y) = *a.get_pixel(x, y);
        }
    }
    for y in 0..band_h {
        for x in 0..w {
            *out.get_pixel_mut(x, a_keep + y) = *band.get_pixel(x, y);
        }
    }
    for y in 0..b_keep {
        for x in 0..w {
            *out.get_pixel_mut(x, a_keep + band_h + y) = *b.get_pixel(x, band_h + y);
        }
    }
    Ok(out)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
