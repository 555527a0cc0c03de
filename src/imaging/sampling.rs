//! Edge-color sampling for the BRIGHTEST and DARKEST backgrounds.
//!
//! Both scanners look only at the left (`x = 0`) and right (`x = w - 1`)
//! columns of the source, left column first, top to bottom. Ties go to the
//! last pixel in that order.
//!
//! | Scanner | Rows | Filter | Seed | Nothing qualifies |
//! |---|---|---|---|---|
//! | brightest | `0..h/2` | skip pixels with ≥ `count` channels above `threshold` | 0.0 | black |
//! | darkest | `0..h` | brightness must be ≤ `ceiling` | `ceiling` | white |

use super::calculations::perceived_brightness;
use super::params::{BLACK, SamplingParams, WHITE};
use image::{Rgb, RgbImage};

fn edge_columns(src: &RgbImage) -> [u32; 2] {
    [0, src.width().saturating_sub(1)]
}

/// Brightest edge pixel in the top half that is not blown out.
pub fn brightest_edge_color(src: &RgbImage, params: &SamplingParams) -> Rgb<u8> {
    let mut color = BLACK;
    let mut highest = 0.0;

    for x in edge_columns(src) {
        for y in 0..src.height() / 2 {
            let pixel = *src.get_pixel(x, y);
            let over = pixel
                .0
                .iter()
                .filter(|&&c| c > params.brightest_threshold)
                .count();
            if over >= params.brightest_threshold_count as usize {
                continue;
            }
            let brightness = perceived_brightness(pixel);
            if brightness >= highest {
                highest = brightness;
                color = pixel;
            }
        }
    }
    color
}

/// Darkest edge pixel at or below the brightness ceiling.
pub fn darkest_edge_color(src: &RgbImage, params: &SamplingParams) -> Rgb<u8> {
    let mut color = WHITE;
    let mut lowest = params.darkest_ceiling;

    for x in edge_columns(src) {
        for y in 0..src.height() {
            let pixel = *src.get_pixel(x, y);
            let brightness = perceived_brightness(pixel);
            if brightness <= lowest {
                lowest = brightness;
                color = pixel;
            }
        }
    }
    color
}
