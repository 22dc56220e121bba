//! Breakpoint and offset arithmetic. Everything here is a pure function of
//! the viewport and the slide set.

use crate::config::CarouselConfig;

/// Number of slides shown side by side at `viewport_width`.
pub fn visible_count(viewport_width: u32, slide_count: usize, config: &CarouselConfig) -> usize {
    let bp = &config.breakpoints;
    if viewport_width < bp.narrow_below {
        1
    } else if viewport_width < bp.medium_below {
        2
    } else {
        config.cap.resolve(slide_count)
    }
}

/// Highest valid position: `max(0, slide_count - visible)`.
pub fn max_slide(slide_count: usize, visible: usize) -> usize {
    slide_count.saturating_sub(visible)
}

/// Horizontal translation, in pixels, that brings slide `current` to the
/// leading edge of the viewport.
pub fn track_offset(current: usize, slide_width: f64, gap_px: f64) -> f64 {
    -(current as f64 * (slide_width + gap_px))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisibleCap;

    #[test]
    fn breakpoints_select_tier() {
        let config = CarouselConfig::offers();
        assert_eq!(visible_count(320, 6, &config), 1);
        assert_eq!(visible_count(767, 6, &config), 1);
        assert_eq!(visible_count(768, 6, &config), 2);
        assert_eq!(visible_count(1023, 6, &config), 2);
        assert_eq!(visible_count(1024, 6, &config), 3);
        assert_eq!(visible_count(1920, 6, &config), 3);
    }

    #[test]
    fn best_sellers_cap_shrinks_with_few_slides() {
        let config = CarouselConfig::best_sellers();
        assert_eq!(visible_count(1200, 10, &config), 4);
        assert_eq!(visible_count(1200, 3, &config), 3);
    }

    #[test]
    fn visible_count_is_non_increasing_as_width_drops() {
        for config in [CarouselConfig::offers(), CarouselConfig::best_sellers()] {
            for n in 0..8 {
                let mut last = usize::MAX;
                for width in (0..=2000u32).rev().step_by(7) {
                    let v = visible_count(width, n, &config);
                    let cap = config.cap.resolve(n);
                    assert!(v == 1 || v == 2 || v == cap);
                    // A cap below two (UpTo with one slide) is the only way
                    // the wide tier can undercut the medium tier.
                    if cap >= 2 {
                        assert!(v <= last, "width {width}, n {n}: {v} > {last}");
                    }
                    last = v;
                }
            }
        }
    }

    #[test]
    fn max_slide_stays_within_slide_count() {
        let config = CarouselConfig {
            cap: VisibleCap::Fixed(3),
            ..CarouselConfig::offers()
        };
        for n in 0..12 {
            for width in [300, 800, 1200] {
                let max = max_slide(n, visible_count(width, n, &config));
                assert!(max <= n);
            }
        }
        assert_eq!(max_slide(6, 3), 3);
        assert_eq!(max_slide(3, 3), 0);
        assert_eq!(max_slide(2, 3), 0);
    }

    #[test]
    fn offset_accounts_for_gap() {
        assert_eq!(track_offset(0, 300.0, 30.0), 0.0);
        assert_eq!(track_offset(2, 300.0, 30.0), -660.0);
        assert_eq!(track_offset(3, 250.0, 20.0), -810.0);
    }
}
