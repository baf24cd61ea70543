//! Property-based invariant tests for divider placement.
//!
//! 1. When both minimums fit, the resolved location stays in
//!    `[minimum_divider_location, maximum_divider_location]`.
//! 2. The divider never leaves the container span.
//! 3. Panes and divider tile the span along the split axis.
//! 4. Resolving an already resolved location is a no-op.

use lnf_core::geometry::{Insets, Size};
use lnf_layout::orientation::SplitOrientation;
use lnf_layout::split::{
    PaneSizes, SplitConfig, SplitLayout, maximum_divider_location, minimum_divider_location,
    resolve_divider_location,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn config() -> impl Strategy<Value = SplitConfig> {
    (
        prop_oneof![
            Just(SplitOrientation::Horizontal),
            Just(SplitOrientation::Vertical),
        ],
        0i32..12,
        0i32..6,
    )
        .prop_map(|(orientation, divider, inset)| {
            SplitConfig::default()
                .with_orientation(orientation)
                .with_divider_size(divider)
                .with_insets(Insets::all(inset))
        })
}

fn pane() -> impl Strategy<Value = PaneSizes> {
    (0i32..150, 0i32..150).prop_map(|(w, h)| {
        PaneSizes::new(Size::new(w, h), Size::new(w + 10, h + 10))
    })
}

fn along(config: &SplitConfig, size: Size) -> i32 {
    match config.orientation {
        SplitOrientation::Horizontal => size.width,
        SplitOrientation::Vertical => size.height,
    }
}

fn axis_insets(config: &SplitConfig) -> (i32, i32) {
    match config.orientation {
        SplitOrientation::Horizontal => (config.insets.left, config.insets.right),
        SplitOrientation::Vertical => (config.insets.top, config.insets.bottom),
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Minimums respected when satisfiable
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn location_within_min_and_max(
        config in config(),
        a in pane(),
        b in pane(),
        slack in 0i32..200,
        requested in -100i32..600,
    ) {
        let (lead, trail) = axis_insets(&config);
        let extent = along(&config, a.minimum) + along(&config, b.minimum)
            + config.divider_size + lead + trail + slack;
        let container = Size::new(extent, extent);
        let location = resolve_divider_location(&config, container, Some(&a), Some(&b), requested);
        prop_assert!(location >= minimum_divider_location(&config, container, Some(&a)));
        prop_assert!(location <= maximum_divider_location(&config, container, Some(&b)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Span containment, tiling, and stability
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn divider_stays_in_span(
        config in config(),
        a in proptest::option::of(pane()),
        b in proptest::option::of(pane()),
        extent in 0i32..400,
        requested in -100i32..600,
    ) {
        let (lead, trail) = axis_insets(&config);
        let container = Size::new(extent, extent);
        let location = resolve_divider_location(
            &config, container, a.as_ref(), b.as_ref(), requested,
        );
        let end = (extent - trail).max(lead);
        prop_assert!(location >= lead);
        prop_assert!(location <= (end - config.divider_size).max(lead));

        let again = resolve_divider_location(
            &config, container, a.as_ref(), b.as_ref(), location,
        );
        prop_assert_eq!(again, location);
    }

    #[test]
    fn panes_and_divider_tile_the_span(
        config in config(),
        a in pane(),
        b in pane(),
        extent in 0i32..400,
        requested in -100i32..600,
    ) {
        let (lead, trail) = axis_insets(&config);
        let container = Size::new(extent, extent);
        let layout = SplitLayout::compute(&config, container, Some(&a), Some(&b), requested);
        let first = layout.first.expect("first pane present");
        let second = layout.second.expect("second pane present");
        let span = (extent - trail).max(lead) - lead;
        let total = along(&config, first.size())
            + along(&config, layout.divider.size())
            + along(&config, second.size());
        prop_assert_eq!(total, span);
    }
}
