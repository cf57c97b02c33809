//! Integration tests for imgcmp crates.
//!
//! This crate contains end-to-end tests that drive the comparison pipeline
//! across crate boundaries: transforms and ranges from `imgcmp-ops`, layout,
//! rendering and binding from `imgcmp-view`.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use imgcmp_core::{Image, Region, Shape};
    use imgcmp_ops::{ColorRange, Registry};
    use imgcmp_view::binding::{self, ParamValues};
    use imgcmp_view::canvas::testing::{CanvasCall, RecordingCanvas};
    use imgcmp_view::canvas::FigureSize;
    use imgcmp_view::raster::RasterCanvas;
    use imgcmp_view::render::square_regions;
    use imgcmp_view::{
        compare, interact, Arrangement, CompareParams, ComparisonSession, Layout, ScriptedSurface,
    };
    use tempfile::tempdir;

    fn constant(shape: Shape, v: f32) -> Image {
        Image::filled(shape, v).unwrap()
    }

    /// 4x4 zeros vs ones, blend at 0.25
    #[test]
    fn test_blend_quarter_square_figure() {
        let a = constant(Shape::new(4, 4), 0.0);
        let b = constant(Shape::new(4, 4), 1.0);
        let mut canvas = RecordingCanvas::new();

        let cmp = compare(&mut canvas, &a, &b, &CompareParams::default().with_alpha(0.25)).unwrap();

        assert!(cmp.image.data().iter().all(|&v| v == 0.25));
        assert_eq!(cmp.range, ColorRange::new(0.0, 1.0));
        assert_eq!(cmp.arrangement, Arrangement::Square);

        let calls = canvas.last_figure();
        let CanvasCall::Figure(Some(FigureSize { width, height })) = calls[0] else {
            panic!("expected a sized figure, got {:?}", calls[0]);
        };
        assert_eq!(width, 10.0);
        assert_relative_eq!(height, 20.0 / 3.0, epsilon = 1e-5);
        let regions: Vec<Region> = calls
            .iter()
            .filter_map(|c| match c {
                CanvasCall::AddRegion(r, _) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(regions, square_regions());

        let shown = canvas.shown();
        assert_eq!(shown.len(), 3);
        assert_eq!(shown[0].1, &cmp.image);
        assert_eq!(shown[1].1, &a);
        assert_eq!(shown[2].1, &b);
        assert_eq!(canvas.hidden_ticks().len(), 3);
    }

    /// diff with swap yields B - A, and A/B panels trade places
    #[test]
    fn test_diff_swapped() {
        let shape = Shape::with_channels(3, 5, 3);
        let a = Image::from_fn(shape, |r, c, k| (r + c + k) as f32).unwrap();
        let b = constant(a.shape(), 2.0);
        let mut canvas = RecordingCanvas::new();
        let params = CompareParams::default().with_method("diff").with_swap(true);

        let cmp = compare(&mut canvas, &a, &b, &params).unwrap();
        for ((&d, &va), &vb) in cmp.image.data().iter().zip(a.data()).zip(b.data()) {
            assert_eq!(d, vb - va);
        }
        assert_eq!(cmp.range, ColorRange::of_sources(&a, &b).unwrap());
        let shown = canvas.shown();
        assert_eq!(shown[1].1, &b);
        assert_eq!(shown[2].1, &a);
    }

    /// (10, 10) vs (10, 11): rejected, nothing drawn
    #[test]
    fn test_shape_mismatch_draws_nothing() {
        let a = constant(Shape::new(10, 10), 0.0);
        let b = constant(Shape::new(10, 11), 0.0);
        for method in Registry::builtin().names() {
            let mut canvas = RecordingCanvas::new();
            let params = CompareParams::default().with_method(method);
            let err = compare(&mut canvas, &a, &b, &params).unwrap_err();
            assert!(err.is_shape_mismatch(), "{method}: {err}");
            assert!(canvas.is_untouched(), "{method}");
        }

        let rgb = constant(Shape::with_channels(4, 4, 3), 0.0);
        let gray = constant(Shape::new(4, 4), 0.0);
        let mut canvas = RecordingCanvas::new();
        assert!(compare(&mut canvas, &rgb, &gray, &CompareParams::default()).is_err());
        assert!(canvas.is_untouched());
    }

    #[test]
    fn test_auto_layout_boundaries() {
        let cases = [
            (Shape::new(30, 10), Arrangement::Square),
            (Shape::new(31, 10), Arrangement::Tall),
            (Shape::new(10, 30), Arrangement::Square),
            (Shape::new(10, 31), Arrangement::Wide),
            (Shape::with_channels(64, 16, 4), Arrangement::Tall),
        ];
        for (shape, expected) in cases {
            let a = constant(shape, 0.0);
            let b = constant(shape, 1.0);
            let mut canvas = RecordingCanvas::new();
            let cmp = compare(&mut canvas, &a, &b, &CompareParams::default()).unwrap();
            assert_eq!(cmp.arrangement, expected, "{shape}");

            let stacked = canvas
                .calls
                .iter()
                .any(|c| matches!(c, CanvasCall::AddGrid { shared_axes: true, .. }));
            assert_eq!(stacked, expected != Arrangement::Square, "{shape}");
        }
    }

    #[test]
    fn test_shades_at_endpoints() {
        let shape = Shape::with_channels(6, 9, 3);
        let a = Image::from_fn(shape, |r, c, k| (r * 100 + c * 10 + k) as f32).unwrap();
        let b = constant(shape, -1.0);
        for method in ["horizontal_shade", "vertical_shade"] {
            let mut canvas = RecordingCanvas::new();
            let p0 = CompareParams::default().with_method(method).with_alpha(0.0);
            let p1 = p0.clone().with_alpha(1.0);
            assert_eq!(compare(&mut canvas, &a, &b, &p0).unwrap().image, b);
            assert_eq!(compare(&mut canvas, &a, &b, &p1).unwrap().image, a);
        }
    }

    /// one initial render, then exactly one per update
    #[test]
    fn test_interactive_session_counts() {
        let a = constant(Shape::new(12, 12), 0.0);
        let b = constant(Shape::new(12, 12), 1.0);
        let mut session = ComparisonSession::new(a, b, RecordingCanvas::new());
        let updates = vec![
            ParamValues::new().with_number(binding::ALPHA, 0.3),
            ParamValues::new().with_choice(binding::LAYOUT, "wide"),
            ParamValues::new().with_choice(binding::METHOD, "vertical_shade"),
            ParamValues::new().with_flag(binding::SWAP, true),
            ParamValues::new().with_number(binding::ALPHA, 1.0),
        ];
        let mut surface = ScriptedSurface::new(updates);

        interact(&mut surface, &mut session).unwrap();

        assert_eq!(session.invocations(), 6);
        assert_eq!(session.canvas().figures(), 6);
        let last = session.last().unwrap();
        assert_eq!(last.arrangement, Arrangement::Wide);
        assert!(last.swapped);
        // alpha 1 shade returns the first (swapped: B) source entirely
        assert!(last.image.data().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_alpha_slider_snaps_to_step() {
        let a = constant(Shape::new(2, 2), 0.0);
        let b = constant(Shape::new(2, 2), 1.0);
        let mut session = ComparisonSession::new(a, b, RecordingCanvas::new());
        let cmp = session
            .on_change(&ParamValues::new().with_number(binding::ALPHA, 0.62))
            .unwrap();
        assert_relative_eq!(cmp.image.data()[0], 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_raster_png_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cmp.png");
        let a = constant(Shape::new(20, 20), 0.0);
        let b = constant(Shape::new(20, 20), 1.0);
        let mut canvas = RasterCanvas::new().with_dpi(20.0);

        let params = CompareParams::default().with_method("diff");
        compare(&mut canvas, &a, &b, &params).unwrap();
        canvas.save(&path).unwrap();

        let png = image::open(&path).unwrap().to_rgba8();
        // square figure: 10 x (2/3 * 10) inches at 20 dpi
        assert_eq!(png.dimensions(), (200, 133));
        // C = a - b = -1 saturates to black; A (zeros) black; B (ones) white
        assert_eq!(png.get_pixel(66, 66).0, [0, 0, 0, 255]);
        assert_eq!(png.get_pixel(166, 100).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_explicit_layout_overrides_auto() {
        let a = constant(Shape::new(100, 10), 0.0);
        let b = constant(Shape::new(100, 10), 1.0);
        let mut canvas = RecordingCanvas::new();
        let params = CompareParams::default().with_layout(Layout::Wide);
        let cmp = compare(&mut canvas, &a, &b, &params).unwrap();
        assert_eq!(cmp.arrangement, Arrangement::Wide);
        assert!(canvas
            .calls
            .iter()
            .any(|c| matches!(c, CanvasCall::AddGrid { rows: 1, cols: 3, .. })));
    }
}
