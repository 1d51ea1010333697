use mandelbrot::escape::DEFAULT_ESCAPE_RADIUS;
use mandelbrot::palette::BLACK;
use mandelbrot::{
    plane_width, MandelbrotSet, Pixel, RenderOptions, RenderRequest, Renderer, Viewport,
    DEFAULT_PALETTE,
};
use num::Complex;
use rand::distributions::{Distribution, Uniform};

#[test]
fn center_of_the_full_view_is_a_black_member() {
    let request = RenderRequest {
        real: -0.5,
        imaginary: 0.0,
        zoom: 0,
        iterations: 50,
    };
    let options = RenderOptions {
        width: 512,
        height: 512,
        smooth: true,
        threads: 4,
    };
    let renderer = request.renderer(&options).unwrap();
    let point = renderer.viewport().pixel_to_point(&Pixel(256, 256));
    assert!((point.re + 0.5).abs() < 1e-12);
    assert!(point.im.abs() < 1e-12);
    assert!(renderer.set().contains(point));

    let fb = renderer.render_threaded(options.threads).unwrap();
    assert_eq!(fb.get(256, 256), Some(BLACK));
}

#[test]
fn corner_of_a_tiny_view_escapes_immediately() {
    let set = MandelbrotSet::new(10, DEFAULT_ESCAPE_RADIUS).unwrap();
    let viewport = Viewport::new(4, 4, Complex::new(0.0, 0.0), plane_width(0)).unwrap();
    let renderer = Renderer::new(set, viewport, DEFAULT_PALETTE, false, 10).unwrap();

    let corner = viewport.pixel_to_point(&Pixel(0, 0));
    assert_eq!(corner, Complex::new(-1.5, 1.5));

    // |-1.5 + 1.5i| is about 2.12, outside radius 2 on the first step.
    assert_eq!(set.escape_count(corner, false), 0.0);
    assert_eq!(renderer.render().get(0, 0), Some(DEFAULT_PALETTE.0[0]));
}

#[test]
fn random_points_respect_count_bounds() {
    let set = MandelbrotSet::new(64, DEFAULT_ESCAPE_RADIUS).unwrap();
    let range = Uniform::new_inclusive(-2.5_f64, 2.5_f64);
    let mut rng = rand::thread_rng();
    for _ in 0..2000 {
        let c = Complex::new(range.sample(&mut rng), range.sample(&mut rng));
        let count = set.escape_count(c, false);
        assert_eq!(count.fract(), 0.0);
        assert!(count >= 0.0 && count <= 64.0);
        assert_eq!(set.contains(c), count == 64.0);
        let stability = set.stability(c, false, true);
        assert!(stability >= 0.0 && stability <= 1.0);
    }
}

#[test]
fn every_escaping_pixel_uses_its_layer_color() {
    let iterations = 30;
    let set = MandelbrotSet::smooth(iterations).unwrap();
    let viewport = Viewport::new(24, 18, Complex::new(-0.7, 0.2), 2.2).unwrap();
    let renderer = Renderer::new(set, viewport, DEFAULT_PALETTE, true, iterations).unwrap();
    let fb = renderer.render();

    for (Pixel(x, y), point) in viewport.pixels() {
        let stability = set.stability(point, true, true);
        let expected = if stability == 1.0 {
            BLACK
        } else {
            DEFAULT_PALETTE.0[(stability * iterations as f64).floor() as usize % 16]
        };
        assert_eq!(fb.get(x, y), Some(expected));
    }
}

#[test]
fn deep_zoom_underflow_is_rejected() {
    let request = RenderRequest {
        real: 0.0,
        imaginary: 0.0,
        zoom: 100_000,
        iterations: 10,
    };
    assert!(request.renderer(&RenderOptions::default()).is_err());
}
