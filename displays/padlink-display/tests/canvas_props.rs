use padlink_display::mk1::{HEIGHT, WIDTH};
use padlink_display::{Canvas, Color, Mk1Layout};
use proptest::prelude::*;

fn clean_canvas() -> Canvas<Mk1Layout> {
    let mut canvas = Mk1Layout::canvas().unwrap();
    canvas.clear_dirty();
    canvas
}

proptest! {
    #[test]
    fn pixel_roundtrip_within_quantization(
        x in 0..WIDTH,
        y in 0..HEIGHT,
        luminance in any::<u8>(),
    ) {
        let mut canvas = clean_canvas();
        canvas.set_pixel(x, y, Color::gray(luminance), false);

        let decoded = canvas.pixel(x, y).luminance();
        prop_assert!(
            (i16::from(decoded) - i16::from(luminance)).abs() <= 8,
            "wrote {} read {}", luminance, decoded
        );
    }

    #[test]
    fn rewriting_current_color_keeps_clean(
        x in 0..WIDTH,
        y in 0..HEIGHT,
        luminance in any::<u8>(),
    ) {
        let mut canvas = clean_canvas();
        canvas.set_pixel(x, y, Color::gray(luminance), false);
        let current = canvas.pixel(x, y);

        canvas.set_pixel(x, y, current, true);
        prop_assert!(!canvas.is_dirty());
    }

    #[test]
    fn changing_color_marks_only_its_chunk(x in 0..WIDTH, y in 0..HEIGHT) {
        let mut canvas = clean_canvas();
        canvas.set_pixel(x, y, Color::white(), true);

        let chunk = canvas.chunk_of_row(y);
        prop_assert!(canvas.chunk_rows(chunk).contains(&y));
        prop_assert_eq!(canvas.dirty_chunks().collect::<Vec<_>>(), vec![chunk]);
    }

    #[test]
    fn neighbours_survive_writes(
        x in 0..WIDTH,
        y in 0..HEIGHT,
        first in any::<u8>(),
        second in any::<u8>(),
    ) {
        let mut canvas = clean_canvas();
        for nx in 0..WIDTH {
            canvas.set_pixel(nx, y, Color::gray(first), false);
        }
        let before: Vec<_> = (0..WIDTH).map(|nx| canvas.pixel(nx, y)).collect();

        canvas.set_pixel(x, y, Color::gray(second), false);

        for nx in (0..WIDTH).filter(|&nx| nx != x) {
            prop_assert_eq!(canvas.pixel(nx, y), before[usize::from(nx)]);
        }
    }

    #[test]
    fn black_and_white_fills(x in 0..WIDTH, y in 0..HEIGHT) {
        let mut canvas = clean_canvas();
        canvas.white();
        prop_assert_eq!(canvas.pixel(x, y).luminance(), 255);
        canvas.black();
        prop_assert_eq!(canvas.pixel(x, y).luminance(), 0);
    }

    #[test]
    fn transparent_writes_change_nothing(x in 0..WIDTH, y in 0..HEIGHT) {
        let mut canvas = clean_canvas();
        let before = canvas.buffer().to_vec();
        canvas.set_pixel(x, y, Color::transparent(), true);
        prop_assert_eq!(canvas.buffer(), &before[..]);
        prop_assert!(!canvas.is_dirty());
    }
}
