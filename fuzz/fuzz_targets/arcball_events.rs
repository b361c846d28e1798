#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate arcball;

use arcball::{ArcBall, MouseButtons, PointerEvent, Viewport};

/// Enough wheel steps to stay well inside the range of `f32`.
const MAX_EVENTS: usize = 256;

fn read_i16(bytes: &[u8]) -> i32 {
    i32::from(i16::from_le_bytes([bytes[0], bytes[1]]))
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let viewport = Viewport::new(u32::from(data[0]) * 8, u32::from(data[1]) * 8);
    let mut arcball = ArcBall::new();
    arcball.set_buttons(MouseButtons::from_bits_truncate(u32::from(data[2])));

    for chunk in data[4..].chunks_exact(6).take(MAX_EVENTS) {
        let buttons = MouseButtons::from_bits_truncate(u32::from(chunk[1]));
        let x = read_i16(&chunk[2..4]);
        let y = read_i16(&chunk[4..6]);

        let event = match chunk[0] % 4 {
            0 => PointerEvent::Down { button: buttons, x, y },
            1 => PointerEvent::Move { buttons, x, y },
            2 => PointerEvent::Up { button: buttons, x, y },
            _ => PointerEvent::Wheel { delta: x },
        };

        let _ = arcball.update(&event, viewport);
    }

    // Degenerate drags, including those over an empty viewport, are skipped.
    let transform: mint::ColumnMatrix4<f32> = arcball.transform();
    let columns = [transform.x, transform.y, transform.z, transform.w];
    assert!(columns
        .iter()
        .all(|c| c.x.is_finite() && c.y.is_finite() && c.z.is_finite() && c.w.is_finite()));
});
