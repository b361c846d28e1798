//! Replays a scripted gesture against an `ArcBall` bound to a `Surface`, and
//! logs every transform it produces.
//!
//! Run with `RUST_LOG=arcball=trace` to also see the controller's own logging.

use arcball::{identity, pointer_events, ArcBall, Surface, Transform};
use log::info;
use nalgebra::{Matrix4, Point3};
use std::{cell::RefCell, rc::Rc};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut surface = Surface::new(800, 600);
    let arcball = Rc::new(RefCell::new(ArcBall::new()));

    let mut changes = 0;
    let bound = ArcBall::bind(&arcball, &mut surface, identity(), move |m: &Transform| {
        changes += 1;
        let corner = Matrix4::from(*m).transform_point(&Point3::new(1.0, 1.0, 1.0));
        info!("#{}: corner (1, 1, 1) is now at {}", changes, corner);
    });
    if let Err(e) = bound {
        log::error!("{}", e);
        return;
    }

    // Drag to the left in small steps, release, then zoom in twice.
    let mut gesture = pointer_events![down(LEFT, 500, 300)];
    for step in 1..=10 {
        gesture.extend(pointer_events![move(LEFT, 500 - step * 10, 300 - step * 5)]);
    }
    gesture.extend(pointer_events![up(LEFT, 400, 250), wheel(1), wheel(1)]);

    for event in gesture.iter() {
        surface.dispatch(event);
    }

    // Resize, and drag about the vertical axis only.
    surface.resize(1024, 768);
    for event in pointer_events![
        down(LEFT, 512, 384),
        move(LEFT, 600, 384),
        up(LEFT, 600, 384),
    ] {
        surface.dispatch(&event);
    }

    info!("final transform: {}", Matrix4::from(arcball.borrow().transform()));
    arcball.borrow_mut().unbind();
}
