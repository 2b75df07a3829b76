use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Client-space position of a mouse event, or of the first touch point of a
/// touch event. Multi-touch beyond the first point is ignored.
pub fn client_point(ev: &web::Event) -> Option<Vec2> {
    if let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() {
        return Some(Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32));
    }
    let touch = ev.dyn_ref::<web::TouchEvent>()?.touches().get(0)?;
    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}
