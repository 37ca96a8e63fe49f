use aviator_common::ViewportSize;
use aviator_game::Host;
use aviator_input::{InputKind, Subscriptions};
use std::sync::Arc;
use winit::window::Window;

/// [`Host`] backed by a winit window (a canvas element on the web).
///
/// On the web, pointer and resize events are taken from the whole page,
/// not only the canvas, and posted back into the event loop.
pub struct WinitHost {
    window: Arc<Window>,
    subscriptions: Subscriptions,
    #[cfg(target_arch = "wasm32")]
    page: page::PageListeners,
}

impl WinitHost {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            subscriptions: Subscriptions::new(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(
        window: Arc<Window>,
        proxy: winit::event_loop::EventLoopProxy<crate::app::AppEvent>,
    ) -> Self {
        Self {
            window,
            subscriptions: Subscriptions::new(),
            page: page::PageListeners::new(proxy),
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn is_subscribed(&self, kind: InputKind) -> bool {
        self.subscriptions.contains(kind)
    }
}

impl Host for WinitHost {
    fn viewport_size(&self) -> ViewportSize {
        let size = self.window.inner_size();
        ViewportSize::new(size.width, size.height)
    }

    fn subscribe(&mut self, kind: InputKind) {
        if !self.subscriptions.insert(kind) {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        if let Err(e) = self.page.listen(kind, &self.window) {
            tracing::error!(?kind, "failed to add page listener: {e:?}");
            return;
        }
        tracing::debug!(?kind, "window events subscribed");
    }

    /// Maps to `requestAnimationFrame` on the web.
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}

/// Rescale a page position so that normalizing it against `viewport`
/// spans the whole page rather than the canvas.
pub fn page_to_viewport(
    client_x: f64,
    client_y: f64,
    page_width: f64,
    page_height: f64,
    viewport: ViewportSize,
) -> Option<(f32, f32)> {
    if page_width <= 0.0 || page_height <= 0.0 || viewport.is_empty() {
        return None;
    }
    let x = client_x / page_width * f64::from(viewport.width);
    let y = client_y / page_height * f64::from(viewport.height);
    Some((x as f32, y as f32))
}

#[cfg(target_arch = "wasm32")]
mod page {
    use super::page_to_viewport;
    use crate::app::AppEvent;
    use aviator_common::ViewportSize;
    use aviator_input::{InputEvent, InputKind};
    use std::sync::Arc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use winit::event_loop::EventLoopProxy;
    use winit::window::Window;

    type Listener = Closure<dyn FnMut(web_sys::Event)>;

    /// Listeners on `document` and `window`, removed again on drop.
    pub struct PageListeners {
        proxy: EventLoopProxy<AppEvent>,
        pointer: Option<Listener>,
        resize: Option<Listener>,
    }

    fn page_size(page: &web_sys::Window) -> Option<(f64, f64)> {
        let width = page.inner_width().ok()?.as_f64()?;
        let height = page.inner_height().ok()?.as_f64()?;
        Some((width, height))
    }

    fn post(proxy: &EventLoopProxy<AppEvent>, event: InputEvent) {
        if proxy.send_event(AppEvent::Input(event)).is_err() {
            tracing::trace!("event loop closed, page event dropped");
        }
    }

    impl PageListeners {
        pub fn new(proxy: EventLoopProxy<AppEvent>) -> Self {
            Self {
                proxy,
                pointer: None,
                resize: None,
            }
        }

        pub fn listen(&mut self, kind: InputKind, window: &Arc<Window>) -> Result<(), JsValue> {
            let page = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let proxy = self.proxy.clone();
            match kind {
                InputKind::PointerMove => {
                    let document = page
                        .document()
                        .ok_or_else(|| JsValue::from_str("no document"))?;
                    let canvas = window.clone();
                    let listener = Listener::new(move |event: web_sys::Event| {
                        let Some(pointer) = event.dyn_ref::<web_sys::PointerEvent>() else {
                            return;
                        };
                        let Some((width, height)) = web_sys::window().as_ref().and_then(page_size)
                        else {
                            return;
                        };
                        let size = canvas.inner_size();
                        let viewport = ViewportSize::new(size.width, size.height);
                        let client = (f64::from(pointer.client_x()), f64::from(pointer.client_y()));
                        if let Some((x, y)) =
                            page_to_viewport(client.0, client.1, width, height, viewport)
                        {
                            post(&proxy, InputEvent::PointerMoved { x, y });
                        }
                    });
                    document.add_event_listener_with_callback(
                        "pointermove",
                        listener.as_ref().unchecked_ref(),
                    )?;
                    self.pointer = Some(listener);
                }
                InputKind::Resize => {
                    let listener = Listener::new(move |_: web_sys::Event| {
                        post(&proxy, InputEvent::Resized);
                    });
                    page.add_event_listener_with_callback(
                        "resize",
                        listener.as_ref().unchecked_ref(),
                    )?;
                    self.resize = Some(listener);
                }
            }
            Ok(())
        }
    }

    impl Drop for PageListeners {
        fn drop(&mut self) {
            let Some(page) = web_sys::window() else {
                return;
            };
            if let (Some(listener), Some(document)) = (&self.pointer, page.document()) {
                if let Err(e) = document.remove_event_listener_with_callback(
                    "pointermove",
                    listener.as_ref().unchecked_ref(),
                ) {
                    tracing::warn!("failed to remove pointer listener: {e:?}");
                }
            }
            if let Some(listener) = &self.resize {
                if let Err(e) = page.remove_event_listener_with_callback(
                    "resize",
                    listener.as_ref().unchecked_ref(),
                ) {
                    tracing::warn!("failed to remove resize listener: {e:?}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviator_input::normalized_pointer;

    fn normalized(x: f32, y: f32, viewport: ViewportSize) -> Option<[f32; 2]> {
        normalized_pointer(x, y, viewport).map(|v| v.to_array())
    }

    #[test]
    fn page_center_maps_to_viewport_center() {
        let viewport = ViewportSize::new(800, 600);
        let (x, y) = page_to_viewport(500.0, 250.0, 1000.0, 500.0, viewport).unwrap();
        assert_eq!((x, y), (400.0, 300.0));
        assert_eq!(normalized(x, y, viewport), Some([0.0, 0.0]));
    }

    #[test]
    fn page_corners_map_to_unit_square() {
        let viewport = ViewportSize::new(800, 600);
        let (x, y) = page_to_viewport(0.0, 0.0, 1000.0, 500.0, viewport).unwrap();
        assert_eq!(normalized(x, y, viewport), Some([-1.0, 1.0]));
        let (x, y) = page_to_viewport(1000.0, 500.0, 1000.0, 500.0, viewport).unwrap();
        assert_eq!(normalized(x, y, viewport), Some([1.0, -1.0]));
    }

    #[test]
    fn empty_page_or_viewport_is_ignored() {
        assert_eq!(page_to_viewport(1.0, 1.0, 0.0, 500.0, ViewportSize::new(8, 6)), None);
        assert_eq!(page_to_viewport(1.0, 1.0, 10.0, 5.0, ViewportSize::new(0, 6)), None);
    }
}
