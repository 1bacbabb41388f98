use crate::core::InputHandler;
use crate::dom;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type MouseClosure = Closure<dyn FnMut(web::MouseEvent)>;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub input: Rc<RefCell<InputHandler>>,
    /// Last clicked pause-menu button, taken by the host.
    pub clicked: Rc<Cell<Option<usize>>>,
}

/// `mousemove`/`click` listeners on the canvas; removed by `detach`.
pub struct PointerListeners {
    canvas: web::HtmlCanvasElement,
    mousemove: MouseClosure,
    click: MouseClosure,
}

impl PointerListeners {
    pub fn attach(w: PointerWiring) -> anyhow::Result<Self> {
        let canvas = w.canvas.clone();

        let mv = w.clone();
        let mousemove = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let (x, y) = dom::pointer_canvas_px(&ev, &mv.canvas);
            mv.input.borrow_mut().handle_pointer_move(x, y);
        }) as Box<dyn FnMut(_)>);

        let ck = w;
        let click = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let (x, y) = dom::pointer_canvas_px(&ev, &ck.canvas);
            if let Some(i) = ck.input.borrow_mut().handle_click(x, y) {
                log::debug!("[mouse] menu button {}", i);
                ck.clicked.set(Some(i));
            }
        }) as Box<dyn FnMut(_)>);

        canvas
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("mousemove listener: {:?}", e))?;
        canvas
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("click listener: {:?}", e))?;

        Ok(Self {
            canvas,
            mousemove,
            click,
        })
    }

    pub fn detach(self) {
        _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.mousemove.as_ref().unchecked_ref(),
        );
        _ = self
            .canvas
            .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
    }
}
