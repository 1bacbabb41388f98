use crate::core::{AudioClip, AudioError, AudioManager, MusicTrack, SoundEffect};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// `<audio>` element backed clip.
pub struct HtmlClip {
    el: web::HtmlAudioElement,
    // set once handed to `release_on_end`; a rejected play then releases too
    disposable: Rc<Cell<bool>>,
}

impl HtmlClip {
    pub fn load(url: &str) -> Option<Self> {
        match web::HtmlAudioElement::new_with_src(url) {
            Ok(el) => {
                el.set_preload("auto");
                Some(Self::wrap(el))
            }
            Err(e) => {
                log::error!("[audio] {} element error: {:?}", url, e);
                None
            }
        }
    }

    fn wrap(el: web::HtmlAudioElement) -> Self {
        Self {
            el,
            disposable: Rc::new(Cell::new(false)),
        }
    }
}

fn release(el: &web::HtmlAudioElement) {
    el.set_onended(None);
    el.remove_attribute("src").ok();
}

impl AudioClip for HtmlClip {
    fn play(&self) -> Result<(), AudioError> {
        let promise = self
            .el
            .play()
            .map_err(|e| AudioError::PlaybackRejected(format!("{:?}", e)))?;
        // autoplay rejections arrive asynchronously; `ended` never fires then
        let el = self.el.clone();
        let disposable = self.disposable.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("[audio] play rejected: {:?}", e);
                if disposable.get() {
                    release(&el);
                }
            }
        });
        Ok(())
    }

    fn pause(&self) {
        _ = self.el.pause();
    }

    fn rewind(&self) {
        self.el.set_current_time(0.0);
    }

    fn set_looping(&self, looping: bool) {
        self.el.set_loop(looping);
    }

    fn set_volume(&self, volume: f32) {
        self.el.set_volume(volume.clamp(0.0, 1.0) as f64);
    }

    fn duplicate(&self) -> Result<Self, AudioError> {
        self.el
            .clone_node()
            .map_err(|e| AudioError::DuplicateFailed(format!("{:?}", e)))?
            .dyn_into::<web::HtmlAudioElement>()
            .map(Self::wrap)
            .map_err(|e| AudioError::DuplicateFailed(format!("{:?}", e)))
    }

    fn release_on_end(self) {
        self.disposable.set(true);
        let on_ended = Closure::once_into_js(move |ev: web::Event| {
            if let Some(el) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlAudioElement>().ok())
            {
                release(&el);
            }
        });
        self.el.set_onended(Some(on_ended.unchecked_ref()));
    }
}

/// Loads every clip from `<base>/<file_name>`.
pub fn load_clips(base: &str) -> AudioManager<HtmlClip> {
    let base = base.trim_end_matches('/');
    AudioManager::load(
        |t: MusicTrack| HtmlClip::load(&format!("{}/{}", base, t.file_name())),
        |s: SoundEffect| HtmlClip::load(&format!("{}/{}", base, s.file_name())),
    )
}
