//! Audio collaborator.
//!
//! Playback itself lives outside the core; screens only ask for a named
//! loop to start or stop and never wait for an answer.

use std::rc::Rc;

pub trait Audio {
    fn play_looping(&self, name: &str, volume: f32);
    fn stop(&self, name: &str);
}

/// Backend used when no sound device is wired up: records intent in the
/// log and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl Audio for SilentAudio {
    fn play_looping(&self, name: &str, volume: f32) {
        log::debug!("audio: loop '{}' at volume {:.2}", name, volume);
    }

    fn stop(&self, name: &str) {
        log::debug!("audio: stop '{}'", name);
    }
}

/// A looping sound that plays for as long as this value is alive and is
/// stopped when it is dropped.
pub struct LoopingSound {
    audio: Rc<dyn Audio>,
    name: &'static str,
}

impl LoopingSound {
    pub fn start(audio: Rc<dyn Audio>, name: &'static str, volume: f32) -> Self {
        audio.play_looping(name, volume);
        Self { audio, name }
    }
}

impl Drop for LoopingSound {
    fn drop(&mut self) {
        self.audio.stop(self.name);
    }
}
