//! Audio cues via the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed. All
//! playback is fire-and-forget: failures are swallowed and never block the
//! frame loop. A retriggered cue simply starts a fresh oscillator.

use crate::sim::CueKind;

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<web_sys::AudioContext>,
    volume: f32,
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = web_sys::AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    /// Prime the output channels after the first user gesture: resume the
    /// context and run each cue once at zero gain, so later fire-and-forget
    /// triggers survive autoplay gating.
    pub fn warm_up(&self) {
        let Some(ctx) = &self.ctx else { return };
        let _ = ctx.resume();
        self.play_hit(ctx, 0.0);
        self.play_lose(ctx, 0.0);
        log::info!("Audio channels warmed up");
    }

    /// Play a cue (fire-and-forget)
    pub fn play(&self, cue: CueKind) {
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            CueKind::Hit => self.play_hit(ctx, self.volume),
            CueKind::Lose => self.play_lose(ctx, self.volume),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &web_sys::AudioContext,
        freq: f32,
        osc_type: web_sys::OscillatorType,
    ) -> Option<(web_sys::OscillatorNode, web_sys::GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Hit - short bright ping
    fn play_hit(&self, ctx: &web_sys::AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, web_sys::OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time((vol * 0.3).max(0.0001), t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Lose - sad descending tone
    fn play_lose(&self, ctx: &web_sys::AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, web_sys::OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time((vol * 0.4).max(0.0001), t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.5)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.6).ok();
    }
}

/// Native stub: same surface, no output
#[cfg(not(target_arch = "wasm32"))]
pub struct AudioManager;

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new() -> Self {
        Self
    }

    pub fn warm_up(&self) {}

    pub fn play(&self, _cue: CueKind) {}
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}
