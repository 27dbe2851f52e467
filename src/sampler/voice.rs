// Sampler voices - rate-stepped playback of a loaded sample

use crate::sampler::Sample;
use std::sync::Arc;

/// One playing sample.
///
/// The play rate becomes a fractional position step: rate 1.0 walks the
/// data at its native speed (adjusted for the output rate), 1.5 walks it
/// half again as fast, which raises the pitch. Values between source
/// samples are linearly interpolated. The voice deactivates itself when the
/// position runs off the end of the data; there is no looping and no
/// envelope, a key press is one shot.
pub struct SamplerVoice {
    sample: Arc<Sample>,
    position: f64,
    step: f64,
    gain: f32,
    active: bool,
}

impl SamplerVoice {
    pub fn start(sample: Arc<Sample>, rate: f32, output_rate: f32, gain: f32) -> Self {
        let step = rate as f64 * sample.sample_rate as f64 / output_rate as f64;
        Self {
            sample,
            position: 0.0,
            step: step.max(0.0),
            gain,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Produce the next output sample and advance the position.
    pub fn next_sample(&mut self) -> f32 {
        if !self.active {
            return 0.0;
        }

        let data = &self.sample.data;
        let index = self.position as usize;
        if index >= data.len() {
            self.active = false;
            return 0.0;
        }

        let a = data[index];
        let b = data.get(index + 1).copied().unwrap_or(0.0);
        let frac = self.position.fract() as f32;
        let value = (a + (b - a) * frac) * self.gain;

        self.position += self.step;
        if self.position >= data.len() as f64 {
            self.active = false;
        }

        value
    }
}

/// Fixed-size pool of voices mixed into the output stream.
///
/// Capacity is bounded so a burst of presses cannot grow without limit
/// inside the audio callback; when full, the oldest voice is stolen.
pub struct VoicePool {
    voices: Vec<SamplerVoice>,
    max_voices: usize,
}

impl VoicePool {
    pub fn new(max_voices: usize) -> Self {
        Self {
            voices: Vec::with_capacity(max_voices),
            max_voices,
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Start a new voice, stealing the oldest if the pool is full.
    pub fn trigger(&mut self, sample: Arc<Sample>, rate: f32, output_rate: f32, gain: f32) {
        if self.voices.len() >= self.max_voices {
            self.voices.remove(0);
        }
        self.voices
            .push(SamplerVoice::start(sample, rate, output_rate, gain));
    }

    /// Sum of all voices for one output frame.
    pub fn next_sample(&mut self) -> f32 {
        self.voices.iter_mut().map(|v| v.next_sample()).sum()
    }

    /// Drop finished voices. Called once per buffer, outside the per-frame
    /// loop.
    pub fn prune(&mut self) {
        self.voices.retain(|v| v.is_active());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(data: Vec<f32>, sample_rate: u32) -> Arc<Sample> {
        Arc::new(Sample {
            name: "test".to_string(),
            data,
            sample_rate,
        })
    }

    #[test]
    fn test_unit_rate_reads_back_the_data() {
        let s = sample(vec![0.1, 0.2, 0.3, 0.4], 48000);
        let mut voice = SamplerVoice::start(s, 1.0, 48000.0, 1.0);

        let out: Vec<f32> = (0..4).map(|_| voice.next_sample()).collect();
        assert_eq!(out, vec![0.1, 0.2, 0.3, 0.4]);
        assert!(!voice.is_active());
        assert_eq!(voice.next_sample(), 0.0);
    }

    #[test]
    fn test_raised_rate_finishes_sooner() {
        let s = sample(vec![0.5; 300], 48000);

        let mut normal = SamplerVoice::start(s.clone(), 1.0, 48000.0, 1.0);
        let mut raised = SamplerVoice::start(s, 1.5, 48000.0, 1.0);

        let lifetime = |v: &mut SamplerVoice| {
            let mut n = 0;
            while v.is_active() {
                v.next_sample();
                n += 1;
            }
            n
        };

        let normal_len = lifetime(&mut normal);
        let raised_len = lifetime(&mut raised);
        assert_eq!(normal_len, 300);
        // 1.5x rate covers the same data in two thirds of the time
        assert_eq!(raised_len, 200);
    }

    #[test]
    fn test_interpolation_between_samples() {
        let s = sample(vec![0.0, 1.0], 48000);
        let mut voice = SamplerVoice::start(s, 0.5, 48000.0, 1.0);

        assert_eq!(voice.next_sample(), 0.0);
        assert_eq!(voice.next_sample(), 0.5);
    }

    #[test]
    fn test_gain_scales_output() {
        let s = sample(vec![0.8], 48000);
        let mut voice = SamplerVoice::start(s, 1.0, 48000.0, 0.5);
        assert_eq!(voice.next_sample(), 0.4);
    }

    #[test]
    fn test_pool_steals_oldest_when_full() {
        let s = sample(vec![0.25; 1000], 48000);
        let mut pool = VoicePool::new(2);

        pool.trigger(s.clone(), 1.0, 48000.0, 1.0);
        pool.trigger(s.clone(), 1.0, 48000.0, 1.0);
        assert_eq!(pool.active_voices(), 2);

        pool.trigger(s, 1.0, 48000.0, 1.0);
        assert_eq!(pool.active_voices(), 2);

        // Two voices of 0.25 mix to 0.5
        assert!((pool.next_sample() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pool_prunes_finished_voices() {
        let s = sample(vec![0.1, 0.1], 48000);
        let mut pool = VoicePool::new(4);
        pool.trigger(s, 1.0, 48000.0, 1.0);

        pool.next_sample();
        pool.next_sample();
        pool.prune();
        assert_eq!(pool.active_voices(), 0);
        assert_eq!(pool.next_sample(), 0.0);
    }
}
