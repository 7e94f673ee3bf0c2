use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::audio::device_manager::OutputDevices;
use crate::audio::sound_generator::render_cue_wav;
use crate::audio::{Cue, CuePlayer};
use crate::core::CueConfig;

/// Plays countdown cues through rodio.
///
/// The output stream is opened on first use, so a machine without audio
/// still runs; every cue then fails and is logged by the caller.
pub struct RodioCuePlayer {
    config: CueConfig,
    devices: OutputDevices,
    output: Option<(OutputStream, OutputStreamHandle)>,
    // Kept alive until the next cue replaces it.
    current_sink: Option<Sink>,
    rendered: HashMap<Cue, Arc<[u8]>>,
}

impl RodioCuePlayer {
    pub fn new(config: CueConfig) -> Self {
        Self {
            config,
            devices: OutputDevices::new(),
            output: None,
            current_sink: None,
            rendered: HashMap::new(),
        }
    }

    fn stream_handle(&mut self) -> anyhow::Result<&OutputStreamHandle> {
        if self.output.is_none() {
            let device = self.devices.resolve(self.config.output_device_name.as_deref())?;
            let output = OutputStream::try_from_device(&device)
                .map_err(|e| {
                    log::error!("Failed to create output stream: {}", e);
                    anyhow::anyhow!("Failed to create output stream: {}", e)
                })?;
            log::info!("Opened audio output for countdown cues");
            self.output = Some(output);
        }
        match &self.output {
            Some((_, handle)) => Ok(handle),
            None => Err(anyhow::anyhow!("Audio output unavailable")),
        }
    }

    fn wav_for(&mut self, cue: Cue) -> anyhow::Result<Arc<[u8]>> {
        if let Some(bytes) = self.rendered.get(&cue) {
            return Ok(Arc::clone(bytes));
        }
        let bytes: Arc<[u8]> = render_cue_wav(cue, &self.config)?.into();
        self.rendered.insert(cue, Arc::clone(&bytes));
        Ok(bytes)
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play(&mut self, cue: Cue) -> anyhow::Result<()> {
        let wav = self.wav_for(cue)?;
        let handle = self.stream_handle()?;

        let source = Decoder::new(Cursor::new(wav))
            .map_err(|e| {
                log::error!("Failed to decode {:?} cue: {}", cue, e);
                anyhow::anyhow!("Failed to decode cue: {}", e)
            })?;

        let sink = Sink::try_new(handle)
            .map_err(|e| {
                log::error!("Failed to create audio sink: {}", e);
                anyhow::anyhow!("Failed to create audio sink: {}", e)
            })?;

        sink.append(source);
        sink.play();
        self.current_sink = Some(sink);

        log::debug!("Playing {:?} cue", cue);
        Ok(())
    }
}
