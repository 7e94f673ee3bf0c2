use cpal::{Device, Host};
use cpal::traits::{DeviceTrait, HostTrait};

/// Resolves the output device cues are played on.
pub struct OutputDevices {
    host: Host,
}

impl OutputDevices {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    /// The named device if present, the system default otherwise.
    pub fn resolve(&self, name: Option<&str>) -> anyhow::Result<Device> {
        if let Some(name) = name {
            match self.find(name) {
                Ok(Some(device)) => {
                    log::debug!("Using configured audio device: {}", name);
                    return Ok(device);
                }
                Ok(None) => log::warn!("Audio device '{}' not found, falling back to default", name),
                Err(e) => log::warn!("Failed to look up audio device '{}': {}", name, e),
            }
        }
        self.default_device()
    }

    fn find(&self, name: &str) -> anyhow::Result<Option<Device>> {
        let devices = self.host.output_devices()
            .map_err(|e| anyhow::anyhow!("Failed to enumerate devices: {}", e))?;
        Ok(devices.into_iter().find(|device| {
            device.name().map(|n| n == name).unwrap_or(false)
        }))
    }

    fn default_device(&self) -> anyhow::Result<Device> {
        self.host.default_output_device()
            .ok_or_else(|| {
                log::error!("No default audio output device available");
                anyhow::anyhow!("No default audio output device available")
            })
    }
}

impl Default for OutputDevices {
    fn default() -> Self {
        Self::new()
    }
}
