use crate::error::SettingsError;

/// Specifies how strictly and how deeply a SoundFont is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderSettings {
    /// The number of container levels allowed, counting the outermost one.
    pub max_depth: usize,
    /// The value indicating whether odd-length chunks are followed by a pad byte.
    pub word_aligned: bool,
    /// The value indicating whether an unknown sub-chunk aborts the decode.
    pub strict: bool,
}

impl DecoderSettings {
    const DEFAULT_MAX_DEPTH: usize = 8;
    const DEFAULT_WORD_ALIGNED: bool = false;
    const DEFAULT_STRICT: bool = false;

    pub fn new() -> Self {
        Self {
            max_depth: DecoderSettings::DEFAULT_MAX_DEPTH,
            word_aligned: DecoderSettings::DEFAULT_WORD_ALIGNED,
            strict: DecoderSettings::DEFAULT_STRICT,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SettingsError> {
        DecoderSettings::check_max_depth(self.max_depth)?;

        Ok(())
    }

    fn check_max_depth(value: usize) -> Result<(), SettingsError> {
        if !(1..=256).contains(&value) {
            return Err(SettingsError::MaxDepthOutOfRange(value));
        }

        Ok(())
    }
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Self::new()
    }
}
