// One error type for the whole demo.
// Every variant states *where* things went wrong. The lighting math itself
// never fails; only setup (window, surfaces, config) and snapshots do.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing the frame buffer to the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// An offscreen surface (brick wall, light mask) could not be allocated
    #[error("texture error: {0}")]
    Texture(String),

    /// A scene's setup step failed; the program does not start
    #[error("scene `{scene}` setup failed: {source}")]
    SceneSetup {
        scene: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// Bad config file or environment override
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a snapshot PNG failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Wrap a failure with the name of the scene that was being set up.
    pub fn in_scene(self, scene: &'static str) -> Self {
        Error::SceneSetup { scene, source: Box::new(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_setup_message_names_scene_and_cause() {
        let err = Error::Texture("zero-sized surface 0x10".into()).in_scene("soft lights");
        assert_eq!(
            err.to_string(),
            "scene `soft lights` setup failed: texture error: zero-sized surface 0x10"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
