use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub base_url: String,
    pub state_dir: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(base_url: String, state_dir: PathBuf) -> Self {
        Self {
            base_url,
            state_dir,
        }
    }
}
