use anyhow::Result;
use particle_image::{application::Application, config::Config, logging};

fn main() -> Result<()> {
    let _logger = logging::setup()?;
    Application::new(Config::default())?.run()
}
